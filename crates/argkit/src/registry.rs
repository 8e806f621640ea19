//! Name registry: owns every descriptor and resolves aliases to them.
//!
//! Descriptors live in an `IndexMap` keyed by canonical name, so the integer
//! index doubles as the stable key handed out to builders and the iteration
//! order is the registration order.

use crate::descriptor::ArgDescriptor;
use crate::error::{Error, Result};
use crate::tokenize::is_negative_number;
use indexmap::IndexMap;
use std::collections::HashMap;

/// Names that always belong to the built-in help flag.
pub const RESERVED_NAMES: [&str; 2] = ["help", "h"];

/// Index of a descriptor inside its registry.
pub type ArgKey = usize;

/// Names of a new argument after validation, dashes stripped.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeclaredNames {
    pub name: String,
    pub short: Vec<String>,
    pub long: Vec<String>,
    pub positional: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NameForm {
    Long(String),
    Short(String),
    Bare(String),
}

impl NameForm {
    fn content(&self) -> &str {
        match self {
            Self::Long(s) | Self::Short(s) | Self::Bare(s) => s,
        }
    }
}

/// Strip one `--` or `-` prefix.
pub(crate) fn normalize(raw: &str) -> &str {
    let raw = raw.trim();
    raw.strip_prefix("--")
        .or_else(|| raw.strip_prefix('-'))
        .unwrap_or(raw)
}

fn check_content(raw: &str, content: &str) -> Result<()> {
    if content.starts_with('-') {
        return Err(Error::invalid_name(raw, "too many leading dashes"));
    }
    if content.chars().any(|c| c.is_whitespace() || c == '=') {
        return Err(Error::invalid_name(
            raw,
            "names must not contain whitespace or '='",
        ));
    }
    Ok(())
}

fn classify(raw: &str) -> Result<NameForm> {
    let trimmed = raw.trim();
    if let Some(content) = trimmed.strip_prefix("--") {
        if content.is_empty() {
            return Err(Error::invalid_name(raw, "long name must not be empty after --"));
        }
        check_content(raw, content)?;
        return Ok(NameForm::Long(content.to_string()));
    }
    if let Some(content) = trimmed.strip_prefix('-') {
        if content.is_empty() {
            return Err(Error::invalid_name(raw, "short name must not be empty after -"));
        }
        check_content(raw, content)?;
        if is_negative_number(trimmed) {
            return Err(Error::invalid_name(
                raw,
                "short name would be read as a negative number",
            ));
        }
        return Ok(NameForm::Short(content.to_string()));
    }
    if trimmed.is_empty() {
        return Err(Error::invalid_name(raw, "name must not be empty"));
    }
    check_content(raw, trimmed)?;
    Ok(NameForm::Bare(trimmed.to_string()))
}

#[derive(Debug, Default)]
pub struct Registry {
    args: IndexMap<String, ArgDescriptor>,
    aliases: HashMap<String, ArgKey>,
    positional: Vec<ArgKey>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate a set of names for a new argument without registering it.
    ///
    /// A single bare name declares a positional argument. Otherwise every
    /// name needs a `-` or `--` prefix.
    pub(crate) fn declare(&self, names: &[&str]) -> Result<DeclaredNames> {
        let Some(first) = names.first() else {
            return Err(Error::invalid_name("", "at least one name is required"));
        };

        let forms = names
            .iter()
            .map(|raw| classify(raw))
            .collect::<Result<Vec<_>>>()?;

        let positional = matches!(forms[0], NameForm::Bare(_));
        if positional && forms.len() > 1 {
            return Err(Error::invalid_name(
                *first,
                "optional argument names must start with - or --",
            ));
        }
        if !positional {
            if let Some(idx) = forms.iter().position(|f| matches!(f, NameForm::Bare(_))) {
                return Err(Error::invalid_name(
                    names[idx],
                    "optional argument names must start with - or --",
                ));
            }
        }

        let mut seen: Vec<&str> = Vec::with_capacity(forms.len());
        for (raw, form) in names.iter().zip(&forms) {
            let content = form.content();
            if RESERVED_NAMES.contains(&content) {
                return Err(Error::ReservedName(raw.trim().to_string()));
            }
            if seen.contains(&content) || self.aliases.contains_key(content) {
                return Err(Error::DuplicateName(content.to_string()));
            }
            seen.push(content);
        }

        let mut declared = DeclaredNames {
            name: forms[0].content().to_string(),
            short: Vec::new(),
            long: Vec::new(),
            positional,
        };
        for form in forms {
            match form {
                NameForm::Long(s) => declared.long.push(s),
                NameForm::Short(s) => declared.short.push(s),
                NameForm::Bare(_) => {}
            }
        }
        Ok(declared)
    }

    /// Store a descriptor whose names passed `declare`.
    pub(crate) fn insert(&mut self, desc: ArgDescriptor) -> ArgKey {
        let key = self.args.len();
        let names: Vec<String> = desc.names().map(str::to_string).collect();
        for name in names {
            self.aliases.insert(name, key);
        }
        if desc.positional {
            self.positional.push(key);
        }
        self.args.insert(desc.name.clone(), desc);
        key
    }

    /// Resolve any spelling of a name (`count`, `-c`, `--count`).
    pub fn resolve(&self, name: &str) -> Option<ArgKey> {
        self.aliases.get(normalize(name)).copied()
    }

    /// Resolve the content of a `--name` token among long forms only.
    pub fn resolve_long(&self, name: &str) -> Option<ArgKey> {
        let key = *self.aliases.get(name)?;
        self.get(key)?
            .long
            .iter()
            .any(|l| l == name)
            .then_some(key)
    }

    /// Resolve the content of a `-n` token among short forms only.
    pub fn resolve_short(&self, name: &str) -> Option<ArgKey> {
        let key = *self.aliases.get(name)?;
        self.get(key)?
            .short
            .iter()
            .any(|s| s == name)
            .then_some(key)
    }

    pub fn get(&self, key: ArgKey) -> Option<&ArgDescriptor> {
        self.args.get_index(key).map(|(_, d)| d)
    }

    pub(crate) fn get_mut(&mut self, key: ArgKey) -> Option<&mut ArgDescriptor> {
        self.args.get_index_mut(key).map(|(_, d)| d)
    }

    pub fn lookup(&self, name: &str) -> Option<&ArgDescriptor> {
        self.resolve(name).and_then(|key| self.get(key))
    }

    /// Key of the positional argument at `ordinal` (0-based, declaration order).
    pub fn positional(&self, ordinal: usize) -> Option<ArgKey> {
        self.positional.get(ordinal).copied()
    }

    pub fn positional_count(&self) -> usize {
        self.positional.len()
    }

    pub fn len(&self) -> usize {
        self.args.len()
    }

    pub fn is_empty(&self) -> bool {
        self.args.is_empty()
    }

    /// Descriptors in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ArgDescriptor> {
        self.args.values()
    }

    pub(crate) fn iter_mut(&mut self) -> impl Iterator<Item = &mut ArgDescriptor> {
        self.args.values_mut()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{ArgType, Value};

    fn descriptor(names: DeclaredNames, arg_type: ArgType) -> ArgDescriptor {
        ArgDescriptor {
            name: names.name,
            short: names.short,
            long: names.long,
            help: String::new(),
            required: false,
            arg_type,
            default: Value::None,
            parsed: Value::None,
            explicit: false,
            positional: names.positional,
            value_name: None,
            validators: Vec::new(),
        }
    }

    fn register(reg: &mut Registry, names: &[&str]) -> Result<ArgKey> {
        let declared = reg.declare(names)?;
        Ok(reg.insert(descriptor(declared, ArgType::Str)))
    }

    #[test]
    fn canonical_key_is_first_name() {
        let reg = Registry::new();
        let declared = reg.declare(&["-c", "--count"]).unwrap();
        assert_eq!(declared.name, "c");
        assert_eq!(declared.short, vec!["c".to_string()]);
        assert_eq!(declared.long, vec!["count".to_string()]);
        assert!(!declared.positional);
    }

    #[test]
    fn lookups_are_dash_insensitive() {
        let mut reg = Registry::new();
        let key = register(&mut reg, &["-c", "--count"]).unwrap();
        for name in ["c", "-c", "--c", "count", "-count", "--count"] {
            assert_eq!(reg.resolve(name), Some(key), "{name}");
        }
        assert_eq!(reg.resolve_long("count"), Some(key));
        assert_eq!(reg.resolve_long("c"), None);
        assert_eq!(reg.resolve_short("c"), Some(key));
        assert_eq!(reg.resolve_short("count"), None);
    }

    #[test]
    fn positional_order_follows_registration() {
        let mut reg = Registry::new();
        let a = register(&mut reg, &["input"]).unwrap();
        register(&mut reg, &["--flag"]).unwrap();
        let b = register(&mut reg, &["output"]).unwrap();
        assert_eq!(reg.positional_count(), 2);
        assert_eq!(reg.positional(0), Some(a));
        assert_eq!(reg.positional(1), Some(b));
        assert_eq!(reg.positional(2), None);
        assert_eq!(reg.resolve_long("input"), None);
    }

    #[test]
    fn rejects_reserved_names() {
        let reg = Registry::new();
        for names in [&["--help"][..], &["-h"], &["help"], &["-x", "--help"]] {
            assert!(
                matches!(reg.declare(names), Err(Error::ReservedName(_))),
                "{names:?}"
            );
        }
    }

    #[test]
    fn rejects_duplicates_across_and_within_calls() {
        let mut reg = Registry::new();
        register(&mut reg, &["-c", "--count"]).unwrap();
        assert_eq!(
            reg.declare(&["--count"]),
            Err(Error::DuplicateName("count".to_string()))
        );
        assert_eq!(
            reg.declare(&["-c"]),
            Err(Error::DuplicateName("c".to_string()))
        );
        // Dash-insensitive: a positional cannot reuse an option's name either.
        assert!(matches!(reg.declare(&["count"]), Err(Error::DuplicateName(_))));
        assert!(matches!(
            reg.declare(&["-n", "--n"]),
            Err(Error::DuplicateName(_))
        ));
    }

    #[test]
    fn rejects_malformed_names() {
        let reg = Registry::new();
        for names in [
            &[][..],
            &["--"],
            &["-"],
            &[""],
            &["c", "count"],
            &["-c", "count"],
            &["---x"],
            &["--a b"],
            &["--k=v"],
            &["-1"],
        ] {
            assert!(
                matches!(reg.declare(names), Err(Error::InvalidName { .. })),
                "{names:?}"
            );
        }
    }

    #[test]
    fn multi_char_short_names_are_allowed() {
        let reg = Registry::new();
        let declared = reg.declare(&["-pth", "--path"]).unwrap();
        assert_eq!(declared.short, vec!["pth".to_string()]);
    }
}
