use crate::error::Result;
use crate::value::{ArgType, Value};
use argkit_metadata::ArgSchema;
use std::fmt;

/// Type-erased validator: receives the argument's canonical name and its
/// coerced value.
pub type Validator = Box<dyn Fn(&str, &Value) -> Result<()>>;

/// Metadata and state for one declared argument.
pub struct ArgDescriptor {
    pub(crate) name: String,
    pub(crate) short: Vec<String>,
    pub(crate) long: Vec<String>,
    pub(crate) help: String,
    pub(crate) required: bool,
    pub(crate) arg_type: ArgType,
    pub(crate) default: Value,
    pub(crate) parsed: Value,
    pub(crate) explicit: bool,
    pub(crate) positional: bool,
    pub(crate) value_name: Option<String>,
    pub(crate) validators: Vec<Validator>,
}

impl ArgDescriptor {
    /// Canonical name: the first declared name without dashes.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Every alias without dashes, canonical name first.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        let aliases = self
            .short
            .iter()
            .chain(self.long.iter())
            .map(String::as_str)
            .filter(move |n| *n != self.name);
        std::iter::once(self.name.as_str()).chain(aliases)
    }

    /// Names declared with a single dash (stored without it).
    pub fn short_forms(&self) -> &[String] {
        &self.short
    }

    /// Names declared with two dashes (stored without them).
    pub fn long_forms(&self) -> &[String] {
        &self.long
    }

    pub fn help(&self) -> &str {
        &self.help
    }

    pub fn is_required(&self) -> bool {
        self.required
    }

    pub fn arg_type(&self) -> ArgType {
        self.arg_type
    }

    pub fn default_value(&self) -> &Value {
        &self.default
    }

    pub fn parsed_value(&self) -> &Value {
        &self.parsed
    }

    pub fn is_positional(&self) -> bool {
        self.positional
    }

    /// Placeholder for the value in help output; defaults to the first long
    /// name (or the canonical name) in upper case.
    pub fn value_name(&self) -> String {
        if let Some(name) = &self.value_name {
            return name.clone();
        }
        self.long
            .first()
            .unwrap_or(&self.name)
            .to_ascii_uppercase()
    }

    /// How the argument is spelled in messages: `--long`, `-s` or `<name>`.
    pub fn display_name(&self) -> String {
        if self.positional {
            format!("<{}>", self.name)
        } else if let Some(long) = self.long.first() {
            format!("--{long}")
        } else if let Some(short) = self.short.first() {
            format!("-{short}")
        } else {
            self.name.clone()
        }
    }

    pub(crate) fn reset(&mut self) {
        self.parsed = Value::None;
        self.explicit = false;
    }

    /// Run the validator chain against a candidate value; absent values skip it.
    pub(crate) fn run_validators(&self, value: &Value) -> Result<()> {
        if value.is_none() {
            return Ok(());
        }
        for validator in &self.validators {
            validator(&self.name, value)?;
        }
        Ok(())
    }

    pub fn to_schema(&self) -> ArgSchema {
        ArgSchema {
            name: self.name.clone(),
            short: self.short.clone(),
            long: self.long.clone(),
            help: self.help.clone(),
            required: self.required,
            value_type: self.arg_type.to_string(),
            default_value: (!self.default.is_none()).then(|| self.default.to_string()),
            value_name: self.value_name.clone(),
            positional: self.positional,
        }
    }
}

impl fmt::Debug for ArgDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArgDescriptor")
            .field("name", &self.name)
            .field("short", &self.short)
            .field("long", &self.long)
            .field("required", &self.required)
            .field("arg_type", &self.arg_type)
            .field("default", &self.default)
            .field("parsed", &self.parsed)
            .field("positional", &self.positional)
            .field("validators", &self.validators.len())
            .finish()
    }
}
