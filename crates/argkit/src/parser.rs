//! The `Parser` facade: registration, parsing and typed queries.

use crate::convert;
use crate::descriptor::ArgDescriptor;
use crate::error::{Error, Result};
use crate::help::{self, ColorChoice, HelpConfig, HelpHandler, HelpRequest};
use crate::registry::{ArgKey, Registry};
use crate::tokenize;
use crate::validate::{self, Numeric, Text};
use crate::value::{ArgType, ArgValue, Value};
use argkit_metadata::CommandSchema;
use std::ffi::OsString;
use std::marker::PhantomData;

/// Argument name collection accepted by `Parser::add`.
pub trait ArgNames<'a> {
    type Iter: Iterator<Item = &'a str>;
    fn iter(self) -> Self::Iter;
}

impl<'a> ArgNames<'a> for &'a str {
    type Iter = std::iter::Once<&'a str>;

    fn iter(self) -> Self::Iter {
        std::iter::once(self)
    }
}

impl<'a> ArgNames<'a> for &'a [&'a str] {
    type Iter = std::iter::Copied<std::slice::Iter<'a, &'a str>>;

    fn iter(self) -> Self::Iter {
        self.iter().copied()
    }
}

impl<'a, const N: usize> ArgNames<'a> for [&'a str; N] {
    type Iter = std::array::IntoIter<&'a str, N>;

    fn iter(self) -> Self::Iter {
        self.into_iter()
    }
}

/// Result of a successful `Parser::parse` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every argument was assigned, converted and validated.
    Parsed,
    /// `-h`/`--help` was given and the help handler returned normally.
    /// No argument values were set.
    Help,
}

/// Handle to a freshly registered argument for attaching validators.
///
/// Holds only the registry and the argument's key; dropping it ends the
/// registration borrow.
pub struct ArgBuilder<'p, T> {
    registry: &'p mut Registry,
    key: ArgKey,
    _kind: PhantomData<fn() -> T>,
}

impl<'p, T: ArgValue + 'static> ArgBuilder<'p, T> {
    fn new(registry: &'p mut Registry, key: ArgKey) -> Self {
        Self {
            registry,
            key,
            _kind: PhantomData,
        }
    }

    pub fn key(&self) -> ArgKey {
        self.key
    }

    /// Attach a validator. Validators chain: all of them run, in the order
    /// they were attached, and the first error aborts the parse.
    pub fn validate<F>(self, f: F) -> Self
    where
        F: Fn(&str, &T) -> Result<()> + 'static,
    {
        if let Some(desc) = self.registry.get_mut(self.key) {
            desc.validators.push(validate::erase(f));
        }
        self
    }

    /// Placeholder shown in help output (`--output <FILE>`).
    pub fn value_name(self, name: impl Into<String>) -> Self {
        if let Some(desc) = self.registry.get_mut(self.key) {
            desc.value_name = Some(name.into());
        }
        self
    }
}

impl<T: Numeric + 'static> ArgBuilder<'_, T> {
    pub fn in_range(self, min: T::Item, max: T::Item) -> Self {
        self.validate(validate::in_range::<T>(min, max))
    }
}

impl<T: Text + 'static> ArgBuilder<'_, T> {
    pub fn one_of<I, S>(self, allowed: I) -> Self
    where
        I: IntoIterator<Item = S> + 'static,
        S: Into<String> + 'static,
    {
        self.validate(validate::one_of::<T, _, _>(allowed))
    }

    pub fn alpha(self) -> Self {
        self.validate(validate::alpha::<T>())
    }

    pub fn alphanumeric(self) -> Self {
        self.validate(validate::alphanumeric::<T>())
    }

    pub fn numeric(self) -> Self {
        self.validate(validate::numeric::<T>())
    }

    pub fn email(self) -> Self {
        self.validate(validate::email::<T>())
    }

    pub fn url(self) -> Self {
        self.validate(validate::url::<T>())
    }

    pub fn ip_address(self) -> Self {
        self.validate(validate::ip_address::<T>())
    }

    pub fn ipv4(self) -> Self {
        self.validate(validate::ipv4::<T>())
    }

    pub fn ipv6(self) -> Self {
        self.validate(validate::ipv6::<T>())
    }

    pub fn mac_address(self) -> Self {
        self.validate(validate::mac_address::<T>())
    }

    pub fn uuid(self) -> Self {
        self.validate(validate::uuid::<T>())
    }

    pub fn path_exists(self) -> Self {
        self.validate(validate::path_exists::<T>())
    }

    pub fn is_file(self) -> Self {
        self.validate(validate::is_file::<T>())
    }

    pub fn is_directory(self) -> Self {
        self.validate(validate::is_directory::<T>())
    }
}

/// Argument registry plus parse state for one program.
///
/// ```
/// use argkit::Parser;
///
/// let mut cli = Parser::new("prog");
/// cli.add_str("filename", "Input file", None)?;
/// cli.add_int(["-c", "--count"], "Number of items", Some(10))?
///     .in_range(1, 100);
/// cli.parse(["prog", "input.txt", "--count", "7"])?;
///
/// assert_eq!(cli.get_str("filename")?, "input.txt");
/// assert_eq!(cli.get_int("-c")?, 7);
/// # Ok::<(), argkit::Error>(())
/// ```
pub struct Parser {
    program: String,
    config: HelpConfig,
    registry: Registry,
    help_handler: HelpHandler,
}

impl Parser {
    /// Create a parser whose help handler prints help and exits with 0.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            config: HelpConfig::default(),
            registry: Registry::new(),
            help_handler: Box::new(help::print_and_exit),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn config(&self) -> &HelpConfig {
        &self.config
    }

    pub fn registry(&self) -> &Registry {
        &self.registry
    }

    /// Declared arguments in registration order.
    pub fn descriptors(&self) -> impl Iterator<Item = &ArgDescriptor> {
        self.registry.iter()
    }

    /// Text shown above the usage line.
    pub fn header(&mut self, text: impl Into<String>) -> &mut Self {
        self.config.header = text.into();
        self
    }

    /// Text shown between the usage line and the argument tables.
    pub fn description(&mut self, text: impl Into<String>) -> &mut Self {
        self.config.description = text.into();
        self
    }

    /// Text shown after the argument tables.
    pub fn footer(&mut self, text: impl Into<String>) -> &mut Self {
        self.config.footer = text.into();
        self
    }

    pub fn color(&mut self, choice: ColorChoice) -> &mut Self {
        self.config.color = choice;
        self
    }

    /// Replace the help handler. If the handler returns `Ok`, `parse`
    /// returns `ParseOutcome::Help`; an `Err` propagates out of `parse`.
    pub fn on_help<F>(&mut self, handler: F) -> &mut Self
    where
        F: FnMut(&HelpRequest<'_>) -> Result<()> + 'static,
    {
        self.help_handler = Box::new(handler);
        self
    }

    /// Declare an argument.
    ///
    /// A single bare name (`"file"`) declares a positional argument, which is
    /// always required and cannot carry a default. Dash-prefixed names
    /// (`"-c"`, `"--count"`) declare an optional argument; it is required
    /// when no default is given, except booleans, which never are.
    pub fn add<'a, T: ArgValue + 'static>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<T>,
    ) -> Result<ArgBuilder<'_, T>> {
        let names: Vec<&str> = names.iter().collect();
        let declared = self.registry.declare(&names)?;

        if declared.positional {
            let reason = if default.is_some() {
                Some("positional arguments cannot have default values")
            } else if T::TYPE == ArgType::Bool {
                Some("positional arguments cannot be boolean flags")
            } else if T::TYPE.is_list() {
                Some("positional arguments cannot be lists")
            } else {
                None
            };
            if let Some(reason) = reason {
                return Err(Error::invalid_argument(declared.name, reason));
            }
        }

        let default = default.map(ArgValue::into_value).unwrap_or_default();
        let required = default.is_none() && T::TYPE != ArgType::Bool;
        tracing::debug!(
            name = %declared.name,
            kind = %T::TYPE,
            required,
            positional = declared.positional,
            "registered argument"
        );

        let key = self.registry.insert(ArgDescriptor {
            name: declared.name,
            short: declared.short,
            long: declared.long,
            help: help.into(),
            required,
            arg_type: T::TYPE,
            default,
            parsed: Value::None,
            explicit: false,
            positional: declared.positional,
            value_name: None,
            validators: Vec::new(),
        });
        Ok(ArgBuilder::new(&mut self.registry, key))
    }

    pub fn add_int<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<i64>,
    ) -> Result<ArgBuilder<'_, i64>> {
        self.add(names, help, default)
    }

    pub fn add_float<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<f64>,
    ) -> Result<ArgBuilder<'_, f64>> {
        self.add(names, help, default)
    }

    pub fn add_bool<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<bool>,
    ) -> Result<ArgBuilder<'_, bool>> {
        self.add(names, help, default)
    }

    pub fn add_str<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<&str>,
    ) -> Result<ArgBuilder<'_, String>> {
        self.add(names, help, default.map(str::to_string))
    }

    pub fn add_ints<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<Vec<i64>>,
    ) -> Result<ArgBuilder<'_, Vec<i64>>> {
        self.add(names, help, default)
    }

    pub fn add_floats<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<Vec<f64>>,
    ) -> Result<ArgBuilder<'_, Vec<f64>>> {
        self.add(names, help, default)
    }

    pub fn add_bools<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<Vec<bool>>,
    ) -> Result<ArgBuilder<'_, Vec<bool>>> {
        self.add(names, help, default)
    }

    pub fn add_strs<'a>(
        &mut self,
        names: impl ArgNames<'a>,
        help: impl Into<String>,
        default: Option<&[&str]>,
    ) -> Result<ArgBuilder<'_, Vec<String>>> {
        let default = default.map(|d| d.iter().map(|s| s.to_string()).collect());
        self.add(names, help, default)
    }

    /// Attach a validator to an already registered argument by name.
    pub fn set_validator<T, F>(&mut self, name: &str, f: F) -> Result<()>
    where
        T: ArgValue + 'static,
        F: Fn(&str, &T) -> Result<()> + 'static,
    {
        let key = self
            .registry
            .resolve(name)
            .ok_or_else(|| Error::UnknownArgument(name.to_string()))?;
        let Some(desc) = self.registry.get_mut(key) else {
            return Err(Error::UnknownArgument(name.to_string()));
        };
        if desc.arg_type != T::TYPE {
            return Err(Error::TypeMismatch {
                name: desc.name.clone(),
                requested: T::TYPE,
                stored: desc.arg_type,
            });
        }
        desc.validators.push(validate::erase(f));
        Ok(())
    }

    /// Parse `argv`, whose first element is the program name.
    ///
    /// `-h`/`--help` anywhere before a `--` separator runs the help handler
    /// and skips everything else, including required-argument checks.
    /// Each call starts from a clean state.
    pub fn parse<I, S>(&mut self, argv: I) -> Result<ParseOutcome>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let argv: Vec<String> = argv.into_iter().map(|s| s.as_ref().to_string()).collect();
        let tokens = argv.get(1..).unwrap_or_default();

        for desc in self.registry.iter_mut() {
            desc.reset();
        }
        if self.program.is_empty()
            && let Some(program) = argv.first()
        {
            self.program = program.clone();
        }
        tracing::debug!(program = %self.program, tokens = tokens.len(), "parsing arguments");

        if tokenize::wants_help(tokens) {
            tracing::debug!("help requested, skipping argument processing");
            let text = help::render(self, self.config.color.enabled());
            let program = self.program.clone();
            (self.help_handler)(&HelpRequest {
                program: &program,
                text: &text,
            })?;
            return Ok(ParseOutcome::Help);
        }

        let pending = tokenize::assign(&self.registry, tokens)?;
        let mut resolved: Vec<(Value, bool)> = Vec::with_capacity(pending.len());
        for (desc, raw) in self.registry.iter().zip(pending) {
            let (value, explicit) = match raw {
                Some(raw) => (convert::coerce(&desc.name, desc.arg_type, raw)?, true),
                None if desc.required => {
                    return Err(Error::MissingArgument(desc.display_name()));
                }
                None => (desc.default.clone(), false),
            };
            desc.run_validators(&value)?;
            resolved.push((value, explicit));
        }

        // Values are only stored once every argument converted and validated.
        for (desc, (value, explicit)) in self.registry.iter_mut().zip(resolved) {
            desc.parsed = value;
            desc.explicit = explicit;
        }

        tracing::debug!(args = self.registry.len(), "arguments parsed");
        Ok(ParseOutcome::Parsed)
    }

    /// Parse the current process arguments.
    ///
    /// Arguments that are not valid UTF-8 are rejected with `InvalidValue`.
    pub fn parse_env(&mut self) -> Result<ParseOutcome> {
        let argv = utf8_args(std::env::args_os())?;
        self.parse(argv)
    }

    fn lookup(&self, name: &str) -> Result<&ArgDescriptor> {
        self.registry
            .lookup(name)
            .ok_or_else(|| Error::UnknownArgument(name.to_string()))
    }

    /// Read an argument's value; `name` may be any alias, with or without
    /// dashes.
    ///
    /// Booleans never fail: an unset, unknown or non-boolean argument reads
    /// as its boolean default or `false`. Other kinds fall back to the
    /// default when nothing was parsed and report `MissingArgument` when
    /// there is none.
    pub fn get<T: ArgValue>(&self, name: &str) -> Result<T> {
        if T::TYPE == ArgType::Bool {
            let desc = self.registry.lookup(name);
            let value = desc
                .and_then(|d| T::from_value(&d.parsed).or_else(|| T::from_value(&d.default)))
                .or_else(|| T::from_value(&Value::Bool(false)));
            return value.ok_or_else(|| Error::UnknownArgument(name.to_string()));
        }

        let desc = self.lookup(name)?;
        match &desc.parsed {
            Value::None => T::from_value(&desc.default)
                .ok_or_else(|| Error::MissingArgument(desc.display_name())),
            value => T::from_value(value).ok_or_else(|| Error::TypeMismatch {
                name: desc.name.clone(),
                requested: T::TYPE,
                stored: value.arg_type().unwrap_or(desc.arg_type),
            }),
        }
    }

    pub fn get_int(&self, name: &str) -> Result<i64> {
        self.get(name)
    }

    pub fn get_float(&self, name: &str) -> Result<f64> {
        self.get(name)
    }

    pub fn get_bool(&self, name: &str) -> bool {
        self.get(name).unwrap_or(false)
    }

    pub fn get_str(&self, name: &str) -> Result<String> {
        self.get(name)
    }

    pub fn get_ints(&self, name: &str) -> Result<Vec<i64>> {
        self.get(name)
    }

    pub fn get_floats(&self, name: &str) -> Result<Vec<f64>> {
        self.get(name)
    }

    pub fn get_bools(&self, name: &str) -> Result<Vec<bool>> {
        self.get(name)
    }

    pub fn get_strs(&self, name: &str) -> Result<Vec<String>> {
        self.get(name)
    }

    /// Whether the argument holds a value after parsing (from the command
    /// line or its default). Always false before `parse`.
    pub fn has(&self, name: &str) -> bool {
        self.registry
            .lookup(name)
            .is_some_and(|d| !d.parsed.is_none())
    }

    /// Whether the value came from the command line rather than a default.
    pub fn is_explicit(&self, name: &str) -> bool {
        self.registry.lookup(name).is_some_and(|d| d.explicit)
    }

    /// Render the help text without invoking the help handler.
    pub fn help(&self) -> String {
        help::render(self, self.config.color.enabled())
    }

    /// Describe the declared arguments for external renderers.
    pub fn schema(&self) -> CommandSchema {
        CommandSchema {
            name: self.program.clone(),
            header: self.config.header.clone(),
            description: self.config.description.clone(),
            footer: self.config.footer.clone(),
            args: self.registry.iter().map(ArgDescriptor::to_schema).collect(),
            ..Default::default()
        }
    }
}

fn utf8_args<I>(args: I) -> Result<Vec<String>>
where
    I: IntoIterator<Item = OsString>,
{
    args.into_iter()
        .enumerate()
        .map(|(idx, arg)| {
            arg.into_string().map_err(|raw| {
                Error::invalid_value(
                    format!("argv[{idx}]"),
                    format!("'{}' is not valid UTF-8", raw.to_string_lossy()),
                )
            })
        })
        .collect()
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser")
            .field("program", &self.program)
            .field("config", &self.config)
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}
