//! Single left-to-right pass that assigns every token to a descriptor.
//!
//! The pass only reads the registry. It returns the raw tokens collected for
//! each argument, indexed by key; conversion happens afterwards.

use crate::convert::Pending;
use crate::error::{Error, Result};
use crate::registry::{ArgKey, Registry};
use crate::value::ArgType;

/// `-` followed by a complete numeric literal (`-3`, `-0.5`, `-.5`, `-1e3`).
pub fn is_negative_number(token: &str) -> bool {
    let Some(rest) = token.strip_prefix('-') else {
        return false;
    };
    rest.starts_with(|c: char| c.is_ascii_digit() || c == '.') && rest.parse::<f64>().is_ok()
}

/// Whether `-h`/`--help` appears before any `--` separator.
pub fn wants_help<S: AsRef<str>>(tokens: &[S]) -> bool {
    tokens
        .iter()
        .map(AsRef::as_ref)
        .take_while(|t| *t != "--")
        .any(|t| t == "--help" || t == "-h")
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum State {
    Free,
    Filling(ArgKey),
}

struct Assigner<'r> {
    registry: &'r Registry,
    pending: Vec<Option<Pending>>,
    state: State,
    ordinal: usize,
}

impl<'r> Assigner<'r> {
    fn new(registry: &'r Registry) -> Self {
        Self {
            registry,
            pending: vec![None; registry.len()],
            state: State::Free,
            ordinal: 0,
        }
    }

    fn kind(&self, key: ArgKey) -> ArgType {
        self.registry
            .get(key)
            .map(|d| d.arg_type())
            .unwrap_or(ArgType::Str)
    }

    fn display(&self, key: ArgKey) -> String {
        self.registry
            .get(key)
            .map(|d| d.display_name())
            .unwrap_or_default()
    }

    /// Leave the filling state; a scalar option must have received its value.
    fn close(&mut self) -> Result<()> {
        if let State::Filling(key) = self.state {
            if !self.kind(key).is_list() && self.pending[key].is_none() {
                return Err(Error::invalid_value(
                    self.display(key),
                    "expected a value",
                ));
            }
        }
        self.state = State::Free;
        Ok(())
    }

    fn open(&mut self, key: ArgKey, attached: Option<&str>) -> Result<()> {
        self.close()?;
        let kind = self.kind(key);
        tracing::trace!(arg = %self.display(key), %kind, "option marker");
        if kind == ArgType::Bool {
            self.pending[key] = Some(Pending::Scalar(attached.unwrap_or("true").to_string()));
        } else if kind.is_list() {
            let first = attached.map(str::to_string).into_iter().collect();
            self.pending[key] = Some(Pending::List(first));
            self.state = State::Filling(key);
        } else if let Some(value) = attached {
            self.pending[key] = Some(Pending::Scalar(value.to_string()));
        } else {
            self.pending[key] = None;
            self.state = State::Filling(key);
        }
        Ok(())
    }

    fn value(&mut self, token: &str) -> Result<()> {
        match self.state {
            State::Filling(key) => {
                match &mut self.pending[key] {
                    Some(Pending::List(items)) => items.push(token.to_string()),
                    slot => {
                        *slot = Some(Pending::Scalar(token.to_string()));
                        self.state = State::Free;
                    }
                }
                Ok(())
            }
            State::Free => self.positional(token),
        }
    }

    fn positional(&mut self, token: &str) -> Result<()> {
        let Some(key) = self.registry.positional(self.ordinal) else {
            return Err(Error::UnexpectedPositional(token.to_string()));
        };
        tracing::trace!(ordinal = self.ordinal, arg = %self.display(key), "positional value");
        self.pending[key] = Some(Pending::Scalar(token.to_string()));
        self.ordinal += 1;
        Ok(())
    }
}

/// Assign `tokens` (program name excluded) to the registry's descriptors.
pub(crate) fn assign<S: AsRef<str>>(
    registry: &Registry,
    tokens: &[S],
) -> Result<Vec<Option<Pending>>> {
    let mut a = Assigner::new(registry);
    let mut after_separator = false;

    for token in tokens.iter().map(AsRef::as_ref) {
        if after_separator {
            a.positional(token)?;
            continue;
        }

        if token == "--" {
            a.close()?;
            after_separator = true;
            continue;
        }

        if let Some(body) = token.strip_prefix("--") {
            let (name, attached) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let key = registry
                .resolve_long(name)
                .ok_or_else(|| Error::UnknownArgument(format!("--{name}")))?;
            a.open(key, attached)?;
            continue;
        }

        if token.len() > 1 && token.starts_with('-') && !is_negative_number(token) {
            let body = &token[1..];
            let (name, attached) = match body.split_once('=') {
                Some((name, value)) => (name, Some(value)),
                None => (body, None),
            };
            let key = registry
                .resolve_short(name)
                .ok_or_else(|| Error::UnknownArgument(format!("-{name}")))?;
            a.open(key, attached)?;
            continue;
        }

        a.value(token)?;
    }

    a.close()?;
    Ok(a.pending)
}
