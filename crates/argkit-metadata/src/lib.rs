//! Serializable description of the arguments an `argkit` parser accepts.
//!
//! The parser itself never renders anything beyond its built-in help text.
//! External renderers (man pages, shell completions, documentation sites)
//! consume this schema instead, typically as JSON:
//! - `CommandSchema::to_json` / `CommandSchema::to_json_pretty` for export
//! - `CommandSchema::from_json` to load a previously exported schema

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version stamped into every exported schema.
pub const SCHEMA_FORMAT_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("failed to encode argument schema: {0}")]
    Encode(#[source] serde_json::Error),

    #[error("failed to decode argument schema: {0}")]
    Decode(#[source] serde_json::Error),

    #[error("unsupported schema format version {found} (expected {expected})")]
    Version { found: u32, expected: u32 },
}

/// One declared argument.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct ArgSchema {
    /// Canonical name (first declared name, without dashes).
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub short: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub long: Vec<String>,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub help: String,
    #[serde(default)]
    pub required: bool,
    /// One of `int`, `float`, `bool`, `string`, `int-list`, `float-list`,
    /// `bool-list`, `string-list`.
    pub value_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_value: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value_name: Option<String>,
    #[serde(default)]
    pub positional: bool,
}

impl ArgSchema {
    /// Whether the argument consumes value tokens (everything except booleans).
    pub fn takes_value(&self) -> bool {
        self.value_type != "bool"
    }

    /// Whether the argument collects a list of values.
    pub fn is_list(&self) -> bool {
        self.value_type.ends_with("-list")
    }
}

/// A whole parser: help texts plus declared arguments in registration order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct CommandSchema {
    pub format_version: u32,
    pub name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub header: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub description: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub footer: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub args: Vec<ArgSchema>,
}

impl Default for CommandSchema {
    fn default() -> Self {
        Self {
            format_version: SCHEMA_FORMAT_VERSION,
            name: String::new(),
            header: String::new(),
            description: String::new(),
            footer: String::new(),
            args: Vec::new(),
        }
    }
}

impl CommandSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Positional arguments in declaration order.
    pub fn positionals(&self) -> impl Iterator<Item = &ArgSchema> {
        self.args.iter().filter(|a| a.positional)
    }

    /// Optional (dash-prefixed) arguments in declaration order.
    pub fn options(&self) -> impl Iterator<Item = &ArgSchema> {
        self.args.iter().filter(|a| !a.positional)
    }

    /// Find an argument by any of its names; leading dashes are ignored.
    pub fn find(&self, name: &str) -> Option<&ArgSchema> {
        let name = name.trim_start_matches('-');
        self.args.iter().find(|a| {
            a.name == name
                || a.short.iter().any(|s| s == name)
                || a.long.iter().any(|l| l == name)
        })
    }

    pub fn to_json(&self) -> Result<String, SchemaError> {
        serde_json::to_string(self).map_err(SchemaError::Encode)
    }

    pub fn to_json_pretty(&self) -> Result<String, SchemaError> {
        serde_json::to_string_pretty(self).map_err(SchemaError::Encode)
    }

    pub fn from_json(raw: &str) -> Result<Self, SchemaError> {
        let schema: Self = serde_json::from_str(raw).map_err(SchemaError::Decode)?;
        if schema.format_version != SCHEMA_FORMAT_VERSION {
            return Err(SchemaError::Version {
                found: schema.format_version,
                expected: SCHEMA_FORMAT_VERSION,
            });
        }
        Ok(schema)
    }
}
