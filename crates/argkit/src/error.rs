use crate::value::ArgType;
use thiserror::Error;

/// Every failure the registry, parser and getters can report.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum Error {
    #[error("cannot redefine built-in argument '{0}'")]
    ReservedName(String),

    #[error("duplicate argument name '{0}'")]
    DuplicateName(String),

    #[error("invalid argument name '{name}': {reason}")]
    InvalidName { name: String, reason: String },

    #[error("invalid argument '{name}': {reason}")]
    InvalidArgument { name: String, reason: String },

    #[error("unknown argument: {0}")]
    UnknownArgument(String),

    #[error("missing required argument: {0}")]
    MissingArgument(String),

    #[error("unexpected positional argument: {0}")]
    UnexpectedPositional(String),

    #[error("invalid value for '{name}': {message}")]
    InvalidValue { name: String, message: String },

    #[error("value out of range for '{name}': {message}")]
    OutOfRange { name: String, message: String },

    #[error("type mismatch for '{name}': requested {requested}, stored {stored}")]
    TypeMismatch {
        name: String,
        requested: ArgType,
        stored: ArgType,
    },

    #[error("{0}")]
    Failed(String),
}

pub type Result<T> = std::result::Result<T, Error>;

impl Error {
    pub fn invalid_value(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn out_of_range(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::OutOfRange {
            name: name.into(),
            message: message.into(),
        }
    }

    pub(crate) fn invalid_name(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidName {
            name: name.into(),
            reason: reason.into(),
        }
    }

    pub(crate) fn invalid_argument(name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name: name.into(),
            reason: reason.into(),
        }
    }

    /// Errors raised while declaring arguments. These are programming
    /// mistakes in the host and should abort setup.
    pub fn is_registration(&self) -> bool {
        matches!(
            self,
            Self::ReservedName(_)
                | Self::DuplicateName(_)
                | Self::InvalidName { .. }
                | Self::InvalidArgument { .. }
        )
    }

    /// Conventional process status for this error (usage errors are `2`).
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Failed(_) => 1,
            _ => 2,
        }
    }
}

impl From<String> for Error {
    fn from(msg: String) -> Self {
        Self::Failed(msg)
    }
}

impl From<&str> for Error {
    fn from(msg: &str) -> Self {
        Self::Failed(msg.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_argument() {
        let err = Error::invalid_value("count", "'abc' is not an integer");
        assert_eq!(
            err.to_string(),
            "invalid value for 'count': 'abc' is not an integer"
        );

        let err = Error::TypeMismatch {
            name: "ids".to_string(),
            requested: ArgType::Int,
            stored: ArgType::IntList,
        };
        assert_eq!(
            err.to_string(),
            "type mismatch for 'ids': requested int, stored int-list"
        );
    }

    #[test]
    fn classifies_registration_errors() {
        assert!(Error::ReservedName("help".to_string()).is_registration());
        assert!(Error::invalid_name("-", "empty").is_registration());
        assert!(!Error::MissingArgument("file".to_string()).is_registration());
        assert_eq!(Error::UnknownArgument("--x".to_string()).exit_code(), 2);
        assert_eq!(Error::from("boom").exit_code(), 1);
    }
}
