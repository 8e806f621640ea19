//! Typed command-line argument parsing.
//!
//! Arguments are declared on a [`Parser`] with a kind (int, float, bool,
//! string or a list of those), an optional default and any number of
//! validators. `parse` assigns tokens to arguments in one pass, converts
//! them, applies defaults and runs validators; values are then read back
//! with typed getters under any of their names.
//!
//! ```
//! use argkit::{Parser, ParseOutcome};
//!
//! let mut cli = Parser::new("convert");
//! cli.add_str("input", "File to convert", None)?;
//! cli.add_strs(["-f", "--formats"], "Output formats", Some(&["png"]))?
//!     .one_of(["png", "jpg", "webp"]);
//! cli.add_bool(["-v", "--verbose"], "Verbose output", None)?;
//!
//! let outcome = cli.parse(["convert", "photo.raw", "-f", "jpg", "webp", "-v"])?;
//! assert_eq!(outcome, ParseOutcome::Parsed);
//! assert_eq!(cli.get_strs("formats")?, ["jpg", "webp"]);
//! assert!(cli.get_bool("verbose"));
//! # Ok::<(), argkit::Error>(())
//! ```

mod convert;
mod descriptor;
mod error;
pub mod help;
mod parser;
mod registry;
mod tokenize;
pub mod validate;
mod value;

pub use convert::{parse_bool, parse_float, parse_int};
pub use descriptor::{ArgDescriptor, Validator};
pub use error::{Error, Result};
pub use help::{ColorChoice, HelpConfig, HelpRequest};
pub use parser::{ArgBuilder, ArgNames, ParseOutcome, Parser};
pub use registry::{ArgKey, RESERVED_NAMES, Registry};
pub use tokenize::is_negative_number;
pub use value::{ArgType, ArgValue, Value};

pub use argkit_metadata::{ArgSchema, CommandSchema};
