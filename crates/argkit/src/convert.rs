//! Conversion of raw command-line tokens into typed values.

use crate::error::{Error, Result};
use crate::value::{ArgType, Value};
use std::num::IntErrorKind;

/// Raw tokens collected for one argument during tokenization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pending {
    Scalar(String),
    List(Vec<String>),
}

/// Base-10 integer. Overflow is reported separately from malformed input.
pub fn parse_int(name: &str, raw: &str) -> Result<i64> {
    raw.parse::<i64>().map_err(|e| match e.kind() {
        IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => {
            Error::out_of_range(name, format!("'{raw}' does not fit in a 64-bit integer"))
        }
        _ => Error::invalid_value(name, format!("'{raw}' is not an integer")),
    })
}

/// Decimal or exponential float. A finite literal that overflows to
/// infinity is out of range; spelled-out `inf`/`infinity` is accepted.
pub fn parse_float(name: &str, raw: &str) -> Result<f64> {
    let value = raw
        .parse::<f64>()
        .map_err(|_| Error::invalid_value(name, format!("'{raw}' is not a number")))?;
    if value.is_infinite() && !raw.to_ascii_lowercase().contains("inf") {
        return Err(Error::out_of_range(
            name,
            format!("'{raw}' does not fit in a 64-bit float"),
        ));
    }
    Ok(value)
}

/// `true` and `1` are true; anything else is false.
pub fn parse_bool(raw: &str) -> bool {
    raw == "true" || raw == "1"
}

fn coerce_scalar(name: &str, kind: ArgType, raw: String) -> Result<Value> {
    Ok(match kind.element() {
        ArgType::Int => Value::Int(parse_int(name, &raw)?),
        ArgType::Float => Value::Float(parse_float(name, &raw)?),
        ArgType::Bool => Value::Bool(parse_bool(&raw)),
        _ => Value::Str(raw),
    })
}

fn coerce_list(name: &str, kind: ArgType, items: Vec<String>) -> Result<Value> {
    Ok(match kind.element() {
        ArgType::Int => Value::Ints(
            items
                .iter()
                .map(|s| parse_int(name, s))
                .collect::<Result<_>>()?,
        ),
        ArgType::Float => Value::Floats(
            items
                .iter()
                .map(|s| parse_float(name, s))
                .collect::<Result<_>>()?,
        ),
        ArgType::Bool => Value::Bools(items.iter().map(|s| parse_bool(s)).collect()),
        _ => Value::Strs(items),
    })
}

/// Convert collected tokens into the declared kind, preserving order.
pub fn coerce(name: &str, kind: ArgType, pending: Pending) -> Result<Value> {
    match (kind.is_list(), pending) {
        (false, Pending::Scalar(raw)) => coerce_scalar(name, kind, raw),
        (true, Pending::List(items)) => coerce_list(name, kind, items),
        (true, Pending::Scalar(raw)) => coerce_list(name, kind, vec![raw]),
        (false, Pending::List(items)) => match <[String; 1]>::try_from(items) {
            Ok([raw]) => coerce_scalar(name, kind, raw),
            Err(items) => Err(Error::invalid_value(
                name,
                format!("expected a single value, got {}", items.len()),
            )),
        },
    }
}
