//! Value model: the declared kind of an argument and the tagged union that
//! stores its default and parsed values.

use std::fmt;

/// Declared kind of an argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ArgType {
    Int,
    Float,
    Bool,
    Str,
    IntList,
    FloatList,
    BoolList,
    StrList,
}

impl ArgType {
    pub fn is_list(self) -> bool {
        matches!(
            self,
            Self::IntList | Self::FloatList | Self::BoolList | Self::StrList
        )
    }

    /// Scalar kind of a list's elements (scalars map to themselves).
    pub fn element(self) -> ArgType {
        match self {
            Self::Int | Self::IntList => Self::Int,
            Self::Float | Self::FloatList => Self::Float,
            Self::Bool | Self::BoolList => Self::Bool,
            Self::Str | Self::StrList => Self::Str,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Int => "int",
            Self::Float => "float",
            Self::Bool => "bool",
            Self::Str => "string",
            Self::IntList => "int-list",
            Self::FloatList => "float-list",
            Self::BoolList => "bool-list",
            Self::StrList => "string-list",
        }
    }
}

impl fmt::Display for ArgType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored argument value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    None,
    Int(i64),
    Float(f64),
    Bool(bool),
    Str(String),
    Ints(Vec<i64>),
    Floats(Vec<f64>),
    Bools(Vec<bool>),
    Strs(Vec<String>),
}

impl Value {
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Kind of the stored payload, `None` when absent.
    pub fn arg_type(&self) -> Option<ArgType> {
        match self {
            Self::None => None,
            Self::Int(_) => Some(ArgType::Int),
            Self::Float(_) => Some(ArgType::Float),
            Self::Bool(_) => Some(ArgType::Bool),
            Self::Str(_) => Some(ArgType::Str),
            Self::Ints(_) => Some(ArgType::IntList),
            Self::Floats(_) => Some(ArgType::FloatList),
            Self::Bools(_) => Some(ArgType::BoolList),
            Self::Strs(_) => Some(ArgType::StrList),
        }
    }
}

fn write_list<T>(
    f: &mut fmt::Formatter<'_>,
    items: &[T],
    item: impl Fn(&mut fmt::Formatter<'_>, &T) -> fmt::Result,
) -> fmt::Result {
    f.write_str("[")?;
    for (i, v) in items.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        item(f, v)?;
    }
    f.write_str("]")
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::None => Ok(()),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Str(v) => f.write_str(v),
            Self::Ints(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Self::Floats(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Self::Bools(v) => write_list(f, v, |f, x| write!(f, "{x}")),
            Self::Strs(v) => write_list(f, v, |f, x| write!(f, "\"{x}\"")),
        }
    }
}

/// Rust types that can be declared as an argument and read back.
pub trait ArgValue: Sized {
    const TYPE: ArgType;

    fn into_value(self) -> Value;

    /// Extract `Self` when `value` holds exactly this kind.
    fn from_value(value: &Value) -> Option<Self>;
}

macro_rules! impl_arg_value {
    ($ty:ty, $kind:ident, $variant:ident) => {
        impl ArgValue for $ty {
            const TYPE: ArgType = ArgType::$kind;

            fn into_value(self) -> Value {
                Value::$variant(self)
            }

            fn from_value(value: &Value) -> Option<Self> {
                match value {
                    Value::$variant(v) => Some(v.clone()),
                    _ => None,
                }
            }
        }
    };
}

impl_arg_value!(i64, Int, Int);
impl_arg_value!(f64, Float, Float);
impl_arg_value!(bool, Bool, Bool);
impl_arg_value!(String, Str, Str);
impl_arg_value!(Vec<i64>, IntList, Ints);
impl_arg_value!(Vec<f64>, FloatList, Floats);
impl_arg_value!(Vec<bool>, BoolList, Bools);
impl_arg_value!(Vec<String>, StrList, Strs);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_kinds_map_to_their_elements() {
        assert!(ArgType::FloatList.is_list());
        assert!(!ArgType::Bool.is_list());
        assert_eq!(ArgType::StrList.element(), ArgType::Str);
        assert_eq!(ArgType::Int.element(), ArgType::Int);
    }

    #[test]
    fn display_renders_lists_and_scalars() {
        assert_eq!(Value::Int(-4).to_string(), "-4");
        assert_eq!(Value::Float(0.5).to_string(), "0.5");
        assert_eq!(Value::Ints(vec![1, 2, 3]).to_string(), "[1, 2, 3]");
        assert_eq!(
            Value::Strs(vec!["auth".to_string(), "logging".to_string()]).to_string(),
            "[\"auth\", \"logging\"]"
        );
        assert_eq!(Value::None.to_string(), "");
    }

    #[test]
    fn from_value_requires_exact_kind() {
        assert_eq!(i64::from_value(&Value::Int(7)), Some(7));
        assert_eq!(i64::from_value(&Value::Float(7.0)), None);
        assert_eq!(
            <Vec<bool>>::from_value(&Value::Bools(vec![true, false])),
            Some(vec![true, false])
        );
        assert_eq!(String::from_value(&Value::None), None);
        assert_eq!(Value::Strs(Vec::new()).arg_type(), Some(ArgType::StrList));
    }
}
