//! Validators attached to arguments and the built-in ones.
//!
//! A validator receives the canonical argument name and the coerced value and
//! returns `Err` to reject it. Built-ins apply elementwise to list kinds.

use crate::descriptor::Validator;
use crate::error::{Error, Result};
use crate::value::ArgValue;
use std::fmt;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use std::path::Path;

/// Erase a typed validator. The value handed to `f` always matches `T`
/// because coercion produces the declared kind.
pub fn erase<T, F>(f: F) -> Validator
where
    T: ArgValue + 'static,
    F: Fn(&str, &T) -> Result<()> + 'static,
{
    Box::new(move |name, value| match T::from_value(value) {
        Some(v) => f(name, &v),
        None => Err(Error::TypeMismatch {
            name: name.to_string(),
            requested: T::TYPE,
            stored: value.arg_type().unwrap_or(T::TYPE),
        }),
    })
}

/// Integer or float arguments, scalar or list.
pub trait Numeric: ArgValue {
    type Item: PartialOrd + fmt::Display + Copy + 'static;

    fn items(&self) -> &[Self::Item];
}

impl Numeric for i64 {
    type Item = i64;

    fn items(&self) -> &[i64] {
        std::slice::from_ref(self)
    }
}

impl Numeric for f64 {
    type Item = f64;

    fn items(&self) -> &[f64] {
        std::slice::from_ref(self)
    }
}

impl Numeric for Vec<i64> {
    type Item = i64;

    fn items(&self) -> &[i64] {
        self.as_slice()
    }
}

impl Numeric for Vec<f64> {
    type Item = f64;

    fn items(&self) -> &[f64] {
        self.as_slice()
    }
}

/// String arguments, scalar or list.
pub trait Text: ArgValue {
    fn texts(&self) -> &[String];
}

impl Text for String {
    fn texts(&self) -> &[String] {
        std::slice::from_ref(self)
    }
}

impl Text for Vec<String> {
    fn texts(&self) -> &[String] {
        self.as_slice()
    }
}

/// Every value must lie within `min..=max`.
pub fn in_range<T: Numeric>(min: T::Item, max: T::Item) -> impl Fn(&str, &T) -> Result<()> {
    move |name: &str, value: &T| {
        for v in value.items() {
            if !(min..=max).contains(v) {
                return Err(Error::out_of_range(
                    name,
                    format!("{v} is not between {min} and {max}"),
                ));
            }
        }
        Ok(())
    }
}

/// Every value must be one of `allowed`.
pub fn one_of<T, I, S>(allowed: I) -> impl Fn(&str, &T) -> Result<()>
where
    T: Text,
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let allowed: Vec<String> = allowed.into_iter().map(Into::into).collect();
    move |name: &str, value: &T| {
        for v in value.texts() {
            if !allowed.iter().any(|a| a == v) {
                return Err(Error::invalid_value(
                    name,
                    format!("'{v}' is not one of: {}", allowed.join(", ")),
                ));
            }
        }
        Ok(())
    }
}

/// Reject any value for which `check` is false, describing the expectation
/// as `what`.
pub fn satisfies<T, F>(what: &'static str, check: F) -> impl Fn(&str, &T) -> Result<()>
where
    T: Text,
    F: Fn(&str) -> bool,
{
    move |name: &str, value: &T| {
        for v in value.texts() {
            if !check(v.as_str()) {
                return Err(Error::invalid_value(name, format!("'{v}' is not {what}")));
            }
        }
        Ok(())
    }
}

pub fn alpha<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("alphabetic", is_alpha)
}

pub fn alphanumeric<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("alphanumeric", is_alphanumeric)
}

pub fn numeric<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("numeric", is_numeric)
}

pub fn email<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid email address", is_email)
}

pub fn url<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid URL", is_url)
}

pub fn ip_address<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid IP address", |s| s.parse::<IpAddr>().is_ok())
}

pub fn ipv4<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid IPv4 address", |s| s.parse::<Ipv4Addr>().is_ok())
}

pub fn ipv6<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid IPv6 address", |s| s.parse::<Ipv6Addr>().is_ok())
}

pub fn mac_address<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid MAC address", is_mac_address)
}

pub fn uuid<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("a valid UUID", is_uuid)
}

pub fn path_exists<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("an existing path", |s| Path::new(s).exists())
}

pub fn is_file<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("an existing file", |s| Path::new(s).is_file())
}

pub fn is_directory<T: Text>() -> impl Fn(&str, &T) -> Result<()> {
    satisfies("an existing directory", |s| Path::new(s).is_dir())
}

pub fn is_alpha(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphabetic)
}

pub fn is_alphanumeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(char::is_alphanumeric)
}

pub fn is_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

pub fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') || s.chars().any(char::is_whitespace) {
        return false;
    }
    let labels: Vec<&str> = domain.split('.').collect();
    labels.len() >= 2 && labels.iter().all(|l| !l.is_empty())
}

/// Absolute URL with a host (`https://example.com`, `ftp://host/path`).
pub fn is_url(s: &str) -> bool {
    url::Url::parse(s).is_ok_and(|u| u.has_host())
}

/// Six two-digit hex octets separated consistently by `:` or `-`.
pub fn is_mac_address(s: &str) -> bool {
    let sep = if s.contains(':') { ':' } else { '-' };
    let octets: Vec<&str> = s.split(sep).collect();
    octets.len() == 6
        && octets
            .iter()
            .all(|o| o.len() == 2 && o.chars().all(|c| c.is_ascii_hexdigit()))
}

/// Canonical 8-4-4-4-12 hex form.
pub fn is_uuid(s: &str) -> bool {
    let groups: Vec<&str> = s.split('-').collect();
    groups.len() == 5
        && groups
            .iter()
            .zip([8, 4, 4, 4, 12])
            .all(|(g, len)| g.len() == len && g.chars().all(|c| c.is_ascii_hexdigit()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    #[test]
    fn range_checks_scalars_and_every_list_element() {
        let check = in_range::<i64>(1, 50);
        assert!(check("count", &1).is_ok());
        assert!(check("count", &50).is_ok());
        assert!(matches!(check("count", &51), Err(Error::OutOfRange { .. })));

        let check = in_range::<Vec<i64>>(1, 50);
        assert!(check("ids", &vec![10, 20, 30]).is_ok());
        let err = check("ids", &vec![10, 60]).unwrap_err();
        assert_eq!(
            err.to_string(),
            "value out of range for 'ids': 60 is not between 1 and 50"
        );

        let check = in_range::<f64>(0.0, 1.0);
        assert!(check("ratio", &0.5).is_ok());
        assert!(check("ratio", &1.5).is_err());
    }

    #[test]
    fn range_rejects_nan() {
        let check = in_range::<f64>(0.0, 1.0);
        assert!(matches!(check("ratio", &f64::NAN), Err(Error::OutOfRange { .. })));

        let check = in_range::<Vec<f64>>(0.0, 1.0);
        assert!(check("scores", &vec![0.5, f64::NAN]).is_err());
    }

    #[test]
    fn one_of_lists_choices() {
        let check = one_of::<String, _, _>(["normal", "fast"]);
        assert!(check("mode", &"fast".to_string()).is_ok());
        let err = check("mode", &"slow".to_string()).unwrap_err();
        assert!(err.to_string().contains("normal, fast"));
    }

    #[test]
    fn character_classes() {
        assert!(is_alpha("abc"));
        assert!(!is_alpha("ab1"));
        assert!(!is_alpha(""));
        assert!(is_alphanumeric("ABC123"));
        assert!(!is_alphanumeric("ABC-123"));
        assert!(is_numeric("123"));
        assert!(!is_numeric("12.3"));

        let check = alpha::<Vec<String>>();
        assert!(check("plugins", &vec!["auth".to_string(), "logging".to_string()]).is_ok());
        assert!(check("plugins", &vec!["auth2".to_string()]).is_err());
    }

    #[test]
    fn formats() {
        assert!(is_email("user@example.com"));
        assert!(!is_email("user@localhost"));
        assert!(!is_email("@example.com"));
        assert!(!is_email("a b@example.com"));
        assert!(!is_email("a@b@example.com"));

        assert!(is_url("https://api.example.com"));
        assert!(is_url("ftp://files.example.com/pub"));
        assert!(!is_url("not a url"));
        assert!(!is_url("mailto:user@example.com"));

        assert!(is_mac_address("00:1A:2b:3C:4d:5E"));
        assert!(is_mac_address("00-1A-2B-3C-4D-5E"));
        assert!(!is_mac_address("00:1A:2B:3C:4D"));
        assert!(!is_mac_address("00:1A-2B:3C:4D:5E"));

        assert!(is_uuid("123e4567-e89b-12d3-a456-426614174000"));
        assert!(!is_uuid("123e4567e89b12d3a456426614174000"));
        assert!(!is_uuid("123e4567-e89b-12d3-a456-42661417400g"));

        assert!(ipv4::<String>()("ip", &"192.168.1.1".to_string()).is_ok());
        assert!(ipv4::<String>()("ip", &"::1".to_string()).is_err());
        assert!(ipv6::<String>()("ip", &"::1".to_string()).is_ok());
        assert!(ip_address::<String>()("ip", &"127.0.0.1".to_string()).is_ok());
    }

    #[test]
    fn filesystem_checks() {
        let dir = std::env::temp_dir();
        let dir = dir.to_string_lossy().into_owned();
        assert!(is_directory::<String>()("dir", &dir).is_ok());
        assert!(is_file::<String>()("dir", &dir).is_err());
        assert!(path_exists::<String>()("p", &"/definitely/not/here".to_string()).is_err());
    }

    #[test]
    fn erased_validator_checks_kind() {
        let v = erase::<i64, _>(in_range::<i64>(1, 5));
        assert!(v("n", &Value::Int(3)).is_ok());
        assert!(matches!(v("n", &Value::Int(9)), Err(Error::OutOfRange { .. })));
        assert!(matches!(
            v("n", &Value::Str("3".to_string())),
            Err(Error::TypeMismatch { .. })
        ));
    }
}
