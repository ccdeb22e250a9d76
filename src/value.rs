//! Configuration values and the type coercion applied while merging.
//!
//! The default tree fixes the type of every key: during a merge, the raw
//! value from the source file is coerced to the variant of the corresponding
//! default. Coercion is deliberately loose (see [`coerce`]) because source
//! files are hand-edited INI where `yes`, `on` and `1` all mean `true`.

use indexmap::IndexMap;
use serde::Serialize;

/// A resolved configuration value.
///
/// The variant of a key's *default* decides how a raw source value is
/// interpreted for that key. `Null` marks nullable credential-like fields
/// that accept whatever the source provides, untyped.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Bool(bool),
    Int(i64),
    Str(String),
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

impl Value {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            Value::List(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_map(&self) -> Option<&IndexMap<String, String>> {
        match self {
            Value::Map(m) => Some(m),
            _ => None,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(s)
    }
}

impl From<Vec<String>> for Value {
    fn from(v: Vec<String>) -> Self {
        Value::List(v)
    }
}

impl From<IndexMap<String, String>> for Value {
    fn from(m: IndexMap<String, String>) -> Self {
        Value::Map(m)
    }
}

/// A value as it comes out of the source parser: a plain string, a `key[] =`
/// list, or a `key[sub] =` map. Typing happens later, against the defaults.
#[derive(Debug, Clone, PartialEq)]
pub enum RawValue {
    Str(String),
    List(Vec<String>),
    Map(IndexMap<String, String>),
}

/// A resolved section: key to typed value, in merge order.
pub type Section = IndexMap<String, Value>;

/// A parsed source section: key to untyped value, in source order.
pub type RawSection = IndexMap<String, RawValue>;

/// The parser's output: section name to parsed section, in source order.
pub type RawConfig = IndexMap<String, RawSection>;

/// Coerce a raw source value to the type implied by `default`.
///
/// - `Null` default: the raw value passes through untyped, keeping its shape.
/// - `Bool` default: `true`/`yes`/`on` and `false`/`no`/`off` match
///   case-insensitively; any other string falls back to loose truthiness
///   (empty and `"0"` are false). Collections are truthy when non-empty.
/// - `Int` default: loose string-to-integer cast (see [`cast_int`]);
///   collections collapse to 0 or 1 by emptiness.
/// - `Str` default: the raw string wins unless it is loosely empty, in which
///   case the default is kept. Collection-shaped raws keep the default.
/// - `List`/`Map` default: a collection-shaped raw replaces the default
///   wholesale, keeping the raw's own shape; a string raw keeps the default.
pub(crate) fn coerce(default: &Value, raw: &RawValue) -> Value {
    match default {
        Value::Null => match raw {
            RawValue::Str(s) => Value::Str(s.clone()),
            RawValue::List(v) => Value::List(v.clone()),
            RawValue::Map(m) => Value::Map(m.clone()),
        },
        Value::Bool(_) => Value::Bool(loose_bool(raw)),
        Value::Int(_) => Value::Int(loose_int(raw)),
        Value::Str(d) => match raw {
            RawValue::Str(s) if !loosely_empty(s) => Value::Str(s.clone()),
            _ => Value::Str(d.clone()),
        },
        Value::List(d) => match raw {
            RawValue::Str(_) => Value::List(d.clone()),
            RawValue::List(v) => Value::List(v.clone()),
            RawValue::Map(m) => Value::Map(m.clone()),
        },
        Value::Map(d) => match raw {
            RawValue::Str(_) => Value::Map(d.clone()),
            RawValue::List(v) => Value::List(v.clone()),
            RawValue::Map(m) => Value::Map(m.clone()),
        },
    }
}

/// Loose truthiness with the boolean vocabulary checked first.
pub(crate) fn loose_bool(raw: &RawValue) -> bool {
    match raw {
        RawValue::Str(s) => match s.to_lowercase().as_str() {
            "true" | "yes" | "on" => true,
            "false" | "no" | "off" => false,
            other => !other.is_empty() && other != "0",
        },
        RawValue::List(v) => !v.is_empty(),
        RawValue::Map(m) => !m.is_empty(),
    }
}

/// Loose integer view of a raw value.
pub(crate) fn loose_int(raw: &RawValue) -> i64 {
    match raw {
        RawValue::Str(s) => cast_int(s),
        RawValue::List(v) => i64::from(!v.is_empty()),
        RawValue::Map(m) => i64::from(!m.is_empty()),
    }
}

/// Loose string-to-integer cast: skip leading whitespace, take an optional
/// sign and the longest run of decimal digits, ignore the rest. No digits
/// means 0. Out-of-range magnitudes clamp to the `i64` limits.
pub(crate) fn cast_int(s: &str) -> i64 {
    let trimmed = s.trim_start();
    let (negative, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    let digits: &str = {
        let end = rest
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return 0;
    }

    let mut acc: i64 = 0;
    for b in digits.bytes() {
        let digit = i64::from(b - b'0');
        acc = match acc.checked_mul(10).and_then(|v| v.checked_add(digit)) {
            Some(v) => v,
            None => return if negative { i64::MIN } else { i64::MAX },
        };
    }
    if negative { -acc } else { acc }
}

// "0" never overrides a string default, same as the empty string.
pub(crate) fn loosely_empty(s: &str) -> bool {
    s.is_empty() || s == "0"
}
