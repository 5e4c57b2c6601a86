//! Built-in predicates for [`Rule`](super::Rule).
//!
//! Each predicate receives the raw JSON value of the field (`None` when the
//! field is absent) and never mutates it.

use serde_json::Value;

/// A string or number that fits in an `i32`. A leading sign is allowed.
pub fn is_int(value: Option<&Value>) -> bool {
    match value {
        Some(Value::String(s)) => s.parse::<i32>().is_ok(),
        Some(Value::Number(n)) => n.as_i64().is_some_and(|n| i32::try_from(n).is_ok()),
        _ => false,
    }
}

/// Present, not null, and (for strings) not blank.
pub fn not_empty(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.trim().is_empty(),
        Some(_) => true,
    }
}

/// A JSON string that is not blank. Numbers, booleans and objects fail.
pub fn not_blank(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::String(s)) if !s.trim().is_empty())
}

/// A JSON number, or a string holding a finite decimal number.
pub fn is_numeric(value: Option<&Value>) -> bool {
    as_f64(value).is_some()
}

/// Numeric and strictly greater than zero.
pub fn is_positive(value: Option<&Value>) -> bool {
    as_f64(value).is_some_and(|n| n > 0.0)
}

/// A JSON `true` or `false`. Strings such as `"true"` are rejected.
pub fn is_boolean(value: Option<&Value>) -> bool {
    matches!(value, Some(Value::Bool(_)))
}

fn as_f64(value: Option<&Value>) -> Option<f64> {
    match value? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}
