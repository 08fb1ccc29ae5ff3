//! Loose value coercions used by the condition evaluator.
//!
//! Records arrive as untyped JSON edited through web forms, so a fee may be
//! `12000` or `"12000"` and a date may be an ISO string. These helpers decide
//! how such values compare instead of rejecting them.

use chrono::{DateTime, NaiveDate};
use serde_json::Value;

/// Numeric view of a value; `NaN` when it has none.
///
/// `null` and blank strings count as zero, booleans as 0/1, and a
/// single-element array as its element.
pub fn to_number(value: &Value) -> f64 {
    match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => parse_number(s),
        Value::Array(_) => parse_number(&to_display_string(value)),
        Value::Object(_) => f64::NAN,
    }
}

fn parse_number(s: &str) -> f64 {
    let s = s.trim();
    if s.is_empty() {
        return 0.0;
    }
    match s {
        "Infinity" | "+Infinity" => return f64::INFINITY,
        "-Infinity" => return f64::NEG_INFINITY,
        _ => {}
    }
    let radix = match s.get(..2) {
        Some("0x") | Some("0X") => Some(16),
        Some("0o") | Some("0O") => Some(8),
        Some("0b") | Some("0B") => Some(2),
        _ => None,
    };
    if let Some(radix) = radix {
        return u64::from_str_radix(&s[2..], radix).map_or(f64::NAN, |n| n as f64);
    }
    // f64::from_str also accepts "inf" and "nan", which are not numbers here.
    if !s
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E'))
    {
        return f64::NAN;
    }
    s.parse::<f64>().unwrap_or(f64::NAN)
}

/// Milliseconds since the epoch for RFC 3339 timestamps and `YYYY-MM-DD`
/// dates, falling back to [`to_number`] for anything else.
pub fn to_timestamp_millis(value: &Value) -> f64 {
    if let Value::String(s) = value {
        let s = s.trim();
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return dt.timestamp_millis() as f64;
        }
        if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
            if let Some(dt) = date.and_hms_opt(0, 0, 0) {
                return dt.and_utc().timestamp_millis() as f64;
            }
        }
    }
    to_number(value)
}

/// String view of a value: strings verbatim, integral numbers without a
/// fractional part, arrays comma-joined.
pub fn to_display_string(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() < 1e21 => format!("{}", f as i128),
            _ => n.to_string(),
        },
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => to_display_string(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

/// Identity comparison without type coercion: `1` equals `1.0` but never
/// `"1"`, and an absent field equals nothing.
pub fn strict_equals(field: Option<&Value>, expected: &Value) -> bool {
    match (field, expected) {
        (None, _) => false,
        (Some(Value::Number(a)), Value::Number(b)) => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        (Some(a), b) => a == b,
    }
}

/// Whether `needle` is [`strict_equals`] to any element of `haystack`.
pub fn contains_value(haystack: &[Value], needle: Option<&Value>) -> bool {
    haystack.iter().any(|candidate| strict_equals(needle, candidate))
}

/// `null`, absent and empty-string values all count as "no value".
pub fn is_blank(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => true,
        Some(Value::String(s)) => s.is_empty(),
        Some(_) => false,
    }
}
