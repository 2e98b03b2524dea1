//! Best-effort scalar type inference for loosely typed text.
//!
//! [`parse`] tries, in order: an exact integer, a decimal float, a
//! timestamp, and an embedded JSON document. The first strategy that accepts
//! the text wins; if none does, the text comes back unchanged.

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime};
use regex::Regex;
use std::sync::OnceLock;
use tracing::trace;

use crate::value::Value;

/// Offset-aware layouts, tried after RFC 3339 and RFC 2822.
const ZONED_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f %z", "%Y-%m-%d %H:%M:%S%.f%:z"];

/// Layouts without an offset; read as UTC.
const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M:%S%.f"];

/// Date-only layouts; read as UTC midnight.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d"];

fn integer_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?[1-9]\d*$").unwrap())
}

fn float_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^-?\d+\.\d+(?:e-?\d+)?$").unwrap())
}

/// Infers a richer scalar type for `text`.
///
/// Never fails: text that no strategy accepts is returned as
/// [`Value::Text`].
///
/// # Example
///
/// ```
/// use deep_struct::{parse, Value};
///
/// assert_eq!(parse("42"), Value::Int(42));
/// assert_eq!(parse("42.0"), Value::Float(42.0));
/// assert_eq!(parse("42a"), Value::from("42a"));
/// assert!(parse("2024-01-01").as_time().is_some());
/// assert_eq!(parse("plain text"), Value::from("plain text"));
/// ```
pub fn parse(text: &str) -> Value {
    if let Some(n) = parse_integer(text) {
        return Value::Int(n);
    }
    if integer_regex().is_match(text) {
        // Out of i64 range; the JSON step would round it to a float.
        trace!(text, "integer out of range, keeping text");
        return Value::Text(text.to_string());
    }
    if let Some(f) = parse_float(text) {
        return Value::Float(f);
    }
    if let Some(t) = parse_timestamp(text) {
        return Value::Time(t);
    }
    if let Some(doc) = parse_document(text) {
        return doc;
    }
    trace!(text, "no richer type, keeping text");
    Value::Text(text.to_string())
}

/// Accepts only text that round-trips: `"007"` and `"+7"` are rejected.
pub fn parse_integer(text: &str) -> Option<i64> {
    let n: i64 = text.parse().ok()?;
    if n.to_string() != text {
        trace!(text, "integer does not round-trip");
        return None;
    }
    Some(n)
}

/// Accepts `-?<digits>.<digits>` with an optional `e-?<digits>` exponent.
/// Values that overflow to infinity are rejected.
pub fn parse_float(text: &str) -> Option<f64> {
    if !float_regex().is_match(text) {
        return None;
    }
    text.parse::<f64>().ok().filter(|f| f.is_finite())
}

pub fn parse_timestamp(text: &str) -> Option<DateTime<FixedOffset>> {
    if let Ok(t) = DateTime::parse_from_rfc3339(text) {
        return Some(t);
    }
    if let Ok(t) = DateTime::parse_from_rfc2822(text) {
        return Some(t);
    }
    for format in ZONED_FORMATS {
        if let Ok(t) = DateTime::parse_from_str(text, format) {
            return Some(t);
        }
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, format) {
            return Some(naive.and_utc().fixed_offset());
        }
    }
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(text, format) {
            return date
                .and_hms_opt(0, 0, 0)
                .map(|naive| naive.and_utc().fixed_offset());
        }
    }
    trace!(text, "not a timestamp");
    None
}

/// Decodes `text` as a JSON document.
pub fn parse_document(text: &str) -> Option<Value> {
    match serde_json::from_str::<serde_json::Value>(text) {
        Ok(doc) => Some(Value::from(doc)),
        Err(err) => {
            trace!(text, %err, "not a JSON document");
            None
        }
    }
}
