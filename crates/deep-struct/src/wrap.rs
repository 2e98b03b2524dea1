//! The `wrap` entry point and the [`Wrapped`] result it returns.
//!
//! Every navigation step re-enters [`wrap_with`] on the value it reaches, so
//! nested maps and sequences are always navigable and scalars always pass
//! through (or through inference, when [`WrapOptions::infer_scalars`] is set).

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;
use std::ops::Deref;

use crate::accessor::Access;
use crate::error::{NavError, Result};
use crate::held::Held;
use crate::infer;
use crate::map::MapNavigator;
use crate::seq::{SeqKind, SeqNavigator};
use crate::value::{Key, Value};

/// Options carried by every navigator produced from a `wrap` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct WrapOptions {
    /// Run textual scalars through [`infer::parse`] before dispatch.
    pub infer_scalars: bool,
}

impl WrapOptions {
    pub fn inferring() -> Self {
        Self {
            infer_scalars: true,
        }
    }
}

/// A scalar reached through navigation.
///
/// Either a borrow of the caller's value or, when produced by inference, an
/// owned replacement.
#[derive(Debug)]
pub struct Scalar<'a>(Held<'a, Value>);

impl Scalar<'_> {
    pub fn value(&self) -> &Value {
        &self.0
    }

    /// Whether writes through [`Scalar::replace`] reach the caller's value.
    pub fn is_borrowed(&self) -> bool {
        self.0.is_borrowed()
    }

    pub fn replace(&mut self, value: impl Into<Value>) -> Value {
        std::mem::replace(&mut *self.0, value.into())
    }

    pub fn into_value(self) -> Value {
        self.0.into_inner()
    }
}

impl Deref for Scalar<'_> {
    type Target = Value;

    fn deref(&self) -> &Value {
        &self.0
    }
}

/// What [`wrap`] returns: a navigator for collections, the scalar otherwise.
#[derive(Debug)]
pub enum Wrapped<'a> {
    Map(MapNavigator<'a>),
    Seq(SeqNavigator<'a>),
    Scalar(Scalar<'a>),
}

/// Wraps `value` without scalar inference.
///
/// # Example
///
/// ```
/// use deep_struct::{wrap, Value};
///
/// let mut doc = Value::from(serde_json::json!({"user": {"name": "ada"}}));
/// let mut root = wrap(&mut doc);
/// assert_eq!(root.get("user").unwrap().get("name").unwrap().as_str(), Some("ada"));
/// ```
pub fn wrap(value: &mut Value) -> Wrapped<'_> {
    wrap_with(value, WrapOptions::default())
}

/// Wraps `value`, reinterpreting textual scalars on every access.
pub fn wrap_inferred(value: &mut Value) -> Wrapped<'_> {
    wrap_with(value, WrapOptions::inferring())
}

pub fn wrap_with(value: &mut Value, options: WrapOptions) -> Wrapped<'_> {
    if options.infer_scalars {
        if let Value::Text(text) = &*value {
            match infer::parse(text) {
                Value::Text(parsed) if parsed == *text => {}
                inferred => return wrap_owned(inferred, options),
            }
        }
    }
    match value {
        Value::Map(map) => Wrapped::Map(MapNavigator::new(Held::Borrowed(map), options)),
        Value::Seq(items) => Wrapped::Seq(SeqNavigator::new(
            Held::Borrowed(items),
            SeqKind::Ordered,
            options,
        )),
        Value::Set(items) => Wrapped::Seq(SeqNavigator::new(
            Held::Borrowed(items),
            SeqKind::Unordered,
            options,
        )),
        scalar => Wrapped::Scalar(Scalar(Held::Borrowed(scalar))),
    }
}

/// Wraps a value the navigator should own, such as a decoded document.
pub fn wrap_owned(value: Value, options: WrapOptions) -> Wrapped<'static> {
    match value {
        // A decoded JSON string comes back shorter than its source and is
        // inferred again.
        Value::Text(text) if options.infer_scalars => match infer::parse(&text) {
            Value::Text(parsed) if parsed == text => {
                Wrapped::Scalar(Scalar(Held::Owned(Value::Text(text))))
            }
            inferred => wrap_owned(inferred, options),
        },
        Value::Map(map) => Wrapped::Map(MapNavigator::new(Held::Owned(map), options)),
        Value::Seq(items) => Wrapped::Seq(SeqNavigator::new(
            Held::Owned(items),
            SeqKind::Ordered,
            options,
        )),
        Value::Set(items) => Wrapped::Seq(SeqNavigator::new(
            Held::Owned(items),
            SeqKind::Unordered,
            options,
        )),
        scalar => Wrapped::Scalar(Scalar(Held::Owned(scalar))),
    }
}

/// Parses `text` and wraps the result, so a JSON object becomes a
/// navigable map.
///
/// ```
/// use deep_struct::infer_text;
///
/// let mut doc = infer_text(r#"{"x": 1}"#);
/// assert!(doc.is_map());
/// assert_eq!(doc.get("x").unwrap().as_i64(), Some(1));
/// ```
pub fn infer_text(text: &str) -> Wrapped<'static> {
    wrap_owned(Value::from(text), WrapOptions::inferring())
}

impl<'a> Wrapped<'a> {
    pub fn is_map(&self) -> bool {
        matches!(self, Wrapped::Map(_))
    }

    pub fn is_seq(&self) -> bool {
        matches!(self, Wrapped::Seq(_))
    }

    pub fn is_scalar(&self) -> bool {
        matches!(self, Wrapped::Scalar(_))
    }

    pub fn as_map(&mut self) -> Option<&mut MapNavigator<'a>> {
        match self {
            Wrapped::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_seq(&mut self) -> Option<&mut SeqNavigator<'a>> {
        match self {
            Wrapped::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn as_scalar(&self) -> Option<&Value> {
        match self {
            Wrapped::Scalar(scalar) => Some(scalar.value()),
            _ => None,
        }
    }

    pub fn into_map(self) -> Option<MapNavigator<'a>> {
        match self {
            Wrapped::Map(map) => Some(map),
            _ => None,
        }
    }

    pub fn into_seq(self) -> Option<SeqNavigator<'a>> {
        match self {
            Wrapped::Seq(seq) => Some(seq),
            _ => None,
        }
    }

    pub fn into_scalar(self) -> Option<Scalar<'a>> {
        match self {
            Wrapped::Scalar(scalar) => Some(scalar),
            _ => None,
        }
    }

    /// Map lookup; `None` for absent keys and for anything but a map.
    pub fn get(&mut self, key: impl Into<Key>) -> Option<Wrapped<'_>> {
        match self {
            Wrapped::Map(map) => map.get(key),
            _ => None,
        }
    }

    /// Sequence lookup; `None` out of range and for anything but a sequence.
    pub fn at(&mut self, index: i64) -> Option<Wrapped<'_>> {
        match self {
            Wrapped::Seq(seq) => seq.get(index).ok(),
            _ => None,
        }
    }

    /// Attribute-style access on whatever was wrapped. Scalars have no
    /// members.
    pub fn access(&mut self, member: &str, args: Vec<Value>) -> Result<Access<'_>> {
        match self {
            Wrapped::Map(map) => map.access(member, args),
            Wrapped::Seq(seq) => seq.access(member, args),
            Wrapped::Scalar(scalar) => Err(NavError::UndefinedAccessor {
                member: member.to_string(),
                target: scalar.type_name(),
            }),
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        self.as_scalar()?.as_i64()
    }

    pub fn as_f64(&self) -> Option<f64> {
        self.as_scalar()?.as_f64()
    }

    pub fn as_str(&self) -> Option<&str> {
        self.as_scalar()?.as_str()
    }

    pub fn as_bool(&self) -> Option<bool> {
        self.as_scalar()?.as_bool()
    }

    pub fn as_time(&self) -> Option<&DateTime<FixedOffset>> {
        self.as_scalar()?.as_time()
    }

    pub fn is_null(&self) -> bool {
        self.as_scalar().is_some_and(Value::is_null)
    }

    pub fn is_truthy(&self) -> bool {
        match self {
            Wrapped::Scalar(scalar) => scalar.is_truthy(),
            Wrapped::Map(_) | Wrapped::Seq(_) => true,
        }
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Wrapped::Map(_) => "map",
            Wrapped::Seq(seq) if seq.is_set() => "set",
            Wrapped::Seq(_) => "sequence",
            Wrapped::Scalar(scalar) => scalar.type_name(),
        }
    }

    /// A copy of the wrapped value.
    pub fn to_value(&self) -> Value {
        match self {
            Wrapped::Map(map) => Value::Map(map.unwrap().clone()),
            Wrapped::Seq(seq) => seq.to_value(),
            Wrapped::Scalar(scalar) => scalar.value().clone(),
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for Wrapped<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        match self {
            Wrapped::Map(map) => map.serialize(serializer),
            Wrapped::Seq(seq) => seq.serialize(serializer),
            Wrapped::Scalar(scalar) => scalar.value().serialize(serializer),
        }
    }
}

impl fmt::Display for Wrapped<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Wrapped::Map(map) => fmt::Debug::fmt(map, f),
            Wrapped::Seq(seq) => fmt::Debug::fmt(seq, f),
            Wrapped::Scalar(scalar) => fmt::Display::fmt(scalar.value(), f),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_dispatch_by_type() {
        let mut map = Value::from(json!({"a": 1}));
        let mut seq = Value::from(json!([1, 2]));
        let mut set = Value::set_from([1, 2]);
        let mut text = Value::from("x");

        assert!(wrap(&mut map).is_map());
        assert!(wrap(&mut seq).is_seq());
        assert_eq!(wrap(&mut set).type_name(), "set");
        assert!(wrap(&mut text).is_scalar());
        assert_eq!(wrap(&mut Value::Null).type_name(), "null");
    }

    #[test]
    fn test_scalar_passthrough_is_a_borrow() {
        let mut value = Value::from("42");
        {
            let wrapped = wrap(&mut value);
            assert_eq!(wrapped.as_str(), Some("42"));
            let mut scalar = wrapped.into_scalar().unwrap();
            assert!(scalar.is_borrowed());
            assert_eq!(scalar.replace(7), Value::from("42"));
        }
        assert_eq!(value, Value::Int(7));
    }

    #[test]
    fn test_inferred_scalar_is_owned() {
        let mut value = Value::from("42");
        let wrapped = wrap_inferred(&mut value);
        assert_eq!(wrapped.as_i64(), Some(42));
        assert!(!wrapped.into_scalar().unwrap().is_borrowed());
        assert_eq!(value, Value::from("42"));
    }

    #[test]
    fn test_inference_keeps_unparsed_text_borrowed() {
        let mut value = Value::from("plain text");
        let scalar = wrap_inferred(&mut value).into_scalar().unwrap();
        assert!(scalar.is_borrowed());
        assert_eq!(scalar.as_str(), Some("plain text"));
    }

    #[test]
    fn test_inference_decodes_documents_into_navigators() {
        let mut value = Value::from(r#"{"x": 1, "list": [1, "2.5"]}"#);
        let mut wrapped = wrap_inferred(&mut value);
        assert!(wrapped.is_map());
        assert_eq!(wrapped.get("x").unwrap().as_i64(), Some(1));
        // Nested text keeps being inferred.
        let mut list = wrapped.get("list").unwrap();
        assert_eq!(list.at(1).unwrap().as_f64(), Some(2.5));
    }

    #[test]
    fn test_infer_text_unwraps_quoted_strings() {
        assert_eq!(infer_text(r#""7""#).as_i64(), Some(7));
        assert_eq!(infer_text("plain").as_str(), Some("plain"));
    }

    #[test]
    fn test_access_on_scalar_is_undefined() {
        let mut value = Value::Int(3);
        let err = wrap(&mut value).access("size", vec![]).unwrap_err();
        assert_eq!(
            err,
            NavError::UndefinedAccessor {
                member: "size".to_string(),
                target: "integer",
            }
        );
    }

    #[test]
    fn test_get_and_at_on_wrong_shape() {
        let mut value = Value::from(json!([1]));
        let mut wrapped = wrap(&mut value);
        assert!(wrapped.get("a").is_none());
        assert!(wrapped.at(5).is_none());
        assert_eq!(wrapped.at(0).unwrap().as_i64(), Some(1));
    }

    #[test]
    fn test_options_from_config() {
        let options: WrapOptions = toml::from_str("infer_scalars = true").unwrap();
        assert_eq!(options, WrapOptions::inferring());
        let options: WrapOptions = toml::from_str("").unwrap();
        assert_eq!(options, WrapOptions::default());
        assert!(!options.infer_scalars);
    }
}
