//! Navigable wrappers over nested dynamic data.
//!
//! [`wrap`] turns a [`Value`] tree into a navigator: maps become
//! [`MapNavigator`]s, sequences and sets become [`SeqNavigator`]s, and
//! scalars pass through. Navigators borrow the caller's structure, so writes
//! land in it immediately, and every read re-wraps what it reaches.
//!
//! Map keys are matched indifferently: a key stored as `Key::Symbol("id")`
//! is found when asked for as `"id"`, and the other way around.
//!
//! With [`wrap_inferred`], textual scalars are reinterpreted on access by
//! [`parse`]: integers, floats, timestamps and embedded JSON documents.
//!
//! # Example
//!
//! ```
//! use deep_struct::{wrap, Key, Value};
//!
//! let mut doc: Value = [
//!     (Key::sym("name"), Value::from("deep")),
//!     (Key::text("retries"), Value::Int(0)),
//! ]
//! .into_iter()
//! .collect();
//!
//! let mut root = wrap(&mut doc).into_map().unwrap();
//! assert_eq!(root.get("name").unwrap().as_str(), Some("deep"));
//! assert!(root.has_key(Key::sym("retries")));
//! assert!(!root.is_present_truthy("retries"));
//!
//! root.set(Key::sym("retries"), 3);
//! assert_eq!(root.to_json().unwrap(), r#"{"name":"deep","retries":3}"#);
//! ```

pub mod accessor;
pub mod error;
mod held;
pub mod infer;
pub mod map;
pub mod seq;
pub mod value;
pub mod wrap;

pub use accessor::{Access, Accessor};
pub use error::{NavError, Result};
pub use infer::parse;
pub use map::MapNavigator;
pub use seq::{Iter, SeqKind, SeqNavigator};
pub use value::{Key, Map, Value};
pub use wrap::{infer_text, wrap, wrap_inferred, wrap_owned, wrap_with, Scalar, WrapOptions, Wrapped};
