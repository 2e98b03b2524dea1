//! Navigation over maps with indifferent key resolution.

use serde::{Serialize, Serializer};
use std::fmt;
use tracing::{debug, trace};

use crate::accessor::{Access, Accessor};
use crate::error::{check_arity, NavError, Result};
use crate::held::Held;
use crate::value::{fmt_map, serialize_map, Key, Map, Value};
use crate::wrap::{wrap_with, WrapOptions, Wrapped};

/// Capabilities of the map itself, answered before any key lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MapMember {
    Size,
    Empty,
    Keys,
    Values,
}

impl MapMember {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "size" | "length" | "count" => Some(MapMember::Size),
            "empty?" => Some(MapMember::Empty),
            "keys" => Some(MapMember::Keys),
            "values" => Some(MapMember::Values),
            _ => None,
        }
    }
}

/// Read/write view over a [`Map`].
///
/// Every key-based operation goes through [`MapNavigator::resolve`], so a
/// caller never needs to know whether the map stores a given key as text or
/// as a symbol.
pub struct MapNavigator<'a> {
    map: Held<'a, Map>,
    options: WrapOptions,
}

impl<'a> MapNavigator<'a> {
    pub(crate) fn new(map: Held<'a, Map>, options: WrapOptions) -> Self {
        Self { map, options }
    }

    pub fn options(&self) -> WrapOptions {
        self.options
    }

    /// Picks the entry `key` should address.
    ///
    /// The key as given wins if present, then its counterpart in the other
    /// representation. An absent key comes back unchanged.
    pub fn resolve(&self, key: impl Into<Key>) -> Key {
        let key = key.into();
        if self.map.contains_key(&key) {
            return key;
        }
        let counterpart = key.counterpart();
        if self.map.contains_key(&counterpart) {
            trace!(requested = %key, resolved = %counterpart, "resolved key through its other representation");
            return counterpart;
        }
        key
    }

    pub fn has_key(&self, key: impl Into<Key>) -> bool {
        let key = self.resolve(key);
        self.map.contains_key(&key)
    }

    /// Wrapped entry for `key`, or `None` if neither representation is
    /// present.
    pub fn get(&mut self, key: impl Into<Key>) -> Option<Wrapped<'_>> {
        let key = self.resolve(key);
        let options = self.options;
        self.map.get_mut(&key).map(|value| wrap_with(value, options))
    }

    /// Writes straight into the map. An absent key is inserted in the
    /// representation given.
    pub fn set(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        let key = self.resolve(key);
        self.map.insert(key, value.into());
    }

    pub fn assign(&mut self, key: impl Into<Key>, value: impl Into<Value>) {
        self.set(key, value);
    }

    /// Removes the entry `key` resolves to, keeping the order of the rest.
    pub fn remove(&mut self, key: impl Into<Key>) -> Option<Value> {
        let key = self.resolve(key);
        self.map.shift_remove(&key)
    }

    /// Present and truthy. Distinct from [`MapNavigator::has_key`]: a key
    /// holding `0` or `false` is present but not truthy.
    pub fn is_present_truthy(&mut self, key: impl Into<Key>) -> bool {
        self.get(key).is_some_and(|found| found.is_truthy())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &Key> + '_ {
        self.map.keys()
    }

    /// Entries in insertion order, each value wrapped.
    pub fn iter(&mut self) -> impl Iterator<Item = (&Key, Wrapped<'_>)> + '_ {
        let options = self.options;
        self.map
            .iter_mut()
            .map(move |(key, value)| (key, wrap_with(value, options)))
    }

    pub fn unwrap(&self) -> &Map {
        &self.map
    }

    pub fn unwrap_mut(&mut self) -> &mut Map {
        &mut self.map
    }

    /// Whether `member` names a native capability of the map rather than a key.
    pub fn is_native_member(member: &str) -> bool {
        MapMember::from_name(member).is_some()
    }

    /// Whether [`MapNavigator::access`] would accept `member` with the
    /// right arguments.
    pub fn responds_to(&self, member: &str) -> bool {
        if Self::is_native_member(member) {
            return true;
        }
        match Accessor::parse(member) {
            Accessor::Query(stem) => self.has_key(Key::sym(stem)),
            Accessor::Assign(_) => true,
            Accessor::Read(name) => self.has_key(Key::text(name)),
        }
    }

    /// Attribute-style access.
    ///
    /// Native capabilities (`size`/`length`/`count`, `empty?`, `keys`,
    /// `values`) take precedence over keys of the same name. Then `name?`
    /// answers [`MapNavigator::is_present_truthy`], `name=` assigns its single
    /// argument, and a bare `name` reads a present key.
    ///
    /// # Errors
    ///
    /// - [`NavError::ArityMismatch`] for arguments passed to a native member,
    ///   or an assignment without exactly one argument.
    /// - [`NavError::UndefinedAccessor`] for anything else.
    ///
    /// # Example
    ///
    /// ```
    /// use deep_struct::{wrap, Value};
    ///
    /// let mut doc = Value::from(serde_json::json!({"retries": 0}));
    /// let mut map = wrap(&mut doc).into_map().unwrap();
    ///
    /// assert_eq!(map.access("retries?", vec![]).unwrap().as_bool(), Some(false));
    /// assert!(map.access("retries=", vec![Value::Int(3)]).unwrap().is_assigned());
    /// assert_eq!(map.access("retries", vec![]).unwrap().into_wrapped().unwrap().as_i64(), Some(3));
    /// assert!(map.access("timeout", vec![]).is_err());
    /// ```
    pub fn access(&mut self, member: &str, args: Vec<Value>) -> Result<Access<'_>> {
        if let Some(native) = MapMember::from_name(member) {
            check_arity(member, 0, args.len())?;
            return Ok(match native {
                MapMember::Size => Access::Count(self.len()),
                MapMember::Empty => Access::Bool(self.is_empty()),
                MapMember::Keys => Access::Keys(self.map.keys().cloned().collect()),
                MapMember::Values => Access::Values(self.map.values().cloned().collect()),
            });
        }

        match Accessor::parse(member) {
            Accessor::Query(stem) => Ok(Access::Bool(self.is_present_truthy(Key::sym(stem)))),
            Accessor::Assign(stem) => {
                let [value] = <[Value; 1]>::try_from(args).map_err(|args| {
                    NavError::ArityMismatch {
                        member: member.to_string(),
                        expected: 1,
                        given: args.len(),
                    }
                })?;
                self.set(Key::text(stem), value);
                Ok(Access::Assigned)
            }
            Accessor::Read(name) => {
                if args.is_empty() {
                    if let Some(found) = self.get(Key::text(name)) {
                        return Ok(Access::Value(found));
                    }
                }
                debug!(member, args = args.len(), "undefined map accessor");
                Err(NavError::UndefinedAccessor {
                    member: member.to_string(),
                    target: "map",
                })
            }
        }
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

impl Serialize for MapNavigator<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serialize_map(&self.map, serializer)
    }
}

impl fmt::Debug for MapNavigator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<MapNavigator ")?;
        fmt_map(&self.map, f)?;
        f.write_str(">")
    }
}
