//! Navigation over sequences and sets.

use serde::{Serialize, Serializer};
use std::fmt;
use std::slice;
use tracing::debug;

use crate::accessor::{Access, Accessor};
use crate::error::{check_arity, NavError, Result};
use crate::held::Held;
use crate::value::{fmt_items, Value};
use crate::wrap::{wrap_with, WrapOptions, Wrapped};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeqKind {
    Ordered,
    /// Set semantics: members stay unique.
    Unordered,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SeqMember {
    Size,
    Empty,
    First,
    Last,
}

impl SeqMember {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "size" | "length" | "count" => Some(SeqMember::Size),
            "empty?" => Some(SeqMember::Empty),
            "first" => Some(SeqMember::First),
            "last" => Some(SeqMember::Last),
            _ => None,
        }
    }
}

/// Read/write view over a sequence or a set.
pub struct SeqNavigator<'a> {
    items: Held<'a, Vec<Value>>,
    kind: SeqKind,
    options: WrapOptions,
}

impl<'a> SeqNavigator<'a> {
    pub(crate) fn new(items: Held<'a, Vec<Value>>, kind: SeqKind, options: WrapOptions) -> Self {
        Self {
            items,
            kind,
            options,
        }
    }

    pub fn kind(&self) -> SeqKind {
        self.kind
    }

    pub fn is_set(&self) -> bool {
        self.kind == SeqKind::Unordered
    }

    /// Maps `index` onto a position; negative indices count from the end.
    fn position(&self, index: i64) -> Result<usize> {
        let len = self.items.len();
        let pos = if index < 0 {
            i64::try_from(len).ok().map(|len| len + index)
        } else {
            Some(index)
        };
        match pos.and_then(|pos| usize::try_from(pos).ok()) {
            Some(pos) if pos < len => Ok(pos),
            _ => Err(NavError::IndexOutOfRange { index, len }),
        }
    }

    /// Wrapped element at `index`.
    ///
    /// # Errors
    ///
    /// [`NavError::IndexOutOfRange`] past either end.
    pub fn get(&mut self, index: i64) -> Result<Wrapped<'_>> {
        let pos = self.position(index)?;
        let options = self.options;
        Ok(wrap_with(&mut self.items[pos], options))
    }

    /// Overwrites the element at `index` in place.
    ///
    /// Returns `false`, leaving the set unchanged, when a set already holds
    /// `value` at another position.
    pub fn set(&mut self, index: i64, value: impl Into<Value>) -> Result<bool> {
        let pos = self.position(index)?;
        let value = value.into();
        if self.is_set()
            && self
                .items
                .iter()
                .enumerate()
                .any(|(i, member)| i != pos && *member == value)
        {
            debug!(index, "set already holds value, write skipped");
            return Ok(false);
        }
        self.items[pos] = value;
        Ok(true)
    }

    /// Appends `value`. Returns `false` when a set already holds it.
    pub fn push(&mut self, value: impl Into<Value>) -> bool {
        let value = value.into();
        if self.is_set() && self.items.contains(&value) {
            return false;
        }
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.items.contains(value)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn size(&self) -> usize {
        self.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Lazy traversal yielding each element wrapped, in order. Every call
    /// starts over from the first element.
    pub fn iter(&mut self) -> Iter<'_> {
        Iter {
            inner: self.items.iter_mut(),
            options: self.options,
        }
    }

    /// Eager traversal handing each wrapped element to `f`.
    pub fn each<F>(&mut self, mut f: F) -> &mut Self
    where
        F: FnMut(Wrapped<'_>),
    {
        for wrapped in self.iter() {
            f(wrapped);
        }
        self
    }

    pub fn unwrap(&self) -> &[Value] {
        &self.items
    }

    pub fn unwrap_mut(&mut self) -> &mut Vec<Value> {
        &mut self.items
    }

    pub fn to_value(&self) -> Value {
        match self.kind {
            SeqKind::Ordered => Value::Seq(self.items.to_vec()),
            SeqKind::Unordered => Value::Set(self.items.to_vec()),
        }
    }

    /// Attribute-style access: `size`/`length`/`count`, `empty?`, `first`
    /// and `last`. Sequences have no keys, so every other member is
    /// undefined.
    pub fn access(&mut self, member: &str, args: Vec<Value>) -> Result<Access<'_>> {
        let Some(native) = SeqMember::from_name(member) else {
            debug!(member, form = ?Accessor::parse(member), "undefined sequence accessor");
            return Err(NavError::UndefinedAccessor {
                member: member.to_string(),
                target: if self.is_set() { "set" } else { "sequence" },
            });
        };
        check_arity(member, 0, args.len())?;
        Ok(match native {
            SeqMember::Size => Access::Count(self.len()),
            SeqMember::Empty => Access::Bool(self.is_empty()),
            SeqMember::First => match self.get(0) {
                Ok(found) => Access::Value(found),
                Err(_) => Access::Nil,
            },
            SeqMember::Last => match self.get(-1) {
                Ok(found) => Access::Value(found),
                Err(_) => Access::Nil,
            },
        })
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Iterator returned by [`SeqNavigator::iter`].
pub struct Iter<'b> {
    inner: slice::IterMut<'b, Value>,
    options: WrapOptions,
}

impl<'b> Iterator for Iter<'b> {
    type Item = Wrapped<'b>;

    fn next(&mut self) -> Option<Wrapped<'b>> {
        let options = self.options;
        self.inner.next().map(|value| wrap_with(value, options))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl DoubleEndedIterator for Iter<'_> {
    fn next_back(&mut self) -> Option<Self::Item> {
        let options = self.options;
        self.inner.next_back().map(|value| wrap_with(value, options))
    }
}

impl ExactSizeIterator for Iter<'_> {}

impl<'b, 'a> IntoIterator for &'b mut SeqNavigator<'a> {
    type Item = Wrapped<'b>;
    type IntoIter = Iter<'b>;

    fn into_iter(self) -> Iter<'b> {
        self.iter()
    }
}

impl Serialize for SeqNavigator<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_seq(self.items.iter())
    }
}

impl fmt::Debug for SeqNavigator<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("#<SeqNavigator ")?;
        if self.is_set() {
            f.write_str("Set")?;
        }
        fmt_items(&self.items, f)?;
        f.write_str(">")
    }
}
