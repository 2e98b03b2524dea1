//! Attribute-style access.
//!
//! A member name is read the way a dynamic language would read a method
//! call on the navigator: `name?` asks whether `name` is present and truthy,
//! `name=` assigns, and a bare `name` reads. Native capabilities of the
//! wrapped collection (`size`, `keys`, ...) are checked by each navigator
//! before any of these forms.

use crate::value::{Key, Value};
use crate::wrap::Wrapped;

/// How a non-native member name is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accessor<'m> {
    /// `name?`
    Query(&'m str),
    /// `name=`
    Assign(&'m str),
    /// `name`
    Read(&'m str),
}

impl<'m> Accessor<'m> {
    pub fn parse(member: &'m str) -> Self {
        if let Some(stem) = member.strip_suffix('?') {
            Accessor::Query(stem)
        } else if let Some(stem) = member.strip_suffix('=') {
            Accessor::Assign(stem)
        } else {
            Accessor::Read(member)
        }
    }
}

/// Result of an attribute-style access.
#[derive(Debug)]
pub enum Access<'a> {
    /// A navigated value: a present key, or `first`/`last` of a sequence.
    Value(Wrapped<'a>),
    /// `first`/`last` of an empty sequence.
    Nil,
    Bool(bool),
    Count(usize),
    Keys(Vec<Key>),
    Values(Vec<Value>),
    Assigned,
}

impl<'a> Access<'a> {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Access::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_count(&self) -> Option<usize> {
        match self {
            Access::Count(n) => Some(*n),
            _ => None,
        }
    }

    pub fn into_wrapped(self) -> Option<Wrapped<'a>> {
        match self {
            Access::Value(wrapped) => Some(wrapped),
            _ => None,
        }
    }

    pub fn is_assigned(&self) -> bool {
        matches!(self, Access::Assigned)
    }
}
