use std::ops::{Deref, DerefMut};

/// Storage behind a navigator.
///
/// Structures handed in by the caller are borrowed so that writes land in
/// them directly. Structures decoded by scalar inference have no other owner
/// and are held by value.
#[derive(Debug)]
pub(crate) enum Held<'a, T> {
    Borrowed(&'a mut T),
    Owned(T),
}

impl<T> Held<'_, T> {
    pub(crate) fn is_borrowed(&self) -> bool {
        matches!(self, Held::Borrowed(_))
    }
}

impl<T: Clone> Held<'_, T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Held::Borrowed(inner) => inner.clone(),
            Held::Owned(inner) => inner,
        }
    }
}

impl<T> Deref for Held<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        match self {
            Held::Borrowed(inner) => &**inner,
            Held::Owned(inner) => inner,
        }
    }
}

impl<T> DerefMut for Held<'_, T> {
    fn deref_mut(&mut self) -> &mut T {
        match self {
            Held::Borrowed(inner) => &mut **inner,
            Held::Owned(inner) => inner,
        }
    }
}
