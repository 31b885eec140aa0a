//! Marker for data that may enter variable-time code

use core::ops::Deref;

/// A borrowed value the caller asserts is public.
///
/// Variable-time entry points (`*_vartime`) only accept their inputs wrapped
/// in `Public`, so a secret scalar cannot reach them by accident: the caller
/// has to spell out `Public::new(&x)` at the call site.
#[derive(Debug)]
pub struct Public<'a, T>(&'a T);

impl<'a, T> Public<'a, T> {
    /// Declare `value` as public data
    #[must_use]
    pub const fn new(value: &'a T) -> Self {
        Self(value)
    }

    /// The wrapped value
    #[must_use]
    pub const fn get(&self) -> &'a T {
        self.0
    }
}

impl<T> Clone for Public<'_, T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for Public<'_, T> {}

impl<T> Deref for Public<'_, T> {
    type Target = T;

    fn deref(&self) -> &T {
        self.0
    }
}
