//! A discriminated optional value whose accessors fail loudly.
//!
//! [`Optional<T>`] wraps an [`Option<T>`] but exposes fallible accessors
//! returning [`EmptyOptionalError`] instead of panicking, so it can be used
//! at API boundaries where "no value" must be reported to the caller.

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Returned when a value is requested from an empty [`Optional`].
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("attempted to access the value of an empty optional")]
pub struct EmptyOptionalError;

// -----------------------------------------------------------------------------
// Optional

/// Either no value, or exactly one value of `T`.
///
/// # Examples
///
/// ```
/// use dv_utils::Optional;
///
/// let mut opt = Optional::some(20);
/// assert_eq!(opt.map(|v| v + 1).get(), Ok(&21));
///
/// let previous = opt.replace(5);
/// assert_eq!(previous.get(), Ok(&20));
///
/// assert_eq!(opt.take(), Ok(5));
/// assert!(opt.is_none());
/// assert!(opt.take().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Optional<T>(Option<T>);

impl<T> Optional<T> {
    /// Creates an optional holding `value`.
    #[inline]
    pub const fn some(value: T) -> Self {
        Self(Some(value))
    }

    /// Creates an empty optional.
    #[inline]
    pub const fn none() -> Self {
        Self(None)
    }

    #[inline]
    pub const fn is_some(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub const fn is_none(&self) -> bool {
        self.0.is_none()
    }

    /// Returns the held value.
    pub fn get(&self) -> Result<&T, EmptyOptionalError> {
        self.0.as_ref().ok_or(EmptyOptionalError)
    }

    /// Returns the held value mutably.
    pub fn get_mut(&mut self) -> Result<&mut T, EmptyOptionalError> {
        self.0.as_mut().ok_or(EmptyOptionalError)
    }

    /// Moves the value out, leaving the optional empty.
    pub fn take(&mut self) -> Result<T, EmptyOptionalError> {
        self.0.take().ok_or(EmptyOptionalError)
    }

    /// Stores `value` and returns the previous state.
    pub fn replace(&mut self, value: T) -> Optional<T> {
        Optional(self.0.replace(value))
    }

    /// Applies `f` to the value if there is one.
    pub fn map<U>(&self, f: impl FnOnce(&T) -> U) -> Optional<U> {
        Optional(self.0.as_ref().map(f))
    }

    /// Applies `f` to the value, or returns `default` when empty.
    pub fn map_or<U>(&self, default: U, f: impl FnOnce(&T) -> U) -> U {
        self.0.as_ref().map_or(default, f)
    }

    /// Applies `f` to the value, or computes a fallback with `default` when empty.
    pub fn map_or_else<U>(&self, default: impl FnOnce() -> U, f: impl FnOnce(&T) -> U) -> U {
        self.0.as_ref().map_or_else(default, f)
    }

    /// Returns `other` if `self` holds a value, otherwise an empty optional.
    pub fn and<U>(&self, other: Optional<U>) -> Optional<U> {
        if self.is_some() { other } else { Optional::none() }
    }

    /// Chains a computation that may itself produce no value.
    pub fn and_then<U>(&self, f: impl FnOnce(&T) -> Optional<U>) -> Optional<U> {
        match &self.0 {
            Some(value) => f(value),
            None => Optional::none(),
        }
    }

    /// Converts back into a plain [`Option`].
    #[inline]
    pub fn into_option(self) -> Option<T> {
        self.0
    }

    #[inline]
    pub const fn as_option(&self) -> &Option<T> {
        &self.0
    }
}

impl<T> Default for Optional<T> {
    #[inline]
    fn default() -> Self {
        Self::none()
    }
}

impl<T> From<Option<T>> for Optional<T> {
    #[inline]
    fn from(value: Option<T>) -> Self {
        Self(value)
    }
}

impl<T> From<Optional<T>> for Option<T> {
    #[inline]
    fn from(value: Optional<T>) -> Self {
        value.0
    }
}
