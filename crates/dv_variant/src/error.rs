use alloc::string::String;

use dv_utils::UninitializedCallableError;
use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Every failure a [`Variant`](crate::Variant) operation can report.
///
/// Type names are full type paths as produced by [`core::any::type_name`],
/// prefixed by their qualifier when one applies.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum VariantError {
    #[error("attempted to use an uninitialized variant")]
    Uninitialized,

    #[error("type mismatch: a variant holding `{held}` cannot provide `{requested}`")]
    TypeMismatch { held: String, requested: String },

    #[error("`{type_name}` is not callable")]
    NotCallable { type_name: &'static str },

    #[error("`{type_name}` is not iterable")]
    NotIterable { type_name: &'static str },

    #[error("`{type_name}` is not indexable")]
    NotIndexable { type_name: &'static str },

    #[error("`{lhs}` and `{rhs}` are not comparable")]
    NotComparable { lhs: String, rhs: String },

    #[error("`{type_name}` does not support `{operation}`")]
    NotSupported {
        operation: &'static str,
        type_name: &'static str,
    },

    #[error("`{type_name}` has no member named `{member}`")]
    NoSuchMember {
        type_name: &'static str,
        member: String,
    },

    #[error("expected {expected}{} argument(s), found {found}", variadic_suffix(.variadic))]
    ArgumentCount {
        expected: usize,
        variadic: bool,
        found: usize,
    },

    #[error("attempted to call an uninitialized callable")]
    UninitializedCallable,

    #[error("index {index} is out of range for length {len}")]
    IndexOutOfRange { index: i128, len: usize },

    #[error("key `{key}` was not found")]
    KeyNotFound { key: String },

    #[error("null reference of type `{type_name}`")]
    NullReference { type_name: &'static str },

    #[error("`{type_name}` has an unsupported shape: {reason}")]
    UnsupportedShape {
        type_name: &'static str,
        reason: &'static str,
    },
}

fn variadic_suffix(variadic: &bool) -> &'static str {
    if *variadic { " or more" } else { "" }
}

/// A `Result` alias for [`VariantError`].
pub type VariantResult<T> = Result<T, VariantError>;

impl VariantError {
    /// Panics with this error.
    ///
    /// Used where an error can only come from a malformed type registration.
    #[cold]
    #[inline(never)]
    pub fn handle_error(&self) -> ! {
        panic!("{self}");
    }

    /// Returns `true` for the failures a membership probe turns into absence.
    #[inline]
    pub const fn is_missing_entry(&self) -> bool {
        matches!(self, Self::IndexOutOfRange { .. } | Self::KeyNotFound { .. })
    }
}

impl From<UninitializedCallableError> for VariantError {
    #[inline]
    fn from(_: UninitializedCallableError) -> Self {
        Self::UninitializedCallable
    }
}
