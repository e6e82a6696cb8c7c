use core::fmt;

/// The value category of a [`Bindable`](crate::Bindable) type.
///
/// The category fixes a few behaviors that do not depend on the concrete type:
/// aggregates are always truthy and never use declared conversions,
/// only aggregates and references take part in member lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    /// Struct-like values stored by value.
    Aggregate,
    /// Shared handles such as `Arc<T>`; `Option<Arc<T>>` adds a null state.
    Reference,
    /// Booleans, characters and numbers.
    Scalar,
    /// Ordered collections, including strings.
    Array,
    /// Associative collections.
    Map,
    /// Function pointers, closures and bound methods.
    Callable,
    /// Raw pointers.
    Pointer,
}

impl Category {
    /// Returns `true` if member lookup applies to this category.
    #[inline]
    pub const fn has_members(self) -> bool {
        matches!(self, Self::Aggregate | Self::Reference)
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Aggregate => f.pad("Aggregate"),
            Self::Reference => f.pad("Reference"),
            Self::Scalar => f.pad("Scalar"),
            Self::Array => f.pad("Array"),
            Self::Map => f.pad("Map"),
            Self::Callable => f.pad("Callable"),
            Self::Pointer => f.pad("Pointer"),
        }
    }
}
