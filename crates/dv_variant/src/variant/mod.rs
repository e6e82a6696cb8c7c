//! The [`Variant`] container.
//!
//! ## Menu
//!
//! - construction and type queries: this module.
//! - extraction: [`get`](Variant::get), [`peek`](Variant::peek), [`take`](Variant::take).
//! - invocation: [`call`](Variant::call), [`index`](Variant::index),
//!   [`probe`](Variant::probe), [`iterate_over`](Variant::iterate_over),
//!   [`length`](Variant::length).
//! - comparison: [`equals`](Variant::equals), [`compare`](Variant::compare).

// -----------------------------------------------------------------------------
// Modules

mod compare;
mod extract;
mod invoke;

#[cfg(test)]
mod tests;

// -----------------------------------------------------------------------------
// Variant

use alloc::boxed::Box;
use alloc::string::{String, ToString};
use core::any::Any;
use core::fmt;

use crate::call::IntoFunction;
use crate::descriptor::Descriptor;
use crate::info::{Category, QualifiedType, Qualifier};
use crate::{Bindable, VariantError, VariantResult, descriptor_of};

/// The descriptor and slot of a non-empty [`Variant`].
///
/// The slot always holds a value of the descriptor's type.
struct Binding {
    descriptor: &'static Descriptor,
    qualifier: Qualifier,
    slot: Box<dyn Any>,
}

impl Binding {
    #[inline]
    fn qualified_type(&self) -> QualifiedType {
        self.descriptor.ty().qualified(self.qualifier)
    }

    #[inline]
    fn slot(&self) -> &dyn Any {
        &*self.slot
    }
}

impl Clone for Binding {
    fn clone(&self) -> Self {
        Self {
            descriptor: self.descriptor,
            qualifier: self.qualifier,
            slot: self.descriptor.clone_slot(self.slot()),
        }
    }
}

/// A single-slot container for a value of any [`Bindable`] type.
///
/// A variant is either empty or holds exactly one value together with
/// the `&'static` [`Descriptor`] of its type and a [`Qualifier`].
/// Cloning copies the value through its descriptor; shared handles
/// such as `Arc<T>` duplicate the handle.
///
/// Variants are single-threaded: they are neither `Send` nor `Sync`.
///
/// # Examples
///
/// ```
/// use std::collections::BTreeMap;
/// use dv_variant::Variant;
///
/// let mut x = 12;
/// let v = Variant::new(x);
/// x = 13;
/// assert_eq!(v.get::<i32>().unwrap(), 12);
/// # let _ = x;
///
/// let map = Variant::new(BTreeMap::from([("a".to_string(), 11)]));
/// assert_eq!(map.probe("a").unwrap().get::<i32>().unwrap(), 11);
/// assert!(!map.probe("b").unwrap().has_value());
/// ```
#[derive(Clone, Default)]
pub struct Variant {
    binding: Option<Binding>,
}

impl Variant {
    /// Wraps a value with the `Mutable` qualifier.
    ///
    /// # Panics
    ///
    /// Panics if the registration of `T` is malformed, e.g. declares two
    /// forwarding members. See [`try_new`](Self::try_new).
    #[inline]
    pub fn new<T: Bindable>(value: T) -> Self {
        Self::qualified(value, Qualifier::Mutable)
    }

    /// Wraps a value, returning the registration error of a malformed `T`.
    #[inline]
    pub fn try_new<T: Bindable>(value: T) -> VariantResult<Self> {
        Self::try_qualified(value, Qualifier::Mutable)
    }

    /// Wraps a value with the given qualifier.
    ///
    /// # Panics
    ///
    /// See [`new`](Self::new).
    pub fn qualified<T: Bindable>(value: T, qualifier: Qualifier) -> Self {
        match Self::try_qualified(value, qualifier) {
            Ok(variant) => variant,
            Err(error) => error.handle_error(),
        }
    }

    pub fn try_qualified<T: Bindable>(value: T, qualifier: Qualifier) -> VariantResult<Self> {
        let descriptor = descriptor_of::<T>()?;
        Ok(Self {
            binding: Some(Binding {
                descriptor,
                qualifier,
                slot: Box::new(value),
            }),
        })
    }

    /// Wraps a closure with typed parameters as a callable
    /// [`Function`](crate::call::Function).
    #[inline]
    pub fn from_fn<F, Marker>(f: F) -> Self
    where
        F: IntoFunction<Marker>,
    {
        Self::new(f.into_function())
    }

    #[inline]
    pub const fn empty() -> Self {
        Self { binding: None }
    }

    pub(crate) fn from_slot(
        descriptor: &'static Descriptor,
        slot: Box<dyn Any>,
        qualifier: Qualifier,
    ) -> Self {
        Self {
            binding: Some(Binding {
                descriptor,
                qualifier,
                slot,
            }),
        }
    }

    /// Gives a part taken out of a binding qualified `whole` the same
    /// qualifier. Parts already qualified keep theirs.
    pub(crate) fn inherit(mut self, whole: Qualifier) -> Self {
        if let Some(binding) = &mut self.binding
            && binding.qualifier == Qualifier::Mutable
        {
            binding.qualifier = whole;
        }
        self
    }

    /// Replaces the whole binding with a `Mutable` binding of `value`.
    ///
    /// # Panics
    ///
    /// See [`new`](Self::new).
    #[inline]
    pub fn set<T: Bindable>(&mut self, value: T) {
        *self = Self::new(value);
    }

    /// Drops the held value, leaving the variant empty.
    #[inline]
    pub fn clear(&mut self) {
        self.binding = None;
    }

    /// Adds qualifiers to the binding.
    ///
    /// Fails with [`VariantError::TypeMismatch`] if `qualifier` is not
    /// reachable from the current one: qualifiers are never stripped.
    pub fn requalify(&mut self, qualifier: Qualifier) -> VariantResult<()> {
        let binding = self.binding_mut()?;
        if !binding.qualifier.converts_to(qualifier) {
            return Err(VariantError::TypeMismatch {
                held: binding.qualified_type().to_string(),
                requested: binding.descriptor.ty().qualified(qualifier).to_string(),
            });
        }
        binding.qualifier = qualifier;
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Returns `true` if a value is bound, including a null reference.
    #[inline]
    pub fn has_value(&self) -> bool {
        self.binding.is_some()
    }

    /// The qualified type of the held value, `None` when empty.
    #[inline]
    pub fn ty(&self) -> Option<QualifiedType> {
        self.binding.as_ref().map(Binding::qualified_type)
    }

    #[inline]
    pub fn qualifier(&self) -> Option<Qualifier> {
        self.binding.as_ref().map(|b| b.qualifier)
    }

    #[inline]
    pub fn descriptor(&self) -> Option<&'static Descriptor> {
        self.binding.as_ref().map(|b| b.descriptor)
    }

    #[inline]
    pub fn category(&self) -> Option<Category> {
        self.binding.as_ref().map(|b| b.descriptor.category())
    }

    /// Reads the value as a boolean. Empty variants are falsy.
    ///
    /// | category  | truthy when                   |
    /// |-----------|-------------------------------|
    /// | aggregate | always                        |
    /// | reference | non-null                      |
    /// | scalar    | `true` or nonzero             |
    /// | array/map | not empty                     |
    /// | callable  | set                           |
    /// | pointer   | non-null                      |
    pub fn is_truthy(&self) -> bool {
        match &self.binding {
            Some(binding) => binding.descriptor.is_truthy(binding.slot()),
            None => false,
        }
    }

    // -------------------------------------------------------------------------
    // Internal

    #[inline]
    fn binding(&self) -> VariantResult<&Binding> {
        self.binding.as_ref().ok_or(VariantError::Uninitialized)
    }

    #[inline]
    fn binding_mut(&mut self) -> VariantResult<&mut Binding> {
        self.binding.as_mut().ok_or(VariantError::Uninitialized)
    }

    #[inline]
    pub(crate) fn slot(&self) -> Option<&dyn Any> {
        self.binding.as_ref().map(Binding::slot)
    }

    fn type_label(&self) -> String {
        match &self.binding {
            Some(binding) => binding.qualified_type().to_string(),
            None => String::from(UNINITIALIZED),
        }
    }
}

const UNINITIALIZED: &str = "<uninitialized>";

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(binding) => binding.descriptor.render(binding.slot(), f),
            None => f.write_str(UNINITIALIZED),
        }
    }
}

impl fmt::Debug for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.binding {
            Some(binding) => {
                write!(f, "Variant({}: ", binding.qualified_type())?;
                binding.descriptor.render_literal(binding.slot(), f)?;
                f.write_str(")")
            }
            None => f.write_str("Variant(<uninitialized>)"),
        }
    }
}
