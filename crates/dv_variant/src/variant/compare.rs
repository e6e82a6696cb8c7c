use alloc::boxed::Box;
use core::any::Any;
use core::cmp::Ordering;

use log::trace;

use super::{Binding, Variant};
use crate::descriptor::Descriptor;
use crate::{VariantError, VariantResult};

impl Variant {
    /// Compares two variants for equality.
    ///
    /// Values of one type use that type's equality. Otherwise `self` is
    /// converted into the type of `other`, and failing that `other` into
    /// the type of `self`. Two empty variants are equal, an empty and a
    /// bound one are not.
    ///
    /// # Examples
    ///
    /// ```
    /// use dv_variant::Variant;
    ///
    /// assert!(Variant::new(1_i32).equals(&Variant::new(1_i64)).unwrap());
    /// assert!(!Variant::new(1_i32).equals(&Variant::empty()).unwrap());
    /// assert!(Variant::new(1_i32).equals(&Variant::new("1")).is_err());
    /// ```
    pub fn equals(&self, other: &Variant) -> VariantResult<bool> {
        match (&self.binding, &other.binding) {
            (None, None) => Ok(true),
            (Some(_), None) | (None, Some(_)) => Ok(false),
            (Some(lhs), Some(rhs)) => compare_with(lhs, rhs, |d, a, b| d.equals(a, b))
                .ok_or_else(|| not_comparable(self, other)),
        }
    }

    /// Orders two variants, converting between types like
    /// [`equals`](Self::equals).
    ///
    /// Types without an ordering compare `Equal` when equal and fail with
    /// [`VariantError::NotComparable`] otherwise.
    pub fn compare(&self, other: &Variant) -> VariantResult<Ordering> {
        let result = match (&self.binding, &other.binding) {
            (None, None) => Some(Ordering::Equal),
            (Some(lhs), Some(rhs)) => compare_with(lhs, rhs, ordering),
            _ => None,
        };
        result.ok_or_else(|| not_comparable(self, other))
    }
}

fn ordering(descriptor: &Descriptor, lhs: &dyn Any, rhs: &dyn Any) -> Option<Ordering> {
    if descriptor.is_ordered() {
        return descriptor.compare(lhs, rhs);
    }
    match descriptor.equals(lhs, rhs) {
        Some(true) => Some(Ordering::Equal),
        _ => None,
    }
}

/// Runs `op` on two bindings in a common type.
///
/// Tries the type of `rhs` first, viewed read-only, then the type of `lhs`.
fn compare_with<R>(
    lhs: &Binding,
    rhs: &Binding,
    op: impl Fn(&Descriptor, &dyn Any, &dyn Any) -> Option<R>,
) -> Option<R> {
    if lhs.descriptor.type_id() == rhs.descriptor.type_id() {
        return op(lhs.descriptor, lhs.slot(), rhs.slot());
    }
    if let Some(converted) = convert_for(lhs, rhs) {
        return op(rhs.descriptor, &*converted, rhs.slot());
    }
    if let Some(converted) = convert_for(rhs, lhs) {
        trace!(
            "comparing `{}` with `{}` in the left-hand type",
            lhs.qualified_type(),
            rhs.qualified_type(),
        );
        return op(lhs.descriptor, lhs.slot(), &*converted);
    }
    None
}

/// Converts `from` into the type of `to`, if allowed.
fn convert_for(from: &Binding, to: &Binding) -> Option<Box<dyn Any>> {
    let target = to.descriptor.ty().qualified(to.qualifier.read_only());
    if !from.descriptor.converts_to(from.qualifier, &target) {
        return None;
    }
    from.descriptor.convert(from.slot(), target.id())
}

#[cold]
fn not_comparable(lhs: &Variant, rhs: &Variant) -> VariantError {
    VariantError::NotComparable {
        lhs: lhs.type_label(),
        rhs: rhs.type_label(),
    }
}

impl PartialEq for Variant {
    /// Failed comparisons count as unequal.
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.equals(other).unwrap_or(false)
    }
}

impl PartialOrd for Variant {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        self.compare(other).ok()
    }
}
