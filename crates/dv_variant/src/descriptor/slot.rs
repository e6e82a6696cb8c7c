use core::any::{Any, type_name};

/// Reinterprets an erased slot as the descriptor's concrete type.
///
/// A descriptor is only ever paired with slots of its own type,
/// so a failed downcast is a broken binding.
#[inline]
pub(crate) fn slot<T: Any>(value: &dyn Any) -> &T {
    match value.downcast_ref::<T>() {
        Some(value) => value,
        None => foreign_slot::<T>(),
    }
}

#[cold]
#[inline(never)]
fn foreign_slot<T>() -> ! {
    panic!(
        "descriptor for `{}` was paired with a foreign slot",
        type_name::<T>()
    );
}
