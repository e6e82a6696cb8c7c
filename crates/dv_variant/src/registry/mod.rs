//! Per-type registration.
//!
//! ## Menu
//!
//! - [`Bindable`]: implemented by every type a [`Variant`](crate::Variant) can hold.
//! - [`descriptor_of`]: the process-wide, lazily populated descriptor cell.
//! - [`TypeRegistry`]: an explicit store of descriptors, searchable by type path or name.
//!
//! ## auto_register
//!
//! See [`TypeRegistry::auto_register`].
//!
//! Static registration goes through the [`inventory`] crate. Types are
//! submitted with [`impl_auto_register!`](crate::impl_auto_register);
//! on platforms `inventory` does not support, nothing is collected.
//!
//! [`inventory`]: https://docs.rs/inventory

// -----------------------------------------------------------------------------
// Modules

mod bindable;
mod cell;
mod type_registry;

// -----------------------------------------------------------------------------
// Exports

pub use bindable::Bindable;
pub use cell::descriptor_of;
pub use type_registry::TypeRegistry;
