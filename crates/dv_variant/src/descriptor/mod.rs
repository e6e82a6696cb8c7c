//! Per-type operation tables.
//!
//! A [`Descriptor`] is the immutable table a [`Variant`](crate::Variant)
//! dispatches through. It is created once per type by [`descriptor_of`],
//! which runs the type's [`Bindable::describe`] on a fresh [`DescriptorBuilder`].
//!
//! Every entry of the table works on the slot as `&dyn Any`; the generic
//! builder methods are where the concrete type is erased.
//!
//! [`descriptor_of`]: crate::descriptor_of
//! [`Bindable::describe`]: crate::Bindable::describe

// -----------------------------------------------------------------------------
// Modules

mod builder;
mod descriptor;
mod slot;

// -----------------------------------------------------------------------------
// Exports

pub use builder::DescriptorBuilder;
pub use descriptor::{Descriptor, Visitor};

pub(crate) use slot::slot;
