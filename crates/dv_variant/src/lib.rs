//! A type-erased, runtime-polymorphic value container.
//!
//! [`Variant`] holds at most one value of any type implementing [`Bindable`],
//! next to a `&'static` [`Descriptor`]: the per-type operation table that
//! knows how to clone, render, convert, compare, call, index and iterate the
//! stored value. Descriptors are built lazily, once per type, the first time
//! a type is wrapped.
//!
//! ## Menu
//!
//! - [`Variant`]: the container.
//! - [`info`]: type identity tokens, the qualifier lattice and value categories.
//! - [`descriptor`]: operation tables and their builder.
//! - [`registry`]: [`Bindable`], the lazy descriptor cell and [`TypeRegistry`](registry::TypeRegistry).
//! - [`call`]: argument conversion, variadic parameters and closure wrappers.
//! - [`members`]: member registration and lookup by name ("members" feature).
//!
//! ## Example
//!
//! ```
//! use dv_variant::Variant;
//!
//! let v = Variant::new(12_i32);
//! assert!(v.is_truthy());
//! assert_eq!(v.get::<i64>().unwrap(), 12);
//!
//! let twice = Variant::from_fn(|x: i32| x * 2);
//! assert_eq!(twice.call((21,)).unwrap().get::<i32>().unwrap(), 42);
//! ```

// The descriptor cell needs `std::sync`, everything else goes through
// `alloc` and `core`.
extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod error;
mod impls;

pub mod call;
pub mod descriptor;
pub mod info;
pub mod registry;
pub mod variant;

#[cfg(feature = "members")]
pub mod members;

#[doc(hidden)]
pub mod __macro_exports;

// -----------------------------------------------------------------------------
// Top-Level exports

pub use descriptor::{Descriptor, DescriptorBuilder};
pub use error::{VariantError, VariantResult};
pub use info::{Category, Qualifier, QualifiedType, Type};
pub use registry::{Bindable, descriptor_of};
pub use variant::Variant;
