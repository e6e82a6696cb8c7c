//! Small building blocks shared by the `dv` crates.
//!
//! - [`TypeIdMap`]: a map keyed by [`TypeId`](core::any::TypeId), used for per-type tables.
//! - [`hash`]: hash states and re-exports of *hashbrown* and *foldhash*.
//! - [`Optional`]: a discriminated optional value with fallible access.
//! - [`Callable`]: one call operator over a plain function or a closure.
#![no_std]

// -----------------------------------------------------------------------------
// No STD Support

extern crate alloc;

// -----------------------------------------------------------------------------
// Modules

mod typeid_map;

pub mod callable;
pub mod hash;
pub mod optional;

// -----------------------------------------------------------------------------
// Top-level exports

pub use callable::{Callable, CallableKind, UninitializedCallableError};
pub use optional::{EmptyOptionalError, Optional};
pub use typeid_map::TypeIdMap;
