//! Runtime type identity.
//!
//! - [`Type`]: a [`TypeId`](core::any::TypeId) paired with its type path.
//! - [`Qualifier`]: the qualifier lattice a binding carries.
//! - [`QualifiedType`]: the comparable token used wherever a "type" is requested.
//! - [`Category`]: the value category deciding default behaviors.

// -----------------------------------------------------------------------------
// Modules

mod category;
mod qualifier;
mod ty;

// -----------------------------------------------------------------------------
// Exports

pub use category::Category;
pub use qualifier::Qualifier;
pub use ty::{QualifiedType, Type};
