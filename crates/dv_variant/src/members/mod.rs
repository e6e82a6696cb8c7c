//! Member registration and lookup by name.
//!
//! Members are declared explicitly with [`Members`] inside
//! [`Bindable::describe`](crate::Bindable::describe). A lookup scans the
//! type's own members first; on a miss it recurses into the single
//! delegate: a [`base`](Members::base) or a [`forward`](Members::forward)ing
//! field. Declaring a second delegate fails the registration.
//!
//! Data members are returned as new variants holding a copy of the field.
//! Function members are returned as [`BoundMethod`] variants bound to a
//! copy of the receiver.
//!
//! The whole module is behind the `members` feature.

// -----------------------------------------------------------------------------
// Modules

mod method;
mod table;

// -----------------------------------------------------------------------------
// Exports

pub use method::{BoundMethod, Method};
pub use table::{DelegateKind, MemberTable, Members};
