//! Argument conversion and callable adapters.
//!
//! Calls through a [`Variant`](crate::Variant) carry their arguments as a
//! slice of variants. Typed Rust callables are adapted to that shape by
//! converting each argument with [`Variant::get`](crate::Variant::get)
//! semantics into the declared parameter type.
//!
//! ## Menu
//!
//! - [`Param`]: a parameter type, taking one argument or, for [`Variadic`], the rest.
//! - [`IntoReturn`]: wraps a return value; `()` becomes an empty variant.
//! - [`IntoArg`] / [`IntoArgs`]: turn Rust values into call arguments.
//! - [`Signature`]: the arity of a callable.
//! - [`IntoFunction`] / [`Function`]: closures with typed parameters.
//! - [`IntoMethod`]: the same, with a leading receiver.
//! - [`ParamTuple`]: argument tuples of [`Callable`](dv_utils::Callable).

// -----------------------------------------------------------------------------
// Modules

mod args;
mod function;
mod param;
mod signature;

// -----------------------------------------------------------------------------
// Exports

pub use args::{IntoArg, IntoArgs};
pub use function::{Function, IntoFunction, IntoMethod};
pub use param::{ArgCursor, IntoReturn, Param, ParamTuple, Variadic};
pub use signature::Signature;
