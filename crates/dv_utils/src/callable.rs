//! A call operator over two invocable shapes.
//!
//! [`Callable<Args, Ret>`] is either unset, a plain function pointer, or a
//! closure with captured state. `Args` is the parameter tuple, so a callable
//! taking `(i32, i32)` is invoked as `callable.call((1, 2))`.

use alloc::rc::Rc;
use core::fmt;

use thiserror::Error;

// -----------------------------------------------------------------------------
// Error

/// Returned when an unset [`Callable`] is invoked.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
#[error("attempted to call an uninitialized callable")]
pub struct UninitializedCallableError;

// -----------------------------------------------------------------------------
// Callable

/// Which shape a [`Callable`] currently holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CallableKind {
    Unset,
    Function,
    Closure,
}

/// A function pointer or a closure behind one call operator.
///
/// # Examples
///
/// ```
/// use dv_utils::{Callable, CallableKind};
///
/// let mut add: Callable<(i32, i32), i32> = Callable::from_fn(|(a, b)| a + b);
/// assert_eq!(add.call((1, 2)), Ok(3));
///
/// let offset = 10;
/// add.set_closure(move |(a, b)| a + b + offset);
/// assert_eq!(add.kind(), CallableKind::Closure);
/// assert_eq!(add.call((1, 2)), Ok(13));
///
/// add = Callable::default();
/// assert!(add.call((1, 2)).is_err());
/// ```
pub enum Callable<Args, Ret> {
    Unset,
    Function(fn(Args) -> Ret),
    Closure(Rc<dyn Fn(Args) -> Ret>),
}

impl<Args, Ret> Callable<Args, Ret> {
    #[inline]
    pub const fn from_fn(f: fn(Args) -> Ret) -> Self {
        Self::Function(f)
    }

    pub fn from_closure(f: impl Fn(Args) -> Ret + 'static) -> Self {
        Self::Closure(Rc::new(f))
    }

    /// Makes a plain function the active shape.
    pub fn set_fn(&mut self, f: fn(Args) -> Ret) {
        *self = Self::Function(f);
    }

    /// Makes a closure the active shape.
    pub fn set_closure(&mut self, f: impl Fn(Args) -> Ret + 'static) {
        *self = Self::from_closure(f);
    }

    #[inline]
    pub const fn kind(&self) -> CallableKind {
        match self {
            Self::Unset => CallableKind::Unset,
            Self::Function(_) => CallableKind::Function,
            Self::Closure(_) => CallableKind::Closure,
        }
    }

    /// Returns `true` unless the callable is unset.
    #[inline]
    pub const fn is_set(&self) -> bool {
        !matches!(self, Self::Unset)
    }

    /// Invokes whichever shape is active.
    pub fn call(&self, args: Args) -> Result<Ret, UninitializedCallableError> {
        match self {
            Self::Unset => Err(UninitializedCallableError),
            Self::Function(f) => Ok(f(args)),
            Self::Closure(f) => Ok(f(args)),
        }
    }
}

impl<Args, Ret> Default for Callable<Args, Ret> {
    #[inline]
    fn default() -> Self {
        Self::Unset
    }
}

impl<Args, Ret> Clone for Callable<Args, Ret> {
    fn clone(&self) -> Self {
        match self {
            Self::Unset => Self::Unset,
            Self::Function(f) => Self::Function(*f),
            Self::Closure(f) => Self::Closure(Rc::clone(f)),
        }
    }
}

impl<Args, Ret> From<fn(Args) -> Ret> for Callable<Args, Ret> {
    #[inline]
    fn from(f: fn(Args) -> Ret) -> Self {
        Self::Function(f)
    }
}

/// A callable reads as `true` when any shape is active.
impl<Args, Ret> From<&Callable<Args, Ret>> for bool {
    #[inline]
    fn from(callable: &Callable<Args, Ret>) -> bool {
        callable.is_set()
    }
}

/// Compares the "is set" state, e.g. `callable == false` for an unset one.
impl<Args, Ret> PartialEq<bool> for Callable<Args, Ret> {
    #[inline]
    fn eq(&self, set: &bool) -> bool {
        self.is_set() == *set
    }
}

impl<Args, Ret> fmt::Debug for Callable<Args, Ret> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Callable").field(&self.kind()).finish()
    }
}

#[cfg(test)]
mod tests {
    use alloc::rc::Rc;
    use core::cell::Cell;

    use super::{Callable, CallableKind, UninitializedCallableError};

    fn double((x,): (i32,)) -> i32 {
        x * 2
    }

    #[test]
    fn unset_fails() {
        let c = Callable::<(), ()>::default();
        assert!(!c.is_set());
        assert_eq!(c.kind(), CallableKind::Unset);
        assert_eq!(c.call(()), Err(UninitializedCallableError));
        assert!(!bool::from(&c));
        assert!(c == false);
    }

    #[test]
    fn set_state_reads_as_bool() {
        let mut c = Callable::<(i32,), i32>::from_fn(double);
        assert!(bool::from(&c));
        assert!(c == true);

        c = Callable::from_closure(|(x,)| x);
        assert!(c == true);
        c = Callable::Unset;
        assert!(c != true);
    }

    #[test]
    fn function_and_closure_reassignment() {
        let mut c = Callable::from(double as fn((i32,)) -> i32);
        assert_eq!(c.kind(), CallableKind::Function);
        assert_eq!(c.call((21,)), Ok(42));

        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        c.set_closure(move |(x,)| {
            counter.set(counter.get() + 1);
            x + 1
        });
        assert_eq!(c.kind(), CallableKind::Closure);
        assert_eq!(c.call((1,)), Ok(2));
        assert_eq!(hits.get(), 1);

        c.set_fn(double);
        assert_eq!(c.kind(), CallableKind::Function);
        assert_eq!(c.call((3,)), Ok(6));
    }

    #[test]
    fn clones_share_closure_state() {
        let hits = Rc::new(Cell::new(0));
        let counter = Rc::clone(&hits);
        let a: Callable<(), ()> = Callable::from_closure(move |()| counter.set(counter.get() + 1));
        let b = a.clone();
        a.call(()).unwrap();
        b.call(()).unwrap();
        assert_eq!(hits.get(), 2);
    }
}
