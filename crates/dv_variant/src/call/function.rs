use alloc::rc::Rc;
use core::fmt;

use super::{ArgCursor, IntoReturn, Param, Signature};
use crate::{Variant, VariantResult};

// -----------------------------------------------------------------------------
// IntoFunction

/// A Rust callable whose parameters are all [`Param`]s and whose
/// return type is an [`IntoReturn`].
///
/// Implemented for `Fn` closures and function pointers of up to eight
/// parameters. `Marker` only tells the arities apart.
pub trait IntoFunction<Marker>: Sized + 'static {
    fn signature() -> Signature;

    /// Checks the arity, converts every argument and calls `self`.
    fn invoke(&self, args: &[Variant]) -> VariantResult<Variant>;

    fn into_function(self) -> Function {
        Function {
            signature: Self::signature(),
            inner: Rc::new(move |args: &[Variant]| self.invoke(args)),
        }
    }
}

// -----------------------------------------------------------------------------
// IntoMethod

/// Like [`IntoFunction`], with a leading `&T` receiver.
///
/// Methods are stored in shared descriptors, so they must be `Send + Sync`.
pub trait IntoMethod<T, Marker>: Send + Sync + 'static {
    fn signature() -> Signature;

    /// Checks the arity, converts every argument and calls `self` on `receiver`.
    fn invoke(&self, receiver: &T, args: &[Variant]) -> VariantResult<Variant>;
}

macro_rules! impl_callables {
    ($($P:ident),*) => {
        impl<F, R, $($P,)*> IntoFunction<fn($($P,)*) -> R> for F
        where
            F: Fn($($P,)*) -> R + 'static,
            R: IntoReturn,
            $($P: Param,)*
        {
            #[inline]
            fn signature() -> Signature {
                Signature::from_params(&[$($P::VARIADIC,)*])
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, args: &[Variant]) -> VariantResult<Variant> {
                <Self as IntoFunction<fn($($P,)*) -> R>>::signature().check(args.len())?;
                let mut cursor = ArgCursor::new(args);
                $(let $P = $P::take(&mut cursor)?;)*
                (self)($($P,)*).into_return()
            }
        }

        impl<T, F, R, $($P,)*> IntoMethod<T, fn($($P,)*) -> R> for F
        where
            T: 'static,
            F: Fn(&T, $($P,)*) -> R + Send + Sync + 'static,
            R: IntoReturn,
            $($P: Param,)*
        {
            #[inline]
            fn signature() -> Signature {
                Signature::from_params(&[$($P::VARIADIC,)*])
            }

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn invoke(&self, receiver: &T, args: &[Variant]) -> VariantResult<Variant> {
                <Self as IntoMethod<T, fn($($P,)*) -> R>>::signature().check(args.len())?;
                let mut cursor = ArgCursor::new(args);
                $(let $P = $P::take(&mut cursor)?;)*
                (self)(receiver, $($P,)*).into_return()
            }
        }
    };
}

impl_callables!();
impl_callables!(P0);
impl_callables!(P0, P1);
impl_callables!(P0, P1, P2);
impl_callables!(P0, P1, P2, P3);
impl_callables!(P0, P1, P2, P3, P4);
impl_callables!(P0, P1, P2, P3, P4, P5);
impl_callables!(P0, P1, P2, P3, P4, P5, P6);
impl_callables!(P0, P1, P2, P3, P4, P5, P6, P7);

// -----------------------------------------------------------------------------
// Function

/// A type-erased closure taking and returning variants.
///
/// Cloning shares the closure. Built with [`IntoFunction::into_function`]
/// or, for a hand-written argument protocol, [`Function::from_raw`].
#[derive(Clone)]
pub struct Function {
    signature: Signature,
    inner: Rc<dyn Fn(&[Variant]) -> VariantResult<Variant>>,
}

impl Function {
    #[inline]
    pub fn new<F, Marker>(f: F) -> Self
    where
        F: IntoFunction<Marker>,
    {
        f.into_function()
    }

    /// Wraps a closure that reads its own arguments.
    ///
    /// The arity is checked against `signature` before `f` runs.
    pub fn from_raw(
        signature: Signature,
        f: impl Fn(&[Variant]) -> VariantResult<Variant> + 'static,
    ) -> Self {
        Self {
            signature,
            inner: Rc::new(f),
        }
    }

    #[inline(always)]
    pub fn signature(&self) -> Signature {
        self.signature
    }

    pub fn invoke(&self, args: &[Variant]) -> VariantResult<Variant> {
        self.signature.check(args.len())?;
        (self.inner)(args)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}
