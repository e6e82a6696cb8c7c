use alloc::vec::Vec;
use core::ops::{Deref, DerefMut};

use super::Signature;
use crate::{Bindable, Variant, VariantError, VariantResult};

// -----------------------------------------------------------------------------
// ArgCursor

/// Reads call arguments front to back.
pub struct ArgCursor<'a> {
    args: &'a [Variant],
    position: usize,
}

impl<'a> ArgCursor<'a> {
    #[inline]
    pub const fn new(args: &'a [Variant]) -> Self {
        Self { args, position: 0 }
    }

    /// Takes the next argument, failing with [`VariantError::ArgumentCount`]
    /// when none are left.
    pub fn next_arg(&mut self) -> VariantResult<&'a Variant> {
        match self.args.get(self.position) {
            Some(arg) => {
                self.position += 1;
                Ok(arg)
            }
            None => Err(VariantError::ArgumentCount {
                expected: self.position + 1,
                variadic: false,
                found: self.args.len(),
            }),
        }
    }

    #[inline]
    pub fn remaining(&self) -> usize {
        self.args.len() - self.position
    }
}

// -----------------------------------------------------------------------------
// Param

/// A parameter type of an adapted callable.
///
/// Implemented for every [`Bindable`] type (converted with
/// [`Variant::get`]), for [`Variant`] itself (passed through untouched)
/// and for [`Variadic`] (collects every remaining argument).
pub trait Param: Sized {
    /// `true` if the parameter consumes all remaining arguments.
    const VARIADIC: bool = false;

    fn take(cursor: &mut ArgCursor<'_>) -> VariantResult<Self>;
}

impl<T: Bindable> Param for T {
    #[inline]
    fn take(cursor: &mut ArgCursor<'_>) -> VariantResult<Self> {
        cursor.next_arg()?.get::<T>()
    }
}

impl Param for Variant {
    #[inline]
    fn take(cursor: &mut ArgCursor<'_>) -> VariantResult<Self> {
        cursor.next_arg().cloned()
    }
}

// -----------------------------------------------------------------------------
// Variadic

/// A trailing parameter collecting every surplus argument.
///
/// # Examples
///
/// ```
/// use dv_variant::Variant;
/// use dv_variant::call::Variadic;
///
/// let sum = Variant::from_fn(|first: i64, rest: Variadic<i64>| first + rest.iter().sum::<i64>());
/// let total = sum.call((1_i64, 2_i32, 3_u8)).unwrap();
/// assert_eq!(total.get::<i64>().unwrap(), 6);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Variadic<T>(pub Vec<T>);

impl<T> Variadic<T> {
    #[inline]
    pub fn into_inner(self) -> Vec<T> {
        self.0
    }
}

impl<T> Deref for Variadic<T> {
    type Target = Vec<T>;

    #[inline]
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<T> DerefMut for Variadic<T> {
    #[inline]
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

impl<T: Param> Param for Variadic<T> {
    const VARIADIC: bool = true;

    fn take(cursor: &mut ArgCursor<'_>) -> VariantResult<Self> {
        let mut items = Vec::with_capacity(cursor.remaining());
        while cursor.remaining() > 0 {
            items.push(T::take(cursor)?);
        }
        Ok(Variadic(items))
    }
}

// -----------------------------------------------------------------------------
// IntoReturn

/// A return type of an adapted callable.
///
/// [`Bindable`] values are wrapped, a [`Variant`] is returned as is and
/// `()` becomes an empty variant.
pub trait IntoReturn {
    fn into_return(self) -> VariantResult<Variant>;
}

impl<T: Bindable> IntoReturn for T {
    #[inline]
    fn into_return(self) -> VariantResult<Variant> {
        Variant::try_new(self)
    }
}

impl IntoReturn for Variant {
    #[inline(always)]
    fn into_return(self) -> VariantResult<Variant> {
        Ok(self)
    }
}

impl IntoReturn for () {
    #[inline(always)]
    fn into_return(self) -> VariantResult<Variant> {
        Ok(Variant::empty())
    }
}

// -----------------------------------------------------------------------------
// ParamTuple

/// A tuple of [`Param`]s, built from a whole argument list.
///
/// This is the `Args` side of a bindable [`Callable`](dv_utils::Callable).
pub trait ParamTuple: Sized {
    fn signature() -> Signature;

    fn from_args(args: &[Variant]) -> VariantResult<Self>;
}

macro_rules! impl_param_tuple {
    ($($P:ident),*) => {
        impl<$($P: Param,)*> ParamTuple for ($($P,)*) {
            #[inline]
            fn signature() -> Signature {
                Signature::from_params(&[$($P::VARIADIC,)*])
            }

            #[allow(unused_mut, unused_variables)]
            fn from_args(args: &[Variant]) -> VariantResult<Self> {
                Self::signature().check(args.len())?;
                let mut cursor = ArgCursor::new(args);
                Ok(($($P::take(&mut cursor)?,)*))
            }
        }
    };
}

impl_param_tuple!();
impl_param_tuple!(P0);
impl_param_tuple!(P0, P1);
impl_param_tuple!(P0, P1, P2);
impl_param_tuple!(P0, P1, P2, P3);
impl_param_tuple!(P0, P1, P2, P3, P4);
impl_param_tuple!(P0, P1, P2, P3, P4, P5);

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::vec;

    use super::{ArgCursor, Param, ParamTuple, Variadic};
    use crate::{Variant, VariantError};

    #[test]
    fn params_convert_with_get() {
        let args = vec![Variant::new(7_u8), Variant::new("text")];
        let mut cursor = ArgCursor::new(&args);
        assert_eq!(i64::take(&mut cursor).unwrap(), 7);
        assert_eq!(String::take(&mut cursor).unwrap(), "text");
        assert_eq!(cursor.remaining(), 0);
        assert!(matches!(
            u8::take(&mut cursor),
            Err(VariantError::ArgumentCount { expected: 3, .. })
        ));
    }

    #[test]
    fn mismatched_argument() {
        let args = vec![Variant::new(7_i64)];
        let mut cursor = ArgCursor::new(&args);
        assert!(matches!(
            i32::take(&mut cursor),
            Err(VariantError::TypeMismatch { .. })
        ));
    }

    #[test]
    fn tuples_with_variadic_tail() {
        let args = vec![Variant::new(true), Variant::new(1_i32), Variant::new(2_i32)];
        let (flag, rest) = <(bool, Variadic<i32>)>::from_args(&args).unwrap();
        assert!(flag);
        assert_eq!(rest.into_inner(), vec![1, 2]);

        let (flag, rest) = <(bool, Variadic<Variant>)>::from_args(&args[..1]).unwrap();
        assert!(flag);
        assert!(rest.is_empty());

        assert!(matches!(
            <(bool, i32)>::from_args(&args),
            Err(VariantError::ArgumentCount { expected: 2, variadic: false, found: 3 })
        ));
    }
}
