use alloc::vec::Vec;

use crate::{Bindable, Variant, VariantResult};

// -----------------------------------------------------------------------------
// IntoArg

/// A value usable as a single call, index or probe argument.
pub trait IntoArg {
    fn into_arg(self) -> VariantResult<Variant>;
}

impl<T: Bindable> IntoArg for T {
    #[inline]
    fn into_arg(self) -> VariantResult<Variant> {
        Variant::try_new(self)
    }
}

impl IntoArg for Variant {
    #[inline(always)]
    fn into_arg(self) -> VariantResult<Variant> {
        Ok(self)
    }
}

impl IntoArg for &Variant {
    #[inline]
    fn into_arg(self) -> VariantResult<Variant> {
        Ok(self.clone())
    }
}

// -----------------------------------------------------------------------------
// IntoArgs

/// A whole argument list: a tuple of [`IntoArg`] values or a list of variants.
///
/// # Examples
///
/// ```
/// use dv_variant::Variant;
///
/// let add = Variant::from_fn(|a: i32, b: i32| a + b);
/// assert_eq!(add.call((1, 2)).unwrap().get::<i32>().unwrap(), 3);
///
/// let args = vec![Variant::new(1), Variant::new(2)];
/// assert_eq!(add.call(&args[..]).unwrap().get::<i32>().unwrap(), 3);
/// ```
pub trait IntoArgs {
    fn into_args(self) -> VariantResult<Vec<Variant>>;
}

impl IntoArgs for Vec<Variant> {
    #[inline(always)]
    fn into_args(self) -> VariantResult<Vec<Variant>> {
        Ok(self)
    }
}

impl IntoArgs for &[Variant] {
    #[inline]
    fn into_args(self) -> VariantResult<Vec<Variant>> {
        Ok(self.to_vec())
    }
}

impl<const N: usize> IntoArgs for [Variant; N] {
    #[inline]
    fn into_args(self) -> VariantResult<Vec<Variant>> {
        Ok(Vec::from(self))
    }
}

macro_rules! impl_into_args {
    ($($A:ident),*) => {
        impl<$($A: IntoArg,)*> IntoArgs for ($($A,)*) {
            #[allow(non_snake_case)]
            fn into_args(self) -> VariantResult<Vec<Variant>> {
                let ($($A,)*) = self;
                Ok(alloc::vec![$($A.into_arg()?,)*])
            }
        }
    };
}

impl_into_args!();
impl_into_args!(A0);
impl_into_args!(A0, A1);
impl_into_args!(A0, A1, A2);
impl_into_args!(A0, A1, A2, A3);
impl_into_args!(A0, A1, A2, A3, A4);
impl_into_args!(A0, A1, A2, A3, A4, A5);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6);
impl_into_args!(A0, A1, A2, A3, A4, A5, A6, A7);
