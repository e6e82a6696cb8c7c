use alloc::boxed::Box;
use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;
use core::marker::PhantomData;

use super::descriptor::{Conversion, Descriptor, Visitor};
use super::slot;
use crate::call::IntoMethod;
use crate::info::Type;
#[cfg(feature = "members")]
use crate::info::Qualifier;
use crate::{Bindable, Variant, VariantError, VariantResult};

#[cfg(feature = "members")]
use crate::members::Members;

// -----------------------------------------------------------------------------
// DescriptorBuilder

/// Declares the operations of a [`Bindable`] type.
///
/// A fresh builder is handed to [`Bindable::describe`]; every method
/// returns the builder so declarations chain. Entries left undeclared
/// fall back to the category defaults: values are truthy, render as
/// their short type name and support no other operation.
///
/// # Examples
///
/// ```
/// use dv_variant::{Bindable, Category, DescriptorBuilder, Variant};
///
/// #[derive(Clone, PartialEq, PartialOrd)]
/// struct Meters(f64);
///
/// impl Bindable for Meters {
///     const CATEGORY: Category = Category::Scalar;
///
///     fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
///         builder
///             .truthy(|m| m.0 != 0.0)
///             .render(|m, f| write!(f, "{}m", m.0))
///             .ord()
///             .convert_with(|m: &Meters| m.0)
///     }
/// }
///
/// let v = Variant::new(Meters(2.5));
/// assert_eq!(v.to_string(), "2.5m");
/// assert_eq!(v.get::<f64>().unwrap(), 2.5);
/// assert!(!Variant::new(Meters(0.0)).is_truthy());
/// ```
pub struct DescriptorBuilder<T> {
    descriptor: Descriptor,
    error: Option<VariantError>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Bindable> DescriptorBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            descriptor: Descriptor::new(Type::of::<T>(), T::CATEGORY, clone_slot::<T>),
            error: None,
            _marker: PhantomData,
        }
    }

    /// Finishes the table, or returns the first declaration error.
    pub(crate) fn build(self) -> VariantResult<Descriptor> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.descriptor),
        }
    }

    fn fail(mut self, reason: &'static str) -> Self {
        if self.error.is_none() {
            self.error = Some(VariantError::UnsupportedShape {
                type_name: self.descriptor.type_path(),
                reason,
            });
        }
        self
    }

    /// Declares how the value reads as a boolean.
    ///
    /// Ignored for aggregates, which are always truthy.
    pub fn truthy(mut self, f: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        self.descriptor.truthy = Some(Box::new(move |value: &dyn Any| f(slot::<T>(value))));
        self
    }

    /// Renders with the type's [`Display`](fmt::Display) impl.
    pub fn display(self) -> Self
    where
        T: fmt::Display,
    {
        self.render(|value, f| fmt::Display::fmt(value, f))
    }

    pub fn render(
        mut self,
        f: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.render = Some(Box::new(
            move |value: &dyn Any, out: &mut fmt::Formatter<'_>| f(slot::<T>(value), out),
        ));
        self
    }

    /// Declares the rendering used when the value is an element of a container,
    /// e.g. quoted strings. Defaults to the plain rendering.
    pub fn literal(
        mut self,
        f: impl Fn(&T, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.literal = Some(Box::new(
            move |value: &dyn Any, out: &mut fmt::Formatter<'_>| f(slot::<T>(value), out),
        ));
        self
    }

    /// Compares with the type's [`PartialEq`] impl.
    pub fn eq(self) -> Self
    where
        T: PartialEq,
    {
        self.equality(|a, b| Some(a == b))
    }

    /// Orders with the type's [`PartialOrd`] impl. Also declares equality.
    pub fn ord(self) -> Self
    where
        T: PartialOrd,
    {
        self.eq().ordering(T::partial_cmp)
    }

    /// Declares equality; `None` means the two values are not comparable.
    pub fn equality(
        mut self,
        f: impl Fn(&T, &T) -> Option<bool> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.eq = Some(Box::new(move |a: &dyn Any, b: &dyn Any| {
            f(slot::<T>(a), slot::<T>(b))
        }));
        self
    }

    pub fn ordering(
        mut self,
        f: impl Fn(&T, &T) -> Option<Ordering> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.cmp = Some(Box::new(move |a: &dyn Any, b: &dyn Any| {
            f(slot::<T>(a), slot::<T>(b))
        }));
        self
    }

    /// Declares an implicit conversion through `U: From<T>`.
    pub fn convert_to<U>(self) -> Self
    where
        U: Bindable + From<T>,
    {
        self.convert_with(|value: &T| U::from(value.clone()))
    }

    /// Declares an implicit conversion to `U`.
    ///
    /// Converting to `T` itself is always possible and cannot be redeclared.
    pub fn convert_with<U: Bindable>(
        mut self,
        f: impl Fn(&T) -> U + Send + Sync + 'static,
    ) -> Self {
        if TypeId::of::<U>() == TypeId::of::<T>() {
            return self.fail("a type cannot declare a conversion to itself");
        }
        self.descriptor.conversions.insert(
            TypeId::of::<U>(),
            Conversion {
                target: Type::of::<U>(),
                convert: Box::new(move |value: &dyn Any| -> Box<dyn Any> {
                    Box::new(f(slot::<T>(value)))
                }),
            },
        );
        self
    }

    /// Declares an element count. Without a [`truthy`](Self::truthy) entry,
    /// the value is truthy when the count is nonzero.
    pub fn length(mut self, f: impl Fn(&T) -> usize + Send + Sync + 'static) -> Self {
        self.descriptor.length = Some(Box::new(move |value: &dyn Any| f(slot::<T>(value))));
        self
    }

    pub fn iterate(
        mut self,
        f: impl Fn(&T, &mut Visitor<'_>) -> VariantResult<()> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.iterate = Some(Box::new(
            move |value: &dyn Any, visitor: &mut Visitor<'_>| f(slot::<T>(value), visitor),
        ));
        self
    }

    /// Declares an index operation over raw arguments.
    pub fn index(
        mut self,
        f: impl Fn(&T, &[Variant]) -> VariantResult<Variant> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.index = Some(Box::new(move |value: &dyn Any, args: &[Variant]| {
            f(slot::<T>(value), args)
        }));
        self
    }

    /// Declares an index operation with typed parameters.
    pub fn index_with<M, Marker>(self, method: M) -> Self
    where
        M: IntoMethod<T, Marker>,
    {
        self.index(move |value, args| method.invoke(value, args))
    }

    /// Declares a call operation over raw arguments.
    pub fn call(
        mut self,
        f: impl Fn(&T, &[Variant]) -> VariantResult<Variant> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.call = Some(Box::new(move |value: &dyn Any, args: &[Variant]| {
            f(slot::<T>(value), args)
        }));
        self
    }

    /// Declares a call operation with typed parameters.
    pub fn call_with<M, Marker>(self, method: M) -> Self
    where
        M: IntoMethod<T, Marker>,
    {
        self.call(move |value, args| method.invoke(value, args))
    }

    /// Registers named members. A malformed table fails the whole registration.
    #[cfg(feature = "members")]
    pub fn members(mut self, members: Members<T>) -> Self {
        match members.finish() {
            Ok(table) => self.descriptor.members = Some(table),
            Err(error) => {
                if self.error.is_none() {
                    self.error = Some(error);
                }
            }
        }
        self
    }

    /// Replaces member lookup entirely, e.g. to forward to a pointee.
    ///
    /// The closure receives the qualifier of the binding being searched.
    #[cfg(feature = "members")]
    pub fn lookup(
        mut self,
        f: impl Fn(&T, Qualifier, &str) -> VariantResult<Variant> + Send + Sync + 'static,
    ) -> Self {
        self.descriptor.lookup = Some(Box::new(
            move |value: &dyn Any, qualifier: Qualifier, name: &str| {
                f(slot::<T>(value), qualifier, name)
            },
        ));
        self
    }
}

fn clone_slot<T: Bindable>(value: &dyn Any) -> Box<dyn Any> {
    Box::new(slot::<T>(value).clone())
}
