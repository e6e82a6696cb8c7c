use core::ops::ControlFlow;

use super::Variant;
use crate::call::{IntoArg, IntoArgs};
use crate::{VariantError, VariantResult};

#[cfg(feature = "members")]
use crate::info::Category;

impl Variant {
    /// Calls the held value with `args`.
    ///
    /// Each argument is converted to its parameter type with
    /// [`get`](Self::get) semantics; a `()` return yields an empty variant.
    ///
    /// # Examples
    ///
    /// ```
    /// use dv_variant::Variant;
    /// use dv_variant::call::Variadic;
    ///
    /// let sum = Variant::from_fn(|first: i64, rest: Variadic<i64>| first + rest.iter().sum::<i64>());
    /// assert_eq!(sum.call((1_i32, 2_u8, 3_i64)).unwrap().get::<i64>().unwrap(), 6);
    /// assert!(Variant::new(1).call(()).is_err());
    /// ```
    #[inline]
    pub fn call(&self, args: impl IntoArgs) -> VariantResult<Variant> {
        self.do_call(&args.into_args()?)
    }

    pub fn do_call(&self, args: &[Variant]) -> VariantResult<Variant> {
        let binding = self.binding()?;
        binding.descriptor.call(binding.slot(), args)
    }

    /// Indexes the held value.
    ///
    /// Arrays and maps take exactly one argument; aggregates may declare an
    /// index operation taking any number. The element keeps the qualifier
    /// of the binding.
    #[inline]
    pub fn index(&self, args: impl IntoArgs) -> VariantResult<Variant> {
        self.do_index(&args.into_args()?)
    }

    pub fn do_index(&self, args: &[Variant]) -> VariantResult<Variant> {
        let binding = self.binding()?;
        let element = binding.descriptor.index(binding.slot(), args)?;
        Ok(element.inherit(binding.qualifier))
    }

    /// Looks `key` up like [`index`](Self::index), but an out-of-range
    /// index or a missing key yields an empty variant instead of an error.
    pub fn probe(&self, key: impl IntoArg) -> VariantResult<Variant> {
        match self.do_index(&[key.into_arg()?]) {
            Err(error) if error.is_missing_entry() => Ok(Variant::empty()),
            result => result,
        }
    }

    /// Visits every `(index-or-key, element)` pair in natural order until
    /// the visitor breaks. Both keep the qualifier of the binding.
    pub fn iterate_over(
        &self,
        mut visitor: impl FnMut(Variant, Variant) -> ControlFlow<()>,
    ) -> VariantResult<()> {
        let binding = self.binding()?;
        let qualifier = binding.qualifier;
        binding.descriptor.iterate(binding.slot(), &mut |key, element| {
            visitor(key.inherit(qualifier), element.inherit(qualifier))
        })
    }

    /// The element count of an array or map.
    ///
    /// Aggregates without a declared length fall back to a `length` or
    /// `len` member, called with no arguments when it is a method.
    pub fn length(&self) -> VariantResult<usize> {
        let binding = self.binding()?;
        if let Some(len) = binding.descriptor.length(binding.slot()) {
            return Ok(len);
        }

        #[cfg(feature = "members")]
        if binding.descriptor.category() == Category::Aggregate {
            for name in ["length", "len"] {
                match self.lookup_member(name) {
                    Ok(member) if member.category() == Some(Category::Callable) => {
                        return member.call(())?.read::<usize>();
                    }
                    Ok(member) => return member.read::<usize>(),
                    Err(VariantError::NoSuchMember { .. }) => {}
                    Err(error) => return Err(error),
                }
            }
        }

        Err(VariantError::NotSupported {
            operation: "length",
            type_name: binding.descriptor.type_path(),
        })
    }

    /// Finds a member by name, searching the single delegate on a miss.
    ///
    /// Data members come back as copies; methods come back as
    /// [`BoundMethod`](crate::members::BoundMethod)s bound to a copy of
    /// the receiver. Both keep the qualifier of the binding.
    #[cfg(feature = "members")]
    pub fn lookup_member(&self, name: &str) -> VariantResult<Variant> {
        let binding = self.binding()?;
        let member = binding.descriptor.lookup_member(binding.slot(), binding.qualifier, name)?;
        Ok(member.inherit(binding.qualifier))
    }
}
