use alloc::string::ToString;
use core::any::{Any, TypeId};

use super::Variant;
use crate::info::{QualifiedType, Qualifier};
use crate::{Bindable, VariantError, VariantResult};

impl Variant {
    /// Returns `true` if the held value can be written into a destination
    /// of type `target` without a value transformation.
    ///
    /// Qualifier changes and declared conversions count; qualifiers
    /// can be added but never stripped. Fails with
    /// [`VariantError::Uninitialized`] when empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use dv_variant::{QualifiedType, Qualifier, Variant};
    ///
    /// let v = Variant::qualified(1_i32, Qualifier::Immutable);
    /// assert!(v.converts_to(&QualifiedType::of_qualified::<i64>(Qualifier::Const)).unwrap());
    /// assert!(!v.converts_to(&QualifiedType::of::<i32>()).unwrap());
    /// assert!(Variant::empty().converts_to(&QualifiedType::of::<i32>()).is_err());
    /// ```
    pub fn converts_to(&self, target: &QualifiedType) -> VariantResult<bool> {
        let binding = self.binding()?;
        Ok(binding.descriptor.converts_to(binding.qualifier, target))
    }

    /// [`converts_to`](Self::converts_to) for a `Mutable` request of `T`,
    /// the request made by [`get`](Self::get).
    #[inline]
    pub fn converts_to_type<T: Any>(&self) -> VariantResult<bool> {
        self.converts_to(&QualifiedType::of::<T>())
    }

    /// A direct reference to the held value if its type is exactly `T`
    /// and the binding is `Mutable`.
    ///
    /// Every other case yields `None`, never an error.
    pub fn peek<T: Any>(&self) -> Option<&T> {
        match &self.binding {
            Some(binding) if binding.qualifier == Qualifier::Mutable => {
                binding.slot.downcast_ref::<T>()
            }
            _ => None,
        }
    }

    /// See [`peek`](Self::peek).
    pub fn peek_mut<T: Any>(&mut self) -> Option<&mut T> {
        match &mut self.binding {
            Some(binding) if binding.qualifier == Qualifier::Mutable => {
                binding.slot.downcast_mut::<T>()
            }
            _ => None,
        }
    }

    /// Copies or converts the held value out as a `Mutable` `T`.
    ///
    /// Fails with [`VariantError::TypeMismatch`] unless
    /// [`converts_to_type::<T>`](Self::converts_to_type) holds. A null
    /// reference extracts as `None` without error.
    #[inline]
    pub fn get<T: Bindable>(&self) -> VariantResult<T> {
        self.get_as::<T>(Qualifier::Mutable)
    }

    /// Copies or converts the held value out, requesting `qualifier`.
    pub fn get_as<T: Bindable>(&self, qualifier: Qualifier) -> VariantResult<T> {
        let binding = self.binding()?;
        let requested = QualifiedType::of_qualified::<T>(qualifier);
        let mismatch = || VariantError::TypeMismatch {
            held: binding.qualified_type().to_string(),
            requested: requested.to_string(),
        };

        if !binding.descriptor.converts_to(binding.qualifier, &requested) {
            return Err(mismatch());
        }
        let converted = binding
            .descriptor
            .convert(binding.slot(), TypeId::of::<T>())
            .ok_or_else(mismatch)?;
        match converted.downcast::<T>() {
            Ok(value) => Ok(*value),
            Err(_) => Err(mismatch()),
        }
    }

    /// [`get_as`](Self::get_as) through the read-only view of the binding,
    /// for values that are inspected but never handed out as mutable.
    pub(crate) fn read<T: Bindable>(&self) -> VariantResult<T> {
        let qualifier = self.binding()?.qualifier.read_only();
        self.get_as::<T>(qualifier)
    }

    /// A read-only reference to the held value if its type is exactly `T`.
    ///
    /// Unlike [`peek`](Self::peek), any qualifier is accepted since the
    /// reference is a read-only view.
    pub fn get_ref<T: Any>(&self) -> VariantResult<&T> {
        let binding = self.binding()?;
        binding
            .slot
            .downcast_ref::<T>()
            .ok_or_else(|| VariantError::TypeMismatch {
                held: binding.qualified_type().to_string(),
                requested: QualifiedType::of_qualified::<T>(binding.qualifier.read_only())
                    .to_string(),
            })
    }

    /// Moves the held value out, leaving the variant empty.
    ///
    /// Requires a `Mutable` binding of exactly `T`; on failure the
    /// variant is left untouched.
    pub fn take<T: Any>(&mut self) -> VariantResult<T> {
        let binding = self.binding()?;
        let requested = QualifiedType::of::<T>();
        if binding.qualified_type() != requested {
            return Err(VariantError::TypeMismatch {
                held: binding.qualified_type().to_string(),
                requested: requested.to_string(),
            });
        }
        match self.binding.take().map(|b| b.slot.downcast::<T>()) {
            Some(Ok(value)) => Ok(*value),
            _ => Err(VariantError::Uninitialized),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;

    use crate::info::{QualifiedType, Qualifier};
    use crate::{Variant, VariantError};

    #[test]
    fn immutable_never_extracts_as_mutable() {
        let v = Variant::qualified(5_u32, Qualifier::Immutable);
        assert!(matches!(v.get::<u32>(), Err(VariantError::TypeMismatch { .. })));
        assert_eq!(v.get_as::<u32>(Qualifier::Immutable).unwrap(), 5);
        assert_eq!(v.get_as::<u64>(Qualifier::Const).unwrap(), 5);
        assert_eq!(v.get_as::<u32>(Qualifier::SharedConst).unwrap(), 5);
        assert!(v.peek::<u32>().is_none());
        assert_eq!(*v.get_ref::<u32>().unwrap(), 5);
    }

    #[test]
    fn mutable_extracts_as_const_and_immutable() {
        let v = Variant::new(5_u32);
        assert_eq!(v.get_as::<u32>(Qualifier::Const).unwrap(), 5);
        assert_eq!(v.get_as::<u32>(Qualifier::Immutable).unwrap(), 5);
        assert!(v.get_as::<u32>(Qualifier::Shared).is_err());
    }

    #[test]
    fn converts_to_agrees_with_get() {
        let v = Variant::new(3_i16);
        for q in Qualifier::ALL {
            let target = QualifiedType::of_qualified::<i64>(q);
            assert_eq!(v.converts_to(&target).unwrap(), v.get_as::<i64>(q).is_ok());
            let target = QualifiedType::of_qualified::<u16>(q);
            assert_eq!(v.converts_to(&target).unwrap(), v.get_as::<u16>(q).is_ok());
        }
        for target in v.descriptor().unwrap().conversion_targets(Qualifier::Mutable) {
            assert!(v.converts_to(&target).unwrap());
        }
    }

    #[test]
    fn peek_requires_the_exact_type() {
        let mut v = Variant::new(String::from("a"));
        assert_eq!(v.peek::<String>().unwrap(), "a");
        assert!(v.peek::<&str>().is_none());
        v.peek_mut::<String>().unwrap().push('b');
        assert_eq!(v.get_ref::<String>().unwrap(), "ab");
        assert!(Variant::empty().peek::<String>().is_none());
    }

    #[test]
    fn take_moves_out() {
        let mut v = Variant::new(String::from("owned"));
        assert!(v.take::<&str>().is_err());
        assert!(v.has_value());
        assert_eq!(v.take::<String>().unwrap(), "owned");
        assert!(!v.has_value());
        assert_eq!(v.take::<String>(), Err(VariantError::Uninitialized));

        let mut frozen = Variant::qualified(1_u8, Qualifier::Const);
        assert!(frozen.take::<u8>().is_err());
        assert!(frozen.requalify(Qualifier::Mutable).is_err());
    }
}
