use alloc::boxed::Box;
use core::any::{TypeId, type_name};
use std::sync::{PoisonError, RwLock};

use dv_utils::TypeIdMap;
use log::{debug, warn};

use crate::descriptor::{Descriptor, DescriptorBuilder};
use crate::{Bindable, VariantResult};

// -----------------------------------------------------------------------------
// DescriptorCell

/// Leaked descriptors keyed by type.
///
/// Builders run outside the lock, so a builder may wrap values of other
/// types. When two threads race on the same type, the first insertion
/// wins and the other table is dropped.
struct DescriptorCell(RwLock<TypeIdMap<&'static Descriptor>>);

impl DescriptorCell {
    const fn new() -> Self {
        Self(RwLock::new(TypeIdMap::new()))
    }

    #[inline(never)]
    fn get(&self, type_id: TypeId) -> Option<&'static Descriptor> {
        let table = self.0.read().unwrap_or_else(PoisonError::into_inner);
        table.get(&type_id).copied()
    }

    #[inline(never)]
    fn insert(&self, type_id: TypeId, descriptor: Descriptor) -> &'static Descriptor {
        let mut table = self.0.write().unwrap_or_else(PoisonError::into_inner);
        *table.get_or_insert(type_id, || {
            debug!("built descriptor for `{}`", descriptor.type_path());
            Box::leak(Box::new(descriptor))
        })
    }

    fn get_or_try_insert(
        &self,
        type_id: TypeId,
        build: impl FnOnce() -> VariantResult<Descriptor>,
    ) -> VariantResult<&'static Descriptor> {
        if let Some(descriptor) = self.get(type_id) {
            return Ok(descriptor);
        }
        let descriptor = build()?;
        Ok(self.insert(type_id, descriptor))
    }
}

static DESCRIPTORS: DescriptorCell = DescriptorCell::new();

/// Returns the descriptor of `T`, building it on first use.
///
/// Fails only when `T`'s [`describe`](Bindable::describe) declares an
/// unsupported shape. A failed registration is not cached: every later
/// request reports the same error again.
///
/// # Examples
///
/// ```
/// use dv_variant::{Category, descriptor_of};
///
/// let descriptor = descriptor_of::<Vec<u8>>().unwrap();
/// assert_eq!(descriptor.category(), Category::Array);
/// assert!(core::ptr::eq(descriptor, descriptor_of::<Vec<u8>>().unwrap()));
/// ```
pub fn descriptor_of<T: Bindable>() -> VariantResult<&'static Descriptor> {
    DESCRIPTORS.get_or_try_insert(TypeId::of::<T>(), || {
        T::describe(DescriptorBuilder::new())
            .build()
            .inspect_err(|error| warn!("failed to register `{}`: {error}", type_name::<T>()))
    })
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use core::ptr;

    use super::descriptor_of;
    use crate::info::Category;
    use crate::{Bindable, DescriptorBuilder, VariantError};

    #[derive(Clone)]
    struct Unit;

    impl Bindable for Unit {
        const CATEGORY: Category = Category::Aggregate;
    }

    #[derive(Clone)]
    struct Broken;

    impl Bindable for Broken {
        const CATEGORY: Category = Category::Scalar;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.convert_with(|b: &Broken| b.clone())
        }
    }

    #[test]
    fn built_once_per_type() {
        let first = descriptor_of::<Unit>().unwrap();
        let second = descriptor_of::<Unit>().unwrap();
        assert!(ptr::eq(first, second));
        assert!(!ptr::eq(first, descriptor_of::<u8>().unwrap()));
    }

    #[test]
    fn failures_are_not_cached() {
        for _ in 0..2 {
            assert!(matches!(
                descriptor_of::<Broken>(),
                Err(VariantError::UnsupportedShape { .. })
            ));
        }
    }

    #[test]
    fn concurrent_first_use() {
        #[derive(Clone)]
        struct Racy;

        impl Bindable for Racy {
            const CATEGORY: Category = Category::Aggregate;
        }

        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| descriptor_of::<Racy>().unwrap() as *const _ as usize))
            .collect();
        let addresses: Vec<usize> =
            handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert!(addresses.windows(2).all(|w| w[0] == w[1]));
    }
}
