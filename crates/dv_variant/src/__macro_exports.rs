//! Items used by exported macros. Not public API.

#[cfg(feature = "auto_register")]
pub mod auto_register {
    pub use inventory;

    use crate::info::Category;
    use crate::registry::TypeRegistry;
    use crate::Bindable;

    /// A registration submitted by `impl_auto_register!`.
    pub struct __AutoRegisterFunc(pub fn(&mut TypeRegistry));

    inventory::collect!(__AutoRegisterFunc);

    /// Registered unconditionally, so its presence tells whether
    /// static collection works on this platform.
    #[derive(Clone)]
    pub struct __AvailFlag;

    impl Bindable for __AvailFlag {
        const CATEGORY: Category = Category::Aggregate;
    }

    inventory::submit! {
        __AutoRegisterFunc(__register::<__AvailFlag>)
    }

    #[inline(never)]
    pub fn __register<T: Bindable>(registry: &mut TypeRegistry) {
        registry.register_or_warn::<T>();
    }

    pub(crate) fn __register_types(registry: &mut TypeRegistry) {
        for func in inventory::iter::<__AutoRegisterFunc> {
            (func.0)(registry);
        }
    }
}

/// Submits types for [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register).
///
/// Only non-generic types can be submitted. Without the `auto_register`
/// feature the macro expands to nothing.
#[cfg(feature = "auto_register")]
#[macro_export]
macro_rules! impl_auto_register {
    ($($ty:ty),+ $(,)?) => {
        $(
            $crate::__macro_exports::auto_register::inventory::submit! {
                $crate::__macro_exports::auto_register::__AutoRegisterFunc(
                    $crate::__macro_exports::auto_register::__register::<$ty>
                )
            }
        )+
    };
}

/// Submits types for [`TypeRegistry::auto_register`](crate::registry::TypeRegistry::auto_register).
///
/// Only non-generic types can be submitted. Without the `auto_register`
/// feature the macro expands to nothing.
#[cfg(not(feature = "auto_register"))]
#[macro_export]
macro_rules! impl_auto_register {
    ($($ty:ty),+ $(,)?) => {};
}
