use core::fmt;

use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::Bindable;

impl<T: ?Sized + 'static> Bindable for *const T {
    const CATEGORY: Category = Category::Pointer;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|ptr| !ptr.is_null())
            .render(|ptr, f| fmt::Pointer::fmt(ptr, f))
            .ord()
    }
}

impl<T: ?Sized + 'static> Bindable for *mut T {
    const CATEGORY: Category = Category::Pointer;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .truthy(|ptr| !ptr.is_null())
            .render(|ptr, f| fmt::Pointer::fmt(ptr, f))
            .ord()
            .convert_with(|ptr: &*mut T| ptr.cast_const())
    }
}
