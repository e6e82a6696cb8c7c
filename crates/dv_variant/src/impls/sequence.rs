use alloc::collections::VecDeque;
use alloc::vec::Vec;

use super::utils::{
    elements_cmp, elements_eq, iterate_elements, position, render_elements, single_arg,
};
use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::{Bindable, Variant};

// Indexing copies the element out into a new variant.
macro_rules! describe_sequence {
    ($builder:ident) => {
        $builder
            .render(|items, f| render_elements(f, items.iter()))
            .equality(|a, b| elements_eq(a.iter(), b.iter()))
            .ordering(|a, b| elements_cmp(a.iter(), b.iter()))
            .length(|items| items.len())
            .index(|items, args| {
                let pos = position(single_arg(args)?, items.len())?;
                Variant::try_new(items[pos].clone())
            })
            .iterate(|items, visitor| iterate_elements(items.iter(), visitor))
    };
}

impl<T: Bindable> Bindable for Vec<T> {
    const CATEGORY: Category = Category::Array;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        describe_sequence!(builder)
    }
}

impl<T: Bindable> Bindable for VecDeque<T> {
    const CATEGORY: Category = Category::Array;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        describe_sequence!(builder)
    }
}

impl<T: Bindable, const N: usize> Bindable for [T; N] {
    const CATEGORY: Category = Category::Array;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        describe_sequence!(builder).convert_with(|items: &[T; N]| items.to_vec())
    }
}
