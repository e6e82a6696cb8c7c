use alloc::collections::BTreeMap;
use alloc::string::ToString;
use core::cmp::Ordering;
use core::hash::{BuildHasher, Hash};

use super::utils::{iterate_entries, render_entries, single_arg};
use crate::descriptor::DescriptorBuilder;
use crate::info::Category;
use crate::{Bindable, Variant, VariantError, VariantResult, descriptor_of};

// The key argument is converted to `K` through its read-only view before
// the lookup.
fn entry<'a, K: Bindable, V: Bindable>(
    args: &[Variant],
    get: impl FnOnce(&K) -> Option<&'a V>,
) -> VariantResult<Variant> {
    let arg = single_arg(args)?;
    let key = arg.read::<K>()?;
    match get(&key) {
        Some(value) => Variant::try_new(value.clone()),
        None => Err(VariantError::KeyNotFound {
            key: arg.to_string(),
        }),
    }
}

/// Equal when both maps hold the same keys with equal values.
fn entries_eq<'a, V: Bindable>(
    len: (usize, usize),
    mut pairs: impl Iterator<Item = (&'a V, Option<&'a V>)>,
) -> Option<bool> {
    if len.0 != len.1 {
        return Some(false);
    }
    let values = descriptor_of::<V>().ok()?;
    pairs.try_fold(true, |equal, (a, b)| match b {
        Some(b) if equal => values.equals(a, b),
        _ => Some(false),
    })
}

/// Lexicographic over `(key, value)` pairs.
fn entries_cmp<'a, K: Bindable, V: Bindable>(
    mut lhs: impl Iterator<Item = (&'a K, &'a V)>,
    mut rhs: impl Iterator<Item = (&'a K, &'a V)>,
) -> Option<Ordering> {
    let keys = descriptor_of::<K>().ok()?;
    let values = descriptor_of::<V>().ok()?;
    loop {
        let ordering = match (lhs.next(), rhs.next()) {
            (None, None) => return Some(Ordering::Equal),
            (None, Some(_)) => return Some(Ordering::Less),
            (Some(_), None) => return Some(Ordering::Greater),
            (Some((ka, va)), Some((kb, vb))) => match keys.compare(ka, kb)? {
                Ordering::Equal => values.compare(va, vb)?,
                ordering => ordering,
            },
        };
        if ordering.is_ne() {
            return Some(ordering);
        }
    }
}

macro_rules! impl_hash_map {
    ($($map:ident)::+) => {
        impl<K, V, S> Bindable for $($map)::+<K, V, S>
        where
            K: Bindable + Eq + Hash,
            V: Bindable,
            S: BuildHasher + Clone + 'static,
        {
            const CATEGORY: Category = Category::Map;

            fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
                builder
                    .render(|map, f| render_entries(f, map.iter()))
                    .equality(|a, b| {
                        entries_eq((a.len(), b.len()), a.iter().map(|(k, v)| (v, b.get(k))))
                    })
                    .length(|map| map.len())
                    .index(|map, args| entry::<K, V>(args, |key| map.get(key)))
                    .iterate(|map, visitor| iterate_entries(map.iter(), visitor))
            }
        }
    };
}

impl_hash_map!(std::collections::HashMap);
impl_hash_map!(dv_utils::hash::hashbrown::HashMap);

impl<K, V> Bindable for BTreeMap<K, V>
where
    K: Bindable + Ord,
    V: Bindable,
{
    const CATEGORY: Category = Category::Map;

    fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
        builder
            .render(|map, f| render_entries(f, map.iter()))
            .equality(|a, b| entries_eq((a.len(), b.len()), a.iter().map(|(k, v)| (v, b.get(k)))))
            .ordering(|a, b| entries_cmp(a.iter(), b.iter()))
            .length(|map| map.len())
            .index(|map, args| entry::<K, V>(args, |key| map.get(key)))
            .iterate(|map, visitor| iterate_entries(map.iter(), visitor))
    }
}
