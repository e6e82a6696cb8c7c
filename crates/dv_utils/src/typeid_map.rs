use core::any::TypeId;
use core::fmt;

use crate::hash::IdentityHashState;
use crate::hash::hashbrown::HashMap;
use crate::hash::hashbrown::hash_map::Entry;

// -----------------------------------------------------------------------------
// TypeIdMap

/// Per-type storage: one `V` for each [`TypeId`].
///
/// Descriptor caches and conversion tables are keyed this way. A `TypeId`
/// is its own hash, so keys go through [`IdentityHashState`].
///
/// # Examples
///
/// ```
/// use core::any::TypeId;
/// use dv_utils::TypeIdMap;
///
/// let mut conversions = TypeIdMap::new();
/// assert!(conversions.try_insert(TypeId::of::<i64>(), || "widen"));
/// assert!(!conversions.try_insert(TypeId::of::<i64>(), || "again"));
///
/// assert_eq!(conversions.get(&TypeId::of::<i64>()), Some(&"widen"));
/// assert!(!conversions.contains(&TypeId::of::<u8>()));
/// ```
pub struct TypeIdMap<V>(HashMap<TypeId, V, IdentityHashState>);

impl<V> TypeIdMap<V> {
    /// An empty map, usable in a `static`.
    #[inline]
    pub const fn new() -> Self {
        Self(HashMap::with_hasher(IdentityHashState))
    }

    /// Stores `f()` under `type_id` unless an entry exists.
    ///
    /// Returns whether `f` ran.
    pub fn try_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> bool {
        match self.0.entry(type_id) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(f());
                true
            }
        }
    }

    /// The entry under `type_id`, created with `f` on first access.
    pub fn get_or_insert(&mut self, type_id: TypeId, f: impl FnOnce() -> V) -> &mut V {
        self.0.entry(type_id).or_insert_with(f)
    }

    #[inline]
    pub fn get(&self, type_id: &TypeId) -> Option<&V> {
        self.0.get(type_id)
    }

    /// Replaces the entry under `type_id`, returning the old one.
    #[inline]
    pub fn insert(&mut self, type_id: TypeId, value: V) -> Option<V> {
        self.0.insert(type_id, value)
    }

    #[inline]
    pub fn contains(&self, type_id: &TypeId) -> bool {
        self.0.contains_key(type_id)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Entries in no particular order.
    #[inline]
    pub fn iter(&self) -> impl ExactSizeIterator<Item = (&TypeId, &V)> {
        self.0.iter()
    }

    #[inline]
    pub fn values(&self) -> impl ExactSizeIterator<Item = &V> {
        self.0.values()
    }
}

impl<V> Default for TypeIdMap<V> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone> Clone for TypeIdMap<V> {
    #[inline]
    fn clone(&self) -> Self {
        Self(self.0.clone())
    }
}

impl<V: fmt::Debug> fmt::Debug for TypeIdMap<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.0.iter()).finish()
    }
}

#[cfg(test)]
mod tests {
    use core::any::TypeId;

    use super::TypeIdMap;

    #[test]
    fn first_insert_wins() {
        let mut map = TypeIdMap::new();
        assert!(map.try_insert(TypeId::of::<u8>(), || 1));
        assert!(!map.try_insert(TypeId::of::<u8>(), || 2));
        assert_eq!(map.get(&TypeId::of::<u8>()), Some(&1));
        assert_eq!(map.insert(TypeId::of::<u8>(), 3), Some(1));
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn get_or_insert_builds_once() {
        let mut map = TypeIdMap::default();
        let mut builds = 0;
        for _ in 0..3 {
            map.get_or_insert(TypeId::of::<i64>(), || {
                builds += 1;
                "i64"
            });
        }
        assert_eq!(builds, 1);
        assert!(map.contains(&TypeId::of::<i64>()));
        assert!(!map.is_empty());
        assert_eq!(map.values().count(), 1);
    }
}
