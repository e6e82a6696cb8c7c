use alloc::string::String;
use core::any::TypeId;

use dv_utils::TypeIdMap;
use dv_utils::hash::{FixedHashState, HashMap, HashSet};
use log::warn;

use crate::descriptor::Descriptor;
use crate::{Bindable, VariantResult, descriptor_of};

// -----------------------------------------------------------------------------
// TypeRegistry

/// An explicit store of [`Descriptor`]s.
///
/// Wrapping a value never needs a registry: descriptors are built lazily
/// by [`descriptor_of`]. A registry is for hosts that look types up by
/// name, e.g. an interpreter resolving a type written in source.
///
/// # Examples
///
/// ```
/// use dv_variant::registry::TypeRegistry;
///
/// let registry = TypeRegistry::new();
///
/// let by_name = registry.get_with_type_name("String").unwrap();
/// let by_path = registry.get_with_type_path("alloc::string::String").unwrap();
/// assert!(core::ptr::eq(by_name, by_path));
/// assert!(registry.get_with_type_name("Missing").is_none());
/// ```
pub struct TypeRegistry {
    descriptors: TypeIdMap<&'static Descriptor>,
    type_path_to_id: HashMap<&'static str, TypeId>,
    type_name_to_id: HashMap<&'static str, TypeId>,
    ambiguous_names: HashSet<&'static str>,
}

impl Default for TypeRegistry {
    /// See [`TypeRegistry::new`].
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl TypeRegistry {
    /// Creates an empty registry.
    #[inline]
    pub const fn empty() -> Self {
        Self {
            descriptors: TypeIdMap::new(),
            type_path_to_id: HashMap::with_hasher(FixedHashState),
            type_name_to_id: HashMap::with_hasher(FixedHashState),
            ambiguous_names: HashSet::with_hasher(FixedHashState),
        }
    }

    /// Creates a registry holding the primitive types.
    ///
    /// - `bool` `char`
    /// - `i8 - i128` `isize`
    /// - `u8 - u128` `usize`
    /// - `f32` `f64`
    /// - `String` `&'static str`
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register_or_warn::<bool>();
        registry.register_or_warn::<char>();
        registry.register_or_warn::<u8>();
        registry.register_or_warn::<u16>();
        registry.register_or_warn::<u32>();
        registry.register_or_warn::<u64>();
        registry.register_or_warn::<u128>();
        registry.register_or_warn::<usize>();
        registry.register_or_warn::<i8>();
        registry.register_or_warn::<i16>();
        registry.register_or_warn::<i32>();
        registry.register_or_warn::<i64>();
        registry.register_or_warn::<i128>();
        registry.register_or_warn::<isize>();
        registry.register_or_warn::<f32>();
        registry.register_or_warn::<f64>();
        registry.register_or_warn::<String>();
        registry.register_or_warn::<&'static str>();
        registry
    }

    // The type must not be in the table yet.
    fn add_new_type_indices(
        descriptor: &Descriptor,
        type_path_to_id: &mut HashMap<&'static str, TypeId>,
        type_name_to_id: &mut HashMap<&'static str, TypeId>,
        ambiguous_names: &mut HashSet<&'static str>,
    ) {
        let ty = descriptor.ty();
        let type_name = ty.name();

        if !ambiguous_names.contains(type_name) {
            if type_name_to_id.contains_key(type_name) {
                warn!("type name `{type_name}` is ambiguous, look it up by path instead");
                type_name_to_id.remove(type_name);
                ambiguous_names.insert(type_name);
            } else {
                type_name_to_id.insert(type_name, ty.id());
            }
        }

        type_path_to_id.insert(ty.path(), ty.id());
    }

    /// Adds a descriptor, returning `false` if its type is already present.
    pub fn insert_descriptor(&mut self, descriptor: &'static Descriptor) -> bool {
        self.descriptors.try_insert(descriptor.type_id(), || {
            Self::add_new_type_indices(
                descriptor,
                &mut self.type_path_to_id,
                &mut self.type_name_to_id,
                &mut self.ambiguous_names,
            );
            descriptor
        })
    }

    /// Registers `T`, building its descriptor if no value of `T` was wrapped yet.
    ///
    /// Registering twice is cheap and returns the same descriptor.
    pub fn register<T: Bindable>(&mut self) -> VariantResult<&'static Descriptor> {
        let descriptor = descriptor_of::<T>()?;
        self.insert_descriptor(descriptor);
        Ok(descriptor)
    }

    // Failures are already logged by `descriptor_of`.
    pub(crate) fn register_or_warn<T: Bindable>(&mut self) {
        _ = self.register::<T>();
    }

    /// Registers every type submitted with [`impl_auto_register!`](crate::impl_auto_register).
    ///
    /// Repeated calls are cheap and do not insert duplicates.
    ///
    /// ## Return Value
    ///
    /// Returns `true` if static registration works on the current platform.
    ///
    /// ## Feature Dependency
    ///
    /// Requires the `auto_register` feature. When disabled, this does nothing
    /// and returns `false`.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use dv_variant::{Bindable, Category, impl_auto_register};
    /// use dv_variant::registry::TypeRegistry;
    ///
    /// #[derive(Clone)]
    /// struct Token;
    ///
    /// impl Bindable for Token {
    ///     const CATEGORY: Category = Category::Aggregate;
    /// }
    ///
    /// impl_auto_register!(Token);
    ///
    /// let mut registry = TypeRegistry::empty();
    /// assert!(registry.auto_register());
    /// assert!(registry.get_with_type_name("Token").is_some());
    /// ```
    #[cfg(feature = "auto_register")]
    pub fn auto_register(&mut self) -> bool {
        use crate::__macro_exports::auto_register;

        // Reduce the cost of repeated calls.
        if self.contains(TypeId::of::<auto_register::__AvailFlag>()) {
            return true;
        }
        auto_register::__register_types(self);
        self.contains(TypeId::of::<auto_register::__AvailFlag>())
    }

    /// See the `auto_register` feature.
    #[cfg(not(feature = "auto_register"))]
    #[inline(always)]
    pub fn auto_register(&mut self) -> bool {
        false
    }

    #[inline]
    pub fn contains(&self, type_id: TypeId) -> bool {
        self.descriptors.contains(&type_id)
    }

    #[inline]
    pub fn get(&self, type_id: TypeId) -> Option<&'static Descriptor> {
        self.descriptors.get(&type_id).copied()
    }

    /// Looks a descriptor up by its full type path, e.g. `alloc::string::String`.
    pub fn get_with_type_path(&self, type_path: &str) -> Option<&'static Descriptor> {
        self.type_path_to_id
            .get(type_path)
            .and_then(|id| self.get(*id))
    }

    /// Looks a descriptor up by its short type name, e.g. `String`.
    ///
    /// Returns `None` if the name is [ambiguous](Self::is_ambiguous).
    pub fn get_with_type_name(&self, type_name: &str) -> Option<&'static Descriptor> {
        self.type_name_to_id
            .get(type_name)
            .and_then(|id| self.get(*id))
    }

    /// Returns `true` if more than one registered type has this short name.
    #[inline]
    pub fn is_ambiguous(&self, type_name: &str) -> bool {
        self.ambiguous_names.contains(type_name)
    }

    pub fn iter(&self) -> impl ExactSizeIterator<Item = &'static Descriptor> + '_ {
        self.descriptors.values().copied()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
