use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::{Any, TypeId};
use core::cmp::Ordering;
use core::fmt;
use core::ops::ControlFlow;

use dv_utils::TypeIdMap;

use crate::info::{Category, QualifiedType, Qualifier, Type};
use crate::{Variant, VariantError, VariantResult};

#[cfg(feature = "members")]
use crate::members::MemberTable;

// -----------------------------------------------------------------------------
// Entry types

/// The visitor passed to an iteration entry.
///
/// Receives `(index-or-key, element)` and returns [`ControlFlow::Break`] to stop.
pub type Visitor<'a> = dyn FnMut(Variant, Variant) -> ControlFlow<()> + 'a;

pub(crate) type CloneFn = fn(&dyn Any) -> Box<dyn Any>;
pub(crate) type ConvertFn = Box<dyn Fn(&dyn Any) -> Box<dyn Any> + Send + Sync>;
pub(crate) type TruthyFn = Box<dyn Fn(&dyn Any) -> bool + Send + Sync>;
pub(crate) type RenderFn =
    Box<dyn Fn(&dyn Any, &mut fmt::Formatter<'_>) -> fmt::Result + Send + Sync>;
pub(crate) type EqFn = Box<dyn Fn(&dyn Any, &dyn Any) -> Option<bool> + Send + Sync>;
pub(crate) type CmpFn = Box<dyn Fn(&dyn Any, &dyn Any) -> Option<Ordering> + Send + Sync>;
pub(crate) type LengthFn = Box<dyn Fn(&dyn Any) -> usize + Send + Sync>;
pub(crate) type IterateFn =
    Box<dyn Fn(&dyn Any, &mut Visitor<'_>) -> VariantResult<()> + Send + Sync>;
pub(crate) type InvokeFn =
    Box<dyn Fn(&dyn Any, &[Variant]) -> VariantResult<Variant> + Send + Sync>;
#[cfg(feature = "members")]
pub(crate) type LookupFn =
    Box<dyn Fn(&dyn Any, Qualifier, &str) -> VariantResult<Variant> + Send + Sync>;

pub(crate) struct Conversion {
    pub(crate) target: Type,
    pub(crate) convert: ConvertFn,
}

// -----------------------------------------------------------------------------
// Descriptor

/// The operation table of one concrete [`Bindable`](crate::Bindable) type.
///
/// Descriptors are created once per type by [`descriptor_of`](crate::descriptor_of)
/// and live for the rest of the process. They are immutable and shared by every
/// [`Variant`] binding a value of their type.
///
/// The public surface only answers capability questions; the operations
/// themselves are reached through [`Variant`].
pub struct Descriptor {
    pub(crate) ty: Type,
    pub(crate) category: Category,
    pub(crate) clone: CloneFn,
    pub(crate) conversions: TypeIdMap<Conversion>,
    pub(crate) truthy: Option<TruthyFn>,
    pub(crate) render: Option<RenderFn>,
    pub(crate) literal: Option<RenderFn>,
    pub(crate) eq: Option<EqFn>,
    pub(crate) cmp: Option<CmpFn>,
    pub(crate) length: Option<LengthFn>,
    pub(crate) iterate: Option<IterateFn>,
    pub(crate) index: Option<InvokeFn>,
    pub(crate) call: Option<InvokeFn>,
    #[cfg(feature = "members")]
    pub(crate) lookup: Option<LookupFn>,
    #[cfg(feature = "members")]
    pub(crate) members: Option<MemberTable>,
}

impl Descriptor {
    pub(crate) fn new(ty: Type, category: Category, clone: CloneFn) -> Self {
        Self {
            ty,
            category,
            clone,
            conversions: TypeIdMap::new(),
            truthy: None,
            render: None,
            literal: None,
            eq: None,
            cmp: None,
            length: None,
            iterate: None,
            index: None,
            call: None,
            #[cfg(feature = "members")]
            lookup: None,
            #[cfg(feature = "members")]
            members: None,
        }
    }

    #[inline(always)]
    pub fn ty(&self) -> Type {
        self.ty
    }

    #[inline(always)]
    pub fn type_id(&self) -> TypeId {
        self.ty.id()
    }

    #[inline(always)]
    pub fn type_path(&self) -> &'static str {
        self.ty.path()
    }

    #[inline]
    pub fn type_name(&self) -> &'static str {
        self.ty.name()
    }

    #[inline(always)]
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns `true` if a value of this type bound with `bound` can be
    /// written into a destination of type `target`.
    ///
    /// The candidates are the type itself and its declared conversion
    /// targets, each crossed with the qualifiers reachable from `bound`.
    /// Aggregates ignore declared conversions.
    pub fn converts_to(&self, bound: Qualifier, target: &QualifiedType) -> bool {
        bound.converts_to(target.qualifier()) && self.reaches(target.id())
    }

    /// Every [`QualifiedType`] a value bound with `bound` converts to.
    pub fn conversion_targets(&self, bound: Qualifier) -> Vec<QualifiedType> {
        let mut types = Vec::new();
        types.push(self.ty);
        if self.category != Category::Aggregate {
            types.extend(self.conversions.values().map(|c| c.target));
        }

        let qualifiers = bound.targets();
        let mut targets = Vec::with_capacity(types.len() * qualifiers.len());
        for ty in types {
            targets.extend(qualifiers.iter().map(|q| ty.qualified(*q)));
        }
        targets
    }

    #[inline]
    pub fn is_callable(&self) -> bool {
        self.call.is_some()
    }

    #[inline]
    pub fn is_iterable(&self) -> bool {
        self.iterate.is_some()
    }

    #[inline]
    pub fn is_indexable(&self) -> bool {
        self.index.is_some()
    }

    #[inline]
    pub fn has_length(&self) -> bool {
        self.length.is_some()
    }

    #[inline]
    pub fn is_comparable(&self) -> bool {
        self.eq.is_some()
    }

    #[inline]
    pub fn is_ordered(&self) -> bool {
        self.cmp.is_some()
    }

    /// Names of the members registered directly on this type,
    /// excluding the ones reached through a delegate.
    #[cfg(feature = "members")]
    pub fn member_names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.members.iter().flat_map(MemberTable::names)
    }

    fn reaches(&self, target: TypeId) -> bool {
        target == self.ty.id()
            || (self.category != Category::Aggregate && self.conversions.contains(&target))
    }
}

// -----------------------------------------------------------------------------
// Operations on erased slots

impl Descriptor {
    #[inline]
    pub(crate) fn clone_slot(&self, value: &dyn Any) -> Box<dyn Any> {
        (self.clone)(value)
    }

    /// Writes the value into a new slot of type `target`, or returns `None`
    /// when `target` is not reachable.
    pub(crate) fn convert(&self, value: &dyn Any, target: TypeId) -> Option<Box<dyn Any>> {
        if target == self.ty.id() {
            return Some(self.clone_slot(value));
        }
        if self.category == Category::Aggregate {
            return None;
        }
        self.conversions.get(&target).map(|c| (c.convert)(value))
    }

    pub(crate) fn is_truthy(&self, value: &dyn Any) -> bool {
        if self.category == Category::Aggregate {
            return true;
        }
        match (&self.truthy, &self.length) {
            (Some(truthy), _) => truthy(value),
            (None, Some(length)) => length(value) > 0,
            (None, None) => true,
        }
    }

    pub(crate) fn render(&self, value: &dyn Any, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.render {
            Some(render) => render(value, f),
            None => f.write_str(self.type_name()),
        }
    }

    /// Renders the value the way it is written inside a container.
    pub(crate) fn render_literal(
        &self,
        value: &dyn Any,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        match &self.literal {
            Some(literal) => literal(value, f),
            None => self.render(value, f),
        }
    }

    /// `None` when the type declares no equality, or when its elements do not.
    pub(crate) fn equals(&self, lhs: &dyn Any, rhs: &dyn Any) -> Option<bool> {
        self.eq.as_ref().and_then(|eq| eq(lhs, rhs))
    }

    pub(crate) fn compare(&self, lhs: &dyn Any, rhs: &dyn Any) -> Option<Ordering> {
        self.cmp.as_ref().and_then(|cmp| cmp(lhs, rhs))
    }

    pub(crate) fn length(&self, value: &dyn Any) -> Option<usize> {
        self.length.as_ref().map(|length| length(value))
    }

    pub(crate) fn iterate(&self, value: &dyn Any, visitor: &mut Visitor<'_>) -> VariantResult<()> {
        match &self.iterate {
            Some(iterate) => iterate(value, visitor),
            None => Err(VariantError::NotIterable {
                type_name: self.type_path(),
            }),
        }
    }

    pub(crate) fn index(&self, value: &dyn Any, args: &[Variant]) -> VariantResult<Variant> {
        match &self.index {
            Some(index) => index(value, args),
            None => Err(VariantError::NotIndexable {
                type_name: self.type_path(),
            }),
        }
    }

    pub(crate) fn call(&self, value: &dyn Any, args: &[Variant]) -> VariantResult<Variant> {
        match &self.call {
            Some(call) => call(value, args),
            None => Err(VariantError::NotCallable {
                type_name: self.type_path(),
            }),
        }
    }

    /// `qualifier` is the one of the binding holding `value`; bound
    /// methods keep it for their receiver.
    #[cfg(feature = "members")]
    pub(crate) fn lookup_member(
        &'static self,
        value: &dyn Any,
        qualifier: Qualifier,
        name: &str,
    ) -> VariantResult<Variant> {
        if !self.category.has_members() {
            return Err(VariantError::NotSupported {
                operation: "lookup_member",
                type_name: self.type_path(),
            });
        }
        if let Some(lookup) = &self.lookup {
            return lookup(value, qualifier, name);
        }
        match &self.members {
            Some(members) => members.lookup(self, value, qualifier, name),
            None => Err(VariantError::NoSuchMember {
                type_name: self.type_path(),
                member: name.into(),
            }),
        }
    }
}

impl fmt::Debug for Descriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Descriptor")
            .field("type", &self.ty)
            .field("category", &self.category)
            .field("conversions", &self.conversions.values().map(|c| c.target).collect::<Vec<_>>())
            .field("callable", &self.is_callable())
            .field("iterable", &self.is_iterable())
            .field("indexable", &self.is_indexable())
            .field("comparable", &self.is_comparable())
            .field("ordered", &self.is_ordered())
            .finish_non_exhaustive()
    }
}
