use alloc::boxed::Box;
use alloc::sync::Arc;
use alloc::vec::Vec;
use core::any::{Any, type_name};
use core::marker::PhantomData;

use super::{BoundMethod, Method};
use crate::call::IntoMethod;
use crate::descriptor::{Descriptor, slot};
use crate::info::{Category, Qualifier};
use crate::{Bindable, Variant, VariantError, VariantResult, descriptor_of};

type FieldFn = Box<dyn Fn(&dyn Any) -> VariantResult<Variant> + Send + Sync>;
type DelegateFn =
    Box<dyn Fn(&dyn Any, Qualifier, &str) -> VariantResult<Variant> + Send + Sync>;

enum MemberKind {
    Field(FieldFn),
    Method(Arc<Method>),
}

struct Member {
    name: &'static str,
    kind: MemberKind,
}

/// How a type reaches members it does not declare itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DelegateKind {
    /// The single ancestor of a reference-like type.
    Base,
    /// The single forwarding field of an aggregate.
    Forward,
}

struct Delegate {
    kind: DelegateKind,
    lookup: DelegateFn,
}

// -----------------------------------------------------------------------------
// Members

/// Declares the named members of `T`.
///
/// # Examples
///
/// ```
/// use dv_variant::{Bindable, Category, DescriptorBuilder, Variant};
/// use dv_variant::members::Members;
///
/// #[derive(Clone)]
/// struct Shape {
///     sides: u32,
/// }
///
/// #[derive(Clone)]
/// struct Square {
///     shape: Shape,
///     side: f64,
/// }
///
/// impl Bindable for Shape {
///     const CATEGORY: Category = Category::Aggregate;
///
///     fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
///         builder.members(Members::new().field("sides", |s: &Shape| &s.sides))
///     }
/// }
///
/// impl Bindable for Square {
///     const CATEGORY: Category = Category::Aggregate;
///
///     fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
///         builder.members(
///             Members::new()
///                 .field("side", |s: &Square| &s.side)
///                 .method("area", |s: &Square| s.side * s.side)
///                 .forward("shape", |s: &Square| &s.shape),
///         )
///     }
/// }
///
/// let square = Variant::new(Square { shape: Shape { sides: 4 }, side: 3.0 });
/// assert_eq!(square.lookup_member("sides").unwrap().get::<u32>().unwrap(), 4);
/// assert_eq!(square.lookup_member("area").unwrap().call(()).unwrap().get::<f64>().unwrap(), 9.0);
/// assert!(square.lookup_member("corners").is_err());
/// ```
pub struct Members<T> {
    entries: Vec<Member>,
    delegate: Option<Delegate>,
    error: Option<VariantError>,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Bindable> Default for Members<T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Bindable> Members<T> {
    #[inline]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
            delegate: None,
            error: None,
            _marker: PhantomData,
        }
    }

    fn fail(&mut self, reason: &'static str) {
        if self.error.is_none() {
            self.error = Some(VariantError::UnsupportedShape {
                type_name: type_name::<T>(),
                reason,
            });
        }
    }

    fn push(mut self, name: &'static str, kind: MemberKind) -> Self {
        if self.entries.iter().any(|m| m.name == name) {
            self.fail("a member name is declared twice");
        } else {
            self.entries.push(Member { name, kind });
        }
        self
    }

    fn delegate(mut self, kind: DelegateKind, lookup: DelegateFn) -> Self {
        let category = match kind {
            DelegateKind::Base => Category::Reference,
            DelegateKind::Forward => Category::Aggregate,
        };
        if T::CATEGORY != category {
            self.fail(match kind {
                DelegateKind::Base => "only reference types declare a base",
                DelegateKind::Forward => "only aggregates declare a forwarding field",
            });
        } else if self.delegate.is_some() {
            self.fail("more than one base or forwarding member");
        } else {
            self.delegate = Some(Delegate { kind, lookup });
        }
        self
    }

    /// A data member, read as a copy of the field.
    pub fn field<F: Bindable>(
        self,
        name: &'static str,
        get: impl Fn(&T) -> &F + Send + Sync + 'static,
    ) -> Self {
        let field = move |value: &dyn Any| Variant::try_new(get(slot::<T>(value)).clone());
        self.push(name, MemberKind::Field(Box::new(field)))
    }

    /// A function member taking `&T` and typed parameters.
    pub fn method<M, Marker>(self, name: &'static str, method: M) -> Self
    where
        M: IntoMethod<T, Marker>,
    {
        let method = Method::new::<T, M, Marker>(name, method);
        self.push(name, MemberKind::Method(Arc::new(method)))
    }

    /// The single ancestor whose members are reachable through `T`.
    ///
    /// Only [`Category::Reference`] types may declare one.
    pub fn base<B: Bindable>(self, get: impl Fn(&T) -> &B + Send + Sync + 'static) -> Self {
        self.delegate(DelegateKind::Base, delegate_lookup(get))
    }

    /// A field that is readable by `name` and whose members are reachable through `T`.
    ///
    /// Only [`Category::Aggregate`] types may declare one.
    pub fn forward<F: Bindable>(
        self,
        name: &'static str,
        get: impl Fn(&T) -> &F + Clone + Send + Sync + 'static,
    ) -> Self {
        self.field(name, get.clone())
            .delegate(DelegateKind::Forward, delegate_lookup(get))
    }

    pub(crate) fn finish(self) -> VariantResult<MemberTable> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(MemberTable {
                entries: self.entries,
                delegate: self.delegate,
            }),
        }
    }
}

fn delegate_lookup<T: Bindable, D: Bindable>(
    get: impl Fn(&T) -> &D + Send + Sync + 'static,
) -> DelegateFn {
    Box::new(move |value: &dyn Any, qualifier: Qualifier, name: &str| {
        let target = get(slot::<T>(value));
        descriptor_of::<D>()?.lookup_member(target, qualifier, name)
    })
}

// -----------------------------------------------------------------------------
// MemberTable

/// The finished member table of one type, owned by its [`Descriptor`].
pub struct MemberTable {
    entries: Vec<Member>,
    delegate: Option<Delegate>,
}

impl MemberTable {
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|m| m.name)
    }

    pub fn delegate_kind(&self) -> Option<DelegateKind> {
        self.delegate.as_ref().map(|d| d.kind)
    }

    pub(crate) fn lookup(
        &self,
        descriptor: &'static Descriptor,
        value: &dyn Any,
        qualifier: Qualifier,
        name: &str,
    ) -> VariantResult<Variant> {
        if let Some(member) = self.entries.iter().find(|m| m.name == name) {
            return match &member.kind {
                MemberKind::Field(get) => get(value),
                MemberKind::Method(method) => {
                    let receiver =
                        Variant::from_slot(descriptor, descriptor.clone_slot(value), qualifier);
                    Variant::try_new(BoundMethod::new(receiver, method.clone()))
                }
            };
        }

        let missing = || VariantError::NoSuchMember {
            type_name: descriptor.type_path(),
            member: name.into(),
        };
        match &self.delegate {
            Some(delegate) => {
                (delegate.lookup)(value, qualifier, name).map_err(|error| match error {
                    VariantError::NoSuchMember { .. } => missing(),
                    error => error,
                })
            }
            None => Err(missing()),
        }
    }
}

#[cfg(test)]
mod tests {
    use alloc::string::String;
    use alloc::sync::Arc;

    use super::{DelegateKind, Members};
    use crate::info::Category;
    use crate::{Bindable, DescriptorBuilder, Variant, VariantError, descriptor_of};

    #[derive(Clone)]
    struct Animal {
        name: String,
    }

    impl Bindable for Animal {
        const CATEGORY: Category = Category::Reference;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(
                Members::new()
                    .field("name", |a: &Animal| &a.name)
                    .method("greet", |a: &Animal, other: String| {
                        a.name.clone() + " greets " + &other
                    }),
            )
        }
    }

    #[derive(Clone)]
    struct Dog {
        animal: Animal,
        tricks: u32,
    }

    impl Bindable for Dog {
        const CATEGORY: Category = Category::Reference;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(
                Members::new()
                    .field("tricks", |d: &Dog| &d.tricks)
                    .base(|d: &Dog| &d.animal),
            )
        }
    }

    #[derive(Clone)]
    struct Twins {
        left: Animal,
        right: Animal,
    }

    impl Bindable for Twins {
        const CATEGORY: Category = Category::Aggregate;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(
                Members::new()
                    .forward("left", |t: &Twins| &t.left)
                    .forward("right", |t: &Twins| &t.right),
            )
        }
    }

    #[derive(Clone)]
    struct Pack {
        leader: Animal,
    }

    impl Bindable for Pack {
        const CATEGORY: Category = Category::Aggregate;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(Members::new().base(|p: &Pack| &p.leader))
        }
    }

    #[derive(Clone)]
    struct Kennel {
        dog: Dog,
    }

    impl Bindable for Kennel {
        const CATEGORY: Category = Category::Reference;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(Members::new().forward("dog", |k: &Kennel| &k.dog))
        }
    }

    #[derive(Clone)]
    struct Repeated;

    impl Bindable for Repeated {
        const CATEGORY: Category = Category::Aggregate;

        fn describe(builder: DescriptorBuilder<Self>) -> DescriptorBuilder<Self> {
            builder.members(
                Members::new()
                    .method("id", |_: &Repeated| 1)
                    .method("id", |_: &Repeated| 2),
            )
        }
    }

    fn dog() -> Dog {
        Dog {
            animal: Animal { name: "Rex".into() },
            tricks: 3,
        }
    }

    #[test]
    fn own_members_first() {
        let v = Variant::new(dog());
        assert_eq!(v.lookup_member("tricks").unwrap().get::<u32>().unwrap(), 3);
        let names: alloc::vec::Vec<_> = descriptor_of::<Dog>().unwrap().member_names().collect();
        assert_eq!(names, ["tricks"]);
    }

    #[test]
    fn base_members_are_inherited() {
        let v = Variant::new(dog());
        assert_eq!(v.lookup_member("name").unwrap().get::<String>().unwrap(), "Rex");

        let greet = v.lookup_member("greet").unwrap();
        let out = greet.call(("Tom",)).unwrap();
        assert_eq!(out.get::<String>().unwrap(), "Rex greets Tom");

        let table = descriptor_of::<Dog>().unwrap().members.as_ref().unwrap();
        assert_eq!(table.delegate_kind(), Some(DelegateKind::Base));
    }

    #[test]
    fn misses_name_the_outer_type() {
        let v = Variant::new(dog());
        match v.lookup_member("fly") {
            Err(VariantError::NoSuchMember { type_name, member }) => {
                assert!(type_name.ends_with("Dog"));
                assert_eq!(member, "fly");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn two_delegates_fail_registration() {
        assert!(matches!(
            descriptor_of::<Twins>(),
            Err(VariantError::UnsupportedShape { .. })
        ));
        let left = Animal { name: "a".into() };
        let right = left.clone();
        assert!(Variant::try_new(Twins { left, right }).is_err());
    }

    #[test]
    fn delegates_match_the_category() {
        assert_eq!(
            descriptor_of::<Pack>().unwrap_err(),
            VariantError::UnsupportedShape {
                type_name: core::any::type_name::<Pack>(),
                reason: "only reference types declare a base",
            },
        );
        assert_eq!(
            descriptor_of::<Kennel>().unwrap_err(),
            VariantError::UnsupportedShape {
                type_name: core::any::type_name::<Kennel>(),
                reason: "only aggregates declare a forwarding field",
            },
        );
    }

    #[test]
    fn duplicate_names_fail_registration() {
        assert!(matches!(
            descriptor_of::<Repeated>(),
            Err(VariantError::UnsupportedShape { .. })
        ));
    }

    #[test]
    fn shared_references_forward_to_the_pointee() {
        let shared = Variant::new(Arc::new(dog()));
        assert_eq!(shared.lookup_member("tricks").unwrap().get::<u32>().unwrap(), 3);
        assert_eq!(shared.lookup_member("name").unwrap().get::<String>().unwrap(), "Rex");

        let null = Variant::new(Option::<Arc<Dog>>::None);
        assert!(matches!(
            null.lookup_member("tricks"),
            Err(VariantError::NullReference { .. })
        ));
    }
}
