use core::any::{Any, TypeId, type_name};
use core::fmt;
use core::hash::{Hash, Hasher};

use crate::info::Qualifier;

// -----------------------------------------------------------------------------
// Type

/// The identity of a concrete type: its [`TypeId`] and its type path.
///
/// Equality and hashing only use the [`TypeId`].
///
/// # Examples
///
/// ```
/// use dv_variant::Type;
///
/// let ty = Type::of::<Vec<String>>();
/// assert_eq!(ty.path(), "alloc::vec::Vec<alloc::string::String>");
/// assert_eq!(ty.name(), "Vec<alloc::string::String>");
/// assert!(ty.is::<Vec<String>>());
/// ```
#[derive(Clone, Copy)]
pub struct Type {
    id: TypeId,
    path: &'static str,
}

impl Type {
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Self {
            id: TypeId::of::<T>(),
            path: type_name::<T>(),
        }
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.id
    }

    /// The full type path, e.g. `alloc::string::String`.
    #[inline(always)]
    pub const fn path(&self) -> &'static str {
        self.path
    }

    /// The path with the leading module path removed, e.g. `String`.
    ///
    /// Generic arguments keep their full paths.
    pub fn name(&self) -> &'static str {
        let path = self.path;
        let head = path.find(['<', '[', '(']).unwrap_or(path.len());
        match path[..head].rfind("::") {
            Some(pos) => &path[pos + 2..],
            None => path,
        }
    }

    #[inline]
    pub fn is<T: Any + ?Sized>(&self) -> bool {
        self.id == TypeId::of::<T>()
    }

    /// Attaches a qualifier.
    #[inline]
    pub const fn qualified(self, qualifier: Qualifier) -> QualifiedType {
        QualifiedType {
            ty: self,
            qualifier,
        }
    }
}

impl PartialEq for Type {
    #[inline]
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Type {}

impl Hash for Type {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path)
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.path)
    }
}

// -----------------------------------------------------------------------------
// QualifiedType

/// A [`Type`] with a [`Qualifier`]: the token a [`Variant`](crate::Variant)
/// reports from [`ty`](crate::Variant::ty) and the target of conversions.
///
/// # Examples
///
/// ```
/// use dv_variant::{QualifiedType, Qualifier};
///
/// let token = QualifiedType::of::<i32>().with_qualifier(Qualifier::Const);
/// assert_eq!(token.to_string(), "const i32");
/// assert_ne!(token, QualifiedType::of::<i32>());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QualifiedType {
    ty: Type,
    qualifier: Qualifier,
}

impl QualifiedType {
    /// The `Mutable` token of `T`.
    #[inline]
    pub fn of<T: Any + ?Sized>() -> Self {
        Type::of::<T>().qualified(Qualifier::Mutable)
    }

    #[inline]
    pub fn of_qualified<T: Any + ?Sized>(qualifier: Qualifier) -> Self {
        Type::of::<T>().qualified(qualifier)
    }

    #[inline]
    pub const fn with_qualifier(self, qualifier: Qualifier) -> Self {
        Self {
            ty: self.ty,
            qualifier,
        }
    }

    #[inline(always)]
    pub const fn ty(&self) -> Type {
        self.ty
    }

    #[inline(always)]
    pub const fn qualifier(&self) -> Qualifier {
        self.qualifier
    }

    #[inline(always)]
    pub const fn id(&self) -> TypeId {
        self.ty.id
    }
}

impl fmt::Display for QualifiedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.qualifier.prefix(), self.ty.path)
    }
}
