use core::fmt;

// -----------------------------------------------------------------------------
// Qualifier

/// The qualification of a binding or of a requested type.
///
/// Conversions may add qualifiers but never strip them:
///
/// | bound          | may become                                |
/// |----------------|-------------------------------------------|
/// | `Mutable`      | `Mutable`, `Const`, `Immutable`           |
/// | `Const`        | `Const`                                   |
/// | `Immutable`    | `Immutable`, `Const`, `SharedConst`       |
/// | `Shared`       | `Shared`, `SharedConst`                   |
/// | `SharedConst`  | `SharedConst`                             |
///
/// # Examples
///
/// ```
/// use dv_variant::Qualifier;
///
/// assert!(Qualifier::Mutable.converts_to(Qualifier::Immutable));
/// assert!(!Qualifier::Immutable.converts_to(Qualifier::Mutable));
/// ```
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Qualifier {
    #[default]
    Mutable,
    Const,
    Immutable,
    Shared,
    SharedConst,
}

impl Qualifier {
    /// Every qualifier, in declaration order.
    pub const ALL: [Qualifier; 5] = [
        Self::Mutable,
        Self::Const,
        Self::Immutable,
        Self::Shared,
        Self::SharedConst,
    ];

    /// Returns `true` if a value bound with `self` may be viewed as `target`.
    pub const fn converts_to(self, target: Qualifier) -> bool {
        use Qualifier::*;
        matches!(
            (self, target),
            (Mutable, Mutable | Const | Immutable)
                | (Const, Const)
                | (Immutable, Immutable | Const | SharedConst)
                | (Shared, Shared | SharedConst)
                | (SharedConst, SharedConst)
        )
    }

    /// The qualifiers reachable from `self`.
    pub const fn targets(self) -> &'static [Qualifier] {
        use Qualifier::*;
        match self {
            Mutable => &[Mutable, Const, Immutable],
            Const => &[Const],
            Immutable => &[Immutable, Const, SharedConst],
            Shared => &[Shared, SharedConst],
            SharedConst => &[SharedConst],
        }
    }

    /// The read-only view of `self`, always reachable from `self`.
    #[inline]
    pub const fn read_only(self) -> Qualifier {
        match self {
            Self::Mutable | Self::Const | Self::Immutable => Self::Const,
            Self::Shared | Self::SharedConst => Self::SharedConst,
        }
    }

    /// The prefix used when rendering a qualified type, e.g. `"const "`.
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Mutable => "",
            Self::Const => "const ",
            Self::Immutable => "immutable ",
            Self::Shared => "shared ",
            Self::SharedConst => "shared const ",
        }
    }
}

impl fmt::Display for Qualifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mutable => f.pad("mutable"),
            Self::Const => f.pad("const"),
            Self::Immutable => f.pad("immutable"),
            Self::Shared => f.pad("shared"),
            Self::SharedConst => f.pad("shared const"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Qualifier;

    #[test]
    fn targets_agree_with_converts_to() {
        for from in Qualifier::ALL {
            for to in Qualifier::ALL {
                assert_eq!(from.converts_to(to), from.targets().contains(&to), "{from} -> {to}");
            }
        }
    }

    #[test]
    fn read_only_is_reachable() {
        for q in Qualifier::ALL {
            assert!(q.converts_to(q.read_only()));
            assert!(q.converts_to(q));
        }
    }

    #[test]
    fn qualifiers_are_never_stripped() {
        for q in Qualifier::ALL {
            if q != Qualifier::Mutable {
                assert!(!q.converts_to(Qualifier::Mutable));
            }
        }
        assert!(!Qualifier::Const.converts_to(Qualifier::Immutable));
        assert!(!Qualifier::Shared.converts_to(Qualifier::Const));
    }
}
