use core::fmt;

use crate::{VariantError, VariantResult};

/// The arity of a callable: a number of required parameters,
/// optionally followed by a variadic tail.
///
/// # Examples
///
/// ```
/// use dv_variant::call::Signature;
///
/// let sig = Signature::from_params(&[false, true]);
/// assert!(sig.is_variadic());
/// assert!(sig.accepts(1) && sig.accepts(4));
/// assert!(!sig.accepts(0));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Signature {
    required: usize,
    variadic: bool,
}

impl Signature {
    #[inline]
    pub const fn fixed(required: usize) -> Self {
        Self {
            required,
            variadic: false,
        }
    }

    #[inline]
    pub const fn variadic(required: usize) -> Self {
        Self {
            required,
            variadic: true,
        }
    }

    /// Builds a signature from per-parameter variadic flags.
    ///
    /// Only a trailing variadic parameter receives surplus arguments.
    pub const fn from_params(variadic_flags: &[bool]) -> Self {
        let mut required = 0;
        let mut variadic = false;
        let mut i = 0;
        while i < variadic_flags.len() {
            if variadic_flags[i] {
                variadic = true;
            } else {
                required += 1;
            }
            i += 1;
        }
        Self { required, variadic }
    }

    #[inline(always)]
    pub const fn required(&self) -> usize {
        self.required
    }

    #[inline(always)]
    pub const fn is_variadic(&self) -> bool {
        self.variadic
    }

    #[inline]
    pub const fn accepts(&self, found: usize) -> bool {
        if self.variadic {
            found >= self.required
        } else {
            found == self.required
        }
    }

    /// Fails with [`VariantError::ArgumentCount`] unless `found` arguments fit.
    pub fn check(&self, found: usize) -> VariantResult<()> {
        if self.accepts(found) {
            Ok(())
        } else {
            Err(VariantError::ArgumentCount {
                expected: self.required,
                variadic: self.variadic,
                found,
            })
        }
    }
}

impl fmt::Display for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.variadic {
            true => write!(f, "({}+)", self.required),
            false => write!(f, "({})", self.required),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::Signature;
    use crate::VariantError;

    #[test]
    fn fixed_arity() {
        let sig = Signature::fixed(2);
        assert!(sig.check(2).is_ok());
        assert_eq!(
            sig.check(3),
            Err(VariantError::ArgumentCount {
                expected: 2,
                variadic: false,
                found: 3
            })
        );
    }

    #[test]
    fn variadic_tail() {
        let sig = Signature::from_params(&[false, false, true]);
        assert_eq!(sig, Signature::variadic(2));
        assert!(sig.check(2).is_ok());
        assert!(sig.check(7).is_ok());
        assert!(sig.check(1).is_err());
        assert_eq!(Signature::from_params(&[]), Signature::fixed(0));
    }
}
