//! Hash states used by the `dv` crates.
//!
//! - [`FixedHashState`]: seeded *foldhash*, so name indices hash the same
//!   way in every process.
//! - [`IdentityHashState`]: hands a precomputed `u64` straight through.
//!   Type ids already carry one.

use core::hash::{BuildHasher, Hasher};

use foldhash::fast::{FixedState, FoldHasher};

// -----------------------------------------------------------------------------
// FixedHashState

const SEED: u64 = 0x5D1C_A77E_0B1E_C7D5;

/// The hasher built by [`FixedHashState`].
pub type FixedHasher = FoldHasher<'static>;

/// A *foldhash* state with a constant seed.
///
/// Used for the type path and type name indices of a registry,
/// which are keyed by `&'static str`.
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use dv_utils::hash::FixedHashState;
///
/// assert_eq!(FixedHashState.hash_one("i32"), FixedHashState.hash_one("i32"));
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct FixedHashState;

impl BuildHasher for FixedHashState {
    type Hasher = FixedHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        FixedState::with_seed(SEED).build_hasher()
    }
}

// -----------------------------------------------------------------------------
// IdentityHashState

/// Keeps the last `u64` written to it as the hash.
///
/// Byte writes are folded in so that keys hashing through
/// [`Hasher::write`] still spread.
#[derive(Copy, Clone, Default, Debug)]
pub struct IdentityHasher {
    hash: u64,
}

impl Hasher for IdentityHasher {
    #[inline]
    fn finish(&self) -> u64 {
        self.hash
    }

    fn write(&mut self, bytes: &[u8]) {
        self.hash = bytes
            .iter()
            .rev()
            .fold(self.hash, |hash, byte| hash.rotate_left(8) ^ u64::from(*byte));
    }

    #[inline]
    fn write_u64(&mut self, i: u64) {
        self.hash = i;
    }
}

/// Builds [`IdentityHasher`]s; the state of [`TypeIdMap`](crate::TypeIdMap).
///
/// # Examples
///
/// ```
/// use core::hash::BuildHasher;
/// use dv_utils::hash::IdentityHashState;
///
/// assert_eq!(IdentityHashState.hash_one(42_u64), 42);
/// ```
#[derive(Copy, Clone, Default, Debug)]
pub struct IdentityHashState;

impl BuildHasher for IdentityHashState {
    type Hasher = IdentityHasher;

    #[inline(always)]
    fn build_hasher(&self) -> Self::Hasher {
        IdentityHasher::default()
    }
}
