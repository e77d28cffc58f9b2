//! 32-bit Fowler–Noll–Vo hashing.
//!
//! The fold multiplies by the prime before mixing in each byte. Stored
//! hashes produced by earlier versions of this library depend on that
//! order, so it must not be swapped.

use core::hash::{BuildHasher, Hasher};

/// FNV 32-bit prime.
pub const PRIME_32: u32 = 16_777_619;

/// FNV 32-bit offset basis.
pub const OFFSET_32: u32 = 2_166_136_261;

/// Returns the initial hash state.
#[inline]
pub const fn init() -> u32 {
    OFFSET_32
}

/// Folds `bytes` into `state` and returns the new state.
#[inline]
pub fn update(state: u32, bytes: &[u8]) -> u32 {
    bytes
        .iter()
        .fold(state, |s, &b| s.wrapping_mul(PRIME_32) ^ u32::from(b))
}

/// Hashes `bytes` from a fresh state.
#[inline]
pub fn hash(bytes: &[u8]) -> u32 {
    update(init(), bytes)
}

/// `core::hash::Hasher` adapter over the 32-bit fold.
///
/// `finish` zero-extends the 32-bit state, so truncating the result back
/// to `u32` is lossless.
#[derive(Clone, Copy, Debug)]
pub struct FnvHasher(u32);

impl FnvHasher {
    pub fn state(&self) -> u32 {
        self.0
    }
}

impl Default for FnvHasher {
    fn default() -> Self {
        Self(init())
    }
}

impl Hasher for FnvHasher {
    #[inline]
    fn write(&mut self, bytes: &[u8]) {
        self.0 = update(self.0, bytes);
    }

    #[inline]
    fn finish(&self) -> u64 {
        u64::from(self.0)
    }
}

/// Builds fresh [`FnvHasher`]s.
#[derive(Clone, Copy, Debug, Default)]
pub struct FnvBuildHasher;

impl BuildHasher for FnvBuildHasher {
    type Hasher = FnvHasher;

    fn build_hasher(&self) -> Self::Hasher {
        FnvHasher::default()
    }
}
