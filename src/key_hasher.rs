//! Key capability: the hash and equality functions a map is bound to.

use crate::fnv::FnvHasher;
use core::hash::{BuildHasher, Hash, Hasher};

/// Hash and equality over keys of type `K`.
///
/// Keys that are `eql` must hash equal; bucket placement relies on it.
/// `eql` must be an equivalence relation.
pub trait KeyHasher<K: ?Sized> {
    fn hash(&self, key: &K) -> u32;
    fn eql(&self, a: &K, b: &K) -> bool;
}

/// Feeds `K: Hash` through [`FnvHasher`] and compares with `Eq`.
#[derive(Clone, Copy, Debug, Default)]
pub struct Fnv1a;

impl<K: ?Sized + Hash + Eq> KeyHasher<K> for Fnv1a {
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        let mut h = FnvHasher::default();
        key.hash(&mut h);
        h.state()
    }

    #[inline]
    fn eql(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// Adapts any [`BuildHasher`]; the 64-bit hash is truncated to 32 bits.
#[derive(Clone, Copy, Debug, Default)]
pub struct BuildHasherKeys<S>(pub S);

impl<K, S> KeyHasher<K> for BuildHasherKeys<S>
where
    K: ?Sized + Hash + Eq,
    S: BuildHasher,
{
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        let mut h = self.0.build_hasher();
        key.hash(&mut h);
        h.finish() as u32
    }

    #[inline]
    fn eql(&self, a: &K, b: &K) -> bool {
        a == b
    }
}

/// A `(hash, eql)` pair of plain functions or closures.
impl<K, H, E> KeyHasher<K> for (H, E)
where
    K: ?Sized,
    H: Fn(&K) -> u32,
    E: Fn(&K, &K) -> bool,
{
    #[inline]
    fn hash(&self, key: &K) -> u32 {
        (self.0)(key)
    }

    #[inline]
    fn eql(&self, a: &K, b: &K) -> bool {
        (self.1)(a, b)
    }
}
