//! HashMap: separate chaining over [`Chain`] buckets with explicit growth.
//!
//! Entries live in a generational slot map; each bucket chain holds the
//! slot keys of the entries whose hash reduces to that bucket. A
//! [`Handle`] names one entry and stops resolving once the entry is
//! deleted or the map is cleared.
//!
//! Growth happens before an insertion when the map has no buckets or holds
//! more entries than buckets: the bucket count goes to the configured
//! initial capacity, then doubles. See [`Growth`] for what happens to
//! entries already linked.

use crate::chain::{Chain, Node};
use crate::config::{Growth, MapConfig};
use crate::error::Result;
use crate::key_hasher::{Fnv1a, KeyHasher};
use crate::reentrancy::ReentrancyCheck;
use core::fmt;
use core::hash::Hash;
use slotmap::{DefaultKey, SlotMap};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Handle(DefaultKey);

impl Handle {
    pub fn key<'a, K, V, H>(&self, map: &'a HashMap<K, V, H>) -> Option<&'a K> {
        map.table.slots.get(self.0).map(|kv| &kv.key)
    }

    pub fn value<'a, K, V, H>(&self, map: &'a HashMap<K, V, H>) -> Option<&'a V> {
        map.table.slots.get(self.0).map(|kv| &kv.value)
    }

    pub fn value_mut<'a, K, V, H>(&self, map: &'a mut HashMap<K, V, H>) -> Option<&'a mut V> {
        map.table.slots.get_mut(self.0).map(|kv| &mut kv.value)
    }
}

/// A key/value pair owned by the map.
#[derive(Debug)]
pub struct Kv<K, V> {
    key: K,
    value: V,
}

impl<K, V> Kv<K, V> {
    pub fn key(&self) -> &K {
        &self.key
    }

    pub fn value(&self) -> &V {
        &self.value
    }

    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
}

/// Chain payload: an entry's slot and the hash computed at insertion.
/// Relinking on growth reads the stored hash and never calls user code.
#[derive(Clone, Copy, Debug)]
struct Link {
    slot: DefaultKey,
    hash: u32,
}

/// Bucket array plus entry storage. Never calls user code on its own;
/// lookups take the key capability as an argument.
struct Table<K, V> {
    buckets: Vec<Chain<Link>>,
    slots: SlotMap<DefaultKey, Kv<K, V>>,
}

impl<K, V> Table<K, V> {
    fn new() -> Self {
        Self {
            buckets: Vec::new(),
            slots: SlotMap::with_key(),
        }
    }

    #[inline]
    fn bucket_index(&self, hash: u32) -> usize {
        hash as usize % self.buckets.len()
    }

    fn lookup<H: KeyHasher<K>>(&self, hasher: &H, hash: u32, key: &K) -> Option<DefaultKey> {
        if self.buckets.is_empty() {
            return None;
        }
        self.buckets[self.bucket_index(hash)]
            .find(|link| {
                self.slots
                    .get(link.slot)
                    .is_some_and(|kv| hasher.eql(key, &kv.key))
            })
            .map(|node| node.payload().slot)
    }

    fn ensure_capacity(&mut self, config: &MapConfig) -> Result<()> {
        let capacity = self.buckets.len();
        if capacity > 0 && self.slots.len() <= capacity {
            return Ok(());
        }
        let new_capacity = match capacity {
            0 => config.initial_capacity,
            n => n.saturating_mul(2),
        };
        log::debug!(
            "growing map buckets {capacity} -> {new_capacity} ({:?}, {} entries)",
            config.growth,
            self.slots.len()
        );
        match config.growth {
            Growth::InPlace => self.grow_in_place(new_capacity),
            Growth::Rehash => self.rehash(new_capacity),
        }
    }

    fn grow_in_place(&mut self, new_capacity: usize) -> Result<()> {
        let additional = new_capacity - self.buckets.len();
        self.buckets.try_reserve_exact(additional)?;
        self.buckets.resize_with(new_capacity, Chain::new);
        Ok(())
    }

    fn rehash(&mut self, new_capacity: usize) -> Result<()> {
        let mut buckets: Vec<Chain<Link>> = Vec::new();
        buckets.try_reserve_exact(new_capacity)?;
        buckets.resize_with(new_capacity, Chain::new);

        let mut moved = 0usize;
        for mut chain in std::mem::take(&mut self.buckets) {
            while let Some(node) = chain.pop_front_node() {
                let idx = node.payload().hash as usize % new_capacity;
                buckets[idx].push_front_node(node);
                moved += 1;
            }
        }
        log::trace!("relinked {moved} entries into {new_capacity} buckets");
        self.buckets = buckets;
        Ok(())
    }

    /// Stores a new entry and prepends it to its bucket. Buckets must exist.
    fn link(&mut self, hash: u32, key: K, value: V) -> DefaultKey {
        let slot = self.slots.insert(Kv { key, value });
        let idx = self.bucket_index(hash);
        self.buckets[idx].push_front(Link { slot, hash });
        slot
    }

    fn unlink<H: KeyHasher<K>>(&mut self, hasher: &H, hash: u32, key: &K) -> Option<Kv<K, V>> {
        if self.buckets.is_empty() {
            return None;
        }
        let idx = self.bucket_index(hash);
        let slots = &self.slots;
        let link = self.buckets[idx].remove_first(|node| {
            slots
                .get(node.payload().slot)
                .is_some_and(|kv| hasher.eql(key, &kv.key))
        })?;
        self.slots.remove(link.slot)
    }

    fn clear(&mut self) {
        self.buckets = Vec::new();
        self.slots.clear();
    }
}

pub struct HashMap<K, V, H = Fnv1a> {
    hasher: H,
    config: MapConfig,
    table: Table<K, V>,
    reentrancy: ReentrancyCheck,
}

impl<K, V> HashMap<K, V>
where
    K: Hash + Eq,
{
    /// Empty map hashing keys with FNV; no buckets are allocated yet.
    pub fn new() -> Self {
        Self::with_hasher(Fnv1a)
    }
}

impl<K, V> Default for HashMap<K, V>
where
    K: Hash + Eq,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<K, V, H> HashMap<K, V, H>
where
    H: KeyHasher<K>,
{
    pub fn with_hasher(hasher: H) -> Self {
        Self::with_config(hasher, MapConfig::default())
    }

    pub fn with_config(hasher: H, config: MapConfig) -> Self {
        Self {
            hasher,
            config,
            table: Table::new(),
            reentrancy: ReentrancyCheck::new(),
        }
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.table.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.table.slots.is_empty()
    }

    /// Number of buckets.
    pub fn capacity(&self) -> usize {
        self.table.buckets.len()
    }

    pub fn config(&self) -> &MapConfig {
        &self.config
    }

    pub fn hasher(&self) -> &H {
        &self.hasher
    }

    pub fn find(&self, key: &K) -> Option<Handle> {
        let _g = self.reentrancy.enter("find");
        if self.table.slots.is_empty() {
            return None;
        }
        let hash = self.hasher.hash(key);
        self.table.lookup(&self.hasher, hash, key).map(Handle)
    }

    pub fn get(&self, key: &K) -> Option<&Kv<K, V>> {
        let h = self.find(key)?;
        self.table.slots.get(h.0)
    }

    pub fn get_value(&self, key: &K) -> Option<&V> {
        self.get(key).map(Kv::value)
    }

    pub fn get_value_mut(&mut self, key: &K) -> Option<&mut V> {
        let h = self.find(key)?;
        self.table.slots.get_mut(h.0).map(Kv::value_mut)
    }

    pub fn has(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Inserts or replaces. Returns the replaced value, if any.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`](crate::Error::Alloc) when the bucket array
    /// cannot grow; the map is left unchanged.
    pub fn put(&mut self, key: K, value: V) -> Result<Option<V>> {
        let _g = self.reentrancy.enter("put");
        self.table.ensure_capacity(&self.config)?;
        let hash = self.hasher.hash(&key);
        let existing = self
            .table
            .lookup(&self.hasher, hash, &key)
            .and_then(|slot| self.table.slots.get_mut(slot));
        if let Some(kv) = existing {
            return Ok(Some(std::mem::replace(&mut kv.value, value)));
        }
        self.table.link(hash, key, value);
        Ok(None)
    }

    /// Returns the entry for `key`, inserting one with `V::default()` if
    /// absent. The flag is `true` when the entry already existed.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`](crate::Error::Alloc) when inserting
    /// requires growth and growth fails.
    pub fn get_or_put(&mut self, key: K) -> Result<(Handle, bool)>
    where
        V: Default,
    {
        self.get_or_put_with(key, V::default)
    }

    /// Like [`get_or_put`](Self::get_or_put); `default` only runs when a
    /// new entry is inserted.
    ///
    /// # Errors
    /// Returns [`Error::Alloc`](crate::Error::Alloc) when inserting
    /// requires growth and growth fails.
    pub fn get_or_put_with<F>(&mut self, key: K, default: F) -> Result<(Handle, bool)>
    where
        F: FnOnce() -> V,
    {
        let _g = self.reentrancy.enter("get_or_put");
        let hash = self.hasher.hash(&key);
        if let Some(slot) = self.table.lookup(&self.hasher, hash, &key) {
            return Ok((Handle(slot), true));
        }
        self.table.ensure_capacity(&self.config)?;
        let slot = self.table.link(hash, key, default());
        Ok((Handle(slot), false))
    }

    /// Overwrites the value behind `handle` and returns the previous one.
    /// Returns `None` (dropping `value`) when the handle no longer resolves.
    pub fn kv_assign(&mut self, handle: Handle, value: V) -> Option<V> {
        self.table
            .slots
            .get_mut(handle.0)
            .map(|kv| std::mem::replace(&mut kv.value, value))
    }

    /// Removes `key`, returning the owned pair. Capacity is kept.
    pub fn delete(&mut self, key: &K) -> Option<(K, V)> {
        let _g = self.reentrancy.enter("delete");
        if self.table.slots.is_empty() {
            return None;
        }
        let hash = self.hasher.hash(key);
        self.table
            .unlink(&self.hasher, hash, key)
            .map(|kv| (kv.key, kv.value))
    }

    /// Drops every entry and the bucket array; capacity returns to zero.
    pub fn clear(&mut self) {
        let _g = self.reentrancy.enter("clear");
        log::debug!(
            "clearing map: {} entries, {} buckets",
            self.table.slots.len(),
            self.table.buckets.len()
        );
        self.table.clear();
    }
}

impl<K, V, H> HashMap<K, V, H> {
    /// Walks buckets in index order and each chain head to tail.
    pub fn iter(&self) -> Iter<'_, K, V> {
        Iter {
            table: &self.table,
            bucket_idx: 0,
            node: None,
            remaining: self.table.slots.len(),
        }
    }

    /// Mutable access to every value, in storage order.
    pub fn iter_mut(&mut self) -> IterMut<'_, K, V> {
        IterMut {
            it: self.table.slots.iter_mut(),
        }
    }
}

impl<K: fmt::Debug, V: fmt::Debug, H> fmt::Debug for HashMap<K, V, H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map()
            .entries(self.iter().map(|(_, k, v)| (k, v)))
            .finish()
    }
}

/// Bucket cursor over entries.
pub struct Iter<'a, K, V> {
    table: &'a Table<K, V>,
    // Next bucket to open.
    bucket_idx: usize,
    node: Option<&'a Node<Link>>,
    remaining: usize,
}

impl<'a, K, V> Iterator for Iter<'a, K, V> {
    type Item = (Handle, &'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next();
                let slot = node.payload().slot;
                if let Some(kv) = self.table.slots.get(slot) {
                    self.remaining = self.remaining.saturating_sub(1);
                    return Some((Handle(slot), &kv.key, &kv.value));
                }
                continue;
            }
            let bucket = self.table.buckets.get(self.bucket_idx)?;
            self.bucket_idx += 1;
            self.node = bucket.first();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<K, V> ExactSizeIterator for Iter<'_, K, V> {}

impl<'a, K, V, H> IntoIterator for &'a HashMap<K, V, H> {
    type Item = (Handle, &'a K, &'a V);
    type IntoIter = Iter<'a, K, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over mutable entries.
pub struct IterMut<'a, K, V> {
    it: slotmap::basic::IterMut<'a, DefaultKey, Kv<K, V>>,
}

impl<'a, K, V> Iterator for IterMut<'a, K, V> {
    type Item = (Handle, &'a K, &'a mut V);

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.it
            .next()
            .map(|(slot, kv)| (Handle(slot), &kv.key, &mut kv.value))
    }
}
