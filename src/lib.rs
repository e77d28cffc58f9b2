//! chain-collections: small owned containers built around singly linked
//! chains, with explicit and fallible growth.
//!
//! Internal Design:
//!
//! Summary
//! - Goal: a handful of general-purpose containers whose growth policy is
//!   visible and whose allocation failures surface as errors rather than
//!   aborts where the allocator lets us observe them.
//! - Pieces:
//!   - `Chain<T>`: owned singly linked list. Nodes have stable identity
//!     while linked and can be moved between chains without reallocating.
//!   - `Vector<T>`: growable buffer with a logical capacity that doubles on
//!     a full append and halves once a quarter full.
//!   - `Bitset`: fixed universe `0..=max`, MSB-first bytes, set algebra
//!     built on a copy of the larger-universe operand.
//!   - `HashMap<K, V, H>`: separate chaining over `Chain` buckets. Keys are
//!     hashed and compared only through a `KeyHasher` capability bound at
//!     construction.
//!   - `fnv`: the 32-bit FNV hash used by `Bitset::hash` and the default
//!     key hasher.
//!
//! Constraints
//! - Single-threaded: `HashMap` is `!Send`/`!Sync` (no atomics, no locks).
//! - Every container owns its contents; dropping it drops every element
//!   exactly once. Long chains drop iteratively.
//! - Buffer growth goes through `try_reserve_exact` and reports
//!   `Error::Alloc`. Per-node `Box` allocations and slot-map inserts use the
//!   global allocator and abort on exhaustion, like `std`.
//!
//! Hash map layout
//! - Entries live in a generational slot map; bucket chains hold slot keys.
//!   A `Handle` wraps one slot key and stops resolving once its entry is
//!   deleted or the map is cleared, even if the slot is reused.
//! - Each chain link stores its entry's 32-bit hash; relinking on growth
//!   never calls user code.
//! - Bucket index is `hash mod capacity`. Probing compares with the key
//!   capability's equality only.
//! - Growth runs before an insertion when the map has no buckets or more
//!   entries than buckets: first to the configured initial capacity (16 by
//!   default), then by doubling. `Growth::Rehash` relinks every entry;
//!   `Growth::InPlace` only appends empty buckets, which leaves entries
//!   whose index changed unreachable by key (still counted, iterated and
//!   dropped).
//! - `delete` never shrinks; `clear` drops the bucket array entirely.
//!
//! Reentrancy policy
//! - The map invokes user hash/equality code while a chain is being
//!   probed. A debug-only guard at the start of each such method panics on
//!   nested entry. Release builds carry no guard state.
//!
//! Notes and non-goals
//! - No thread-safe variants and no persistence.
//! - `Bitset` does not implement `std::hash::Hash`; its `hash()` covers the
//!   raw buffer, so sets with different universes hash differently even
//!   when `eql` holds.

pub mod bitset;
pub mod chain;
pub mod config;
pub mod error;
pub mod fnv;
pub mod hash_map;
mod hash_map_proptest;
pub mod key_hasher;
mod reentrancy;
pub mod vector;

// Public surface
pub use bitset::Bitset;
pub use chain::{Chain, Node, NodeId};
pub use config::{Growth, MapConfig};
pub use error::{Error, Result};
pub use hash_map::{Handle, HashMap, Kv};
pub use key_hasher::{BuildHasherKeys, Fnv1a, KeyHasher};
pub use vector::Vector;
