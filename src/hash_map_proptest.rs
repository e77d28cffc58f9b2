#![cfg(test)]

// Property tests for HashMap kept inside the crate so the runner can use
// crate-private helpers.

use crate::config::MapConfig;
use crate::hash_map::{Handle, HashMap};
use crate::key_hasher::{BuildHasherKeys, Fnv1a, KeyHasher};
use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use std::cell::Cell;
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{BuildHasher, Hasher};
use std::rc::Rc;

type Model = hashbrown::HashMap<Key, i32>;

#[derive(Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
struct Key(String);
impl fmt::Debug for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    GetOrPut(usize, i32),
    Delete(usize),
    Find(usize),
    Has(String),
    Assign(usize, i32),
    Mutate(usize, i32),
    Iterate,
    Clear,
}

fn key_from(pool: &[String], i: usize) -> Key {
    Key(pool[i].clone())
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,5}", 1..=40).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let has_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            6 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::GetOrPut(i, v)),
            3 => idx.clone().prop_map(OpI::Delete),
            2 => idx.clone().prop_map(OpI::Find),
            2 => prop_oneof![has_pool, "[a-z]{0,5}"].prop_map(OpI::Has),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Assign(i, v)),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
            1 => Just(OpI::Clear),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Runs `ops` against `sut` and a hashbrown model in lockstep.
// Invariants exercised across random operation sequences:
// - `put` replaces and returns the previous value exactly when the model has the key.
// - `get_or_put_with` reports existence and runs its default only on insertion.
// - `delete` returns the owned pair matching the model and invalidates its handle.
// - Handles of live entries stay stable across growth.
// - `iter` yields each live entry exactly once with the model's values.
// - Stale handles never resolve; `len`/`is_empty` parity after each op.
fn run_state_machine<H: KeyHasher<Key>>(
    mut sut: HashMap<Key, i32, H>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model = Model::new();
    let mut live: hashbrown::HashMap<Key, Handle> = hashbrown::HashMap::new();
    let mut stale: Vec<Handle> = Vec::new();
    let default_calls = Rc::new(Cell::new(0));

    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = key_from(pool, i);
                let prev = sut.put(k.clone(), v).expect("small map must allocate");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
                let h = sut.find(&k).expect("put key must be found");
                if let Some(&lh) = live.get(&k) {
                    prop_assert_eq!(h, lh, "replacing keeps the handle");
                }
                live.insert(k, h);
            }
            OpI::GetOrPut(i, v) => {
                let k = key_from(pool, i);
                let already = model.contains_key(&k);
                let counter = default_calls.clone();
                let before = counter.get();
                let (h, existed) = sut
                    .get_or_put_with(k.clone(), move || {
                        counter.set(counter.get() + 1);
                        v
                    })
                    .expect("small map must allocate");
                prop_assert_eq!(existed, already);
                if existed {
                    prop_assert_eq!(default_calls.get(), before, "default must not run on hit");
                    prop_assert_eq!(Some(&h), live.get(&k));
                } else {
                    prop_assert_eq!(default_calls.get(), before + 1, "default must run once on miss");
                    model.insert(k.clone(), v);
                    live.insert(k, h);
                }
            }
            OpI::Delete(i) => {
                let k = key_from(pool, i);
                let got = sut.delete(&k);
                match model.remove(&k) {
                    Some(mv) => {
                        let (kk, vv) = got.expect("model key must delete");
                        prop_assert!(kk == k);
                        prop_assert_eq!(vv, mv);
                        stale.push(live.remove(&k).expect("tracked live handle present"));
                    }
                    None => prop_assert!(got.is_none()),
                }
                prop_assert!(!sut.has(&k));
            }
            OpI::Find(i) => {
                let k = key_from(pool, i);
                let s = sut.find(&k);
                prop_assert_eq!(s.is_some(), model.contains_key(&k));
                if let Some(h) = s {
                    prop_assert_eq!(Some(&h), live.get(&k));
                    prop_assert_eq!(h.value(&sut), model.get(&k));
                }
            }
            OpI::Has(s) => {
                let k = Key(s);
                prop_assert_eq!(sut.has(&k), model.contains_key(&k));
            }
            OpI::Assign(i, v) => {
                let k = key_from(pool, i);
                if let Some(&h) = live.get(&k) {
                    let prev = sut.kv_assign(h, v);
                    prop_assert_eq!(prev, model.insert(k, v));
                }
            }
            OpI::Mutate(i, d) => {
                let k = key_from(pool, i);
                if let Some(&h) = live.get(&k) {
                    if let Some(vr) = h.value_mut(&mut sut) {
                        *vr = vr.saturating_add(d);
                        if let Some(mv) = model.get_mut(&k) {
                            *mv = mv.saturating_add(d);
                        }
                    } else {
                        prop_assert!(false, "live handle should resolve");
                    }
                }
            }
            OpI::Iterate => {
                let s_items: BTreeSet<_> = sut.iter().map(|(_, k, v)| (k.clone(), *v)).collect();
                let m_items: BTreeSet<_> = model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(sut.iter().count(), model.len());
                prop_assert_eq!(s_items, m_items);
            }
            OpI::Clear => {
                sut.clear();
                model.clear();
                stale.extend(live.drain().map(|(_, h)| h));
                prop_assert_eq!(sut.capacity(), 0);
            }
        }

        for &h in &stale {
            prop_assert!(h.value(&sut).is_none());
        }
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.capacity() == 0 || sut.len() <= 2 * sut.capacity());
    }
    Ok(())
}

// Property: state-machine equivalence with the default FNV key hasher.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        run_state_machine(HashMap::with_hasher(Fnv1a), &pool, ops)?;
    }
}

// Property: same invariants with one initial bucket, so nearly every
// insertion crosses a growth boundary.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_frequent_growth((pool, ops) in arb_scenario()) {
        let config = MapConfig::new().with_initial_capacity(1);
        run_state_machine(HashMap::with_config(Fnv1a, config), &pool, ops)?;
    }
}

// Property: same invariants through a std-style BuildHasher.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_build_hasher((pool, ops) in arb_scenario()) {
        let keys = BuildHasherKeys(hashbrown::hash_map::DefaultHashBuilder::default());
        run_state_machine(HashMap::with_hasher(keys), &pool, ops)?;
    }
}

// Collision variant using a constant hasher to stress equality resolution.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

// Property: same invariants under worst-case collisions. Every entry shares
// bucket 0, so deletes unlink from the middle and tail of one long chain.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        run_state_machine(HashMap::with_hasher(BuildHasherKeys(ConstBuildHasher)), &pool, ops)?;
    }
}
