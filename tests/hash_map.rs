// HashMap integration suite.
//
// Each test documents the behavior being verified. Core invariants:
// - Uniqueness: at most one entry per key under the bound equality.
// - Replacement: put on an existing key swaps the value, len unchanged.
// - Growth: lazy first allocation, doubling afterwards; Rehash keeps keys
//   reachable.
// - Handles: resolve while the entry lives, never after delete/clear.
use chain_collections::{Bitset, Growth, HashMap, MapConfig};
use std::collections::BTreeMap;
use test_log::test;

// Test: clear followed by a batch of string keys.
// Verifies: fifteen distinct keys produce fifteen entries with their values.
#[test]
fn string_keys_after_clear() {
    let mut m: HashMap<String, u64> = HashMap::new();
    m.put("seed".to_string(), 0).unwrap();
    m.clear();
    assert_eq!(m.capacity(), 0);

    for i in 1..=15u64 {
        m.put(i.to_string(), i).unwrap();
    }
    assert_eq!(m.len(), 15);
    let seen: BTreeMap<String, u64> = m.iter().map(|(_, k, v)| (k.clone(), *v)).collect();
    assert_eq!(seen.len(), 15);
    for (k, v) in &seen {
        assert_eq!(k.parse::<u64>().unwrap(), *v);
        assert!((1..=15).contains(v));
    }
}

// Test: get_or_put mints an entry and the handle writes through kv_assign.
#[test]
fn get_or_put_and_assign_through_handle() {
    let mut m: HashMap<String, i32> = HashMap::new();
    let (h, existed) = m.get_or_put("counter".to_string()).unwrap();
    assert!(!existed);
    m.kv_assign(h, 1);
    for _ in 0..9 {
        let (h, existed) = m.get_or_put("counter".to_string()).unwrap();
        assert!(existed);
        *h.value_mut(&mut m).unwrap() += 1;
    }
    assert_eq!(m.get_value(&"counter".to_string()), Some(&10));
    assert_eq!(h.key(&m).map(String::as_str), Some("counter"));
}

// Test: entries survive repeated doubling with the default growth mode.
#[test]
fn many_entries_rehash() {
    let mut m: HashMap<u64, u64> = HashMap::new();
    for i in 0..10_000 {
        assert_eq!(m.put(i, i * i).unwrap(), None);
    }
    assert_eq!(m.len(), 10_000);
    assert!(m.capacity() >= 5_000);
    for i in (0..10_000).step_by(7) {
        assert_eq!(m.get_value(&i), Some(&(i * i)));
    }
    for i in 0..5_000 {
        assert_eq!(m.delete(&i), Some((i, i * i)));
    }
    assert_eq!(m.len(), 5_000);
    assert!(m.iter().all(|(_, k, _)| *k >= 5_000));
}

// Test: in-place growth keeps every entry owned even when it cannot be found.
// Verifies: len and iteration count agree; delete of a stranded key misses.
#[test]
fn in_place_growth_keeps_entries_owned() {
    let mut m = HashMap::with_config(
        (
            (|k: &u32| *k) as fn(&u32) -> u32,
            (|a: &u32, b: &u32| a == b) as fn(&u32, &u32) -> bool,
        ),
        MapConfig::new()
            .with_growth(Growth::InPlace)
            .with_initial_capacity(4),
    );
    for k in 0..6u32 {
        m.put(k, ()).unwrap();
    }
    assert_eq!(m.capacity(), 8);
    // 4 was linked into bucket 0 of 4 and now hashes to bucket 4 of 8.
    assert!(!m.has(&4));
    assert_eq!(m.delete(&4), None);
    assert_eq!(m.len(), 6);
    assert_eq!(m.iter().count(), 6);
}

// Test: Bitset keys bound through their own hash and equality.
// Verifies: sets that are `eql` and share a universe find each other.
#[test]
fn bitset_keys() {
    type Keys = (fn(&Bitset) -> u32, fn(&Bitset, &Bitset) -> bool);
    let keys: Keys = (Bitset::hash, Bitset::eql);
    let mut m: HashMap<Bitset, &'static str, Keys> = HashMap::with_hasher(keys);

    let mut a = Bitset::new(31).unwrap();
    a.incl(3).unwrap();
    a.incl(30).unwrap();
    m.put(a, "a").unwrap();

    let mut probe = Bitset::new(31).unwrap();
    probe.incl(30).unwrap();
    assert!(!m.has(&probe));
    probe.incl(3).unwrap();
    assert_eq!(m.get_value(&probe), Some(&"a"));
}

// Test: Debug renders entries as a map.
#[test]
fn debug_lists_entries() {
    let mut m: HashMap<u8, u8> = HashMap::new();
    m.put(1, 2).unwrap();
    assert_eq!(format!("{m:?}"), "{1: 2}");
}
