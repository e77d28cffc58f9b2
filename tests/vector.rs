use chain_collections::{Error, Vector};
use test_log::test;

// Test: front insertions, clone and swap-delete on one vector.
// Verifies: order after 50 front inserts, clone length, O(1) delete moves
// the last element into the hole.
#[test]
fn front_inserts_clone_and_swap_delete() {
    let mut v: Vector<i32> = Vector::new().unwrap();
    v.append(-1).unwrap();
    for i in 0..50 {
        v.insert(0, i).unwrap();
    }
    assert_eq!(v.len(), 51);
    assert_eq!(v.get(0), Some(&49));
    assert_eq!(v.get(49), Some(&0));
    assert_eq!(v.get(50), Some(&-1));

    let copy = v.try_clone().unwrap();
    assert_eq!(copy.len(), 51);
    assert_eq!(copy.capacity(), 102);
    assert_eq!(copy.as_slice(), v.as_slice());

    assert_eq!(v.swap_delete(0).unwrap(), 49);
    assert_eq!(v.get(0), Some(&-1));
    assert_eq!(v.len(), 50);
    assert_eq!(v.find(&48), Some(1));
    assert!(!v.contains(&49));
    assert!(copy.contains(&49));
}

// Test: out-of-range mutations report the index and leave the vector intact.
#[test]
fn bad_indices_are_errors() {
    let mut v = Vector::new().unwrap();
    v.append("x").unwrap();
    assert!(matches!(
        v.assign(3, "y"),
        Err(Error::OutOfBounds { index: 3, len: 1 })
    ));
    assert!(matches!(v.delete(1), Err(Error::OutOfBounds { .. })));
    assert!(matches!(v.swap_delete(1), Err(Error::OutOfBounds { .. })));
    assert!(matches!(v.insert(2, "z"), Err(Error::OutOfBounds { .. })));
    assert_eq!(v.get(5), None);
    assert_eq!(v.as_slice(), &["x"]);

    v.insert(1, "z").unwrap();
    assert_eq!(v.assign(0, "w").unwrap(), "x");
    assert_eq!(v.as_slice(), &["w", "z"]);
}

// Test: draining by deletes walks the capacity back down without losing data.
#[test]
fn deletes_shrink_but_keep_contents() {
    let mut v = Vector::new().unwrap();
    for i in 0..64 {
        v.append(i).unwrap();
    }
    assert_eq!(v.capacity(), 64);
    while v.len() > 1 {
        let last = v.len() - 1;
        v.delete(last).unwrap();
        assert!(v.len() <= v.capacity());
        assert_eq!(v.as_slice(), (0..v.len() as i32).collect::<Vec<_>>().as_slice());
    }
    assert!(v.capacity() < 64);
}

// Test: N appends followed by N deletes at the front leave an empty vector.
#[test]
fn appends_then_front_deletes_empty_the_vector() {
    let mut v = Vector::new().unwrap();
    for i in 0..100u32 {
        v.append(i).unwrap();
    }
    for i in 0..100u32 {
        assert_eq!(v.delete(0).unwrap(), i);
    }
    assert!(v.is_empty());
    assert_eq!(v.len(), 0);
    assert_eq!(v.get(0), None);
}
