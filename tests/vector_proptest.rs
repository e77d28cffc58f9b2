// Property test for Vector against a std Vec model.
use chain_collections::Vector;
use proptest::prelude::*;

#[derive(Clone, Debug)]
enum Op {
    Append(i16),
    Insert(usize, i16),
    Delete(usize),
    SwapDelete(usize),
    Assign(usize, i16),
    Clear,
}

fn arb_op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => any::<i16>().prop_map(Op::Append),
        2 => (0usize..80, any::<i16>()).prop_map(|(i, v)| Op::Insert(i, v)),
        3 => (0usize..80).prop_map(Op::Delete),
        2 => (0usize..80).prop_map(Op::SwapDelete),
        1 => (0usize..80, any::<i16>()).prop_map(|(i, v)| Op::Assign(i, v)),
        1 => Just(Op::Clear),
    ]
}

// Property: contents match the model after each op; out-of-range ops fail
// without side effects; capacity never drops below len.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_vector_matches_vec(ops in proptest::collection::vec(arb_op(), 1..200)) {
        let mut sut = Vector::new().unwrap();
        let mut model: Vec<i16> = Vec::new();
        for op in ops {
            match op {
                Op::Append(v) => {
                    sut.append(v).unwrap();
                    model.push(v);
                }
                Op::Insert(i, v) => {
                    let res = sut.insert(i, v);
                    prop_assert_eq!(res.is_ok(), i <= model.len());
                    if i <= model.len() {
                        model.insert(i, v);
                    }
                }
                Op::Delete(i) => match sut.delete(i) {
                    Ok(got) => prop_assert_eq!(got, model.remove(i)),
                    Err(_) => prop_assert!(i >= model.len()),
                },
                Op::SwapDelete(i) => match sut.swap_delete(i) {
                    Ok(got) => prop_assert_eq!(got, model.swap_remove(i)),
                    Err(_) => prop_assert!(i >= model.len()),
                },
                Op::Assign(i, v) => match sut.assign(i, v) {
                    Ok(prev) => prop_assert_eq!(prev, std::mem::replace(&mut model[i], v)),
                    Err(_) => prop_assert!(i >= model.len()),
                },
                Op::Clear => {
                    sut.clear();
                    model.clear();
                }
            }
            prop_assert_eq!(sut.as_slice(), model.as_slice());
            prop_assert!(sut.len() <= sut.capacity());
        }
    }
}
