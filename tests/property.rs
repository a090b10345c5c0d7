//! Randomized comparisons of both trees against straightforward oracles.

use std::collections::BTreeMap;
use std::ops::Bound;

use proptest::prelude::*;
use rb_index::{Error, Interval, IntervalIndex, OrderedMap};

#[derive(Debug, Clone)]
enum Op {
    Upsert(i16, i32),
    Delete(i16),
    Search(i16),
}

fn operations(max_ops: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(
        prop_oneof![
            (any::<i16>(), any::<i32>()).prop_map(|(k, v)| Op::Upsert(k, v)),
            any::<i16>().prop_map(Op::Delete),
            any::<i16>().prop_map(Op::Search),
        ],
        0..max_ops,
    )
}

fn interval() -> impl Strategy<Value = Interval<i32>> {
    (0..500i32, 0..40i32).prop_map(|(low, len)| Interval::new(low, low + len).unwrap())
}

/// `2 * log2(n + 1)`, the red-black bound on the number of nodes in a path.
fn height_bound(n: usize) -> isize {
    let mut bits = 0;
    while (1usize << bits) < n + 1 {
        bits += 1;
    }
    2 * bits
}

proptest! {
    #[test]
    fn ordered_map_matches_btreemap(ops in operations(400)) {
        let mut map = OrderedMap::new();
        let mut oracle = BTreeMap::new();
        for op in ops {
            match op {
                Op::Upsert(k, v) => prop_assert_eq!(map.upsert(k, v), oracle.insert(k, v)),
                Op::Delete(k) => prop_assert_eq!(map.delete(&k), oracle.remove(&k)),
                Op::Search(k) => prop_assert_eq!(map.search(&k).ok(), oracle.get(&k)),
            }
        }
        prop_assert_eq!(map.len(), oracle.len());
        let got: Vec<_> = map.in_order();
        let want: Vec<_> = oracle.iter().collect();
        prop_assert_eq!(got, want);
        prop_assert_eq!(map.min().ok(), oracle.iter().next());
        prop_assert_eq!(map.max().ok(), oracle.iter().next_back());
        prop_assert!(map.height() < height_bound(map.len()));
    }

    #[test]
    fn successor_matches_btreemap(keys in prop::collection::btree_set(any::<i16>(), 1..200)) {
        let map: OrderedMap<_, _> = keys.iter().map(|k| (*k, ())).collect();
        for k in &keys {
            let want = keys.range((Bound::Excluded(*k), Bound::Unbounded)).next();
            prop_assert_eq!(map.successor(k).ok().map(|(k, _)| k), want);
        }
    }

    #[test]
    fn overlap_queries_match_brute_force(
        stored in prop::collection::vec(interval(), 0..200),
        removed in prop::collection::vec(any::<prop::sample::Index>(), 0..50),
        queries in prop::collection::vec(interval(), 1..50),
    ) {
        let mut index = IntervalIndex::new();
        let mut oracle = BTreeMap::new();
        for (v, i) in stored.iter().enumerate() {
            index.upsert(i.clone(), v);
            oracle.insert(i.clone(), v);
        }
        if !stored.is_empty() {
            for r in removed {
                let i = r.get(&stored);
                prop_assert_eq!(index.delete(i), oracle.remove(i));
            }
        }
        prop_assert_eq!(index.len(), oracle.len());
        prop_assert!(index.height() < height_bound(index.len()));

        for q in &queries {
            let want: Vec<_> = oracle.iter().filter(|(i, _)| i.overlaps(q)).collect();
            let lazy: Vec<_> = index.overlapping(q).collect();
            prop_assert_eq!(&lazy, &want);
            match index.find_all_overlapping(q) {
                Ok(all) => prop_assert_eq!(&all, &want),
                Err(e) => {
                    prop_assert_eq!(e, Error::NotFound);
                    prop_assert!(want.is_empty());
                }
            }
            match index.find_first_overlapping(q) {
                Ok((i, _)) => prop_assert!(i.overlaps(q)),
                Err(_) => prop_assert!(want.is_empty()),
            }
        }
    }
}
