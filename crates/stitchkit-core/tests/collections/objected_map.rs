//! Property tests for the value-keyed map.

use std::collections::HashMap;

use proptest::prelude::*;
use stitchkit_core::map::{INITIAL_BUCKETS, MAX_LOAD_FACTOR};
use stitchkit_core::ObjectedMap;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
struct Key {
    x: i16,
    y: i16,
}

#[derive(Debug, Clone)]
enum Op {
    Insert(Key, u32),
    Remove(Key),
}

fn key() -> impl Strategy<Value = Key> {
    (-20i16..20, -20i16..20).prop_map(|(x, y)| Key { x, y })
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (key(), any::<u32>()).prop_map(|(k, v)| Op::Insert(k, v)),
        1 => key().prop_map(Op::Remove),
    ]
}

proptest! {
    #[test]
    fn behaves_like_hash_map(ops in prop::collection::vec(op(), 0..400)) {
        let mut map = ObjectedMap::new();
        let mut model = HashMap::new();

        for op in ops {
            match op {
                Op::Insert(k, v) => {
                    prop_assert_eq!(map.insert(k, v), model.insert(k, v));
                }
                Op::Remove(k) => {
                    prop_assert_eq!(map.remove(&k), model.remove(&k));
                }
            }
            prop_assert_eq!(map.len(), model.len());
        }

        for (k, v) in &model {
            prop_assert_eq!(map.get(k), Some(v));
        }
        prop_assert_eq!(map.iter().count(), model.len());
    }

    #[test]
    fn load_factor_stays_bounded(keys in prop::collection::hash_set(key(), 0..800)) {
        let mut map = ObjectedMap::new();
        for k in &keys {
            map.insert(*k, ());
            prop_assert!(map.load_factor() <= MAX_LOAD_FACTOR);
            prop_assert!(map.bucket_count().is_power_of_two());
            prop_assert!(map.bucket_count() >= INITIAL_BUCKETS);
        }
        for k in &keys {
            prop_assert!(map.contains_key(k));
        }
    }

    #[test]
    fn extract_returns_every_entry(keys in prop::collection::hash_set(key(), 0..200)) {
        let mut map: ObjectedMap<Key, ()> = ObjectedMap::with_keys(keys.iter().copied());
        let buckets = map.bucket_count();
        let extracted = map.extract();
        prop_assert_eq!(extracted.len(), keys.len());
        prop_assert!(extracted.iter().all(|(k, _)| keys.contains(k)));
        prop_assert!(map.is_empty());
        prop_assert_eq!(map.bucket_count(), buckets);
    }
}
