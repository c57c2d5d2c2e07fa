//! Behavioral checks through the public API only

use memokit::workload::{fibonacci, RangeSum};
use memokit::{Error, Memoizer, RecencyCache, SelfAdjustingTree, SharedMemo};

#[test]
fn cache_scenario_evicts_oldest() {
    let mut cache = RecencyCache::new(2).unwrap();

    cache.store(1, "a");
    cache.store(2, "b");
    cache.store(3, "c");

    assert_eq!(cache.lookup(&1), None);
    assert_eq!(cache.lookup(&2), Some(&"b"));
    assert_eq!(cache.lookup(&3), Some(&"c"));
}

#[test]
fn tree_scenario_splays_found_key() {
    let mut tree = SelfAdjustingTree::new();

    tree.insert(5, 5);
    tree.insert(3, 3);
    tree.insert(8, 8);

    assert_eq!(tree.search(&3), Some(&3));
    assert_eq!(tree.root_key(), Some(&3));
}

#[test]
fn zero_capacity_is_a_construction_error() {
    let err = RecencyCache::<u8, u8>::new(0).err().unwrap();
    assert_eq!(err, Error::ZeroCapacity);
}

#[test]
fn accessed_key_outlives_older_one() {
    let mut cache = RecencyCache::new(3).unwrap();
    for k in ["a", "b", "c"] {
        cache.store(k, k.len());
    }

    // "a" is the oldest store but the latest access
    cache.lookup(&"a");
    cache.store("d", 1);
    cache.store("e", 1);

    assert!(cache.contains(&"a"));
    assert!(!cache.contains(&"b"));
    assert!(!cache.contains(&"c"));
}

#[test]
fn invalidate_then_refill_without_eviction() {
    let mut cache = RecencyCache::new(4).unwrap();
    for k in 0..4 {
        cache.store(k, k);
    }

    cache.invalidate();
    for k in 0..4 {
        assert_eq!(cache.lookup(&k), None);
    }
    for k in 10..14 {
        assert_eq!(cache.store(k, k), None);
    }
    assert_eq!(cache.len(), 4);
}

#[test]
fn reinsert_keeps_node_count() {
    let mut tree = SelfAdjustingTree::new();
    for k in 0..50 {
        tree.insert(k, k * 2);
    }

    tree.insert(17, 1);
    let before = tree.len();
    tree.insert(17, 2);

    assert_eq!(tree.len(), before);
    assert_eq!(tree.search(&17), Some(&2));
}

fn range_sum_agrees<M: Memoizer<(usize, usize), u64>>(memo: M) {
    let data: Vec<u64> = (0..200).map(|i| (i * 7 % 13) as u64).collect();
    let mut sums = RangeSum::new(data, memo);

    for step in 0..400usize {
        let left = (step * 31) % 200;
        let right = (left + step % 17).min(199);
        if step % 5 == 0 {
            sums.update(left, step as u64).unwrap();
        }
        let cached = sums.query(left, right).unwrap();
        assert_eq!(cached, sums.query_uncached(left, right).unwrap());
    }
}

#[test]
fn range_sum_with_either_substrate() {
    range_sum_agrees(RecencyCache::new(8).unwrap());
    range_sum_agrees(SelfAdjustingTree::new());
}

#[test]
fn shared_fibonacci_through_inner() {
    let shared: SharedMemo<u64, u128, _> = SharedMemo::new(SelfAdjustingTree::new());

    let value = shared.with_inner(|tree| fibonacci(100, tree)).unwrap();

    assert_eq!(value, 354_224_848_179_261_915_075);
    assert_eq!(shared.len(), 101);
}
