//! B+ tree index validation tests.
//!
//! End-to-end coverage of the index surface: ordered scans over every
//! insertion order, range-start positioning, structural integrity after
//! heavy insert load, duplicate handling, and exactly-once destruction.

use std::rc::Rc;

use rand::seq::SliceRandom;

use krait_index::{BPlusTree, KraitError, LEAF_SLOTMAX};

/// Collects the full forward scan.
fn scan(tree: &BPlusTree<i64, i64>) -> Vec<(i64, i64)> {
    tree.begin().collect()
}

#[test]
fn empty_tree() {
    let tree: BPlusTree<i64, i64> = BPlusTree::new();
    assert!(tree.begin().is_end());
    assert!(tree.is_empty());
    assert_eq!(tree.len(), 0);
    tree.check_integrity().unwrap();
}

#[test]
fn single_leaf() {
    let mut tree = BPlusTree::new();
    for i in 1..=3 {
        tree.insert(i, i).unwrap();
    }

    assert_eq!(scan(&tree), vec![(1, 1), (2, 2), (3, 3)]);
    assert_eq!(tree.height(), 1);
    tree.check_integrity().unwrap();
}

#[test]
fn first_leaf_split() {
    let mut tree = BPlusTree::new();
    for i in 0..=LEAF_SLOTMAX as i64 {
        tree.insert(i, i).unwrap();
    }

    assert_eq!(tree.height(), 2);
    assert_eq!(tree.len(), LEAF_SLOTMAX + 1);

    let expected: Vec<(i64, i64)> = (0..=LEAF_SLOTMAX as i64).map(|i| (i, i)).collect();
    assert_eq!(scan(&tree), expected);
    tree.check_integrity().unwrap();
}

const DENSE_KEY_COUNT: i64 = 1 << 20;

fn dense_ascending() -> BPlusTree<i64, i64> {
    let mut tree = BPlusTree::new();
    for i in 0..DENSE_KEY_COUNT {
        tree.insert(i, i).unwrap();
    }
    tree
}

#[test]
fn dense_ascending_scan_and_integrity() {
    let tree = dense_ascending();
    tree.check_integrity().unwrap();

    let mut expected = 0;
    for (key, value) in tree.begin() {
        assert_eq!(key, expected);
        assert_eq!(value, expected);
        expected += 1;
    }
    assert_eq!(expected, DENSE_KEY_COUNT);
    assert_eq!(tree.len(), DENSE_KEY_COUNT as usize);
}

#[test]
fn dense_ascending_height_bound() {
    let tree = dense_ascending();
    // ceil(log_128(2^20)) + 1
    assert!(tree.height() <= 4, "height {} exceeds bound", tree.height());
}

#[test]
fn reverse_insertion() {
    let mut tree = BPlusTree::new();
    for i in (0..1000).rev() {
        tree.insert(i, i).unwrap();
    }

    let expected: Vec<(i64, i64)> = (0..1000).map(|i| (i, i)).collect();
    assert_eq!(scan(&tree), expected);
    tree.check_integrity().unwrap();
}

#[test]
fn shuffled_insertion() {
    let mut keys: Vec<i64> = (0..100_000).collect();
    keys.shuffle(&mut rand::thread_rng());

    let mut tree = BPlusTree::new();
    for &k in &keys {
        tree.insert(k, k * 2).unwrap();
    }
    tree.check_integrity().unwrap();

    let mut expected = 0;
    for (key, value) in tree.begin() {
        assert_eq!(key, expected);
        assert_eq!(value, expected * 2);
        expected += 1;
    }
    assert_eq!(expected, 100_000);
}

#[test]
fn range_start_mid_leaf() {
    let tree = dense_ascending();

    let mut it = tree.begin_at(&1000);
    assert_eq!(it.current().unwrap(), (1000, 1000));
    it.advance().unwrap();
    assert_eq!(it.current().unwrap(), (1001, 1001));

    assert!(tree.begin_at(&DENSE_KEY_COUNT).is_end());

    let from_begin: Vec<(i64, i64)> = tree.begin().take(3).collect();
    let from_seek: Vec<(i64, i64)> = tree.begin_at(&-1).take(3).collect();
    assert_eq!(from_begin, from_seek);
}

#[test]
fn range_start_yields_exactly_suffix() {
    let mut tree = BPlusTree::new();
    for i in 0..1000 {
        tree.insert(i * 2, i).unwrap();
    }

    // 999 is absent; the scan starts at the next present key.
    let suffix: Vec<i64> = tree.begin_at(&999).map(|(k, _)| k).collect();
    let expected: Vec<i64> = (500..1000).map(|i| i * 2).collect();
    assert_eq!(suffix, expected);
}

#[test]
fn duplicate_keys_are_kept() {
    let mut tree = BPlusTree::new();
    for i in 0..1000 {
        tree.insert(42, i).unwrap();
    }
    tree.insert(7, 7).unwrap();
    tree.insert(99, 99).unwrap();
    tree.check_integrity().unwrap();

    let pairs = scan(&tree);
    assert_eq!(pairs.len(), 1002);
    assert_eq!(pairs[0], (7, 7));
    assert_eq!(pairs[1001], (99, 99));
    assert!(pairs[1..=1000].iter().all(|&(k, _)| k == 42));

    let dup_scan: Vec<(i64, i64)> = tree.begin_at(&42).collect();
    assert_eq!(dup_scan.len(), 1001);
    assert_eq!(dup_scan[0].0, 42);
}

#[test]
fn unique_insert_rejects_duplicates() {
    let mut tree = BPlusTree::new();
    for i in 0..1000 {
        tree.insert_unique(i, i).unwrap();
    }

    let err = tree.insert_unique(500, 0).unwrap_err();
    assert!(matches!(err, KraitError::DuplicateKey));

    assert_eq!(tree.len(), 1000);
    tree.check_integrity().unwrap();
}

#[test]
fn destruction_drops_every_value_once() {
    let marker = Rc::new(());
    {
        let mut tree: BPlusTree<i64, Rc<()>> = BPlusTree::new();
        for i in 0..10_000 {
            tree.insert(i, Rc::clone(&marker)).unwrap();
        }
        assert_eq!(Rc::strong_count(&marker), 10_001);
    }
    assert_eq!(Rc::strong_count(&marker), 1);
}

#[test]
fn scan_count_matches_insert_count() {
    let mut tree = BPlusTree::new();
    let mut inserted = 0;
    for i in 0..5000 {
        // Mix of fresh and repeated keys.
        tree.insert(i % 700, i).unwrap();
        inserted += 1;
    }
    assert_eq!(tree.begin().count(), inserted);
    assert_eq!(tree.len(), inserted);
    tree.check_integrity().unwrap();
}
