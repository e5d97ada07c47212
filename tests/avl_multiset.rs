use std::collections::BTreeMap;

use avl_multi::{AvlMultiset, Natural};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use rstest::rstest;

/// The number of operations to perform in each proptest case.
const TEST_SIZE: usize = 5_000;

/// Keys in a narrow range, so that duplicates are common.
fn key_strategy() -> impl Strategy<Value = i32> {
    -500i32..500i32
}

/// Occurrence counts kept by the model, with absent keys never stored.
type Model = BTreeMap<i32, usize>;

fn model_put(model: &mut Model, key: i32) {
    *model.entry(key).or_default() += 1;
}

fn model_remove(model: &mut Model, key: i32) -> bool {
    let Some(count) = model.get_mut(&key) else {
        return false;
    };
    *count -= 1;
    if *count == 0 {
        model.remove(&key);
    }
    true
}

// ─── Operations enum for driving randomized tests ────────────────────────────

#[derive(Debug, Clone)]
enum SetOp {
    Insert(i32),
    Remove(i32),
    RemoveAll(i32),
    Count(i32),
    Contains(i32),
    First,
    Last,
}

fn set_op_strategy() -> impl Strategy<Value = SetOp> {
    prop_oneof![
        6 => key_strategy().prop_map(SetOp::Insert),
        3 => key_strategy().prop_map(SetOp::Remove),
        1 => key_strategy().prop_map(SetOp::RemoveAll),
        2 => key_strategy().prop_map(SetOp::Count),
        2 => key_strategy().prop_map(SetOp::Contains),
        1 => Just(SetOp::First),
        1 => Just(SetOp::Last),
    ]
}

// ─── Core operations ─────────────────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    /// Replays a random sequence of operations on both AvlMultiset and a BTreeMap of
    /// counts and asserts identical results at every step.
    #[test]
    fn set_ops_match_model(ops in proptest::collection::vec(set_op_strategy(), TEST_SIZE)) {
        let mut set: AvlMultiset<i32> = AvlMultiset::new();
        let mut model = Model::new();
        let mut len = 0usize;

        for op in &ops {
            match *op {
                SetOp::Insert(key) => {
                    set.insert(key);
                    model_put(&mut model, key);
                    len += 1;
                }
                SetOp::Remove(key) => {
                    let removed = set.remove(&key);
                    prop_assert_eq!(removed, model_remove(&mut model, key), "remove({})", key);
                    if removed {
                        len -= 1;
                    }
                }
                SetOp::RemoveAll(key) => {
                    let expected = model.remove(&key);
                    prop_assert_eq!(set.remove_all(&key), expected.is_some(), "remove_all({})", key);
                    len -= expected.unwrap_or(0);
                }
                SetOp::Count(key) => {
                    let expected = model.get(&key).copied().unwrap_or(0);
                    prop_assert_eq!(set.count(&key), expected, "count({})", key);
                }
                SetOp::Contains(key) => {
                    prop_assert_eq!(set.contains(&key), model.contains_key(&key), "contains({})", key);
                }
                SetOp::First => {
                    let expected = model.first_key_value().map(|(key, count)| (key, *count));
                    prop_assert_eq!(set.first(), expected, "first()");
                }
                SetOp::Last => {
                    let expected = model.last_key_value().map(|(key, count)| (key, *count));
                    prop_assert_eq!(set.last(), expected, "last()");
                }
            }
            prop_assert_eq!(set.len(), len, "len mismatch after {:?}", op);
            prop_assert_eq!(set.distinct_len(), model.len(), "distinct_len mismatch after {:?}", op);
            prop_assert_eq!(set.is_empty(), model.is_empty(), "is_empty mismatch after {:?}", op);
        }
    }

    /// Tests that iteration order matches BTreeMap after random insertions.
    #[test]
    fn iter_matches_model(keys in proptest::collection::vec(key_strategy(), 0..TEST_SIZE)) {
        let set: AvlMultiset<i32> = keys.iter().copied().collect();
        let mut model = Model::new();
        for &key in &keys {
            model_put(&mut model, key);
        }

        let items: Vec<_> = set.iter().map(|(key, count)| (*key, count)).collect();
        let expected: Vec<_> = model.iter().map(|(key, count)| (*key, *count)).collect();
        prop_assert_eq!(&items, &expected, "iter() mismatch");

        let reversed: Vec<_> = set.iter().rev().map(|(key, count)| (*key, count)).collect();
        let expected: Vec<_> = model.iter().rev().map(|(key, count)| (*key, *count)).collect();
        prop_assert_eq!(&reversed, &expected, "iter().rev() mismatch");

        prop_assert_eq!(set.iter().len(), model.len(), "ExactSizeIterator len mismatch");
    }

    /// Alternating front/back consumption visits every distinct key exactly once.
    #[test]
    fn iter_double_ended(keys in proptest::collection::vec(key_strategy(), 1..TEST_SIZE)) {
        let set: AvlMultiset<i32> = keys.iter().copied().collect();

        let mut from_front = Vec::new();
        let mut from_back = Vec::new();
        let mut iter = set.iter();
        loop {
            match iter.next() {
                Some((key, _)) => from_front.push(*key),
                None => break,
            }
            match iter.next_back() {
                Some((key, _)) => from_back.push(*key),
                None => break,
            }
        }
        from_back.reverse();
        from_front.extend(from_back);
        let expected: Vec<_> = set.iter().map(|(key, _)| *key).collect();
        prop_assert_eq!(from_front, expected);
    }

    /// A clone is equal to the original and independent of it.
    #[test]
    fn clone_is_independent(keys in proptest::collection::vec(key_strategy(), 1..500)) {
        let mut set: AvlMultiset<i32> = keys.iter().copied().collect();
        let snapshot = set.clone();
        prop_assert_eq!(&set, &snapshot);

        set.remove(&keys[0]);
        prop_assert_ne!(&set, &snapshot);
        prop_assert_eq!(snapshot.len(), keys.len());
    }
}

// ─── Literal scenarios ───────────────────────────────────────────────────────

/// Replays a script where positive entries insert and negative entries remove one
/// occurrence, then checks the resulting in-order keys.
#[rstest]
#[case::left_rotation(&[1, 2, 3], &[1, 2, 3])]
#[case::right_rotation(&[3, 2, 1], &[1, 2, 3])]
#[case::left_right(&[3, 1, 2], &[1, 2, 3])]
#[case::right_left(&[1, 3, 2], &[1, 2, 3])]
#[case::deep_left_right(&[5, 2, 6, 1, 4, 3], &[1, 2, 3, 4, 5, 6])]
#[case::deep_right_left(&[2, 1, 5, 4, 6, 3], &[1, 2, 3, 4, 5, 6])]
#[case::delete_rotating_right(&[4, 2, 5, 1, 3, -5], &[1, 2, 3, 4])]
#[case::delete_root_with_left_child(&[2, 1, -2], &[1])]
#[case::delete_root_with_right_child(&[1, 2, -1], &[2])]
#[case::delete_inner_with_left_child(&[3, 2, 4, 1, -2], &[1, 3, 4])]
#[case::delete_inner_with_right_child(&[3, 1, 4, 2, -1], &[2, 3, 4])]
#[case::delete_leaf_with_double_rotation(&[3, 1, 4, 2, -4], &[1, 2, 3])]
#[case::delete_right_chain(&[2, 1, 3, 4, -3], &[1, 2, 4])]
#[case::delete_root_with_two_children(&[2, 1, 3, -2], &[1, 3])]
#[case::delete_successor_right_child(&[4, 2, 5, 1, 3, -2], &[1, 3, 4, 5])]
#[case::delete_successor_deeper(&[2, 1, 4, 3, 5, -4], &[1, 2, 3, 5])]
fn scripted_operations(#[case] script: &[i32], #[case] expected: &[i32]) {
    let mut set = AvlMultiset::new();
    for &entry in script {
        if entry > 0 {
            set.insert(entry);
        } else {
            assert!(set.remove(&-entry), "script removes missing key {}", -entry);
        }
    }
    let keys: Vec<i32> = set.iter().map(|(key, _)| *key).collect();
    assert_eq!(keys, expected);
    assert_eq!(set.len(), expected.len());
}

#[test]
fn removing_one_occurrence_keeps_the_rest() {
    let mut set = AvlMultiset::new();
    for _ in 0..3 {
        set.insert(5);
    }
    let before = set.len();
    assert!(set.remove(&5));
    assert_eq!(set.count(&5), 2);
    assert_eq!(set.len(), before - 1);
}

#[test]
fn absent_keys_leave_the_set_unchanged() {
    let mut set = AvlMultiset::from([1, 2, 3]);
    assert!(!set.remove(&4));
    assert!(!set.remove_all(&4));
    assert_eq!(set.count(&4), 0);
    assert_eq!(set.len(), 3);
}

#[test]
fn stress_repeating_keys() {
    let mut set = AvlMultiset::new();
    let mut puts = 0;
    for i in 0..100_000 {
        set.insert(i % 765);
        puts += 1;
        assert_eq!(set.len(), puts);
    }
    assert_eq!(set.distinct_len(), 765);
    assert!((0..765).all(|key| set.count(&key) >= 130));
}

#[test]
fn stress_dense_removal_after_sparse_puts() {
    let mut set = AvlMultiset::new();
    for key in (0..50_000).step_by(7) {
        set.insert(key);
        set.insert(key);
    }
    for key in 0..50_000 {
        set.remove_all(&key);
    }
    assert!(set.is_empty());
    assert!((0..50_000).all(|key| !set.contains(&key)));
}

#[test]
fn custom_comparator_orders_keys() {
    let mut set = AvlMultiset::with_comparator(|a: &i32, b: &i32| b.cmp(a));
    set.extend([1, 5, 3, 5]);
    let keys: Vec<_> = set.iter().collect();
    assert_eq!(keys, [(&5, 2), (&3, 1), (&1, 1)]);
    assert_eq!(set.first(), Some((&5, 2)));
}

#[test]
fn debug_shows_counts() {
    let set = AvlMultiset::from(["b", "a", "b"]);
    assert_eq!(format!("{set:?}"), r#"{"a": 1, "b": 2}"#);
}

#[test]
fn default_is_empty() {
    let set: AvlMultiset<String, Natural> = AvlMultiset::default();
    assert!(set.is_empty());
    assert_eq!(set.iter().next(), None);
}

#[test]
fn clear_then_reuse() {
    let mut set: AvlMultiset<i32> = (0..1_000).collect();
    set.clear();
    assert_eq!(set.len(), 0);
    assert_eq!(set.first(), None);
    set.insert(42);
    assert_eq!(set.count(&42), 1);
}
