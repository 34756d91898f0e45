use super::*;
use crate::test_helpers::test_rng;
use crate::testing::crash_test::{CrashTestDummy, Instance, Panic};
use alloc::vec::Vec;
use core::cell::Cell;
use rand::seq::SliceRandom;
use rand::Rng;
use std::panic::{catch_unwind, AssertUnwindSafe};

fn lt<T: Ord>(a: &T, b: &T) -> bool {
    a < b
}

/// Poplar sizes of a forest of `size` elements, computed without bit tricks.
fn forest(mut size: usize) -> Vec<usize> {
    let mut sizes = Vec::new();
    while size > 0 {
        let mut poplar = 1;
        while 2 * poplar + 1 <= size {
            poplar = 2 * poplar + 1;
        }
        sizes.push(poplar);
        size -= poplar;
    }
    sizes
}

fn is_poplar<T: Ord>(v: &[T]) -> bool {
    if v.len() < 2 {
        return true;
    }
    let (left, rest) = v.split_at(v.len() / 2);
    let (root, right) = rest.split_last().unwrap();
    root >= left.last().unwrap()
        && root >= right.last().unwrap()
        && is_poplar(left)
        && is_poplar(right)
}

fn is_poplar_heap<T: Ord>(v: &[T]) -> bool {
    let mut begin = 0;
    forest(v.len()).into_iter().all(|size| {
        let valid = is_poplar(&v[begin..begin + size]);
        begin += size;
        valid
    })
}

fn sorted<T: Ord + Clone>(v: &[T]) -> Vec<T> {
    let mut v = v.to_vec();
    v.sort();
    v
}

fn random_vec(rng: &mut impl Rng, len: usize, max: u32) -> Vec<u32> {
    (0..len).map(|_| rng.gen_range(0..max)).collect()
}

#[test]
fn test_walk_twelve() {
    let poplars: Vec<_> = PoplarWalk::new(12).collect();
    assert_eq!(
        poplars,
        [
            Poplar { begin: 0, size: 7 },
            Poplar { begin: 7, size: 3 },
            Poplar { begin: 10, size: 1 },
            Poplar { begin: 11, size: 1 },
        ]
    );
    assert_eq!(poplars[1].root(), 9);
    assert_eq!(poplars[1].range(), 7..10);
}

#[test]
fn test_walk_matches_forest() {
    assert_eq!(PoplarWalk::new(0).next(), None);
    for size in 1..600 {
        let sizes: Vec<_> = PoplarWalk::new(size).map(|p| p.size).collect();
        assert_eq!(sizes, forest(size), "size {size}");
        assert!(sizes.windows(2).all(|w| w[0] >= w[1]));
        // Only the two smallest poplars may share a size.
        let n = sizes.len();
        assert!(sizes.windows(2).take(n.saturating_sub(2)).all(|w| w[0] > w[1]));
        assert_eq!(*forest(size).last().unwrap(), last_poplar_size(size));
    }
}

#[test]
fn test_last_poplar_size() {
    assert_eq!(last_poplar_size(0), 0);
    assert_eq!(last_poplar_size(1), 1);
    assert_eq!(last_poplar_size(2), 1);
    assert_eq!(last_poplar_size(3), 3);
    assert_eq!(last_poplar_size(6), 3);
    assert_eq!(last_poplar_size(7), 7);
    assert_eq!(last_poplar_size(8), 1);
    assert_eq!(last_poplar_size(14), 7);
}

#[test]
fn test_sift_semipoplar() {
    // Two valid 3-poplars under a root that belongs at the bottom.
    let mut v = [1, 2, 5, 3, 4, 6, 0];
    sift(&mut v, &mut lt);
    assert!(is_poplar(&v));
    assert_eq!(v[6], 6);
    assert_eq!(sorted(&v), [0, 1, 2, 3, 4, 5, 6]);

    // Already a poplar: nothing moves.
    let mut v = [1, 2, 5, 3, 4, 6, 7];
    sift(&mut v, &mut lt);
    assert_eq!(v, [1, 2, 5, 3, 4, 6, 7]);

    let mut v: [i32; 1] = [4];
    sift(&mut v, &mut lt);
    assert_eq!(v, [4]);
    let mut v: [i32; 0] = [];
    sift(&mut v, &mut lt);
}

#[test]
fn test_sift_prefers_greater_subpoplar_root() {
    let mut v = [3, 1, 1, 2];
    // Not a poplar size; exercise a 3-element semipoplar instead.
    sift(&mut v[..3], &mut lt);
    assert_eq!(v[..3], [1, 1, 3]);

    let mut v = [9, 8, 1];
    sift(&mut v, &mut lt);
    assert_eq!(v, [1, 8, 9]);

    let mut v = [8, 9, 1];
    sift(&mut v, &mut lt);
    assert_eq!(v, [8, 1, 9]);
}

#[test]
fn test_insertion_sort() {
    let mut rng = test_rng();
    for len in 0..40 {
        let mut v = random_vec(&mut rng, len, 8);
        let expected = sorted(&v);
        insertion_sort(&mut v, &mut lt);
        assert_eq!(v, expected);
    }
}

#[test]
fn test_make_heap_single_poplar() {
    let mut v = [1, 3, 6, 5, 2, 7, 4];
    make_heap(&mut v, &mut lt);
    assert!(is_poplar(&v));
    assert_eq!(v[6], 7);

    sort_heap(&mut v, &mut lt);
    assert_eq!(v, [1, 2, 3, 4, 5, 6, 7]);
}

#[test]
fn test_make_heap_twelve() {
    let mut v = [12, 3, 7, 1, 9, 11, 2, 8, 5, 10, 6, 4];
    make_heap(&mut v, &mut lt);
    assert!(is_poplar(&v[0..7]));
    assert!(is_poplar(&v[7..10]));
    assert!(is_poplar_heap(&v));
    assert_eq!(is_heap_until(&v, &mut lt), 12);
}

#[test]
fn test_make_heap_variants() {
    let mut rng = test_rng();
    let builders: [fn(&mut [u32], &mut fn(&u32, &u32) -> bool); 3] = [
        |v, is_less| make_heap(v, is_less),
        |v, is_less| make_heap_naive(v, is_less),
        |v, is_less| make_heap_recursive(v, is_less),
    ];
    let mut sizes: Vec<usize> = (0..=260).collect();
    sizes.extend([511, 1000, 1023, 1024, 4097]);
    for &len in &sizes {
        for build in builders {
            for max in [4, 1 << 20] {
                let mut v = random_vec(&mut rng, len, max);
                let expected = sorted(&v);
                build(&mut v, &mut (lt as fn(&u32, &u32) -> bool));
                assert!(is_poplar_heap(&v), "len {len}");
                assert!(is_heap(&v, &mut lt));
                assert_eq!(sorted(&v), expected);
            }
        }
    }
}

#[test]
fn test_make_heap_patterns() {
    for len in [0, 1, 2, 15, 16, 31, 100, 465, 1000] {
        let ascending: Vec<u32> = (0..len).collect();
        let descending: Vec<u32> = (0..len).rev().collect();
        let sawtooth: Vec<u32> = (0..len).map(|i| i % 17).collect();
        for mut v in [ascending.clone(), descending, sawtooth] {
            make_heap(&mut v, &mut lt);
            assert!(is_poplar_heap(&v));
        }

        // A sorted sequence is already a poplar heap.
        let mut v = ascending.clone();
        make_heap(&mut v, &mut lt);
        assert_eq!(v, ascending);
    }
}

#[test]
fn test_push_heap() {
    let mut rng = test_rng();
    let mut v: Vec<u32> = Vec::new();
    for _ in 0..700 {
        v.push(rng.gen_range(0..200));
        push_heap(&mut v, &mut lt);
        assert!(is_poplar_heap(&v), "len {}", v.len());
    }

    let mut v = [5];
    push_heap(&mut v, &mut lt);
    assert_eq!(v, [5]);
    let mut v: [u32; 0] = [];
    push_heap(&mut v, &mut lt);
}

#[test]
fn test_pop_heap() {
    let mut rng = test_rng();
    for len in 1..300 {
        let mut v = random_vec(&mut rng, len, 50);
        make_heap(&mut v, &mut lt);
        let max = *v.iter().max().unwrap();
        let expected = sorted(&v);

        pop_heap(&mut v, &mut lt);
        assert_eq!(v[len - 1], max);
        assert!(is_poplar_heap(&v[..len - 1]));
        assert_eq!(sorted(&v), expected);
    }

    let mut v = [3];
    pop_heap(&mut v, &mut lt);
    assert_eq!(v, [3]);
    let mut v: [u32; 0] = [];
    pop_heap(&mut v, &mut lt);
}

#[test]
fn test_greater_root() {
    // Forest 3, 1: roots 9 and 2.
    let v = [1, 2, 9, 2];
    assert_eq!(greater_root(&v, &mut lt), Some(Poplar { begin: 0, size: 3 }));
    // Equal roots never move.
    let v = [1, 2, 9, 9];
    assert_eq!(greater_root(&v, &mut lt), None);
    let v: [u32; 0] = [];
    assert_eq!(greater_root(&v, &mut lt), None);
}

#[test]
fn test_sort_heap() {
    let mut rng = test_rng();
    for len in 0..400 {
        let mut v = random_vec(&mut rng, len, 100);
        let expected = sorted(&v);
        make_heap(&mut v, &mut lt);
        sort_heap(&mut v, &mut lt);
        assert_eq!(v, expected);
    }
}

#[test]
fn test_sort_heap_reversed_order() {
    let mut v: Vec<i32> = (0..100).collect();
    v.shuffle(&mut test_rng());
    let mut gt = |a: &i32, b: &i32| a > b;
    make_heap(&mut v, &mut gt);
    assert!(is_heap(&v, &mut gt));
    sort_heap(&mut v, &mut gt);
    assert_eq!(v, (0..100).rev().collect::<Vec<_>>());
}

#[test]
fn test_is_heap_until() {
    let v: [i32; 0] = [];
    assert_eq!(is_heap_until(&v, &mut lt), 0);
    assert_eq!(is_heap_until(&[7], &mut lt), 1);
    assert_eq!(is_heap_until(&[7, 1], &mut lt), 2);
    assert_eq!(is_heap_until(&[7, 1, 3], &mut lt), 2);
    assert_eq!(is_heap_until(&[1, 7, 3], &mut lt), 2);
    assert_eq!(is_heap_until(&[1, 3, 7, 2, 0], &mut lt), 5);

    // A valid 7-poplar, then a lone element that can never be out of place.
    assert_eq!(is_heap_until(&[1, 3, 6, 2, 4, 5, 7, 9], &mut lt), 8);
    assert_eq!(is_heap_until(&[1, 3, 6, 2, 4, 5, 7, 0], &mut lt), 8);
    // Here the 7-poplar root 4 is below its right subpoplar root 7.
    assert_eq!(is_heap_until(&[1, 3, 6, 5, 2, 7, 4, 9], &mut lt), 6);
}

#[test]
fn test_is_heap_until_matches_reference() {
    fn reference(v: &[u32]) -> usize {
        let mut len = v.len().min(1);
        while len < v.len() && is_poplar_heap(&v[..len + 1]) {
            len += 1;
        }
        len
    }

    let mut rng = test_rng();
    for len in 0..120 {
        for _ in 0..8 {
            let mut v = random_vec(&mut rng, len, 1000);
            make_heap(&mut v, &mut lt);
            if len > 0 && rng.gen_bool(0.8) {
                let i = rng.gen_range(0..len);
                v[i] = rng.gen_range(0..1000);
            }
            assert_eq!(is_heap_until(&v, &mut lt), reference(&v), "{v:?}");
            assert_eq!(is_heap(&v, &mut lt), is_poplar_heap(&v));
            assert_eq!(is_heap(&v, &mut lt), is_heap(&v, &mut lt));
        }
    }
}

#[test]
fn test_sorted_is_heap() {
    for len in 0..200u32 {
        let v: Vec<u32> = (0..len).collect();
        assert!(is_heap(&v, &mut lt));
    }
}

#[test]
fn test_comparison_counts() {
    let mut rng = test_rng();
    let len: usize = 2000;
    let log2 = (usize::BITS - len.leading_zeros()) as usize;

    let comparisons = Cell::new(0);
    let mut counting = |a: &u32, b: &u32| {
        comparisons.set(comparisons.get() + 1);
        a < b
    };

    let mut v = random_vec(&mut rng, len, 1 << 30);
    make_heap(&mut v, &mut counting);
    assert!(comparisons.get() <= 8 * len * log2, "{} comparisons to build", comparisons.get());

    comparisons.set(0);
    assert!(is_heap(&v, &mut counting));
    assert!(comparisons.get() <= 2 * len, "{} comparisons to check", comparisons.get());

    comparisons.set(0);
    pop_heap(&mut v, &mut counting);
    assert!(comparisons.get() <= 3 * log2, "{} comparisons to pop", comparisons.get());

    comparisons.set(0);
    v[len - 1] = rng.gen();
    push_heap(&mut v, &mut counting);
    assert!(comparisons.get() <= 2 * log2, "{} comparisons to push", comparisons.get());
}

#[test]
fn test_panic_safety() {
    const LEN: usize = 100;

    for panicking in [0, 7, 42, 99] {
        let dummies: Vec<_> = (0..LEN).map(CrashTestDummy::new).collect();
        let mut v: Vec<_> = dummies
            .iter()
            .map(|d| d.spawn(if d.id == panicking { Panic::InQuery } else { Panic::Never }))
            .collect();
        v.shuffle(&mut test_rng());

        let result = catch_unwind(AssertUnwindSafe(|| {
            let mut is_less = |a: &Instance<'_>, b: &Instance<'_>| a.query(b.query(a < b));
            make_heap(&mut v, &mut is_less);
            sort_heap(&mut v, &mut is_less);
        }));
        assert!(result.is_err());

        // Still a permutation of the input: nothing dropped, nothing doubled.
        assert!(dummies.iter().all(|d| d.dropped() == 0));
        let mut ids: Vec<_> = v.iter().map(|i| i.id()).collect();
        ids.sort();
        assert_eq!(ids, (0..LEN).collect::<Vec<_>>());

        drop(v);
        assert!(dummies.iter().all(|d| d.dropped() == 1));
    }
}

#[test]
fn test_panic_safety_in_sort() {
    let dummies: Vec<_> = (0..64).map(CrashTestDummy::new).collect();
    let mut v: Vec<_> = dummies.iter().map(|d| d.spawn(Panic::Never)).collect();
    v.shuffle(&mut test_rng());
    make_heap(&mut v, &mut lt);

    let mut budget = 50;
    let result = catch_unwind(AssertUnwindSafe(|| {
        sort_heap(&mut v, &mut |a: &Instance<'_>, b: &Instance<'_>| {
            budget -= 1;
            if budget == 0 {
                panic!("out of comparisons");
            }
            a < b
        })
    }));
    assert!(result.is_err());
    assert!(dummies.iter().all(|d| d.dropped() == 0));
    assert!(dummies.iter().all(|d| d.queried() == 0));
    let mut ids: Vec<_> = v.iter().map(|i| i.id()).collect();
    ids.sort();
    assert_eq!(ids, (0..64).collect::<Vec<_>>());
}
