#![allow(clippy::unwrap_used, clippy::expect_used)]

//! Property tests for comparison invariants.
//!
//! - terminal values vary exactly when they are unequal
//! - independent copies of a graph never vary
//! - keyed sequences are insensitive to element order
//! - lazy and eager comparison yield the same variances

mod common;

use common::{users, ImmutableClass, User};
use proptest::prelude::*;
use std::collections::BTreeMap;
use vardiff_core::{compare, variances};

fn arb_users() -> impl Strategy<Value = Vec<(u32, String)>> {
    prop::collection::btree_map(any::<u32>(), "[a-z]{0,8}", 0..16)
        .prop_map(|entries: BTreeMap<u32, String>| entries.into_iter().collect())
}

fn build(entries: &[(u32, String)]) -> Vec<User> {
    let borrowed: Vec<(u32, &str)> = entries.iter().map(|(id, n)| (*id, n.as_str())).collect();
    users(&borrowed)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn terminal_ints_vary_iff_unequal(a in any::<i64>(), b in any::<i64>()) {
        let found = compare(&a, &b).unwrap();
        prop_assert_eq!(found.is_empty(), a == b);
    }

    #[test]
    fn terminal_strings_vary_iff_unequal(a in ".{0,12}", b in ".{0,12}") {
        let found = compare(&a, &b).unwrap();
        prop_assert_eq!(found.is_empty(), a == b);
    }

    #[test]
    fn independent_copies_never_vary(entries in arb_users()) {
        let (l, r) = (build(&entries), build(&entries));
        prop_assert!(compare(&l, &r).unwrap().is_empty());
    }

    #[test]
    fn keyed_sequences_ignore_order(
        (entries, shuffled) in arb_users()
            .prop_flat_map(|e| (Just(e.clone()), Just(e).prop_shuffle()))
    ) {
        let (l, r) = (build(&entries), build(&shuffled));
        prop_assert!(compare(&l, &r).unwrap().is_empty());
    }

    #[test]
    fn positional_variances_match_differing_indices(
        pairs in prop::collection::vec((0i32..4, 0i32..4), 0..24)
    ) {
        let (l, r): (Vec<i32>, Vec<i32>) = pairs.iter().copied().unzip();
        let expected: Vec<String> = pairs
            .iter()
            .enumerate()
            .filter(|(_, (a, b))| a != b)
            .map(|(i, _)| format!("this[{}]", i))
            .collect();

        let found: Vec<String> = compare(&l, &r).unwrap().iter().map(|v| v.path()).collect();
        prop_assert_eq!(found, expected);
    }

    #[test]
    fn lazy_and_eager_agree(
        left in prop::collection::vec((0i32..3, "[ab]{1,2}"), 0..8),
        right in prop::collection::vec((0i32..3, "[ab]{1,2}"), 0..8),
    ) {
        let build = |pairs: &[(i32, String)]| -> Vec<ImmutableClass> {
            pairs.iter().map(|(n, s)| ImmutableClass::new(*n, s)).collect()
        };
        let (l, r) = (build(&left), build(&right));

        let eager = compare(&l, &r).unwrap();
        let lazy: Vec<_> = variances(&l, &r).collect::<Result<_, _>>().unwrap();
        prop_assert_eq!(eager.len(), lazy.len());
        for (e, z) in eager.iter().zip(&lazy) {
            prop_assert_eq!(e.path(), z.path());
            prop_assert_eq!(e.to_string(), z.to_string());
        }
    }
}
