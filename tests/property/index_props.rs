//! Properties of the hash-keyed AVL directory index

use proptest::prelude::*;
use std::collections::BTreeSet;
use treefs::index::HashIndex;

fn height_bound(len: usize) -> f64 {
    1.44 * ((len + 1) as f64).log2()
}

proptest! {
    #[test]
    fn prop_inserted_names_are_found(names in proptest::collection::btree_set("[a-zA-Z0-9_.]{1,12}", 0..300)) {
        let mut index = HashIndex::new();
        for (i, name) in names.iter().enumerate() {
            index.insert(name.as_str(), i);
        }

        prop_assert_eq!(index.len(), names.len());
        for (i, name) in names.iter().enumerate() {
            prop_assert_eq!(index.find(name), Some(&i));
        }
        prop_assert!(index.is_well_formed());
        prop_assert!((index.height() as f64) <= height_bound(index.len()).max(1.0));
    }

    #[test]
    fn prop_remove_forgets_name(
        names in proptest::collection::btree_set("[a-z]{1,8}", 1..200),
        picks in proptest::collection::vec(any::<prop::sample::Index>(), 1..50),
    ) {
        let names: Vec<String> = names.into_iter().collect();
        let mut index = HashIndex::new();
        for name in &names {
            index.insert(name.clone(), ());
        }

        let mut removed = BTreeSet::new();
        for pick in picks {
            let name = pick.get(&names);
            let expected = removed.insert(name.clone());
            let before = index.len();
            prop_assert_eq!(index.remove(name).is_some(), expected);
            prop_assert_eq!(index.len(), if expected { before - 1 } else { before });
            prop_assert!(index.find(name).is_none());
            prop_assert!(index.is_well_formed());
        }

        for name in names.iter().filter(|n| !removed.contains(*n)) {
            prop_assert!(index.contains(name));
        }
        prop_assert!((index.height() as f64) <= height_bound(index.len()).max(1.0));
    }
}

/// Colliding names built from "Aa"/"BB" blocks stay individually reachable
#[test]
fn test_collision_family_property() {
    let mut runner = proptest::test_runner::TestRunner::default();

    runner
        .run(
            &proptest::collection::btree_set(proptest::collection::vec(any::<bool>(), 4), 1..16),
            |patterns| {
                // Every name of the same block count shares one hash.
                let names: Vec<String> = patterns
                    .iter()
                    .map(|bits| bits.iter().map(|b| if *b { "Aa" } else { "BB" }).collect())
                    .collect();

                let mut index = HashIndex::new();
                for name in &names {
                    index.insert(name.clone(), name.clone());
                }
                for name in &names {
                    prop_assert_eq!(index.find(name), Some(name));
                }
                prop_assert!(index.is_well_formed());
                Ok(())
            },
        )
        .unwrap();
}
