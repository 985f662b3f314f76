//! Integration tests for the hash-keyed AVL directory index

use treefs::index::{name_hash, HashIndex};

/// 1000 sequential file names are all stored and findable
#[test]
fn test_thousand_sequential_names() {
    let mut index = HashIndex::new();
    for i in 1..=1000 {
        index.insert(format!("file_{:05}.txt", i), i);
    }

    assert_eq!(index.len(), 1000);
    for i in 1..=1000 {
        let name = format!("file_{:05}.txt", i);
        assert_eq!(index.find(&name), Some(&i), "{} not found", name);
    }

    let stats = index.stats();
    assert_eq!(stats.size, 1000);
    assert!(stats.balanced, "{}", stats);
    assert!(index.is_well_formed());
}

/// Colliding names are stored side by side and both remain reachable
#[test]
fn test_hash_collisions_resolved_by_name() {
    assert_eq!(name_hash("Aa"), name_hash("BB"));
    assert_eq!(name_hash("AaAa"), name_hash("BBBB"));
    assert_eq!(name_hash("AaBB"), name_hash("BBAa"));

    let mut index = HashIndex::new();
    for name in ["AaAa", "BBBB", "AaBB", "BBAa", "other"] {
        index.insert(name, name.to_lowercase());
    }

    for name in ["AaAa", "BBBB", "AaBB", "BBAa", "other"] {
        assert_eq!(index.find(name), Some(&name.to_lowercase()));
    }

    assert_eq!(index.remove("AaBB"), Some("aabb".to_string()));
    assert_eq!(index.find("AaBB"), None);
    assert_eq!(index.find("BBAa"), Some(&"bbaa".to_string()));
    assert_eq!(index.len(), 4);
    assert!(index.is_well_formed());
}

/// Iteration follows (hash, name) order rather than name order
#[test]
fn test_iteration_order_is_hash_order() {
    let mut index = HashIndex::new();
    for name in ["zeta", "alpha", "mid", "b"] {
        index.insert(name, ());
    }

    let names: Vec<&str> = index.names().collect();
    let mut expected = vec!["zeta", "alpha", "mid", "b"];
    expected.sort_by_key(|n| (name_hash(n), *n));
    assert_eq!(names, expected);
}

/// Removing a missing name changes nothing
#[test]
fn test_remove_missing_is_noop() {
    let mut index = HashIndex::new();
    index.insert("present", 1);
    assert_eq!(index.remove("absent"), None);
    assert_eq!(index.len(), 1);

    assert_eq!(index.remove("present"), Some(1));
    assert!(index.is_empty());
    assert_eq!(index.remove("present"), None);
}

/// Interleaved inserts and removes keep the tree balanced
#[test]
fn test_interleaved_mutations_stay_balanced() {
    let mut index = HashIndex::new();
    for i in 0..500 {
        index.insert(format!("entry-{}", i), i);
        if i % 3 == 0 {
            assert_eq!(index.remove(&format!("entry-{}", i / 2)), Some(i / 2));
        }
    }

    assert!(index.is_well_formed());
    let bound = 1.44 * ((index.len() + 1) as f64).log2();
    assert!((index.height() as f64) <= bound + 1.0);
}
