//! Integration tests for the filesystem session facade

use std::sync::Arc;
use treefs::error::FsError;
use treefs::namespace::{EntryKind, FileSystem, Permissions};

fn seeded() -> FileSystem {
    let fs = FileSystem::new();
    for dir in ["/home/user", "/etc", "/var", "/tmp"] {
        fs.mkdir_all(dir).unwrap();
    }
    fs
}

/// Parent links rebuild absolute paths
#[test]
fn test_paths_from_parent_links() {
    let fs = seeded();
    fs.mkdir_all("/home/user/projects/treefs").unwrap();
    let deep = fs.resolve("/home/user/projects/treefs").unwrap();
    assert_eq!(deep.path(), "/home/user/projects/treefs");
    assert_eq!(deep.parent().unwrap().name(), "projects");
    assert!(fs.root().is_root());
}

/// Relative resolution honours the current directory and `..`
#[test]
fn test_relative_resolution() {
    let mut fs = seeded();
    fs.cd("/home/user").unwrap();
    fs.mkdir("docs").unwrap();
    fs.write("docs/readme", "hi").unwrap();

    assert_eq!(fs.read("./docs/readme").unwrap(), "hi");
    assert_eq!(fs.read("../user/docs/readme").unwrap(), "hi");
    assert_eq!(fs.read("/../../home/user/docs/readme").unwrap(), "hi");
    assert!(matches!(
        fs.read("docs/readme/more"),
        Err(FsError::NotADirectory(_))
    ));
}

/// Listings come back in index order with kinds and sizes
#[test]
fn test_listing_details() {
    let fs = seeded();
    fs.write("/tmp/a.txt", "12345").unwrap();
    fs.mkdir("/tmp/sub").unwrap();

    let listing = fs.list("/tmp").unwrap();
    assert_eq!(listing.len(), 2);
    let file = listing.iter().find(|e| e.name == "a.txt").unwrap();
    assert_eq!(file.kind, EntryKind::File);
    assert_eq!(file.size, 5);
    assert_eq!(file.permissions, Permissions::default());
    assert_eq!(file.hash, treefs::name_hash("a.txt"));

    let names: Vec<&str> = listing.iter().map(|e| e.name.as_str()).collect();
    let dir = fs.resolve("/tmp").unwrap();
    let index_order: Vec<String> = dir.children().iter().map(|c| c.name().to_string()).collect();
    assert_eq!(names, index_order);
}

/// chmod parses octal modes and rejects malformed ones
#[test]
fn test_chmod_modes() {
    let fs = seeded();
    fs.touch("/tmp/f").unwrap();
    let perms = fs.chmod("640", "/tmp/f").unwrap();
    assert_eq!(perms.to_string(), "rw-r-----");
    assert_eq!(perms.mode(), "640");

    for bad in ["8", "7777", "abc", "78", ""] {
        assert!(
            matches!(fs.chmod(bad, "/tmp/f"), Err(FsError::InvalidMode(_))),
            "mode {:?} accepted",
            bad
        );
    }
}

/// Removing a subtree drops its entries once no handle remains
#[test]
fn test_remove_subtree_releases_entries() {
    let mut fs = seeded();
    fs.mkdir_all("/var/log/app").unwrap();
    fs.write("/var/log/app/out.log", "data").unwrap();
    let weak = Arc::downgrade(&fs.resolve("/var/log/app/out.log").unwrap());

    fs.remove("/var/log", true).unwrap();
    assert!(weak.upgrade().is_none());
    assert!(matches!(fs.resolve("/var/log"), Err(FsError::NotFound(_))));
    assert!(fs.list("/var").unwrap().is_empty());
}

/// Directory indexes stay balanced with many children
#[test]
fn test_large_directory_stats() {
    let fs = seeded();
    for i in 0..1000 {
        fs.touch(&format!("/tmp/file_{:05}.txt", i)).unwrap();
    }
    let stats = fs.index_stats("/tmp").unwrap();
    assert_eq!(stats.size, 1000);
    assert!(stats.balanced);
    assert_eq!(fs.search("file_0099", "/tmp").unwrap().len(), 10);
}

/// Sessions can share one tree across threads through the per-directory locks
#[test]
fn test_concurrent_creates_in_separate_directories() {
    let fs = Arc::new(seeded());
    let handles: Vec<_> = (0..4)
        .map(|t| {
            let fs = Arc::clone(&fs);
            std::thread::spawn(move || {
                let dir = format!("/tmp/worker{}", t);
                fs.mkdir(&dir).unwrap();
                for i in 0..50 {
                    fs.write(&format!("{}/f{}", dir, i), "x").unwrap();
                }
            })
        })
        .collect();
    for handle in handles {
        handle.join().unwrap();
    }

    for t in 0..4 {
        assert_eq!(fs.list(&format!("/tmp/worker{}", t)).unwrap().len(), 50);
    }
}
