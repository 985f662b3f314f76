//! Namespace entries: files and directories.
//!
//! A directory's index holds the only strong reference to each child. The
//! `parent` link is a `Weak` back-reference used for path reconstruction
//! and never keeps a parent alive.
//!
//! Each directory index and each content buffer sits behind its own lock,
//! so edits to different directories or files never contend.

use crate::index::{name_hash, HashIndex, IndexStats};
use crate::namespace::permissions::Permissions;
use crate::rope::ContentBuffer;
use parking_lot::{Mutex, RwLock};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::debug;

/// Children of one directory, keyed by name.
pub type DirectoryIndex = HashIndex<Arc<Entry>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EntryKind {
    Directory,
    File,
}

impl fmt::Display for EntryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntryKind::Directory => write!(f, "DIR"),
            EntryKind::File => write!(f, "FILE"),
        }
    }
}

/// Payload of an entry: a child index or a content buffer, never both.
pub enum EntryNode {
    Directory(RwLock<DirectoryIndex>),
    File(RwLock<ContentBuffer>),
}

pub struct Entry {
    name: String,
    parent: Weak<Entry>,
    permissions: Mutex<Permissions>,
    node: EntryNode,
}

impl Entry {
    /// The root directory: unnamed and without a parent.
    pub fn new_root() -> Arc<Self> {
        Arc::new(Self {
            name: String::new(),
            parent: Weak::new(),
            permissions: Mutex::new(Permissions::default()),
            node: EntryNode::Directory(RwLock::new(DirectoryIndex::new())),
        })
    }

    /// A detached directory whose parent link points at `parent`.
    ///
    /// The caller still has to [`add_child`](Self::add_child) it.
    pub fn new_directory(name: impl Into<String>, parent: &Arc<Entry>) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Arc::downgrade(parent),
            permissions: Mutex::new(Permissions::default()),
            node: EntryNode::Directory(RwLock::new(DirectoryIndex::new())),
        })
    }

    pub fn new_file(
        name: impl Into<String>,
        parent: &Arc<Entry>,
        content: ContentBuffer,
    ) -> Arc<Self> {
        Arc::new(Self {
            name: name.into(),
            parent: Arc::downgrade(parent),
            permissions: Mutex::new(Permissions::default()),
            node: EntryNode::File(RwLock::new(content)),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn name_hash(&self) -> u32 {
        name_hash(&self.name)
    }

    pub fn kind(&self) -> EntryKind {
        match self.node {
            EntryNode::Directory(_) => EntryKind::Directory,
            EntryNode::File(_) => EntryKind::File,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == EntryKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind() == EntryKind::File
    }

    /// `None` for the root, or once the parent has been dropped.
    pub fn parent(&self) -> Option<Arc<Entry>> {
        self.parent.upgrade()
    }

    pub fn is_root(&self) -> bool {
        self.parent.upgrade().is_none() && self.name.is_empty()
    }

    pub fn permissions(&self) -> Permissions {
        *self.permissions.lock()
    }

    pub fn set_permissions(&self, permissions: Permissions) {
        *self.permissions.lock() = permissions;
    }

    pub fn node(&self) -> &EntryNode {
        &self.node
    }

    /// The content buffer of a file entry.
    pub fn content(&self) -> Option<&RwLock<ContentBuffer>> {
        match &self.node {
            EntryNode::File(content) => Some(content),
            EntryNode::Directory(_) => None,
        }
    }

    /// The child index of a directory entry.
    pub fn index(&self) -> Option<&RwLock<DirectoryIndex>> {
        match &self.node {
            EntryNode::Directory(index) => Some(index),
            EntryNode::File(_) => None,
        }
    }

    /// Byte length for files, 0 for directories.
    pub fn size(&self) -> usize {
        self.content().map_or(0, |c| c.read().len())
    }

    pub fn find_child(&self, name: &str) -> Option<Arc<Entry>> {
        self.index()?.read().find(name).cloned()
    }

    /// Insert `child` into this directory's index.
    ///
    /// Returns false (and drops nothing) when `self` is a file. Name
    /// uniqueness is checked by callers before adding.
    pub fn add_child(&self, child: Arc<Entry>) -> bool {
        let Some(index) = self.index() else {
            return false;
        };
        debug!(parent = %self.name, child = %child.name, hash = child.name_hash(), "add child");
        index.write().insert(child.name.clone(), child);
        true
    }

    /// Remove the child called `name`, dropping its whole subtree once no
    /// other handle to it remains.
    pub fn remove_child(&self, name: &str) -> bool {
        let Some(index) = self.index() else {
            return false;
        };
        let removed = index.write().remove(name);
        if removed.is_some() {
            debug!(parent = %self.name, child = %name, "remove child");
        }
        removed.is_some()
    }

    /// Snapshot of the children in index order (by name hash, then name).
    pub fn children(&self) -> Vec<Arc<Entry>> {
        match self.index() {
            Some(index) => index.read().values().cloned().collect(),
            None => Vec::new(),
        }
    }

    pub fn index_stats(&self) -> Option<IndexStats> {
        self.index().map(|index| index.read().stats())
    }

    /// Absolute path, rebuilt by walking parent links up to the root.
    pub fn path(&self) -> String {
        let mut components = vec![self.name.clone()];
        let mut current = self.parent();
        while let Some(entry) = current {
            components.push(entry.name.clone());
            current = entry.parent();
        }
        components.reverse();

        let path = components
            .iter()
            .filter(|c| !c.is_empty())
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join("/");
        format!("/{}", path)
    }
}

impl fmt::Debug for Entry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Entry")
            .field("name", &self.name)
            .field("kind", &self.kind())
            .field("permissions", &self.permissions())
            .finish()
    }
}
