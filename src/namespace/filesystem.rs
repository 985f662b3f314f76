//! Filesystem session facade.
//!
//! Owns the root directory, the current directory and the debug flag.
//! Resolves paths by walking directory indexes one component at a time,
//! enforces owner permission bits, and forwards file edits to the content
//! buffers of resolved entries.

use crate::error::FsError;
use crate::index::IndexStats;
use crate::namespace::entry::{Entry, EntryKind};
use crate::namespace::path::{self, Component};
use crate::namespace::permissions::Permissions;
use crate::namespace::walker::{Visit, Walker};
use crate::rope::ContentBuffer;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, info, instrument};

/// Listing row for one directory child.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntryInfo {
    pub name: String,
    pub kind: EntryKind,
    pub permissions: Permissions,
    pub size: usize,
    pub hash: u32,
}

impl EntryInfo {
    pub fn from_entry(entry: &Entry) -> Self {
        Self {
            name: entry.name().to_string(),
            kind: entry.kind(),
            permissions: entry.permissions(),
            size: entry.size(),
            hash: entry.name_hash(),
        }
    }
}

pub struct FileSystem {
    root: Arc<Entry>,
    cwd: Arc<Entry>,
    debug: bool,
}

impl Default for FileSystem {
    fn default() -> Self {
        Self::new()
    }
}

impl FileSystem {
    pub fn new() -> Self {
        let root = Entry::new_root();
        info!("filesystem initialized");
        Self {
            cwd: Arc::clone(&root),
            root,
            debug: false,
        }
    }

    pub fn root(&self) -> &Arc<Entry> {
        &self.root
    }

    pub fn current_dir(&self) -> &Arc<Entry> {
        &self.cwd
    }

    pub fn pwd(&self) -> String {
        self.cwd.path()
    }

    pub fn is_debug(&self) -> bool {
        self.debug
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Flip debug mode and return the new state.
    pub fn toggle_debug(&mut self) -> bool {
        self.debug = !self.debug;
        self.debug
    }

    /// Resolve an absolute or cwd-relative path to an entry.
    pub fn resolve(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        if path.is_empty() {
            return Err(FsError::InvalidPath(path.to_string()));
        }

        let mut current = if path::is_absolute(path) {
            Arc::clone(&self.root)
        } else {
            Arc::clone(&self.cwd)
        };

        for component in path::components(path) {
            if !current.is_directory() {
                return Err(FsError::NotADirectory(path.to_string()));
            }
            current = match component {
                // `..` at the root stays at the root.
                Component::Parent => current.parent().unwrap_or(current),
                Component::Name(name) => current
                    .find_child(name)
                    .ok_or_else(|| FsError::NotFound(path.to_string()))?,
            };
        }

        Ok(current)
    }

    fn resolve_dir(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        let entry = self.resolve(path)?;
        if !entry.is_directory() {
            return Err(FsError::NotADirectory(path.to_string()));
        }
        Ok(entry)
    }

    fn resolve_file(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        let entry = self.resolve(path)?;
        if !entry.is_file() {
            return Err(FsError::IsADirectory(path.to_string()));
        }
        Ok(entry)
    }

    /// Resolve the directory that holds (or would hold) `path`, plus the final name.
    fn resolve_parent<'p>(&self, path: &'p str) -> Result<(Arc<Entry>, &'p str), FsError> {
        let (parent, name) =
            path::split_parent(path).ok_or_else(|| FsError::InvalidPath(path.to_string()))?;
        let dir = if parent.is_empty() {
            Arc::clone(&self.cwd)
        } else {
            self.resolve(parent)?
        };
        if !dir.is_directory() {
            return Err(FsError::NotADirectory(parent.to_string()));
        }
        Ok((dir, name))
    }

    /// Insert a new child under `dir` unless the name is taken.
    ///
    /// The existence check and the insertion happen under one write lock.
    fn create_child(
        &self,
        dir: &Arc<Entry>,
        name: &str,
        path: &str,
        make: impl FnOnce() -> Arc<Entry>,
    ) -> Result<Arc<Entry>, FsError> {
        if !dir.permissions().can_write() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        let index = dir
            .index()
            .ok_or_else(|| FsError::NotADirectory(dir.path()))?;

        let mut index = index.write();
        if index.contains(name) {
            return Err(FsError::AlreadyExists(path.to_string()));
        }
        let child = make();
        index.insert(name, Arc::clone(&child));
        drop(index);

        if self.debug {
            info!(name, hash = child.name_hash(), kind = %child.kind(), "index insert");
        }
        debug!(path = %child.path(), "created entry");
        Ok(child)
    }

    /// Change the current directory. The target needs the owner execute bit.
    pub fn cd(&mut self, path: &str) -> Result<(), FsError> {
        let target = self.resolve_dir(path)?;
        if !target.permissions().can_execute() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        self.cwd = target;
        Ok(())
    }

    /// Create one directory; its parent must already exist.
    #[instrument(skip(self))]
    pub fn mkdir(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        let (dir, name) = self.resolve_parent(path)?;
        self.create_child(&dir, name, path, || Entry::new_directory(name, &dir))
    }

    /// Create a directory and any missing ancestors. Existing directories are reused.
    pub fn mkdir_all(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        let mut current = if path::is_absolute(path) {
            Arc::clone(&self.root)
        } else {
            Arc::clone(&self.cwd)
        };

        for component in path::components(path) {
            current = match component {
                Component::Parent => current.parent().unwrap_or(current),
                Component::Name(name) => match current.find_child(name) {
                    Some(existing) if existing.is_directory() => existing,
                    Some(_) => return Err(FsError::NotADirectory(path.to_string())),
                    None => {
                        let parent = Arc::clone(&current);
                        self.create_child(&current, name, path, || {
                            Entry::new_directory(name, &parent)
                        })?
                    }
                },
            };
        }
        Ok(current)
    }

    /// Create an empty file. An existing entry of either kind is left as is.
    pub fn touch(&self, path: &str) -> Result<Arc<Entry>, FsError> {
        if let Ok(existing) = self.resolve(path) {
            return Ok(existing);
        }
        let (dir, name) = self.resolve_parent(path)?;
        self.create_child(&dir, name, path, || {
            Entry::new_file(name, &dir, ContentBuffer::new())
        })
    }

    /// Replace a file's content, creating the file if needed.
    pub fn write(&self, path: &str, text: &str) -> Result<(), FsError> {
        match self.resolve(path) {
            Ok(entry) => {
                let content = writable_content(&entry, path)?;
                *content.write() = ContentBuffer::from_text(text);
                Ok(())
            }
            Err(FsError::NotFound(_)) => {
                let (dir, name) = self.resolve_parent(path)?;
                self.create_child(&dir, name, path, || {
                    Entry::new_file(name, &dir, ContentBuffer::from_text(text))
                })?;
                Ok(())
            }
            Err(e) => Err(e),
        }
    }

    /// Append to a file, creating it if needed.
    pub fn append(&self, path: &str, text: &str) -> Result<(), FsError> {
        match self.resolve(path) {
            Ok(entry) => {
                let content = writable_content(&entry, path)?;
                content.write().append(text)?;
                Ok(())
            }
            Err(FsError::NotFound(_)) => self.write(path, text),
            Err(e) => Err(e),
        }
    }

    pub fn read(&self, path: &str) -> Result<String, FsError> {
        let entry = self.resolve_file(path)?;
        if !entry.permissions().can_read() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        let text = entry.content().map(|c| c.read().to_string());
        Ok(text.unwrap_or_default())
    }

    pub fn insert(&self, path: &str, pos: usize, text: &str) -> Result<(), FsError> {
        let entry = self.resolve(path)?;
        let content = writable_content(&entry, path)?;
        content.write().insert(pos, text)?;
        Ok(())
    }

    /// Delete the first occurrence of `needle`, returning its offset.
    pub fn delete(&self, path: &str, needle: &str) -> Result<usize, FsError> {
        let entry = self.resolve(path)?;
        let content = writable_content(&entry, path)?;
        let pos = content.write().delete_substring(needle)?;
        Ok(pos)
    }

    pub fn find_in_file(&self, path: &str, needle: &str) -> Result<Option<usize>, FsError> {
        let entry = self.resolve_file(path)?;
        if !entry.permissions().can_read() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        Ok(entry.content().and_then(|c| c.read().find(needle)))
    }

    /// Remove a file, or a directory and its subtree when `recursive`.
    pub fn remove(&mut self, path: &str, recursive: bool) -> Result<(), FsError> {
        let target = self.resolve(path)?;
        if Arc::ptr_eq(&target, &self.root) {
            return Err(FsError::RootRemoval);
        }
        if target.is_directory() && !recursive {
            return Err(FsError::DirectoryNotEmpty(path.to_string()));
        }
        let parent = target
            .parent()
            .ok_or_else(|| FsError::NotFound(path.to_string()))?;
        if !parent.permissions().can_write() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }

        let removed_path = target.path();
        if !parent.remove_child(target.name()) {
            return Err(FsError::NotFound(path.to_string()));
        }
        drop(target);
        info!(path = %removed_path, "removed entry");

        if !self.is_attached(&self.cwd) {
            debug!("current directory was removed, returning to root");
            self.cwd = Arc::clone(&self.root);
        }
        Ok(())
    }

    /// Children of a directory in index order.
    pub fn list(&self, path: &str) -> Result<Vec<EntryInfo>, FsError> {
        let dir = self.resolve_dir(path)?;
        if !dir.permissions().can_read() {
            return Err(FsError::PermissionDenied(path.to_string()));
        }
        Ok(dir
            .children()
            .iter()
            .map(|child| EntryInfo::from_entry(child))
            .collect())
    }

    /// Set permissions from a three-digit octal mode.
    pub fn chmod(&self, mode: &str, path: &str) -> Result<Permissions, FsError> {
        let permissions: Permissions = mode.parse()?;
        let entry = self.resolve(path)?;
        entry.set_permissions(permissions);
        Ok(permissions)
    }

    /// Absolute paths below `from` whose name contains `pattern`.
    pub fn search(&self, pattern: &str, from: &str) -> Result<Vec<String>, FsError> {
        let dir = self.resolve_dir(from)?;
        Ok(Walker::new(dir)
            .walk()
            .into_iter()
            .filter(|visit| visit.entry.name().contains(pattern))
            .map(|visit| visit.path)
            .collect())
    }

    /// Every entry below `path`, depth first.
    pub fn walk(&self, path: &str) -> Result<Vec<Visit>, FsError> {
        let dir = self.resolve_dir(path)?;
        Ok(Walker::new(dir).walk())
    }

    pub fn index_stats(&self, path: &str) -> Result<IndexStats, FsError> {
        let dir = self.resolve(path)?;
        dir.index_stats()
            .ok_or_else(|| FsError::NotADirectory(path.to_string()))
    }

    /// Whether `entry` is still reachable from the root through parent links.
    fn is_attached(&self, entry: &Arc<Entry>) -> bool {
        let mut current = Arc::clone(entry);
        loop {
            if Arc::ptr_eq(&current, &self.root) {
                return true;
            }
            let Some(parent) = current.parent() else {
                return false;
            };
            let still_linked = parent
                .find_child(current.name())
                .is_some_and(|child| Arc::ptr_eq(&child, &current));
            if !still_linked {
                return false;
            }
            current = parent;
        }
    }
}

fn writable_content<'e>(
    entry: &'e Entry,
    path: &str,
) -> Result<&'e parking_lot::RwLock<ContentBuffer>, FsError> {
    let content = entry
        .content()
        .ok_or_else(|| FsError::IsADirectory(path.to_string()))?;
    if !entry.permissions().can_write() {
        return Err(FsError::PermissionDenied(path.to_string()));
    }
    Ok(content)
}
