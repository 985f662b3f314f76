//! In-memory namespace: a tree of directory indexes whose leaves are files
//! backed by content buffers.

pub mod entry;
pub mod filesystem;
pub mod path;
pub mod permissions;
pub mod walker;

pub use entry::{DirectoryIndex, Entry, EntryKind, EntryNode};
pub use filesystem::{EntryInfo, FileSystem};
pub use permissions::Permissions;
pub use walker::{Visit, Walker};
