//! treefs: In-Memory Hierarchical Namespace
//!
//! Directories are AVL trees keyed by a rolling name hash, files are
//! persistent ropes, and a session facade plus a small shell sit on top.

pub mod cli;
pub mod config;
pub mod error;
pub mod index;
pub mod logging;
pub mod namespace;
pub mod rope;
pub mod shell;

pub use error::{ApiError, BufferError, FsError, ShellError};
pub use index::{name_hash, HashIndex, IndexStats};
pub use namespace::{Entry, EntryInfo, EntryKind, FileSystem, Permissions};
pub use rope::ContentBuffer;
pub use shell::{Shell, ShellOutcome};
