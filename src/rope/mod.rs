//! Content buffer: a weight-balanced rope over the bytes of one file.
//!
//! Offsets are byte offsets. `split` is non-destructive and returns two
//! independent buffers; `insert`, `append` and `delete_substring` replace
//! the owning buffer's root. A failed mutation leaves the buffer untouched.

pub mod node;

pub use node::MAX_LEAF_LEN;

use crate::error::BufferError;
use node::Link;
use std::fmt;
use tracing::debug;

#[derive(Clone, Default)]
pub struct ContentBuffer {
    root: Link,
}

impl ContentBuffer {
    /// Empty buffer.
    pub fn new() -> Self {
        Self { root: None }
    }

    pub fn from_text(text: impl AsRef<[u8]>) -> Self {
        Self {
            root: node::build(text.as_ref()),
        }
    }

    pub fn len(&self) -> usize {
        node::len(&self.root)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn height(&self) -> usize {
        node::height(&self.root)
    }

    pub fn byte_at(&self, index: usize) -> Option<u8> {
        self.root.as_ref()?.byte_at(index)
    }

    /// Flatten to a contiguous byte vector. O(n).
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut out = Vec::with_capacity(self.len());
        if let Some(root) = &self.root {
            root.write_to(&mut out);
        }
        out
    }

    /// Splice `text` in at byte offset `pos`.
    pub fn insert(&mut self, pos: usize, text: impl AsRef<[u8]>) -> Result<(), BufferError> {
        let text = text.as_ref();
        if text.is_empty() {
            return Err(BufferError::EmptyText);
        }
        let len = self.len();
        if pos > len {
            return Err(BufferError::InvalidPosition { pos, len });
        }

        let (left, right) = self.split_link(pos);
        let middle = node::build(text);
        self.root = node::concat(node::concat(left, middle), right);

        debug!(pos, inserted = text.len(), len = len + text.len(), "rope insert");
        Ok(())
    }

    /// Concatenate `text` onto the end; the previous root becomes the left side.
    pub fn append(&mut self, text: impl AsRef<[u8]>) -> Result<(), BufferError> {
        let text = text.as_ref();
        if text.is_empty() {
            return Err(BufferError::EmptyText);
        }
        let tail = node::build(text);
        self.root = node::concat(self.root.take(), tail);
        debug!(appended = text.len(), "rope append");
        Ok(())
    }

    /// Byte offset of the first occurrence of `needle`. Linear scan over the
    /// flattened text; an empty needle matches at 0.
    pub fn find(&self, needle: impl AsRef<[u8]>) -> Option<usize> {
        find_bytes(&self.to_bytes(), needle.as_ref())
    }

    /// Remove the first occurrence of `needle`, returning the offset it was found at.
    pub fn delete_substring(&mut self, needle: impl AsRef<[u8]>) -> Result<usize, BufferError> {
        let needle = needle.as_ref();
        if needle.is_empty() {
            return Err(BufferError::EmptyText);
        }
        let Some(pos) = self.find(needle) else {
            return Err(BufferError::NotFound(
                String::from_utf8_lossy(needle).into_owned(),
            ));
        };

        let (left, rest) = self.split_link(pos);
        let right = match &rest {
            Some(rest) => node::split(rest, needle.len()).1,
            None => None,
        };
        self.root = node::concat(left, right);

        debug!(pos, removed = needle.len(), "rope delete");
        Ok(pos)
    }

    /// Split into `[0, pos)` and `[pos, len)` without modifying `self`.
    ///
    /// Positions past the end put everything on the left.
    pub fn split(&self, pos: usize) -> (ContentBuffer, ContentBuffer) {
        let (left, right) = self.split_link(pos);
        (Self { root: left }, Self { root: right })
    }

    /// Join two buffers into a new balanced one.
    pub fn concat(left: ContentBuffer, right: ContentBuffer) -> ContentBuffer {
        Self {
            root: node::concat(left.root, right.root),
        }
    }

    /// Check weight, height and balance bookkeeping at every node.
    pub fn is_well_formed(&self) -> bool {
        match &self.root {
            None => true,
            Some(root) => root.check().is_some(),
        }
    }

    fn split_link(&self, pos: usize) -> (Link, Link) {
        match &self.root {
            Some(root) => node::split(root, pos),
            None => (None, None),
        }
    }
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() {
        return Some(0);
    }
    if needle.len() > haystack.len() {
        return None;
    }
    haystack.windows(needle.len()).position(|w| w == needle)
}

impl fmt::Display for ContentBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&String::from_utf8_lossy(&self.to_bytes()))
    }
}

impl fmt::Debug for ContentBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentBuffer")
            .field("len", &self.len())
            .field("height", &self.height())
            .finish()
    }
}

impl From<&str> for ContentBuffer {
    fn from(text: &str) -> Self {
        Self::from_text(text)
    }
}

impl From<String> for ContentBuffer {
    fn from(text: String) -> Self {
        Self::from_text(text)
    }
}
