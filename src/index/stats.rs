//! Balance diagnostics for the directory index.
//!
//! Purely informational: an imbalance report never blocks an operation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Upper bound factor on AVL height relative to `log2(size + 1)`.
pub const AVL_HEIGHT_FACTOR: f64 = 1.44;

/// Size and height snapshot of one index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct IndexStats {
    pub size: usize,
    pub height: usize,
    /// Smallest height a binary tree of `size` nodes can have: `ceil(log2(size + 1))`.
    pub min_height: usize,
    /// `1.44 * log2(size + 1)`; heights above this are flagged.
    pub height_bound: f64,
    pub balanced: bool,
}

impl IndexStats {
    pub fn compute(size: usize, height: usize) -> Self {
        let log = ((size + 1) as f64).log2();
        let min_height = if size == 0 { 0 } else { log.ceil() as usize };
        let height_bound = AVL_HEIGHT_FACTOR * log;

        Self {
            size,
            height,
            min_height,
            height_bound,
            balanced: height as f64 <= height_bound,
        }
    }
}

impl fmt::Display for IndexStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "entries: {}, height: {} (min: {}), balance: {}",
            self.size,
            self.height,
            self.min_height,
            if self.balanced { "OK" } else { "Warning" }
        )
    }
}
