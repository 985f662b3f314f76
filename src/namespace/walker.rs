//! Depth-first walker over a namespace subtree

use crate::namespace::entry::Entry;
use crate::namespace::path;
use std::sync::Arc;

/// One entry visited by the walker.
#[derive(Debug, Clone)]
pub struct Visit {
    pub entry: Arc<Entry>,
    /// Absolute path of the entry.
    pub path: String,
    /// 0 for the walk's direct children.
    pub depth: usize,
    /// Last child of its directory in index order.
    pub is_last: bool,
    /// For each ancestor level above this one, whether that ancestor was the last child.
    pub ancestors_last: Vec<bool>,
}

/// Pre-order walker over everything below a directory.
///
/// Children are visited in index order (by name hash, then name).
pub struct Walker {
    root: Arc<Entry>,
    max_depth: Option<usize>,
}

impl Walker {
    pub fn new(root: Arc<Entry>) -> Self {
        Self {
            root,
            max_depth: None,
        }
    }

    /// Stop descending below `depth` (0 = direct children only).
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.max_depth = Some(depth);
        self
    }

    /// Collect every entry below the root, excluding the root itself.
    pub fn walk(&self) -> Vec<Visit> {
        let mut visits = Vec::new();
        let base = self.root.path();
        self.visit_children(&self.root, &base, 0, &mut Vec::new(), &mut visits);
        visits
    }

    fn visit_children(
        &self,
        dir: &Arc<Entry>,
        dir_path: &str,
        depth: usize,
        ancestors_last: &mut Vec<bool>,
        out: &mut Vec<Visit>,
    ) {
        let children = dir.children();
        let count = children.len();

        for (i, child) in children.into_iter().enumerate() {
            let is_last = i + 1 == count;
            let child_path = path::join(dir_path, child.name());

            out.push(Visit {
                entry: Arc::clone(&child),
                path: child_path.clone(),
                depth,
                is_last,
                ancestors_last: ancestors_last.clone(),
            });

            let descend = child.is_directory() && self.max_depth.map_or(true, |max| depth < max);
            if descend {
                ancestors_last.push(is_last);
                self.visit_children(&child, &child_path, depth + 1, ancestors_last, out);
                ancestors_last.pop();
            }
        }
    }
}
