//! Hash-ordered AVL index over the children of one directory.
//!
//! Entries are ordered by `(name_hash(name), name)`. Names whose hashes
//! collide form a small sub-tree ordered by name instead of a chain, so a
//! lookup that lands on a hash match with a different name probes both
//! children (left first).
//!
//! Rebalancing is functional: every recursive step takes an owned subtree
//! and hands a rebalanced owned subtree back to its caller, so each ancestor
//! on the path to the root is rebalanced on the way up.

pub mod hasher;
pub mod stats;

pub use hasher::name_hash;
pub use stats::IndexStats;

use std::cmp::Ordering;
use tracing::trace;

type Link<V> = Option<Box<IndexNode<V>>>;

struct IndexNode<V> {
    hash: u32,
    name: String,
    value: V,
    height: usize,
    left: Link<V>,
    right: Link<V>,
}

impl<V> IndexNode<V> {
    fn leaf(hash: u32, name: String, value: V) -> Box<Self> {
        Box::new(Self {
            hash,
            name,
            value,
            height: 1,
            left: None,
            right: None,
        })
    }

    fn update_height(&mut self) {
        self.height = 1 + height(&self.left).max(height(&self.right));
    }

    fn balance_factor(&self) -> isize {
        height(&self.left) as isize - height(&self.right) as isize
    }
}

fn height<V>(link: &Link<V>) -> usize {
    link.as_ref().map_or(0, |n| n.height)
}

fn balance_factor<V>(link: &Link<V>) -> isize {
    link.as_ref().map_or(0, |n| n.balance_factor())
}

fn rotate_right<V>(mut y: Box<IndexNode<V>>) -> Box<IndexNode<V>> {
    let Some(mut x) = y.left.take() else {
        return y;
    };
    y.left = x.right.take();
    y.update_height();
    x.right = Some(y);
    x.update_height();
    x
}

fn rotate_left<V>(mut x: Box<IndexNode<V>>) -> Box<IndexNode<V>> {
    let Some(mut y) = x.right.take() else {
        return x;
    };
    x.right = y.left.take();
    x.update_height();
    y.left = Some(x);
    y.update_height();
    y
}

/// Restore the AVL property at `node`, assuming both subtrees already hold it.
fn balance<V>(mut node: Box<IndexNode<V>>) -> Box<IndexNode<V>> {
    node.update_height();
    let bf = node.balance_factor();

    if bf > 1 {
        if balance_factor(&node.left) < 0 {
            trace!(hash = node.hash, "left-right rotation");
            node.left = node.left.take().map(rotate_left);
        } else {
            trace!(hash = node.hash, "right rotation");
        }
        return rotate_right(node);
    }

    if bf < -1 {
        if balance_factor(&node.right) > 0 {
            trace!(hash = node.hash, "right-left rotation");
            node.right = node.right.take().map(rotate_right);
        } else {
            trace!(hash = node.hash, "left rotation");
        }
        return rotate_left(node);
    }

    node
}

fn insert_node<V>(link: Link<V>, hash: u32, name: String, value: V) -> Box<IndexNode<V>> {
    let Some(mut node) = link else {
        return IndexNode::leaf(hash, name, value);
    };

    let go_left = match hash.cmp(&node.hash) {
        Ordering::Less => true,
        Ordering::Greater => false,
        Ordering::Equal => name < node.name,
    };

    if go_left {
        node.left = Some(insert_node(node.left.take(), hash, name, value));
    } else {
        node.right = Some(insert_node(node.right.take(), hash, name, value));
    }

    balance(node)
}

fn find_node<'a, V>(link: &'a Link<V>, hash: u32, name: &str) -> Option<&'a IndexNode<V>> {
    let node = link.as_deref()?;
    match hash.cmp(&node.hash) {
        Ordering::Less => find_node(&node.left, hash, name),
        Ordering::Greater => find_node(&node.right, hash, name),
        Ordering::Equal if node.name == name => Some(node),
        Ordering::Equal => {
            find_node(&node.left, hash, name).or_else(|| find_node(&node.right, hash, name))
        }
    }
}

/// Detach the leftmost node of `node`, rebalancing every ancestor.
///
/// Returns the remaining subtree and the detached node.
fn take_min<V>(mut node: Box<IndexNode<V>>) -> (Link<V>, Box<IndexNode<V>>) {
    match node.left.take() {
        None => {
            let rest = node.right.take();
            (rest, node)
        }
        Some(left) => {
            let (rest, min) = take_min(left);
            node.left = rest;
            (Some(balance(node)), min)
        }
    }
}

fn remove_node<V>(link: Link<V>, hash: u32, name: &str) -> (Link<V>, Option<V>) {
    let Some(mut node) = link else {
        return (None, None);
    };

    let removed = match hash.cmp(&node.hash) {
        Ordering::Less => {
            let (left, removed) = remove_node(node.left.take(), hash, name);
            node.left = left;
            removed
        }
        Ordering::Greater => {
            let (right, removed) = remove_node(node.right.take(), hash, name);
            node.right = right;
            removed
        }
        Ordering::Equal if node.name == name => {
            return match (node.left.take(), node.right.take()) {
                (None, None) => (None, Some(node.value)),
                (Some(child), None) | (None, Some(child)) => (Some(child), Some(node.value)),
                (Some(left), Some(right)) => {
                    // Two children: the in-order successor takes this node's place.
                    let (right, successor) = take_min(right);
                    let successor = *successor;
                    node.hash = successor.hash;
                    node.name = successor.name;
                    let removed = std::mem::replace(&mut node.value, successor.value);
                    node.left = Some(left);
                    node.right = right;
                    (Some(balance(node)), Some(removed))
                }
            };
        }
        Ordering::Equal => {
            // Collision sibling: it may sit on either side.
            let (left, mut removed) = remove_node(node.left.take(), hash, name);
            node.left = left;
            if removed.is_none() {
                let (right, from_right) = remove_node(node.right.take(), hash, name);
                node.right = right;
                removed = from_right;
            }
            removed
        }
    };

    (Some(balance(node)), removed)
}

/// AVL tree keyed by `(name_hash(name), name)`.
///
/// Duplicate names are not rejected here; uniqueness is the caller's job.
pub struct HashIndex<V> {
    root: Link<V>,
    len: usize,
}

impl<V> Default for HashIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> HashIndex<V> {
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Insert `value` under `name`. Always succeeds.
    pub fn insert(&mut self, name: impl Into<String>, value: V) {
        let name = name.into();
        let hash = name_hash(&name);
        self.root = Some(insert_node(self.root.take(), hash, name, value));
        self.len += 1;
    }

    pub fn find(&self, name: &str) -> Option<&V> {
        find_node(&self.root, name_hash(name), name).map(|n| &n.value)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.find(name).is_some()
    }

    /// Remove the entry stored under `name`, returning its value.
    ///
    /// `None` means nothing was removed and the index is unchanged.
    pub fn remove(&mut self, name: &str) -> Option<V> {
        let (root, removed) = remove_node(self.root.take(), name_hash(name), name);
        self.root = root;
        if removed.is_some() {
            self.len -= 1;
        }
        removed
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn height(&self) -> usize {
        height(&self.root)
    }

    /// In-order iterator over `(name, value)` in `(hash, name)` order.
    ///
    /// This is neither alphabetical nor insertion order.
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter { stack: Vec::new() };
        iter.push_left(&self.root);
        iter
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.iter().map(|(_, v)| v)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.iter().map(|(name, _)| name)
    }

    pub fn stats(&self) -> IndexStats {
        IndexStats::compute(self.len, self.height())
    }

    /// Check ordering, height bookkeeping and the AVL balance at every node.
    pub fn is_well_formed(&self) -> bool {
        fn check<V>(link: &Link<V>) -> Option<usize> {
            let Some(node) = link.as_deref() else {
                return Some(0);
            };
            let lh = check(&node.left)?;
            let rh = check(&node.right)?;
            if lh.abs_diff(rh) > 1 || node.height != 1 + lh.max(rh) {
                return None;
            }
            Some(node.height)
        }

        let keys: Vec<(u32, &str)> = self.iter().map(|(name, _)| (name_hash(name), name)).collect();
        let ordered = keys.windows(2).all(|w| w[0] <= w[1]);
        ordered && keys.len() == self.len && check(&self.root).is_some()
    }
}

/// In-order iterator over a [`HashIndex`].
pub struct Iter<'a, V> {
    stack: Vec<&'a IndexNode<V>>,
}

impl<'a, V> Iter<'a, V> {
    fn push_left(&mut self, mut link: &'a Link<V>) {
        while let Some(node) = link.as_deref() {
            self.stack.push(node);
            link = &node.left;
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (&'a str, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        self.push_left(&node.right);
        Some((node.name.as_str(), &node.value))
    }
}

impl<'a, V> IntoIterator for &'a HashIndex<V> {
    type Item = (&'a str, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
