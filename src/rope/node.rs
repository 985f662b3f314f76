//! Rope fragments and the functional primitives over them.
//!
//! Fragments are immutable once built and shared through `Arc`, so `split`
//! can hand back pieces that reuse untouched subtrees while the source tree
//! stays intact. Rotations build fresh nodes for the two nodes being rotated
//! instead of mutating shared ones.

use std::sync::Arc;
use tracing::trace;

/// Longest run of bytes a single leaf holds.
pub const MAX_LEAF_LEN: usize = 8;

pub(crate) type Link = Option<Arc<Fragment>>;

#[derive(Debug)]
pub(crate) enum Fragment {
    Leaf(Box<[u8]>),
    Branch(Branch),
}

#[derive(Debug)]
pub(crate) struct Branch {
    /// Total length of the left subtree.
    pub(crate) weight: usize,
    pub(crate) height: usize,
    pub(crate) left: Arc<Fragment>,
    pub(crate) right: Arc<Fragment>,
}

impl Fragment {
    pub(crate) fn height(&self) -> usize {
        match self {
            Fragment::Leaf(_) => 1,
            Fragment::Branch(b) => b.height,
        }
    }

    /// Total length, following the right spine: O(height).
    pub(crate) fn len(&self) -> usize {
        match self {
            Fragment::Leaf(text) => text.len(),
            Fragment::Branch(b) => b.weight + b.right.len(),
        }
    }

    fn balance_factor(&self) -> isize {
        match self {
            Fragment::Leaf(_) => 0,
            Fragment::Branch(b) => b.left.height() as isize - b.right.height() as isize,
        }
    }

    pub(crate) fn byte_at(&self, index: usize) -> Option<u8> {
        match self {
            Fragment::Leaf(text) => text.get(index).copied(),
            Fragment::Branch(b) if index < b.weight => b.left.byte_at(index),
            Fragment::Branch(b) => b.right.byte_at(index - b.weight),
        }
    }

    pub(crate) fn write_to(&self, out: &mut Vec<u8>) {
        match self {
            Fragment::Leaf(text) => out.extend_from_slice(text),
            Fragment::Branch(b) => {
                b.left.write_to(out);
                b.right.write_to(out);
            }
        }
    }

    /// Verify weight, height and balance at every node. Returns `(len, height)`.
    pub(crate) fn check(&self) -> Option<(usize, usize)> {
        match self {
            Fragment::Leaf(text) if text.is_empty() || text.len() > MAX_LEAF_LEN => None,
            Fragment::Leaf(text) => Some((text.len(), 1)),
            Fragment::Branch(b) => {
                let (llen, lh) = b.left.check()?;
                let (rlen, rh) = b.right.check()?;
                let ok = b.weight == llen && b.height == 1 + lh.max(rh) && lh.abs_diff(rh) <= 1;
                ok.then_some((llen + rlen, b.height))
            }
        }
    }
}

pub(crate) fn height(link: &Link) -> usize {
    link.as_ref().map_or(0, |f| f.height())
}

pub(crate) fn len(link: &Link) -> usize {
    link.as_ref().map_or(0, |f| f.len())
}

fn leaf(text: &[u8]) -> Arc<Fragment> {
    Arc::new(Fragment::Leaf(text.into()))
}

/// A new branch over `left` and `right` with fresh metadata. No rebalancing.
fn branch(left: Arc<Fragment>, right: Arc<Fragment>) -> Arc<Fragment> {
    Arc::new(Fragment::Branch(Branch {
        weight: left.len(),
        height: 1 + left.height().max(right.height()),
        left,
        right,
    }))
}

/// Right rotation of the branch `(left, right)`, where `left` is a branch `(a, b)`:
/// yields `(a, (b, right))`.
fn rotate_right(left: &Arc<Fragment>, right: Arc<Fragment>) -> Arc<Fragment> {
    match &**left {
        Fragment::Branch(q) => branch(Arc::clone(&q.left), branch(Arc::clone(&q.right), right)),
        Fragment::Leaf(_) => branch(Arc::clone(left), right),
    }
}

/// Left rotation of the branch `(left, right)`, where `right` is a branch `(b, c)`:
/// yields `((left, b), c)`.
fn rotate_left(left: Arc<Fragment>, right: &Arc<Fragment>) -> Arc<Fragment> {
    match &**right {
        Fragment::Branch(q) => branch(branch(left, Arc::clone(&q.left)), Arc::clone(&q.right)),
        Fragment::Leaf(_) => branch(left, Arc::clone(right)),
    }
}

/// Join `left` and `right` under a new branch, restoring the AVL property.
///
/// Both inputs must already be balanced and differ in height by at most two.
fn balance(left: Arc<Fragment>, right: Arc<Fragment>) -> Arc<Fragment> {
    let bf = left.height() as isize - right.height() as isize;

    if bf > 1 {
        let left = if left.balance_factor() < 0 {
            trace!("rope left-right rotation");
            match &*left {
                Fragment::Branch(p) => rotate_left(Arc::clone(&p.left), &p.right),
                Fragment::Leaf(_) => left,
            }
        } else {
            left
        };
        return rotate_right(&left, right);
    }

    if bf < -1 {
        let right = if right.balance_factor() > 0 {
            trace!("rope right-left rotation");
            match &*right {
                Fragment::Branch(p) => rotate_right(&p.left, Arc::clone(&p.right)),
                Fragment::Leaf(_) => right,
            }
        } else {
            right
        };
        return rotate_left(left, &right);
    }

    branch(left, right)
}

/// Concatenate two ropes.
///
/// When heights differ by more than one, the shorter rope is joined into
/// the taller one's inner spine and every ancestor on the way back up is
/// rebalanced, so the result is balanced at every node.
pub(crate) fn concat(left: Link, right: Link) -> Link {
    match (left, right) {
        (None, right) => right,
        (left, None) => left,
        (Some(l), Some(r)) => Some(join(l, r)),
    }
}

fn join(left: Arc<Fragment>, right: Arc<Fragment>) -> Arc<Fragment> {
    let (lh, rh) = (left.height(), right.height());

    if lh > rh + 1 {
        if let Fragment::Branch(b) = &*left {
            let inner = join(Arc::clone(&b.right), right);
            return balance(Arc::clone(&b.left), inner);
        }
    } else if rh > lh + 1 {
        if let Fragment::Branch(b) = &*right {
            let inner = join(left, Arc::clone(&b.left));
            return balance(inner, Arc::clone(&b.right));
        }
    }

    balance(left, right)
}

/// Build a balanced rope over `text` by midpoint division.
pub(crate) fn build(text: &[u8]) -> Link {
    if text.is_empty() {
        return None;
    }
    if text.len() <= MAX_LEAF_LEN {
        return Some(leaf(text));
    }
    let mid = text.len() / 2;
    concat(build(&text[..mid]), build(&text[mid..]))
}

/// Split at `pos` without touching `node`.
///
/// Untouched subtrees are shared with the source; only the nodes on the
/// split path are rebuilt. Positions past the end yield `(whole, None)`.
pub(crate) fn split(node: &Arc<Fragment>, pos: usize) -> (Link, Link) {
    match &**node {
        Fragment::Leaf(text) => {
            if pos == 0 {
                (None, Some(Arc::clone(node)))
            } else if pos >= text.len() {
                (Some(Arc::clone(node)), None)
            } else {
                (Some(leaf(&text[..pos])), Some(leaf(&text[pos..])))
            }
        }
        Fragment::Branch(b) => {
            if pos <= b.weight {
                let (l1, l2) = split(&b.left, pos);
                (l1, concat(l2, Some(Arc::clone(&b.right))))
            } else {
                let (r1, r2) = split(&b.right, pos - b.weight);
                (concat(Some(Arc::clone(&b.left)), r1), r2)
            }
        }
    }
}
