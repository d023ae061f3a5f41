//! The aggregated AVL tree shared by [`crate::dynamic_vector`] and [`crate::dynamic_bp`].
//!
//! A [`Tree`] is either a [`Leaf`] block or an [`Internal`] node owning two further `Tree`s.
//! There are no parent pointers: every operation takes `&mut Tree` (or `&Tree` for read-only
//! queries) and recurses from the root down to the relevant leaf, rebuilding aggregates and
//! rebalancing on the way back up. This mirrors the recursive, parent-pointer-free design in
//! `Node.h`, translated from an owned-pointer-returns-new-root style into Rust's `&mut` in place
//! mutation.

use crate::leaf::{Leaf, MAX_LEN, MIN_LEN};
use crate::node::Internal;

/// A subtree: either a packed leaf block, or an internal node owning two further subtrees.
#[derive(Debug, PartialEq, Clone)]
pub enum Tree {
    Leaf(Leaf),
    Internal(Box<Internal>),
}

impl Tree {
    pub fn empty_leaf() -> Tree {
        Tree::Leaf(Leaf::empty())
    }

    pub fn is_leaf(&self) -> bool {
        matches!(self, Tree::Leaf(_))
    }

    pub fn height(&self) -> u8 {
        match self {
            Tree::Leaf(_) => 0,
            Tree::Internal(n) => n.height,
        }
    }

    pub fn total_excess(&self) -> i64 {
        match self {
            Tree::Leaf(l) => l.total_excess(),
            Tree::Internal(n) => n.total_excess,
        }
    }

    pub fn min_excess(&self) -> i64 {
        match self {
            Tree::Leaf(l) => l.min_excess(),
            Tree::Internal(n) => n.min_excess,
        }
    }

    pub fn min_times(&self) -> usize {
        match self {
            Tree::Leaf(l) => l.min_times(),
            Tree::Internal(n) => n.min_times,
        }
    }

    /// Total number of bits in this subtree. `O(1)` for a leaf, `O(size)` for an internal node
    /// (only used right after a split, where both children are always leaves).
    pub fn len_hint(&self) -> usize {
        match self {
            Tree::Leaf(l) => l.len(),
            Tree::Internal(n) => n.num + n.right.len_hint(),
        }
    }

    /// Total number of one-bits in this subtree. See [`Tree::len_hint`] for its cost.
    pub fn ones_hint(&self) -> usize {
        match self {
            Tree::Leaf(l) => l.ones(),
            Tree::Internal(n) => n.ones + n.right.ones_hint(),
        }
    }

    fn as_internal_mut(&mut self) -> &mut Internal {
        match self {
            Tree::Internal(n) => n,
            Tree::Leaf(_) => unreachable!("expected an internal node"),
        }
    }

    fn take_internal(tree: &mut Tree) -> Internal {
        match std::mem::replace(tree, Tree::empty_leaf()) {
            Tree::Internal(n) => *n,
            Tree::Leaf(_) => unreachable!("expected an internal node"),
        }
    }
}

/// Builds a balanced tree holding exactly `bits`, in order. Used for bulk construction from an
/// initial input string, rather than inserting one bit at a time.
pub fn build_balanced(bits: &[bool]) -> Tree {
    if bits.len() <= MAX_LEN as usize {
        return Tree::Leaf(Leaf::from_bits(bits));
    }
    // split into leaf-aligned halves so every leaf ends up within [MIN_LEN, MAX_LEN)
    let leaves = (bits.len() + MIN_LEN as usize - 1) / MIN_LEN as usize;
    let half = (leaves / 2) * MIN_LEN as usize;
    let (left_bits, right_bits) = bits.split_at(half.max(1).min(bits.len() - 1));
    let left = build_balanced(left_bits);
    let right = build_balanced(right_bits);
    Tree::Internal(Box::new(Internal::from_children(left, right)))
}

fn rotate_left(tree: &mut Tree) {
    tracing::trace!("rotate_left");
    let mut this = Tree::take_internal(tree);
    let mut new_root = Tree::take_internal(&mut this.right);
    this.right = std::mem::replace(&mut new_root.left, Tree::empty_leaf());
    this.recompute_height();
    this.recompute_excess();

    new_root.num += this.num;
    new_root.ones += this.ones;
    new_root.left = Tree::Internal(Box::new(this));
    new_root.recompute_height();
    new_root.recompute_excess();
    *tree = Tree::Internal(Box::new(new_root));
}

fn rotate_right(tree: &mut Tree) {
    tracing::trace!("rotate_right");
    let mut this = Tree::take_internal(tree);
    let mut new_root = Tree::take_internal(&mut this.left);
    this.left = std::mem::replace(&mut new_root.right, Tree::empty_leaf());
    this.num -= new_root.num;
    this.ones -= new_root.ones;
    this.recompute_height();
    this.recompute_excess();

    new_root.right = Tree::Internal(Box::new(this));
    new_root.recompute_height();
    new_root.recompute_excess();
    *tree = Tree::Internal(Box::new(new_root));
}

/// Restores the AVL height invariant at `tree`'s root with a single rotation. A second rotation
/// is never required: every mutation here changes exactly one root-to-leaf path, so the
/// classic "double rotation" case never arises (see `Node::rebalance` in the reference
/// implementation this is grounded on).
fn rebalance(tree: &mut Tree) {
    if let Tree::Internal(node) = tree {
        let bf = node.balance_factor();
        if bf > 1 {
            rotate_right(tree);
        } else if bf < -1 {
            rotate_left(tree);
        }
    }
}

fn split_leaf(tree: &mut Tree) {
    let upper = if let Tree::Leaf(leaf) = tree {
        leaf.split_off_upper_half()
    } else {
        unreachable!("split_leaf called on an internal node")
    };
    tracing::debug!(upper_len = upper.len(), "split_leaf");
    let lower = std::mem::replace(tree, Tree::empty_leaf());
    *tree = Tree::Internal(Box::new(Internal::from_children(lower, Tree::Leaf(upper))));
}

/// Inserts `bit` at position `index` within a subtree of total length `length`.
pub fn insert_bit(tree: &mut Tree, index: usize, bit: bool, length: usize) {
    if let Tree::Leaf(leaf) = tree {
        leaf.insert(index, bit);
        let overflowed = leaf.len() == MAX_LEN as usize;
        if overflowed {
            split_leaf(tree);
        }
        return;
    }

    let node = tree.as_internal_mut();
    if index < node.num {
        let num = node.num;
        insert_bit(&mut node.left, index, bit, num);
        let node = tree.as_internal_mut();
        node.num += 1;
        if bit {
            node.ones += 1;
        }
    } else {
        let right_len = length - node.num;
        let offset = index - node.num;
        insert_bit(&mut node.right, offset, bit, right_len);
    }
    let node = tree.as_internal_mut();
    node.recompute_height();
    node.recompute_excess();
    rebalance(tree);
}

fn merge_into_leftmost(tree: &mut Tree, bits: &Leaf) {
    if let Tree::Leaf(leaf) = tree {
        leaf.prepend_block(bits);
        return;
    }
    let node = tree.as_internal_mut();
    merge_into_leftmost(&mut node.left, bits);
    let node = tree.as_internal_mut();
    node.num += bits.len();
    node.ones += bits.ones();
    node.recompute_excess();
}

fn merge_into_rightmost(tree: &mut Tree, bits: &Leaf) {
    if let Tree::Leaf(leaf) = tree {
        leaf.append_block(bits);
        return;
    }
    let node = tree.as_internal_mut();
    merge_into_rightmost(&mut node.right, bits);
    let node = tree.as_internal_mut();
    node.recompute_excess();
}

/// Deletes the bit at `index` within a subtree of total length `length`. `underflow_allowed`
/// forbids leaving the leaf actually touched below `MIN_LEN` unless set (only the very top-level
/// call sets it, since the root has no sibling to steal from). Returns `(did_delete, bit)`;
/// `did_delete` is false only when a steal attempt hits a sibling leaf already at `MIN_LEN`.
fn delete_recursive(tree: &mut Tree, index: usize, length: usize, underflow_allowed: bool) -> (bool, bool) {
    if tree.is_leaf() {
        let leaf = match tree {
            Tree::Leaf(l) => l,
            Tree::Internal(_) => unreachable!(),
        };
        if length == MIN_LEN as usize && !underflow_allowed {
            return (false, false);
        }
        return (true, leaf.delete(index));
    }

    let deleted_bit;
    {
        let node = tree.as_internal_mut();
        if index < node.num {
            let (has_deleted, bit) = delete_recursive(&mut node.left, index, node.num, underflow_allowed);
            if !has_deleted {
                return (false, false);
            }
            deleted_bit = bit;
            if deleted_bit {
                node.ones -= 1;
            }
            if node.num == MIN_LEN as usize {
                let right_len = length - node.num;
                let (has_stolen, stolen_bit) = delete_recursive(&mut node.right, 0, right_len, false);
                if !has_stolen {
                    let left_leaf = match &node.left {
                        Tree::Leaf(l) => l.clone(),
                        Tree::Internal(_) => unreachable!("underflowing child must be a leaf"),
                    };
                    tracing::debug!("merge underflowing left leaf into right subtree");
                    merge_into_leftmost(&mut node.right, &left_leaf);
                    let surviving = std::mem::replace(&mut node.right, Tree::empty_leaf());
                    *tree = surviving;
                    return (true, deleted_bit);
                }
                insert_bit(&mut node.left, node.num - 1, stolen_bit, node.num - 1);
                if stolen_bit {
                    node.ones += 1;
                }
            } else {
                node.num -= 1;
            }
        } else {
            let right_len = length - node.num;
            let (has_deleted, bit) = delete_recursive(&mut node.right, index - node.num, right_len, underflow_allowed);
            if !has_deleted {
                return (false, false);
            }
            deleted_bit = bit;
            if right_len == MIN_LEN as usize {
                let (has_stolen, stolen_bit) = delete_recursive(&mut node.left, node.num - 1, node.num, false);
                if !has_stolen {
                    let right_leaf = match &node.right {
                        Tree::Leaf(l) => l.clone(),
                        Tree::Internal(_) => unreachable!("underflowing child must be a leaf"),
                    };
                    tracing::debug!("merge underflowing right leaf into left subtree");
                    merge_into_rightmost(&mut node.left, &right_leaf);
                    let surviving = std::mem::replace(&mut node.left, Tree::empty_leaf());
                    *tree = surviving;
                    return (true, deleted_bit);
                }
                insert_bit(&mut node.right, 0, stolen_bit, MIN_LEN as usize - 1);
                node.num -= 1;
                if stolen_bit {
                    node.ones -= 1;
                }
            }
        }
    }

    let node = tree.as_internal_mut();
    node.recompute_height();
    node.recompute_excess();
    rebalance(tree);
    (true, deleted_bit)
}

/// Top-level delete entry point: the root is always allowed to underflow, since it has no
/// sibling to steal from.
pub fn delete_bit(tree: &mut Tree, index: usize, length: usize) -> bool {
    let (_, bit) = delete_recursive(tree, index, length, true);
    bit
}

pub fn access(tree: &Tree, index: usize) -> bool {
    match tree {
        Tree::Leaf(l) => l.access(index),
        Tree::Internal(n) => {
            if index < n.num {
                access(&n.left, index)
            } else {
                access(&n.right, index - n.num)
            }
        }
    }
}

/// Number of `1`-bits in `[0, limit)`.
pub fn rank1(tree: &Tree, limit: usize) -> usize {
    match tree {
        Tree::Leaf(l) => l.rank1(limit),
        Tree::Internal(n) => {
            if limit <= n.num {
                rank1(&n.left, limit)
            } else {
                n.ones + rank1(&n.right, limit - n.num)
            }
        }
    }
}

/// Position of the `j`-th (1-indexed) `1`-bit.
pub fn select1(tree: &Tree, j: usize) -> usize {
    match tree {
        Tree::Leaf(l) => l.select1(j),
        Tree::Internal(n) => {
            if j <= n.ones {
                select1(&n.left, j)
            } else {
                n.num + select1(&n.right, j - n.ones)
            }
        }
    }
}

/// Position of the `j`-th (1-indexed) `0`-bit.
pub fn select0(tree: &Tree, j: usize) -> usize {
    match tree {
        Tree::Leaf(l) => l.select0(j),
        Tree::Internal(n) => {
            let left_zeros = n.num - n.ones;
            if j <= left_zeros {
                select0(&n.left, j)
            } else {
                n.num + select0(&n.right, j - left_zeros)
            }
        }
    }
}

/// Flips the bit at `index`, returning its previous value.
pub fn flip_bit(tree: &mut Tree, index: usize) -> bool {
    if let Tree::Leaf(l) = tree {
        return l.flip(index);
    }
    let num = tree.as_internal_mut().num;
    let was_one = if index < num {
        flip_bit(&mut tree.as_internal_mut().left, index)
    } else {
        flip_bit(&mut tree.as_internal_mut().right, index - num)
    };
    let node = tree.as_internal_mut();
    if index < num {
        if was_one {
            node.ones -= 1;
        } else {
            node.ones += 1;
        }
    }
    node.recompute_excess();
    was_one
}

/// Forward excess search: starting just after position `i` (`-1` means "from the very start"),
/// find the first position at which cumulative excess equals `d`. Returns the excess actually
/// reached and the position at which it was reached (or `length` if `d` was never reached).
pub fn fwd_search(tree: &Tree, i: isize, d: i64, length: usize) -> (i64, usize) {
    match tree {
        Tree::Leaf(l) => l.fwd_block(i, d),
        Tree::Internal(n) => {
            if i == -1 && n.min_excess > d {
                return (n.total_excess, length);
            }
            if i >= n.num as isize {
                let (excess, j) = fwd_search(&n.right, i - n.num as isize, d, length - n.num);
                (excess, j + n.num)
            } else {
                let (excess, j) = fwd_search(&n.left, i, d, n.num);
                if excess == d {
                    return (d, j);
                }
                let (excess2, j2) = fwd_search(&n.right, -1, d - excess, length - n.num);
                (excess + excess2, j2 + n.num)
            }
        }
    }
}

/// Backward excess search: starting at position `i` (inclusive) moving towards the start, find
/// the first position at which cumulative excess (counted backwards) equals `d`. Returns `-1` as
/// the position sentinel if `d` is never reached.
pub fn bwd_search(tree: &Tree, i: usize, d: i64, length: usize) -> (i64, isize) {
    match tree {
        Tree::Leaf(l) => l.bwd_block(i, d),
        Tree::Internal(n) => {
            if i + 1 == length && d < -n.total_excess + n.min_excess {
                if d == -n.total_excess {
                    return (d, 0);
                }
                return (-n.total_excess, -1);
            }
            if i < n.num {
                bwd_search(&n.left, i, d, n.num)
            } else {
                let (excess, j) = bwd_search(&n.right, i - n.num, d, length - n.num);
                if excess == d {
                    return (d, n.num as isize + j);
                }
                let (excess2, j2) = bwd_search(&n.left, n.num - 1, d - excess, n.num);
                (excess + excess2, j2)
            }
        }
    }
}

/// Minimum and total excess over the inclusive range `[i, j]`.
pub fn min_excess_range(tree: &Tree, i: usize, j: usize, length: usize) -> (i64, i64) {
    if i == 0 && j + 1 == length {
        return (tree.min_excess(), tree.total_excess());
    }
    match tree {
        Tree::Leaf(l) => l.min_block(i, j),
        Tree::Internal(n) => {
            if j < n.num {
                min_excess_range(&n.left, i, j, n.num)
            } else if i >= n.num {
                let (m, t) = min_excess_range(&n.right, i - n.num, j - n.num, length - n.num);
                (m, n.left.total_excess() + t)
            } else {
                let (ml, tl) = min_excess_range(&n.left, i, n.num - 1, n.num);
                let (mr, tr) = min_excess_range(&n.right, 0, j - n.num, length - n.num);
                (ml.min(mr + tl), tl + tr)
            }
        }
    }
}

/// Total excess over `[i, j]`, and the number of positions within it at which excess equals `m`.
pub fn min_count_rec(tree: &Tree, i: usize, j: usize, length: usize, m: i64) -> (i64, usize) {
    if i == 0 && j + 1 == length {
        if tree.min_excess() == m {
            return (tree.total_excess(), tree.min_times());
        }
        if tree.min_excess() > m {
            return (tree.total_excess(), 0);
        }
    }
    match tree {
        Tree::Leaf(l) => l.min_count_block(i, j, m),
        Tree::Internal(n) => {
            if j < n.num {
                min_count_rec(&n.left, i, j, n.num, m)
            } else if i >= n.num {
                min_count_rec(&n.right, i - n.num, j - n.num, length - n.num, m)
            } else {
                let (el, cl) = min_count_rec(&n.left, i, n.num - 1, n.num, m);
                let (er, cr) = min_count_rec(&n.right, 0, j - n.num, length - n.num, m - el);
                (el + er, cl + cr)
            }
        }
    }
}

/// Number of positions in `[i, j]` at which excess equals the range's own minimum.
pub fn min_count(tree: &Tree, i: usize, j: usize, length: usize) -> usize {
    if j < i {
        return 0;
    }
    if j == i {
        return 1;
    }
    let m = min_excess_range(tree, i, j, length).0;
    min_count_rec(tree, i, j, length, m).1
}

/// Index of the `t`-th (1-indexed) position in `[i, j]` at which excess equals `m`.
pub fn min_select(tree: &Tree, i: usize, j: usize, t: usize, length: usize, m: i64) -> usize {
    match tree {
        Tree::Leaf(l) => l.min_select_block(i, j, t, m),
        Tree::Internal(n) => {
            if j < n.num {
                min_select(&n.left, i, j, t, n.num, m)
            } else if i >= n.num {
                n.num + min_select(&n.right, i - n.num, j - n.num, t, length - n.num, m)
            } else {
                let (excess_left, count_left) = min_count_rec(&n.left, i, n.num - 1, n.num, m);
                if t <= count_left {
                    min_select(&n.left, i, n.num - 1, t, n.num, m)
                } else {
                    n.num + min_select(&n.right, 0, j - n.num, t - count_left, length - n.num, m - excess_left)
                }
            }
        }
    }
}

/// Rough structural overhead in bits: each internal node's own fields, plus each leaf's backing
/// allocation, not counting the payload bits (which callers already track separately as `len`).
pub fn overhead_bits(tree: &Tree) -> usize {
    match tree {
        Tree::Leaf(_) => std::mem::size_of::<Leaf>() * 8,
        Tree::Internal(n) => {
            std::mem::size_of::<Internal>() * 8 + overhead_bits(&n.left) + overhead_bits(&n.right)
        }
    }
}
