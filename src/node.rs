use crate::avl_tree::Tree;

/// Internal (non-leaf) node of the aggregated AVL tree. Owns both subtrees directly; there are
/// no parent pointers, so every operation recurses root-to-leaf and reassembles the modified
/// subtree on its way back up.
///
/// `num`/`ones` describe the **left** subtree only, so a descent compares an index against `num`
/// to pick a side without ever touching the right subtree. `total_excess`/`min_excess`/
/// `min_times` describe the **whole** subtree rooted here, and are shared by both the DBV and
/// DBP façades even though only DBP reads them.
///
/// instance size: ~56 bytes, plus whatever the two boxed subtrees cost
#[derive(Debug, PartialEq, Clone)]
pub struct Internal {
    pub left: Tree,
    pub right: Tree,
    /// height of this subtree (0 for a leaf, so a fresh two-leaf node has height 1)
    pub height: u8,
    /// number of bits stored in the left subtree
    pub num: usize,
    /// number of one-bits stored in the left subtree
    pub ones: usize,
    /// total excess (#opens - #closes) across the whole subtree
    pub total_excess: i64,
    /// minimum excess achieved anywhere in the whole subtree
    pub min_excess: i64,
    /// number of positions in the whole subtree achieving `min_excess`
    pub min_times: usize,
}

impl Internal {
    /// Builds a fresh two-child node from `left`/`right`, computing every aggregate from
    /// scratch. Used right after a leaf split, and to seed bulk construction.
    pub fn from_children(left: Tree, right: Tree) -> Self {
        let mut node = Internal {
            num: left.len_hint(),
            ones: left.ones_hint(),
            height: 1 + left.height().max(right.height()),
            left,
            right,
            total_excess: 0,
            min_excess: 0,
            min_times: 0,
        };
        node.recompute_excess();
        node
    }

    /// Recomputes `total_excess`/`min_excess`/`min_times` from the two children's own (already
    /// current) aggregates. Must be called after any mutation to either child.
    pub fn recompute_excess(&mut self) {
        let lt = self.left.total_excess();
        let lm = self.left.min_excess();
        let lc = self.left.min_times();
        let rt = self.right.total_excess();
        let rm = self.right.min_excess();
        let rc = self.right.min_times();

        self.total_excess = lt + rt;
        let right_as_seen_from_root = lt + rm;
        if lm < right_as_seen_from_root {
            self.min_excess = lm;
            self.min_times = lc;
        } else if lm > right_as_seen_from_root {
            self.min_excess = right_as_seen_from_root;
            self.min_times = rc;
        } else {
            self.min_excess = lm;
            self.min_times = lc + rc;
        }
    }

    pub fn recompute_height(&mut self) {
        self.height = 1 + self.left.height().max(self.right.height());
    }

    /// AVL balance factor: positive means left-heavy.
    pub fn balance_factor(&self) -> i16 {
        self.left.height() as i16 - self.right.height() as i16
    }
}
