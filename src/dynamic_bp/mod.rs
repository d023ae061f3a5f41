use std::fmt;

use crate::avl_tree;
use crate::dynamic_vector::DynamicBitVector;
use crate::error::Error;
use crate::profiler::NoProfiler;
use crate::traits::{BitSize, Dot, DynBitTree, Profiler};

#[cfg(test)]
mod tests;

/// Dynamic balanced-parentheses tree: an ordinal tree encoded as a balanced parenthesis bit
/// string over a [`DynamicBitVector`], per `examples/original_source/Framework/BalancedParentheses/DynamicBP.h`.
///
/// Nodes are addressed by the caller as *preorder numbers*; every public method translates to
/// and from the underlying bit position via `select1`/`rank1` before touching the tree
/// ([`Self::position_of`] / [`Self::preorder_of`]), matching `DynamicBP.h::getIndex`.
#[derive(Debug, Clone)]
pub struct DynamicBpTree<P = NoProfiler>
where
    P: Profiler,
{
    bv: DynamicBitVector<P>,
}

impl Default for DynamicBpTree<NoProfiler> {
    fn default() -> Self {
        Self::new()
    }
}

impl<P> DynamicBpTree<P>
where
    P: Profiler,
{
    /// A bp-tree consisting only of a root node, encoded as the bit string `1 0`.
    pub fn new() -> Self {
        DynamicBpTree {
            bv: DynamicBitVector::from_bits(&[true, false]),
        }
    }

    /// Bit position of the opening paren of the node with the given preorder number.
    fn position_of(&self, preorder: usize) -> usize {
        avl_tree::select1(self.bv.tree(), preorder + 1)
    }

    /// Preorder number of the node whose opening paren sits at `position`.
    fn preorder_of(&self, position: usize) -> usize {
        avl_tree::rank1(self.bv.tree(), position + 1) - 1
    }

    fn len(&self) -> usize {
        self.bv.len()
    }

    /// Rejects a preorder number past the tree's actual node count, the guard every public method
    /// taking a node id must pass before turning `v` into a bit position via [`Self::position_of`].
    fn check_node(&self, v: usize) -> Result<(), Error> {
        if v >= self.len_nodes() {
            Err(Error::NodeOutOfRange {
                v,
                count: self.len_nodes(),
            })
        } else {
            Ok(())
        }
    }

    /// Matching closing paren for the opening paren at bit position `v`.
    fn close(&self, v: usize) -> usize {
        avl_tree::fwd_search(self.bv.tree(), v as isize, -1, self.len()).1
    }

    /// Opening paren of the pair enclosing the opening paren at bit position `v`, or `None` for
    /// the root.
    fn enclose(&self, v: usize) -> Option<usize> {
        let (_, j) = avl_tree::bwd_search(self.bv.tree(), v, -2, self.len());
        if j < 0 {
            None
        } else {
            Some(j as usize)
        }
    }

    fn min_excess(&self, i: usize, j: usize) -> i64 {
        avl_tree::min_excess_range(self.bv.tree(), i, j, self.len()).0
    }

    /// `min_count(i, j)`, guarding the case where the range is empty because `v` has no children
    /// (`j < i`, expressed here with a signed `j` since `close(v) - 2` can go negative).
    fn min_count(&self, i: usize, j: isize) -> usize {
        if j < i as isize {
            0
        } else {
            avl_tree::min_count(self.bv.tree(), i, j as usize, self.len())
        }
    }

    fn min_select(&self, i: usize, j: isize, t: usize) -> usize {
        let m = self.min_excess(i, j as usize);
        avl_tree::min_select(self.bv.tree(), i, j as usize, t, self.len(), m)
    }

    /// Out-degree of the node whose opening paren is at bit position `v`: each child corresponds
    /// to a fresh occurrence of the minimum excess inside `v`'s range, up to two before its close.
    fn degree_at(&self, v: usize) -> usize {
        let close_pos = self.close(v) as isize;
        self.min_count(v, close_pos - 2)
    }

    /// Bit position of the opening paren of the `t`-th (1-indexed) child of the node at `v`.
    fn child_at(&self, v: usize, t: usize) -> usize {
        let close_pos = self.close(v) as isize;
        self.min_select(v, close_pos - 2, t) + 1
    }

    /// `deletenode v`: delete the node with preorder number `v` (`v != 0`); its children attach
    /// to `v`'s parent in place.
    pub fn delete_node(&mut self, v: usize) -> Result<(), Error> {
        if v == 0 {
            return Err(Error::DeleteRoot);
        }
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        let close_pos = self.close(v_pos);
        // delete the closing bit first: it lies after v_pos, so deleting it does not shift v_pos
        self.bv.delete(close_pos)?;
        self.bv.delete(v_pos)?;
        Ok(())
    }

    /// `insertchild v i k`: insert a new `i`-th child of `v` (1-indexed), which becomes the
    /// parent of the previously `i`-th through `(i+k-1)`-th children of `v`.
    pub fn insert_child(&mut self, v: usize, i: usize, k: usize) -> Result<(), Error> {
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        let n_children = self.degree_at(v_pos);
        if i == 0 || i > n_children + 1 {
            return Err(Error::ChildOutOfRange {
                v,
                i,
                degree: n_children,
            });
        }
        if i + k > n_children + 1 {
            return Err(Error::ChildOutOfRange {
                v,
                i: i + k,
                degree: n_children,
            });
        }
        let opening_position = if i <= n_children {
            self.child_at(v_pos, i)
        } else {
            self.close(v_pos)
        };
        let closing_position = if i + k <= n_children {
            self.child_at(v_pos, i + k)
        } else {
            self.close(v_pos)
        };
        // insert the closing bit first: opening_position <= closing_position always, so
        // inserting at closing_position first leaves opening_position valid
        self.bv.insert(closing_position, false)?;
        self.bv.insert(opening_position, true)?;
        Ok(())
    }

    /// `child v i`: preorder number of the `i`-th (1-indexed) child of `v`.
    pub fn child(&self, v: usize, i: usize) -> Result<usize, Error> {
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        let degree = self.degree_at(v_pos);
        if i == 0 || i > degree {
            return Err(Error::ChildOutOfRange { v, i, degree });
        }
        let child_pos = self.child_at(v_pos, i);
        Ok(self.preorder_of(child_pos))
    }

    /// `subtree_size v`: number of nodes in the subtree rooted at `v`, including `v` itself.
    pub fn subtree_size(&self, v: usize) -> Result<usize, Error> {
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        let close_pos = self.close(v_pos);
        Ok((close_pos - v_pos + 1) / 2)
    }

    /// `parent v`: preorder number of `v`'s parent.
    pub fn parent(&self, v: usize) -> Result<usize, Error> {
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        match self.enclose(v_pos) {
            Some(parent_pos) => Ok(self.preorder_of(parent_pos)),
            None => Err(Error::NoParent),
        }
    }

    /// `degree v`: number of children of `v`.
    pub fn degree(&self, v: usize) -> Result<usize, Error> {
        self.check_node(v)?;
        let v_pos = self.position_of(v);
        Ok(self.degree_at(v_pos))
    }

    /// Degree of every node in preorder DFS order, per `DynamicBP.h::printDegreesToFile`.
    pub fn degrees_preorder(&self) -> Vec<usize> {
        let mut out = Vec::new();
        let mut stack = vec![0usize];
        while let Some(v) = stack.pop() {
            let degree = self.degree(v).expect("v valid by construction");
            out.push(degree);
            for t in (1..=degree).rev() {
                stack.push(self.child(v, t).expect("t <= degree(v) by construction"));
            }
        }
        out
    }

    pub fn len_nodes(&self) -> usize {
        self.len() / 2
    }
}

impl<P> DynBitTree for DynamicBpTree<P>
where
    P: Profiler,
{
    fn deletenode(&mut self, v: usize) -> Result<(), Error> {
        self.delete_node(v)
    }

    fn insertchild(&mut self, v: usize, i: usize, k: usize) -> Result<(), Error> {
        self.insert_child(v, i, k)
    }

    fn child(&self, v: usize, i: usize) -> Result<usize, Error> {
        DynamicBpTree::child(self, v, i)
    }

    fn subtree_size(&self, v: usize) -> Result<usize, Error> {
        DynamicBpTree::subtree_size(self, v)
    }

    fn parent(&self, v: usize) -> Result<usize, Error> {
        DynamicBpTree::parent(self, v)
    }

    fn degree(&self, v: usize) -> Result<usize, Error> {
        DynamicBpTree::degree(self, v)
    }
}

impl<P> BitSize for DynamicBpTree<P>
where
    P: Profiler,
{
    fn bitsize_full(&self) -> usize {
        self.bv.bitsize_full()
    }
}

impl<P> Dot for DynamicBpTree<P>
where
    P: Profiler,
{
    fn dotviz(&self) -> String {
        format!("digraph bp {{\nlabel=\"nodes={}\";\n{}\n}}\n", self.len_nodes(), self.bv)
    }
}

impl<P> fmt::Display for DynamicBpTree<P>
where
    P: Profiler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.bv)
    }
}
