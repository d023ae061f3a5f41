use std::fmt;

use crate::avl_tree::{self, Tree};
use crate::error::Error;
use crate::profiler::NoProfiler;
use crate::traits::{BitSize, DynBitVec, Profiler};

mod impls;
#[cfg(test)]
mod tests;

/// Dynamic bit vector backed by the shared aggregated AVL tree (see [`crate::avl_tree`]).
///
/// Instance bit size: one [`Tree`] plus a cached total length and a profiler instance.
#[derive(Debug, Clone)]
pub struct DynamicBitVector<P = NoProfiler>
where
    P: Profiler,
{
    tree: Tree,
    len: usize,
    profiler: P,
}

impl Default for DynamicBitVector<NoProfiler> {
    fn default() -> Self {
        Self::new()
    }
}

impl DynamicBitVector<NoProfiler> {
    /// Constructs an empty `DynamicBitVector`.
    pub fn new() -> Self {
        DynamicBitVector {
            tree: Tree::empty_leaf(),
            len: 0,
            profiler: NoProfiler,
        }
    }
}

impl<P> DynamicBitVector<P>
where
    P: Profiler,
{
    /// Constructs a `DynamicBitVector` holding exactly `bits`, in order, via balanced bulk
    /// construction rather than one insert at a time.
    pub fn from_bits(bits: &[bool]) -> Self {
        DynamicBitVector {
            tree: avl_tree::build_balanced(bits),
            len: bits.len(),
            profiler: P::default(),
        }
    }

    fn check_index(&self, index: usize) -> Result<(), Error> {
        if index >= self.len {
            Err(Error::IndexOutOfBounds {
                index,
                length: self.len,
            })
        } else {
            Ok(())
        }
    }

    /// `access i`: bit value at position `i`.
    pub fn access(&self, i: usize) -> Result<bool, Error> {
        self.check_index(i)?;
        Ok(avl_tree::access(&self.tree, i))
    }

    /// `rank [0|1] i`: count of `bit` in `[0, i)`.
    pub fn rank(&mut self, bit: bool, i: usize) -> Result<usize, Error> {
        if i > self.len {
            return Err(Error::IndexOutOfBounds {
                index: i,
                length: self.len,
            });
        }
        self.profiler.start_rank();
        let result = if bit {
            avl_tree::rank1(&self.tree, i)
        } else {
            i - avl_tree::rank1(&self.tree, i)
        };
        self.profiler.end_rank();
        Ok(result)
    }

    /// `select [0|1] j`: position of the `j`-th (1-indexed) occurrence of `bit`.
    pub fn select(&mut self, bit: bool, j: usize) -> Result<usize, Error> {
        self.profiler.start_select();
        let count = if bit {
            avl_tree::rank1(&self.tree, self.len)
        } else {
            self.len - avl_tree::rank1(&self.tree, self.len)
        };
        if j == 0 || j > count {
            self.profiler.end_select();
            return Err(Error::SelectOutOfRange {
                bit_is_one: bit,
                j,
                count,
            });
        }
        let result = if bit {
            avl_tree::select1(&self.tree, j)
        } else {
            avl_tree::select0(&self.tree, j)
        };
        self.profiler.end_select();
        Ok(result)
    }

    /// `insert i bit`: insert `bit` at position `i` (`i <= len()`), shifting everything after it.
    pub fn insert(&mut self, i: usize, bit: bool) -> Result<(), Error> {
        if i > self.len {
            return Err(Error::IndexOutOfBounds {
                index: i,
                length: self.len,
            });
        }
        self.profiler.start_insert();
        avl_tree::insert_bit(&mut self.tree, i, bit, self.len);
        self.len += 1;
        self.profiler.end_insert();
        Ok(())
    }

    /// `delete i`: remove the bit at position `i`.
    pub fn delete(&mut self, i: usize) -> Result<(), Error> {
        self.check_index(i)?;
        self.profiler.start_delete();
        avl_tree::delete_bit(&mut self.tree, i, self.len);
        self.len -= 1;
        self.profiler.end_delete();
        Ok(())
    }

    /// `flip i`: flip the bit at position `i`, returning its previous value.
    pub fn flip(&mut self, i: usize) -> Result<bool, Error> {
        self.check_index(i)?;
        Ok(avl_tree::flip_bit(&mut self.tree, i))
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub(crate) fn tree(&self) -> &Tree {
        &self.tree
    }
}

impl<P> DynBitVec for DynamicBitVector<P>
where
    P: Profiler,
{
    fn insert(&mut self, i: usize, bit: bool) -> Result<(), Error> {
        DynamicBitVector::insert(self, i, bit)
    }

    fn delete(&mut self, i: usize) -> Result<(), Error> {
        DynamicBitVector::delete(self, i)
    }

    fn flip(&mut self, i: usize) -> Result<bool, Error> {
        DynamicBitVector::flip(self, i)
    }

    fn len(&self) -> usize {
        self.len
    }
}

impl<P> BitSize for DynamicBitVector<P>
where
    P: Profiler,
{
    fn bitsize_full(&self) -> usize {
        // one bit per stored value, plus a rough per-leaf/per-node overhead estimate for the
        // tree scaffolding (aggregates, pointers): see DESIGN.md for the accounting rationale.
        self.len + crate::avl_tree::overhead_bits(&self.tree)
    }
}

impl<P> fmt::Display for DynamicBitVector<P>
where
    P: Profiler,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for i in 0..self.len {
            write!(f, "{}", if avl_tree::access(&self.tree, i) { '1' } else { '0' })?;
        }
        Ok(())
    }
}
