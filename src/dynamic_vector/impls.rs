use std::ops::Index;

use super::DynamicBitVector;
use crate::avl_tree;
use crate::traits::{Dot, Profiler};

impl<P> Index<usize> for DynamicBitVector<P>
where
    P: Profiler,
{
    type Output = bool;

    fn index(&self, index: usize) -> &bool {
        if avl_tree::access(self.tree(), index) {
            &true
        } else {
            &false
        }
    }
}

impl<P> Dot for DynamicBitVector<P>
where
    P: Profiler,
{
    fn dotviz(&self) -> String {
        format!(
            "digraph bv {{\nlabel=\"len={}\";\n{}\n}}\n",
            self.len(),
            self
        )
    }
}
