use super::Leaf;
use crate::traits::Dot;
use std::fmt;

impl fmt::Debug for Leaf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Leaf")
            .field("len", &self.len())
            .field("bits", &self.to_string())
            .field("total_excess", &self.total_excess())
            .field("min_excess", &self.min_excess())
            .field("min_times", &self.min_times())
            .finish()
    }
}

impl Dot for Leaf {
    fn dotviz(&self) -> String {
        format!("leaf_{:p} [label=\"{}\" shape=box];", self, self)
    }
}
