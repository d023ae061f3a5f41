use thiserror::Error;

/// Errors surfaced by the public DBV/DBP façades and the command driver.
///
/// Invariant violations internal to the tree (a corrupt aggregate, a leaf outside its size
/// bounds) stay as panics/`debug_assert!`s; these variants are reserved for caller misuse and
/// malformed driver input, per the taxonomy documented in `DESIGN.md`.
#[derive(Debug, Error, PartialEq, Eq, Clone)]
pub enum Error {
    #[error("index {index} out of bounds for length {length}")]
    IndexOutOfBounds { index: usize, length: usize },

    #[error("bit value must be 0 or 1, got {0}")]
    InvalidBitValue(u8),

    #[error("select({}, {j}) out of range: only {count} such bits exist", *bit_is_one as u8)]
    SelectOutOfRange {
        bit_is_one: bool,
        j: usize,
        count: usize,
    },

    #[error("cannot delete the root node")]
    DeleteRoot,

    #[error("node {v} out of range: tree holds {count} nodes")]
    NodeOutOfRange { v: usize, count: usize },

    #[error("the root node has no parent")]
    NoParent,

    #[error("child index {i} out of range for node {v} with degree {degree}")]
    ChildOutOfRange { v: usize, i: usize, degree: usize },

    #[error("malformed input line: {0}")]
    MalformedInput(String),
}
