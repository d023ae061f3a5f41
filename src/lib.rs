//! `succinctus`: a dynamic bit vector (DBV) and dynamic balanced-parentheses tree (DBP) built on
//! a shared aggregated AVL tree.
//!
//! The engine lives in [`leaf`] (packed word blocks), [`node`]/[`avl_tree`] (the balancing tree
//! itself), and is exposed through two façades: [`dynamic_vector::DynamicBitVector`] and
//! [`dynamic_bp::DynamicBpTree`]. [`config`] and [`commands`] implement the file-driven command
//! surface described in the project README.

/// Caller-facing error type for both façades and the command driver.
pub mod error;

/// Profiler seam (no-op by default) composed into each façade.
pub mod profiler;

/// Traits shared by both façades: `StaticBitVec`, `DynBitVec`, `DynBitTree`, `BitSize`, `Dot`.
pub mod traits;

/// Packed multi-word leaf bit block, the tree's storage unit.
pub mod leaf;

/// Aggregates carried by internal tree nodes.
pub mod node;

/// The aggregated AVL tree shared by both façades.
pub mod avl_tree;

/// Dynamic bit vector façade.
pub mod dynamic_vector;

/// Dynamic balanced-parentheses tree façade.
pub mod dynamic_bp;

/// Command-line configuration.
pub mod config;

/// File-driven command parsing and dispatch for the `bv`/`bp` drivers.
pub mod commands;
