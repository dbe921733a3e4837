//! In-memory item tree construction and navigation.
//!
//! This module is the core of the crate: reconstructing a hierarchical
//! logical tree from a flat, lazily-paged on-disk B-tree (the
//! [`crate::cursor::IndexCursor`]), then exposing identifier-keyed
//! lookups over the result.

mod builder;
mod imp;

pub use builder::ItemTreeBuilder;
pub use imp::{ItemTree, Lookup, NodeId, ROOT};
