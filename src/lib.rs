//! Item tree construction and navigation for the Personal Folder File
//! (PFF) / Offline Storage Table (OST) mailbox container format.
//!
//! This crate implements the hard part of parsing a PFF/OST file: given
//! a lazily-paged view of the on-disk descriptor B-tree (an
//! [`IndexCursor`] implementation supplied by the consumer), it
//! reconstructs the hierarchical logical item tree (folders, messages,
//! attachments) that the rest of a mailbox reader walks.
//!
//! Byte-level decoding of index pages and item property records, the
//! bounded page cache behind the cursor, and writing/mutating PFF
//! files are all out of scope here. What's here is deliberately narrow:
//! an arena-backed tree, a depth-first builder tolerant of out-of-order
//! parent/child arrival and corrupt subtrees, and the identifier-keyed
//! navigation surface the rest of a mailbox library depends on.

pub mod config;
pub mod cursor;
pub mod descriptor;
pub mod errors;
#[cfg(test)]
mod mock;
pub mod tree;

pub use config::BuildConfig;
pub use cursor::{IndexCursor, IndexValue};
pub use descriptor::ItemDescriptor;
pub use errors::{BuildError, TreeError};
pub use tree::{ItemTree, ItemTreeBuilder, Lookup, NodeId, ROOT};

/// Initializes the `env_logger` backend for the `log` facade this crate
/// uses for its read-ahead/orphan/corrupt-subtree tracing hooks.
///
/// Convenience only, gated behind the `init_env_logger` feature
/// (mirroring the same feature name used throughout the wider PFF
/// tooling ecosystem this crate was extracted from); the library itself
/// never calls this, so embedding applications remain free to wire up
/// their own `log` backend instead.
#[cfg(feature = "init_env_logger")]
pub fn init_env_logger() {
    let _ = env_logger::try_init();
}
