//! Error taxonomy for tree construction and navigation.

use thiserror::Error;

/// Errors produced by the arena-backed item tree itself: argument
/// validation, structural corruption, and the recursion bound.
///
/// None of these originate from I/O; they are raised purely from the
/// in-memory tree's own bookkeeping.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    #[error("invalid argument: {0}")]
    InvalidArgument(&'static str),

    #[error("value out of bounds: {0}")]
    OutOfBounds(&'static str),

    #[error("allocation failure")]
    AllocationFailure,

    #[error("structural corruption detected: {0}")]
    StructuralCorruption(&'static str),

    #[error("a second self-parented root folder leaf was encountered")]
    DuplicateRoot,
}

/// Errors produced while building a tree from a [`crate::cursor::IndexCursor`].
///
/// Wraps [`TreeError`] for failures internal to the arena, and carries
/// the cursor's own error type for I/O failures that were not tolerated
/// by the corrupt-subtree rule (see [`crate::tree::ItemTreeBuilder`]).
#[derive(Error, Debug)]
pub enum BuildError<E: std::error::Error + 'static> {
    #[error(transparent)]
    Tree(#[from] TreeError),

    #[error("unable to retrieve data from the descriptor index cursor")]
    Cursor(#[source] E),
}
