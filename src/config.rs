//! Build-time tunables. The only knob the core recognizes is the
//! recursion bound; there are no environment variables or config files.

/// The default recursion bound, fixed for cross-implementation test
/// corpus compatibility.
pub const DEFAULT_MAX_RECURSION_DEPTH: u32 = 256;

/// Configuration for [`crate::tree::ItemTreeBuilder`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuildConfig {
    /// Maximum recursion depth tolerated during both tree construction
    /// and the identifier search it performs internally. Exceeding it
    /// is a fatal [`crate::errors::TreeError::OutOfBounds`], never a
    /// silent truncation.
    pub max_recursion_depth: u32,
}

impl Default for BuildConfig {
    fn default() -> Self {
        BuildConfig {
            max_recursion_depth: DEFAULT_MAX_RECURSION_DEPTH,
        }
    }
}
