//! Errors for tree mutation.

use thiserror::Error;

/// A structural mutation that could not be applied.
///
/// The plain mutators (`add_children`, `set_children`, ...) treat these as
/// caller bugs and panic; the `try_*` forms hand them back instead.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TreeError {
    /// The item was locked and its children are frozen.
    #[error("item at offset {offset} is locked and can no longer be mutated")]
    Locked { offset: u32 },

    /// A child index past the end of the child list.
    #[error("child index {index} is out of range for {len} children")]
    ChildIndexOutOfRange { index: usize, len: usize },

    /// The item to remove is not a child of this item.
    #[error("item is not a child of this item")]
    ChildNotFound,
}
