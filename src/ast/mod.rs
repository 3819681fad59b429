//! The item tree.
//!
//! ## Architecture
//!
//! ```text
//! Host parser (build phase, &mut access)
//!     ↓ AstNode::new / add_children / set_children / remove_children
//! AstItem::lock()
//!     ↓ Arc<AstItem> published to readers
//! Editor features
//!     ↓ find_path / find_node / get_node / get_token_type
//! AstPath (root → leaf)
//! ```
//!
//! Every item covers the half-open range `offset..end_offset` of the
//! source text. An item's length is derived from its last child, so the
//! host only supplies start offsets for nodes; tokens carry their own length.
//!
//! Derived data (length, the child offset table used by binary search and a
//! node's name index) is computed on first use and cached in `OnceLock`s, so
//! concurrent readers of a locked tree never race on initialization.

mod data;
mod error;
mod find;
mod item;
mod node;
mod path;
mod token;

pub use data::{ItemCore, TreeItem};
pub use error::TreeError;
pub use item::AstItem;
pub use node::{AstNode, NodeKind};
pub use path::AstPath;
pub use token::AstToken;
