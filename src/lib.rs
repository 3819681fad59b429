//! # astpath-base
//!
//! Incremental AST item tree with offset-indexed path lookup.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! evaluator → ParserState, Feature, AstEvaluator callbacks
//!   ↓
//! ast       → AstItem, AstNode, AstToken, AstPath
//!   ↓
//! language  → Language trait, token type tables
//!   ↓
//! base      → Primitives (TextSize, TextRange, constants)
//! ```
//!
//! A host parser builds a tree of [`AstItem`]s, calls [`AstItem::lock`] once
//! the subtree is final, and publishes it behind an `Arc`. Editor features
//! then query it with [`AstItem::find_path`], [`AstNode::find_node`],
//! [`AstNode::get_node`] and [`AstNode::get_token_type`].

// ============================================================================
// MODULES (dependency order: base → language → ast → evaluator)
// ============================================================================

/// Foundation types: offsets, ranges, tunables
pub mod base;

/// Language descriptors and token type tables
pub mod language;

/// The item tree: nodes, tokens and located paths
pub mod ast;

/// Parser state and evaluator callbacks consumed by editor features
pub mod evaluator;

pub use ast::{AstItem, AstNode, AstPath, AstToken, NodeKind, TreeError, TreeItem};
pub use base::{TextRange, TextSize};
pub use evaluator::{AstEvaluator, Feature, ParserState};
pub use language::{Language, LanguageDefinition, LanguageError, LanguageRef, TokenTypeId};
