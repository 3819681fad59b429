//! The closed set of tree items.

use std::fmt;
use std::sync::Arc;

use crate::base::TextSize;
use crate::base::constants::PRINT_INDENT;

use super::{AstNode, AstPath, AstToken, ItemCore, TreeError, TreeItem, find};

/// A node or token of the tree.
///
/// Trees are built with `&mut` access, frozen with [`lock`](Self::lock) and
/// then shared as `Arc<AstItem>`.
#[derive(Debug)]
pub enum AstItem {
    Token(AstToken),
    Node(AstNode),
}

impl AstItem {
    pub fn as_node(&self) -> Option<&AstNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn as_token(&self) -> Option<&AstToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }

    pub fn as_node_mut(&mut self) -> Option<&mut AstNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn is_token(&self) -> bool {
        matches!(self, Self::Token(_))
    }

    /// The grammar role of this item: a node's nonterminal or a token's type
    /// name.
    pub fn role_name(&self) -> Option<&str> {
        match self {
            Self::Node(node) => Some(node.nt()),
            Self::Token(token) => token.type_name(),
        }
    }

    /// Path from this item down to the most specific item covering `offset`.
    ///
    /// Returns `None` when `offset` lies outside `offset..=end_offset`. An
    /// offset inside this item but in no child (including the end offset
    /// itself) yields the single-item path.
    pub fn find_path(self: &Arc<Self>, offset: TextSize) -> Option<AstPath> {
        find::find_path(self, offset)
    }

    /// Topmost node named `nt` on the chain containing `offset`.
    ///
    /// Always `None` for tokens.
    pub fn find_node(&self, nt: &str, offset: TextSize) -> Option<&AstNode> {
        self.as_node()?.find_node(nt, offset)
    }

    pub(crate) fn core_mut(&mut self) -> &mut ItemCore {
        match self {
            Self::Token(token) => token.core_mut(),
            Self::Node(node) => node.core_mut(),
        }
    }

    /// Append `item` as the last child.
    ///
    /// # Panics
    /// If this item is locked.
    #[track_caller]
    pub fn add_children(&mut self, item: impl Into<Arc<AstItem>>) {
        if let Err(err) = self.try_add_children(item) {
            panic!("{err}");
        }
    }

    /// Remove the child `item` (compared by identity).
    ///
    /// # Panics
    /// If this item is locked or `item` is not one of its children.
    #[track_caller]
    pub fn remove_children(&mut self, item: &Arc<AstItem>) -> Arc<AstItem> {
        match self.try_remove_children(item) {
            Ok(removed) => removed,
            Err(err) => panic!("{err}"),
        }
    }

    /// Replace the child at `position`, returning the previous child.
    ///
    /// # Panics
    /// If this item is locked or `position` is out of range.
    #[track_caller]
    pub fn set_children(&mut self, position: usize, item: impl Into<Arc<AstItem>>) -> Arc<AstItem> {
        match self.try_set_children(position, item) {
            Ok(previous) => previous,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_add_children(&mut self, item: impl Into<Arc<AstItem>>) -> Result<(), TreeError> {
        match self {
            Self::Node(node) => node.try_add_children(item),
            Self::Token(token) => token.core_mut().push_child(item.into()).map(drop),
        }
    }

    pub fn try_remove_children(&mut self, item: &Arc<AstItem>) -> Result<Arc<AstItem>, TreeError> {
        match self {
            Self::Node(node) => node.try_remove_children(item),
            Self::Token(token) => token
                .core_mut()
                .remove_child(item)
                .map(|(_, removed)| removed),
        }
    }

    pub fn try_set_children(
        &mut self,
        position: usize,
        item: impl Into<Arc<AstItem>>,
    ) -> Result<Arc<AstItem>, TreeError> {
        match self {
            Self::Node(node) => node.try_set_children(position, item),
            Self::Token(token) => token.core_mut().replace_child(position, item.into()),
        }
    }

    /// Exclusive access to the child at `position` during the build phase.
    ///
    /// # Panics
    /// If this item is locked or `position` is out of range.
    #[track_caller]
    pub fn child_mut(&mut self, position: usize) -> Option<&mut AstItem> {
        match self.core_mut().child_mut(position) {
            Ok(child) => child,
            Err(err) => panic!("{err}"),
        }
    }

    /// Freeze this subtree; every later mutation panics.
    pub fn lock(&mut self) {
        match self {
            Self::Node(node) => node.lock(),
            Self::Token(token) => token.core_mut().lock(),
        }
    }

    /// Lock this item and publish it as a shareable root.
    pub fn freeze(mut self) -> Arc<Self> {
        self.lock();
        Arc::new(self)
    }

    /// Indented dump of this subtree, one item per line.
    pub fn print(&self) -> String {
        TreeDump(self).to_string()
    }

    /// Identifiers of all tokens in this subtree, concatenated in order.
    pub fn as_text(&self) -> String {
        let mut text = String::new();
        collect_text(self, &mut text);
        text
    }
}

fn collect_text(item: &AstItem, text: &mut String) {
    if let Some(identifier) = item.as_token().and_then(AstToken::identifier) {
        text.push_str(identifier);
    }
    for child in item.children() {
        collect_text(child, text);
    }
}

struct TreeDump<'a>(&'a AstItem);

impl TreeDump<'_> {
    fn write(item: &AstItem, depth: usize, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for _ in 0..depth {
            f.write_str(PRINT_INDENT)?;
        }
        writeln!(f, "{item}")?;
        for child in item.children() {
            Self::write(child, depth + 1, f)?;
        }
        Ok(())
    }
}

impl fmt::Display for TreeDump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Self::write(self.0, 0, f)
    }
}

impl TreeItem for AstItem {
    fn core(&self) -> &ItemCore {
        match self {
            Self::Token(token) => token.core(),
            Self::Node(node) => node.core(),
        }
    }
}

impl fmt::Display for AstItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Token(token) => fmt::Display::fmt(token, f),
            Self::Node(node) => fmt::Display::fmt(node, f),
        }
    }
}

impl From<AstToken> for AstItem {
    fn from(token: AstToken) -> Self {
        Self::Token(token)
    }
}

impl From<AstNode> for AstItem {
    fn from(node: AstNode) -> Self {
        Self::Node(node)
    }
}
