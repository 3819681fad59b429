//! Grammar nodes with name-indexed child lookup.

use std::fmt;
use std::sync::{Arc, OnceLock};

use rustc_hash::FxHashMap;
use smol_str::SmolStr;

use crate::base::TextSize;
use crate::base::constants::PATH_SEPARATOR;
use crate::language::LanguageRef;

use super::{AstItem, AstToken, ItemCore, TreeError, TreeItem};

/// How [`AstItem::find_path`] descends through a node's children.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum NodeKind {
    /// Children are ordered and non-overlapping; descend into the first
    /// child containing the offset.
    #[default]
    Strict,
    /// Children may overlap or be out of order; try every containing child
    /// and keep the narrowest match.
    Compound,
}

/// Key of a node's name index.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum NameKey {
    TokenType(SmolStr),
    Node(SmolStr),
}

impl NameKey {
    fn of(item: &AstItem) -> Option<Self> {
        match item {
            AstItem::Node(node) => Some(Self::Node(node.nt.clone())),
            AstItem::Token(token) => token.type_name().map(|name| Self::TokenType(name.into())),
        }
    }
}

/// Key → position of the first child with that key.
type NameIndex = FxHashMap<NameKey, usize>;

/// An interior node produced by a grammar reduction.
#[derive(Debug)]
pub struct AstNode {
    item: ItemCore,
    nt: SmolStr,
    kind: NodeKind,
    names: OnceLock<NameIndex>,
}

impl AstNode {
    /// A strict node over `children`, which should be in ascending offset order.
    pub fn new(
        language: Option<LanguageRef>,
        nt: impl Into<SmolStr>,
        children: Vec<Arc<AstItem>>,
        offset: TextSize,
    ) -> Self {
        Self::with_kind(language, nt, children, offset, NodeKind::Strict)
    }

    /// A strict node without children, to be filled with `add_children`.
    pub fn empty(language: Option<LanguageRef>, nt: impl Into<SmolStr>, offset: TextSize) -> Self {
        Self::new(language, nt, Vec::new(), offset)
    }

    /// A node whose children may overlap; see [`NodeKind::Compound`].
    pub fn compound(
        language: Option<LanguageRef>,
        nt: impl Into<SmolStr>,
        children: Vec<Arc<AstItem>>,
        offset: TextSize,
    ) -> Self {
        Self::with_kind(language, nt, children, offset, NodeKind::Compound)
    }

    pub fn with_kind(
        language: Option<LanguageRef>,
        nt: impl Into<SmolStr>,
        children: Vec<Arc<AstItem>>,
        offset: TextSize,
        kind: NodeKind,
    ) -> Self {
        Self {
            item: ItemCore::new(language, offset, children, None),
            nt: nt.into(),
            kind,
            names: OnceLock::new(),
        }
    }

    /// The nonterminal this node was reduced from.
    pub fn nt(&self) -> &str {
        &self.nt
    }

    pub fn kind(&self) -> NodeKind {
        self.kind
    }

    pub fn is_compound(&self) -> bool {
        self.kind == NodeKind::Compound
    }

    /// Topmost node named `nt` on the chain of nodes containing `offset`.
    ///
    /// Only node children are followed: at each level the search enters the
    /// first child node containing `offset`, so a token overlapping it in a
    /// compound node does not end the search.
    pub fn find_node(&self, nt: &str, offset: TextSize) -> Option<&AstNode> {
        let mut node = self;
        loop {
            if node.nt.as_str() == nt {
                return Some(node);
            }
            node = node
                .item
                .children()
                .iter()
                .filter_map(|child| child.as_node())
                .find(|child| child.range().contains(offset))?;
        }
    }

    /// Resolve a dotted path of nonterminals, e.g. `block.statement`.
    ///
    /// Each segment names a direct child node of the previous one; the first
    /// child with that name wins.
    pub fn get_node(&self, path: &str) -> Option<&AstNode> {
        path.split(PATH_SEPARATOR)
            .try_fold(self, |node, segment| node.child_node(segment))
    }

    /// Resolve `node.path.TOKEN_TYPE` to the first token of that type under
    /// the node at `node.path` (or under `self` without a prefix).
    pub fn get_token_type(&self, name: &str) -> Option<&AstToken> {
        let (node, type_name) = match name.rsplit_once(PATH_SEPARATOR) {
            Some((prefix, type_name)) => (self.get_node(prefix)?, type_name),
            None => (self, name),
        };
        node.child_token(type_name)
    }

    /// Identifier of the token [`get_token_type`](Self::get_token_type) finds.
    pub fn get_token_type_identifier(&self, name: &str) -> Option<&str> {
        self.get_token_type(name)?.identifier()
    }

    fn child_node(&self, nt: &str) -> Option<&AstNode> {
        self.child_by_key(&NameKey::Node(nt.into()))?.as_node()
    }

    fn child_token(&self, type_name: &str) -> Option<&AstToken> {
        self.child_by_key(&NameKey::TokenType(type_name.into()))?
            .as_token()
    }

    fn child_by_key(&self, key: &NameKey) -> Option<&AstItem> {
        let position = *self.names().get(key)?;
        self.item.children().get(position).map(|child| &**child)
    }

    fn names(&self) -> &NameIndex {
        self.names.get_or_init(|| {
            let mut names = NameIndex::default();
            for (position, child) in self.item.children().iter().enumerate() {
                if let Some(key) = NameKey::of(child) {
                    names.entry(key).or_insert(position);
                }
            }
            tracing::trace!(nt = %self.nt, entries = names.len(), "built name index");
            names
        })
    }

    /// Append `item` as the last child.
    ///
    /// # Panics
    /// If this node is locked.
    #[track_caller]
    pub fn add_children(&mut self, item: impl Into<Arc<AstItem>>) {
        if let Err(err) = self.try_add_children(item) {
            panic!("{err}");
        }
    }

    /// Remove the child `item` (compared by identity).
    ///
    /// # Panics
    /// If this node is locked or `item` is not one of its children.
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
    /// If this node is locked or `position` is out of range.
    #[track_caller]
    pub fn set_children(&mut self, position: usize, item: impl Into<Arc<AstItem>>) -> Arc<AstItem> {
        match self.try_set_children(position, item) {
            Ok(previous) => previous,
            Err(err) => panic!("{err}"),
        }
    }

    pub fn try_add_children(&mut self, item: impl Into<Arc<AstItem>>) -> Result<(), TreeError> {
        let item = item.into();
        let key = NameKey::of(&item);
        let position = self.item.push_child(item)?;
        if let (Some(names), Some(key)) = (self.names.get_mut(), key) {
            names.entry(key).or_insert(position);
        }
        Ok(())
    }

    pub fn try_remove_children(&mut self, item: &Arc<AstItem>) -> Result<Arc<AstItem>, TreeError> {
        let (position, removed) = self.item.remove_child(item)?;
        if let Some(names) = self.names.get_mut() {
            let stale = NameKey::of(&removed).filter(|key| names.get(key) == Some(&position));
            for slot in names.values_mut() {
                if *slot > position {
                    *slot -= 1;
                }
            }
            if let Some(key) = stale {
                reindex(names, self.item.children(), key);
            }
        }
        Ok(removed)
    }

    pub fn try_set_children(
        &mut self,
        position: usize,
        item: impl Into<Arc<AstItem>>,
    ) -> Result<Arc<AstItem>, TreeError> {
        let item = item.into();
        let key = NameKey::of(&item);
        let previous = self.item.replace_child(position, item)?;
        if let Some(names) = self.names.get_mut() {
            if let Some(old_key) = NameKey::of(&previous) {
                if names.get(&old_key) == Some(&position) {
                    reindex(names, self.item.children(), old_key);
                }
            }
            if let Some(key) = key {
                match names.get(&key) {
                    Some(&first) if first <= position => {}
                    _ => {
                        names.insert(key, position);
                    }
                }
            }
        }
        Ok(previous)
    }

    /// Exclusive access to the child at `position` during the build phase.
    ///
    /// Returns `None` when the child is shared with another tree or path.
    ///
    /// # Panics
    /// If this node is locked or `position` is out of range.
    #[track_caller]
    pub fn child_mut(&mut self, position: usize) -> Option<&mut AstItem> {
        match self.item.child_mut(position) {
            Ok(child) => child,
            Err(err) => panic!("{err}"),
        }
    }

    /// Freeze this subtree; every later mutation panics.
    pub fn lock(&mut self) {
        tracing::debug!(nt = %self.nt, "locking node");
        self.item.lock();
    }

    pub(crate) fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.item
    }

    /// Wrap this node for insertion into a tree or for publishing as a root.
    pub fn into_item(self) -> Arc<AstItem> {
        Arc::new(AstItem::Node(self))
    }
}

/// Point `key` at the first child carrying it, or drop it.
fn reindex(names: &mut NameIndex, children: &[Arc<AstItem>], key: NameKey) {
    match children
        .iter()
        .position(|child| NameKey::of(child).as_ref() == Some(&key))
    {
        Some(position) => {
            names.insert(key, position);
        }
        None => {
            names.remove(&key);
        }
    }
}

impl TreeItem for AstNode {
    fn core(&self) -> &ItemCore {
        &self.item
    }
}

impl fmt::Display for AstNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}-{}",
            self.nt,
            u32::from(self.item.offset()),
            u32::from(self.item.end_offset())
        )
    }
}

impl From<AstNode> for Arc<AstItem> {
    fn from(node: AstNode) -> Self {
        node.into_item()
    }
}
