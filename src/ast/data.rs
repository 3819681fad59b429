//! State shared by every item: offset, derived length and children.

use std::sync::{Arc, OnceLock};

use crate::base::{TextRange, TextSize};
use crate::language::{Language, LanguageRef};

use super::{AstItem, TreeError};

/// The part of an item common to nodes and tokens.
///
/// Length and the sorted child offset table are derived lazily and dropped
/// on every structural mutation.
#[derive(Debug)]
pub struct ItemCore {
    offset: TextSize,
    explicit_length: Option<TextSize>,
    length: OnceLock<TextSize>,
    children: Vec<Arc<AstItem>>,
    /// `(start offset, child position)` sorted by start offset.
    child_starts: OnceLock<Box<[(TextSize, usize)]>>,
    language: Option<LanguageRef>,
    locked: bool,
}

impl ItemCore {
    pub(crate) fn new(
        language: Option<LanguageRef>,
        offset: TextSize,
        children: Vec<Arc<AstItem>>,
        explicit_length: Option<TextSize>,
    ) -> Self {
        Self {
            offset,
            explicit_length,
            length: OnceLock::new(),
            children,
            child_starts: OnceLock::new(),
            language,
            locked: false,
        }
    }

    pub fn offset(&self) -> TextSize {
        self.offset
    }

    /// Distance from this item's start to the end of its last child.
    ///
    /// Only the last child in storage order is consulted: children are
    /// expected in ascending offset order with the last one ending where the
    /// parent ends. A childless item uses the length it was constructed with,
    /// or zero.
    pub fn length(&self) -> TextSize {
        *self.length.get_or_init(|| match self.children.last() {
            Some(last) => last
                .core()
                .end_offset()
                .checked_sub(self.offset)
                .unwrap_or_default(),
            None => self.explicit_length.unwrap_or_default(),
        })
    }

    /// `offset + length`, clamped to `u32::MAX` for items that would run
    /// past the largest representable offset.
    pub fn end_offset(&self) -> TextSize {
        self.offset
            .checked_add(self.length())
            .unwrap_or(TextSize::from(u32::MAX))
    }

    pub fn range(&self) -> TextRange {
        TextRange::new(self.offset, self.end_offset())
    }

    pub fn children(&self) -> &[Arc<AstItem>] {
        &self.children
    }

    pub fn language(&self) -> Option<&dyn Language> {
        self.language.as_deref()
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.language().map(|language| language.mime_type())
    }

    pub fn is_locked(&self) -> bool {
        self.locked
    }

    /// Child containing `offset`, located by binary search over start offsets.
    ///
    /// Agrees with a linear first-containing-child scan as long as non-empty
    /// children do not overlap. Zero-length children contain no offset and
    /// are stepped over.
    pub(crate) fn child_by_offset(&self, offset: TextSize) -> Option<&Arc<AstItem>> {
        let starts = self.child_starts();
        let upper = starts.partition_point(|&(start, _)| start <= offset);
        let candidate = starts[..upper]
            .iter()
            .rev()
            .map(|&(_, position)| &self.children[position])
            .find(|child| !child.core().range().is_empty())?;
        candidate.core().range().contains(offset).then_some(candidate)
    }

    fn child_starts(&self) -> &[(TextSize, usize)] {
        self.child_starts.get_or_init(|| {
            let mut starts: Vec<_> = self
                .children
                .iter()
                .enumerate()
                .map(|(position, child)| (child.core().offset(), position))
                .collect();
            starts.sort_by_key(|&(start, _)| start);
            tracing::trace!(children = starts.len(), "built child offset table");
            starts.into_boxed_slice()
        })
    }

    pub(crate) fn push_child(&mut self, item: Arc<AstItem>) -> Result<usize, TreeError> {
        self.ensure_unlocked()?;
        self.children.push(item);
        self.invalidate();
        Ok(self.children.len() - 1)
    }

    /// Remove `item` (compared by identity), returning its former position.
    pub(crate) fn remove_child(
        &mut self,
        item: &Arc<AstItem>,
    ) -> Result<(usize, Arc<AstItem>), TreeError> {
        self.ensure_unlocked()?;
        let position = self
            .children
            .iter()
            .position(|child| Arc::ptr_eq(child, item))
            .ok_or(TreeError::ChildNotFound)?;
        let removed = self.children.remove(position);
        self.invalidate();
        Ok((position, removed))
    }

    /// Replace the child at `position`, returning the previous one.
    pub(crate) fn replace_child(
        &mut self,
        position: usize,
        item: Arc<AstItem>,
    ) -> Result<Arc<AstItem>, TreeError> {
        self.ensure_unlocked()?;
        let len = self.children.len();
        let slot = self
            .children
            .get_mut(position)
            .ok_or(TreeError::ChildIndexOutOfRange { index: position, len })?;
        let previous = std::mem::replace(slot, item);
        self.invalidate();
        Ok(previous)
    }

    /// Exclusive access to a child that is not shared with anyone else.
    pub(crate) fn child_mut(&mut self, position: usize) -> Result<Option<&mut AstItem>, TreeError> {
        self.ensure_unlocked()?;
        let len = self.children.len();
        if position >= len {
            return Err(TreeError::ChildIndexOutOfRange { index: position, len });
        }
        // The child may change length, which moves this item's end.
        self.invalidate();
        Ok(Arc::get_mut(&mut self.children[position]))
    }

    /// Freeze this item and every child it owns exclusively.
    ///
    /// Shared children are reachable only through `Arc`, which already
    /// rules out mutation.
    pub(crate) fn lock(&mut self) {
        if self.locked {
            return;
        }
        self.locked = true;
        for child in &mut self.children {
            if let Some(child) = Arc::get_mut(child) {
                child.core_mut().lock();
            }
        }
    }

    fn ensure_unlocked(&self) -> Result<(), TreeError> {
        if self.locked {
            return Err(TreeError::Locked {
                offset: self.offset.into(),
            });
        }
        Ok(())
    }

    fn invalidate(&mut self) {
        self.length.take();
        self.child_starts.take();
    }
}

/// Read access shared by [`AstItem`], [`AstNode`](super::AstNode) and
/// [`AstToken`](super::AstToken).
pub trait TreeItem {
    fn core(&self) -> &ItemCore;

    /// Absolute start position in the source text.
    fn offset(&self) -> TextSize {
        self.core().offset()
    }

    /// See [`ItemCore::length`].
    fn length(&self) -> TextSize {
        self.core().length()
    }

    /// See [`ItemCore::end_offset`].
    fn end_offset(&self) -> TextSize {
        self.core().end_offset()
    }

    /// `offset..end_offset`.
    fn range(&self) -> TextRange {
        self.core().range()
    }

    fn children(&self) -> &[Arc<AstItem>] {
        self.core().children()
    }

    fn language(&self) -> Option<&dyn Language> {
        self.core().language()
    }

    fn mime_type(&self) -> Option<&str> {
        self.core().mime_type()
    }

    fn is_locked(&self) -> bool {
        self.core().is_locked()
    }
}
