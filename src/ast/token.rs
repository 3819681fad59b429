//! Lexical leaves.

use std::fmt;
use std::sync::{Arc, OnceLock};

use smol_str::SmolStr;

use crate::base::{TextSize, escape_control};
use crate::language::{LanguageRef, TokenTypeId};

use super::{AstItem, ItemCore, TreeItem};

/// One lexeme: a type id plus the literal text it was lexed from.
///
/// Tokens are always leaves in practice and have no setters; the child list
/// inherited from [`ItemCore`] is only reachable through [`AstItem`].
#[derive(Debug)]
pub struct AstToken {
    item: ItemCore,
    type_id: TokenTypeId,
    identifier: Option<SmolStr>,
    display: OnceLock<String>,
}

impl AstToken {
    /// Create a token whose length is the byte length of `identifier`
    /// (zero when there is none).
    pub fn new(
        language: Option<LanguageRef>,
        type_id: TokenTypeId,
        identifier: Option<SmolStr>,
        offset: TextSize,
    ) -> Self {
        let length = identifier
            .as_deref()
            .map_or(TextSize::default(), TextSize::of);
        Self::with_length(language, type_id, identifier, offset, length)
    }

    /// Create a token with an explicit length, e.g. when the lexeme was
    /// normalized and no longer matches the source text byte for byte.
    pub fn with_length(
        language: Option<LanguageRef>,
        type_id: TokenTypeId,
        identifier: Option<SmolStr>,
        offset: TextSize,
        length: TextSize,
    ) -> Self {
        Self {
            item: ItemCore::new(language, offset, Vec::new(), Some(length)),
            type_id,
            identifier,
            display: OnceLock::new(),
        }
    }

    pub fn type_id(&self) -> TokenTypeId {
        self.type_id
    }

    /// Name of this token's type, `None` without a language or for an id the
    /// language does not know.
    pub fn type_name(&self) -> Option<&str> {
        self.item.language()?.token_type_name(self.type_id)
    }

    pub fn identifier(&self) -> Option<&str> {
        self.identifier.as_deref()
    }

    pub(crate) fn core_mut(&mut self) -> &mut ItemCore {
        &mut self.item
    }

    /// Wrap this token for insertion into a tree.
    pub fn into_item(self) -> Arc<AstItem> {
        Arc::new(AstItem::Token(self))
    }
}

impl TreeItem for AstToken {
    fn core(&self) -> &ItemCore {
        &self.item
    }
}

impl fmt::Display for AstToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = self.display.get_or_init(|| {
            let type_name = match self.type_name() {
                Some(name) => name.to_string(),
                None => self.type_id.to_string(),
            };
            match &self.identifier {
                Some(identifier) => format!(
                    "{} \"{}\" @{}",
                    type_name,
                    escape_control(identifier),
                    u32::from(self.item.offset())
                ),
                None => format!("{} @{}", type_name, u32::from(self.item.offset())),
            }
        });
        f.write_str(text)
    }
}

impl From<AstToken> for Arc<AstItem> {
    fn from(token: AstToken) -> Self {
        token.into_item()
    }
}
