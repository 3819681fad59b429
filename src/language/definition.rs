//! Table-backed [`Language`] implementation.

use indexmap::IndexSet;
use rustc_hash::FxBuildHasher;
use smol_str::SmolStr;
use thiserror::Error;

use super::{Language, TokenTypeId};

/// Errors raised while building a token type table.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LanguageError {
    /// The same token type name was registered twice.
    #[error("token type `{name}` is already registered as {existing}")]
    DuplicateTokenType { name: SmolStr, existing: TokenTypeId },

    /// Token type names must not be empty.
    #[error("token type names must not be empty")]
    EmptyTokenTypeName,

    /// Ids are `u16`, so a table holds at most `u16::MAX + 1` types.
    #[error("language `{mime_type}` cannot hold more than {max} token types")]
    TooManyTokenTypes { mime_type: SmolStr, max: usize },
}

/// A language whose token types are an ordered list of names.
///
/// The position of a name in the table is its [`TokenTypeId`].
#[derive(Debug, Clone)]
pub struct LanguageDefinition {
    mime_type: SmolStr,
    token_types: IndexSet<SmolStr, FxBuildHasher>,
}

impl LanguageDefinition {
    /// Start building a table for `mime_type`.
    pub fn builder(mime_type: impl Into<SmolStr>) -> LanguageBuilder {
        LanguageBuilder {
            mime_type: mime_type.into(),
            token_types: IndexSet::default(),
        }
    }

    /// Build a table from names in id order.
    pub fn from_token_types<I, S>(
        mime_type: impl Into<SmolStr>,
        names: I,
    ) -> Result<Self, LanguageError>
    where
        I: IntoIterator<Item = S>,
        S: Into<SmolStr>,
    {
        let mut builder = Self::builder(mime_type);
        for name in names {
            builder.token_type(name)?;
        }
        Ok(builder.build())
    }

    /// Number of registered token types.
    pub fn token_type_count(&self) -> usize {
        self.token_types.len()
    }

    /// All token types in id order.
    pub fn token_types(&self) -> impl Iterator<Item = (TokenTypeId, &str)> + '_ {
        self.token_types
            .iter()
            .enumerate()
            .map(|(index, name)| (TokenTypeId(index as u16), name.as_str()))
    }
}

impl Language for LanguageDefinition {
    fn mime_type(&self) -> &str {
        &self.mime_type
    }

    fn token_type_name(&self, id: TokenTypeId) -> Option<&str> {
        self.token_types.get_index(id.index()).map(SmolStr::as_str)
    }

    fn token_type_id(&self, name: &str) -> Option<TokenTypeId> {
        self.token_types
            .get_index_of(name)
            .map(|index| TokenTypeId(index as u16))
    }
}

/// Builder for [`LanguageDefinition`].
#[derive(Debug)]
pub struct LanguageBuilder {
    mime_type: SmolStr,
    token_types: IndexSet<SmolStr, FxBuildHasher>,
}

impl LanguageBuilder {
    const MAX_TOKEN_TYPES: usize = u16::MAX as usize + 1;

    /// Register the next token type and return its id.
    pub fn token_type(&mut self, name: impl Into<SmolStr>) -> Result<TokenTypeId, LanguageError> {
        let name = name.into();
        if name.is_empty() {
            return Err(LanguageError::EmptyTokenTypeName);
        }
        if let Some(existing) = self.token_types.get_index_of(name.as_str()) {
            return Err(LanguageError::DuplicateTokenType {
                name,
                existing: TokenTypeId(existing as u16),
            });
        }
        if self.token_types.len() >= Self::MAX_TOKEN_TYPES {
            return Err(LanguageError::TooManyTokenTypes {
                mime_type: self.mime_type.clone(),
                max: Self::MAX_TOKEN_TYPES,
            });
        }

        let (index, _) = self.token_types.insert_full(name);
        Ok(TokenTypeId(index as u16))
    }

    /// Finish the table.
    pub fn build(self) -> LanguageDefinition {
        tracing::debug!(
            mime_type = %self.mime_type,
            token_types = self.token_types.len(),
            "built language definition"
        );
        LanguageDefinition {
            mime_type: self.mime_type,
            token_types: self.token_types,
        }
    }
}
