//! Language descriptors.
//!
//! The tree never lexes or parses text itself. Tokens carry a small numeric
//! [`TokenTypeId`] for fast comparisons and resolve it to a human readable
//! name through the [`Language`] the host attached to them.

mod definition;

use std::fmt;
use std::sync::Arc;

pub use definition::{LanguageBuilder, LanguageDefinition, LanguageError};

/// Index into a language's token type table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct TokenTypeId(pub u16);

impl TokenTypeId {
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Position of this type in its language's table.
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u16> for TokenTypeId {
    fn from(raw: u16) -> Self {
        Self(raw)
    }
}

impl fmt::Display for TokenTypeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Capability a host provides for one language.
pub trait Language: fmt::Debug + Send + Sync {
    /// MIME type identifying the language, e.g. `text/x-java`.
    fn mime_type(&self) -> &str;

    /// Resolve a token type id to its name, `None` for unknown ids.
    fn token_type_name(&self, id: TokenTypeId) -> Option<&str>;

    /// Reverse lookup of [`Language::token_type_name`].
    fn token_type_id(&self, name: &str) -> Option<TokenTypeId>;
}

/// Shared handle to a language, attached to every item of a tree.
pub type LanguageRef = Arc<dyn Language>;
