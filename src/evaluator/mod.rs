//! Contract between a parse driver and the editor features it notifies.
//!
//! After each (re)parse the driver reports a [`ParserState`] and walks the new
//! tree, handing every located [`AstPath`] to the registered
//! [`AstEvaluator`]s together with the [`Feature`] it matched. The driver
//! itself lives in the host; this module only fixes the vocabulary.

use std::fmt;

use smol_str::SmolStr;

use crate::ast::{AstItem, AstPath};
use crate::base::constants::PATH_SEPARATOR;

/// Outcome of the most recent parse of a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ParserState {
    /// A parse is running; the previous tree is still current.
    Parsing,
    /// The document parsed without errors.
    Ok,
    /// The document parsed with errors; the tree is best effort.
    Error,
}

impl ParserState {
    /// Whether the tree delivered with this state is final.
    pub fn is_finished(self) -> bool {
        !matches!(self, Self::Parsing)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Parsing => "parsing",
            Self::Ok => "ok",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for ParserState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A named editor feature (highlighting, folding, navigator, ...) bound to
/// an optional selector.
///
/// A selector is a dotted chain of grammar roles such as `method.ID`. It
/// matches a path whose trailing items carry those roles, leaf last.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Feature {
    name: SmolStr,
    selector: Option<SmolStr>,
}

impl Feature {
    /// A feature that applies to every path.
    pub fn new(name: impl Into<SmolStr>) -> Self {
        Self {
            name: name.into(),
            selector: None,
        }
    }

    pub fn with_selector(mut self, selector: impl Into<SmolStr>) -> Self {
        self.selector = Some(selector.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn selector(&self) -> Option<&str> {
        self.selector.as_deref()
    }

    /// Whether `path` ends with the roles named by the selector.
    pub fn matches(&self, path: &AstPath) -> bool {
        let Some(selector) = &self.selector else {
            return true;
        };
        let mut items = path.iter().rev();
        selector.rsplit(PATH_SEPARATOR).all(|role| {
            items
                .next()
                .is_some_and(|item| item.role_name() == Some(role))
        })
    }
}

/// Callbacks an editor feature registers with the parse driver.
///
/// For one tree the driver calls `before_evaluation` once, `evaluate` for
/// every path and matching feature, then `after_evaluation` once.
pub trait AstEvaluator {
    fn before_evaluation(&mut self, _state: ParserState, _root: &AstItem) {}

    fn evaluate(&mut self, state: ParserState, path: &AstPath, feature: &Feature);

    fn after_evaluation(&mut self, _state: ParserState, _root: &AstItem) {}
}
