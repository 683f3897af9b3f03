//! Mount failures.

use pagestack_core::DeckError;
use pagestack_core::config::ConfigError;

/// Errors from mounting the widget onto a document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MountError {
    /// No global `window` (not running in a browser main thread).
    NoWindow,
    /// The window has no document.
    NoDocument,
    /// A required element was not found; carries the selector or id.
    MissingElement(String),
    /// The panels could not form a deck.
    Deck(DeckError),
    /// The deck configuration is out of range.
    Config(ConfigError),
    /// A DOM call threw.
    Js(String),
}

impl std::fmt::Display for MountError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoWindow => write!(f, "no global window"),
            Self::NoDocument => write!(f, "window has no document"),
            Self::MissingElement(what) => write!(f, "element not found: {what}"),
            Self::Deck(e) => write!(f, "invalid panel deck: {e}"),
            Self::Config(e) => write!(f, "{e}"),
            Self::Js(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Deck(e) => Some(e),
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<DeckError> for MountError {
    fn from(e: DeckError) -> Self {
        Self::Deck(e)
    }
}

impl From<ConfigError> for MountError {
    fn from(e: ConfigError) -> Self {
        Self::Config(e)
    }
}
