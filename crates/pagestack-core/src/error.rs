//! Construction errors for a panel deck.
//!
//! Runtime operations on a built [`PageStack`](crate::PageStack) never fail:
//! invalid requests degrade (unknown targets fall back to the current panel,
//! out-of-phase calls are ignored). Only assembling the deck can be rejected.

/// Errors from building a [`Deck`](crate::Deck).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeckError {
    /// The stack container had no panels.
    NoPanels,
    /// The panel at `index` has an empty identifier.
    EmptyPanelId { index: usize },
    /// Two panels share the same identifier.
    DuplicatePanelId(String),
}

impl std::fmt::Display for DeckError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoPanels => write!(f, "page stack has no panels"),
            Self::EmptyPanelId { index } => write!(f, "panel {index} has an empty id"),
            Self::DuplicatePanelId(id) => write!(f, "duplicate panel id '{id}'"),
        }
    }
}

impl std::error::Error for DeckError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(DeckError::NoPanels.to_string(), "page stack has no panels");
        assert_eq!(
            DeckError::EmptyPanelId { index: 2 }.to_string(),
            "panel 2 has an empty id"
        );
        assert_eq!(
            DeckError::DuplicatePanelId("page-home".into()).to_string(),
            "duplicate panel id 'page-home'"
        );
    }
}
