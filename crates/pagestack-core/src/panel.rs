//! Panels and the fixed deck that holds them.
//!
//! A [`Deck`] is built once from the ordered panel identifiers found in the
//! stack container. Order defines the panel index. Panels are never added
//! or removed afterwards; only their active flag and style change.

use ahash::AHashMap;

use crate::error::DeckError;
use crate::geometry::PanelStyle;

/// Identifier shared by a panel element and the nav items targeting it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(String);

impl PanelId {
    /// Create an identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Derive the target id from a link `href` by stripping one leading `#`.
    ///
    /// ```
    /// # use pagestack_core::PanelId;
    /// assert_eq!(PanelId::from_href("#page-home").as_str(), "page-home");
    /// assert_eq!(PanelId::from_href("page-home").as_str(), "page-home");
    /// ```
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        Self::new(href.strip_prefix('#').unwrap_or(href))
    }

    /// The raw identifier.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for PanelId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for PanelId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

/// One full-viewport panel.
#[derive(Debug, Clone, PartialEq)]
pub struct Panel {
    id: PanelId,
    index: usize,
    pub(crate) active: bool,
    pub(crate) style: PanelStyle,
}

impl Panel {
    /// Identifier.
    #[must_use]
    pub fn id(&self) -> &PanelId {
        &self.id
    }

    /// Position in the deck.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Whether this panel is the current page.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Current style channels.
    #[must_use]
    pub fn style(&self) -> &PanelStyle {
        &self.style
    }
}

/// Ordered, fixed set of panels with id lookup.
#[derive(Debug, Clone)]
pub struct Deck {
    panels: Vec<Panel>,
    by_id: AHashMap<PanelId, usize>,
}

impl Deck {
    /// Build a deck from panel ids in display order.
    ///
    /// # Errors
    ///
    /// - [`DeckError::NoPanels`] if `ids` is empty.
    /// - [`DeckError::EmptyPanelId`] if an id is the empty string.
    /// - [`DeckError::DuplicatePanelId`] if an id repeats.
    pub fn new<I, S>(ids: I) -> Result<Self, DeckError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut panels = Vec::new();
        let mut by_id = AHashMap::new();
        for (index, raw) in ids.into_iter().enumerate() {
            let id = PanelId::new(raw);
            if id.as_str().is_empty() {
                return Err(DeckError::EmptyPanelId { index });
            }
            if by_id.insert(id.clone(), index).is_some() {
                return Err(DeckError::DuplicatePanelId(id.0));
            }
            panels.push(Panel {
                id,
                index,
                active: index == 0,
                style: PanelStyle::default(),
            });
        }
        if panels.is_empty() {
            return Err(DeckError::NoPanels);
        }
        Ok(Self { panels, by_id })
    }

    /// Number of panels.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    /// Always false for a constructed deck; present for API symmetry.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    /// Index of the panel with `id`.
    #[must_use]
    pub fn index_of(&self, id: &str) -> Option<usize> {
        self.by_id.get(&PanelId::new(id)).copied()
    }

    /// Panel at `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Panel> {
        self.panels.get(index)
    }

    pub(crate) fn get_mut(&mut self, index: usize) -> Option<&mut Panel> {
        self.panels.get_mut(index)
    }

    /// All panels in deck order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Number of panels flagged active.
    #[must_use]
    pub fn active_count(&self) -> usize {
        self.panels.iter().filter(|p| p.active).count()
    }
}
