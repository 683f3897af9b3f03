//! Mount options: where the widget finds its markup.

use pagestack_core::{DeckConfig, PanelId};

/// Selectors and tuning used when mounting onto a document.
///
/// Panels are the element children of the stack container, in document
/// order. Each nav item's `href` fragment names the panel it opens.
#[derive(Debug, Clone, PartialEq)]
pub struct MountOptions {
    /// Stack container.
    pub stack_selector: String,
    /// Menu toggle button.
    pub menu_button_selector: String,
    /// Navigation container.
    pub nav_selector: String,
    /// Nav items inside the navigation container.
    pub nav_item_selector: String,
    /// Extra triggers: `(element id, panel id)`.
    pub shortcuts: Vec<(String, PanelId)>,
    /// Geometry and busy policy.
    pub config: DeckConfig,
}

impl Default for MountOptions {
    fn default() -> Self {
        Self {
            stack_selector: ".pages-stack".to_owned(),
            menu_button_selector: "button.menu-button".to_owned(),
            nav_selector: ".pages-nav".to_owned(),
            nav_item_selector: ".link--page".to_owned(),
            shortcuts: Vec::new(),
            config: DeckConfig::default(),
        }
    }
}

impl MountOptions {
    /// Default selectors and geometry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the stack container selector.
    #[must_use]
    pub fn with_stack_selector(mut self, selector: impl Into<String>) -> Self {
        self.stack_selector = selector.into();
        self
    }

    /// Set the menu button selector.
    #[must_use]
    pub fn with_menu_button_selector(mut self, selector: impl Into<String>) -> Self {
        self.menu_button_selector = selector.into();
        self
    }

    /// Set the navigation container selector.
    #[must_use]
    pub fn with_nav_selector(mut self, selector: impl Into<String>) -> Self {
        self.nav_selector = selector.into();
        self
    }

    /// Set the nav item selector, matched inside the navigation container.
    #[must_use]
    pub fn with_nav_item_selector(mut self, selector: impl Into<String>) -> Self {
        self.nav_item_selector = selector.into();
        self
    }

    /// Bind the element with id `element_id` to open `panel` on click.
    #[must_use]
    pub fn with_shortcut(
        mut self,
        element_id: impl Into<String>,
        panel: impl Into<PanelId>,
    ) -> Self {
        self.shortcuts.push((element_id.into(), panel.into()));
        self
    }

    /// Replace the deck configuration.
    #[must_use]
    pub fn with_config(mut self, config: DeckConfig) -> Self {
        self.config = config;
        self
    }
}
