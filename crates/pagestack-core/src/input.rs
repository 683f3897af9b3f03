//! Input binding: UI events to state machine calls.
//!
//! # Keybindings
//!
//! | Input | Condition | Action |
//! |-------|-----------|--------|
//! | Menu button click | always | `toggle_menu` |
//! | Nav item click | always | `open_page(item target)`, prevent default |
//! | Shortcut click | always | `open_page(bound panel)`, prevent default |
//! | Panel click | menu open | `open_page(panel)`, prevent default |
//! | Escape | menu open | `close_menu` |
//!
//! Bindings are fixed when the [`InputBinder`] is built.

use tracing::debug;

use crate::machine::PageStack;
use crate::notifier::TransitionNotifier;
use crate::panel::PanelId;

/// Legacy `keyCode` of the Escape key.
pub const ESCAPE_KEY_CODE: u32 = 27;

/// Keys the binder distinguishes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Key {
    /// Classify a DOM keyboard event from its `key` and legacy `keyCode`.
    #[must_use]
    pub fn from_dom(key: &str, key_code: u32) -> Self {
        if matches!(key, "Escape" | "Esc") || key_code == ESCAPE_KEY_CODE {
            Self::Escape
        } else {
            Self::Other
        }
    }
}

/// A user interaction, already resolved to a bound element.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiEvent {
    /// The menu trigger was clicked.
    MenuButtonClick,
    /// The nav item at this binding index was clicked.
    NavItemClick(usize),
    /// The shortcut trigger at this binding index was clicked.
    ShortcutClick(usize),
    /// The panel at this deck index was clicked.
    PanelClick(usize),
    /// A key was pressed anywhere in the document.
    KeyDown(Key),
}

/// What dispatching an event did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Outcome {
    /// The host should suppress the browser's default action.
    pub prevent_default: bool,
    /// The machine accepted the request (applied or queued).
    pub changed: bool,
}

impl Outcome {
    /// Nothing happened.
    pub const IGNORED: Self = Self {
        prevent_default: false,
        changed: false,
    };
}

/// Static map from nav items and shortcut triggers to panel ids.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Bindings {
    nav_targets: Vec<PanelId>,
    shortcuts: Vec<PanelId>,
}

impl Bindings {
    /// No bindings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind nav items from their `href` values, in document order.
    #[must_use]
    pub fn from_hrefs<I, S>(hrefs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            nav_targets: hrefs
                .into_iter()
                .map(|href| PanelId::from_href(href.as_ref()))
                .collect(),
            shortcuts: Vec::new(),
        }
    }

    /// Add a shortcut trigger that always opens `panel`.
    #[must_use]
    pub fn with_shortcut(mut self, panel: impl Into<PanelId>) -> Self {
        self.shortcuts.push(panel.into());
        self
    }

    /// Target of the nav item at `index`.
    #[must_use]
    pub fn nav_target(&self, index: usize) -> Option<&PanelId> {
        self.nav_targets.get(index)
    }

    /// Target of the shortcut at `index`.
    #[must_use]
    pub fn shortcut_target(&self, index: usize) -> Option<&PanelId> {
        self.shortcuts.get(index)
    }

    /// Number of bound nav items.
    #[must_use]
    pub fn nav_len(&self) -> usize {
        self.nav_targets.len()
    }

    /// Number of shortcut triggers.
    #[must_use]
    pub fn shortcut_len(&self) -> usize {
        self.shortcuts.len()
    }
}

/// Routes [`UiEvent`]s into a [`PageStack`].
#[derive(Debug, Clone, Default)]
pub struct InputBinder {
    bindings: Bindings,
}

impl InputBinder {
    /// Create a binder over fixed bindings.
    #[must_use]
    pub fn new(bindings: Bindings) -> Self {
        Self { bindings }
    }

    /// The bindings.
    #[must_use]
    pub fn bindings(&self) -> &Bindings {
        &self.bindings
    }

    /// Apply `event` to `stack`.
    pub fn dispatch<N: TransitionNotifier>(
        &self,
        stack: &mut PageStack<N>,
        event: UiEvent,
    ) -> Outcome {
        match event {
            UiEvent::MenuButtonClick => Outcome {
                prevent_default: false,
                changed: stack.toggle_menu(),
            },
            UiEvent::NavItemClick(index) => {
                Self::open_bound(stack, self.bindings.nav_target(index), "nav item", index)
            }
            UiEvent::ShortcutClick(index) => Self::open_bound(
                stack,
                self.bindings.shortcut_target(index),
                "shortcut",
                index,
            ),
            UiEvent::PanelClick(index) => {
                if !stack.is_menu_open() {
                    return Outcome::IGNORED;
                }
                let Some(id) = stack.deck().get(index).map(|p| p.id().clone()) else {
                    debug!(index, "click on unknown panel");
                    return Outcome::IGNORED;
                };
                Outcome {
                    prevent_default: true,
                    changed: stack.open_page(Some(id.as_str())),
                }
            }
            UiEvent::KeyDown(Key::Escape) if stack.is_menu_open() => Outcome {
                prevent_default: false,
                changed: stack.close_menu(),
            },
            UiEvent::KeyDown(_) => Outcome::IGNORED,
        }
    }

    fn open_bound<N: TransitionNotifier>(
        stack: &mut PageStack<N>,
        target: Option<&PanelId>,
        kind: &'static str,
        index: usize,
    ) -> Outcome {
        let Some(target) = target else {
            debug!(kind, index, "click on unbound trigger");
            return Outcome::IGNORED;
        };
        Outcome {
            prevent_default: true,
            changed: stack.open_page(Some(target.as_str())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DeckConfig;
    use crate::machine::NavPhase;
    use crate::notifier::{ManualNotifier, SignalOrigin};
    use crate::panel::Deck;

    fn setup() -> (InputBinder, PageStack<ManualNotifier>) {
        let deck = Deck::new(["home", "docs", "blog", "about", "contact"]).unwrap();
        let stack = PageStack::new(deck, DeckConfig::default(), ManualNotifier::new());
        let bindings = Bindings::from_hrefs(["#home", "#docs", "#blog", "#about", "#contact"])
            .with_shortcut("docs");
        (InputBinder::new(bindings), stack)
    }

    #[test]
    fn escape_detection() {
        assert_eq!(Key::from_dom("Escape", 0), Key::Escape);
        assert_eq!(Key::from_dom("Esc", 0), Key::Escape);
        assert_eq!(Key::from_dom("", 27), Key::Escape);
        assert_eq!(Key::from_dom("a", 65), Key::Other);
    }

    #[test]
    fn bindings_strip_fragment_marker() {
        let b = Bindings::from_hrefs(["#a", "b"]);
        assert_eq!(b.nav_target(0).map(PanelId::as_str), Some("a"));
        assert_eq!(b.nav_target(1).map(PanelId::as_str), Some("b"));
        assert_eq!(b.nav_target(2), None);
        assert_eq!(b.nav_len(), 2);
        assert_eq!(b.shortcut_len(), 0);
    }

    #[test]
    fn menu_button_toggles() {
        let (binder, mut stack) = setup();
        let out = binder.dispatch(&mut stack, UiEvent::MenuButtonClick);
        assert_eq!(
            out,
            Outcome {
                prevent_default: false,
                changed: true
            }
        );
        assert!(stack.is_menu_open());
    }

    #[test]
    fn nav_click_opens_target_and_prevents_default() {
        let (binder, mut stack) = setup();
        let out = binder.dispatch(&mut stack, UiEvent::NavItemClick(3));
        assert!(out.prevent_default);
        assert_eq!(stack.current_id().as_str(), "about");
    }

    #[test]
    fn unbound_nav_index_is_ignored() {
        let (binder, mut stack) = setup();
        assert_eq!(
            binder.dispatch(&mut stack, UiEvent::NavItemClick(42)),
            Outcome::IGNORED
        );
        assert_eq!(stack.phase(), NavPhase::Idle { current: 0 });
    }

    #[test]
    fn shortcut_opens_bound_panel() {
        let (binder, mut stack) = setup();
        let out = binder.dispatch(&mut stack, UiEvent::ShortcutClick(0));
        assert!(out.prevent_default);
        assert_eq!(stack.current_index(), 1);
    }

    #[test]
    fn panel_click_needs_open_menu() {
        let (binder, mut stack) = setup();
        assert_eq!(
            binder.dispatch(&mut stack, UiEvent::PanelClick(1)),
            Outcome::IGNORED
        );

        binder.dispatch(&mut stack, UiEvent::MenuButtonClick);
        let out = binder.dispatch(&mut stack, UiEvent::PanelClick(1));
        assert!(out.prevent_default);
        assert_eq!(stack.current_index(), 1);
        assert!(stack.signal_transition_end(1, SignalOrigin::Target));
        assert!(!stack.is_menu_open());
    }

    #[test]
    fn escape_closes_only_open_menu() {
        let (binder, mut stack) = setup();
        assert_eq!(
            binder.dispatch(&mut stack, UiEvent::KeyDown(Key::Escape)),
            Outcome::IGNORED
        );

        binder.dispatch(&mut stack, UiEvent::MenuButtonClick);
        let out = binder.dispatch(&mut stack, UiEvent::KeyDown(Key::Escape));
        assert!(out.changed);
        assert!(stack.is_transitioning());
        assert_eq!(stack.current_index(), 0);
    }

    #[test]
    fn other_keys_do_nothing() {
        let (binder, mut stack) = setup();
        binder.dispatch(&mut stack, UiEvent::MenuButtonClick);
        assert_eq!(
            binder.dispatch(&mut stack, UiEvent::KeyDown(Key::Other)),
            Outcome::IGNORED
        );
        assert_eq!(stack.phase(), NavPhase::MenuOpen { current: 0 });
    }
}
