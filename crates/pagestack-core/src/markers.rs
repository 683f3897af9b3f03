//! Boolean class markers exposed to the stylesheet.
//!
//! Markers are never toggled directly; the machine derives them from its
//! phase after every operation (see [`PageStack::chrome`]).
//!
//! [`PageStack::chrome`]: crate::PageStack::chrome

use bitflags::bitflags;

/// Class carried by every panel that is not the current page.
pub const PANEL_INACTIVE_CLASS: &str = "page--inactive";

bitflags! {
    /// Open-state markers on the chrome elements.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Markers: u8 {
        /// The menu trigger shows its "close" state.
        const MENU_BUTTON_OPEN = 0b001;
        /// The navigation overlay is revealed.
        const NAV_OPEN         = 0b010;
        /// The stack container enables its 3D transitions.
        const STACK_OPEN       = 0b100;
    }
}

impl Markers {
    /// Every marker, as set while the menu is open.
    pub const MENU: Self = Self::all();

    /// CSS class name of a single marker.
    #[must_use]
    pub fn class_name(self) -> Option<&'static str> {
        match self {
            m if m == Self::MENU_BUTTON_OPEN => Some("menu-button--open"),
            m if m == Self::NAV_OPEN => Some("pages-nav--open"),
            m if m == Self::STACK_OPEN => Some("pages-stack--open"),
            _ => None,
        }
    }
}
