#![forbid(unsafe_code)]

//! Core of the page stack navigation widget.
//!
//! A deck of full-screen panels is shown one at a time; the panels that come
//! next wait below the viewport as a short 3D stack. Opening the menu tilts
//! that stack back into a layered card view, and choosing a page slides it to
//! the front while the rest of the stack recedes.
//!
//! This crate is platform independent. It owns:
//!
//! - [`geometry`]: stack membership, z-order and style placements
//! - [`panel`]: the panel deck and per-panel style channels
//! - [`markers`]: chrome class markers projected from state
//! - [`notifier`]: the end-of-transition contract with a synchronous fallback
//! - [`machine`]: the navigation state machine ([`PageStack`])
//! - [`input`]: UI event dispatch into the machine
//! - [`config`]: geometric constants and the busy policy
//!
//! Hosts (see the `pagestack-web` crate) implement [`Surface`] to write the
//! projected styles and [`TransitionNotifier`] to report animation ends.

pub mod config;
pub mod error;
pub mod geometry;
pub mod input;
pub mod machine;
pub mod markers;
pub mod notifier;
pub mod panel;

pub use config::{BusyPolicy, DeckConfig};
pub use error::DeckError;
pub use geometry::{Offset3d, PanelStyle, StackIndices, stack_indices, z_order};
pub use input::{Bindings, InputBinder, Key, Outcome, UiEvent};
pub use machine::{NavPhase, PageStack, Request};
pub use markers::{Markers, PANEL_INACTIVE_CLASS};
pub use notifier::{
    Arming, ImmediateNotifier, ManualNotifier, SignalOrigin, TransitionNotifier, TransitionTicket,
};
pub use panel::{Deck, Panel, PanelId};

/// Presentation layer that consumes the projected visual state.
///
/// Implementations write the four numeric style channels (offset triple,
/// opacity, z-order) and the boolean markers. The machine only calls these
/// for panels whose state changed since the previous present.
pub trait Surface {
    /// Write the style channels of the panel at `index`.
    fn set_panel_style(&mut self, index: usize, style: &PanelStyle);

    /// Toggle the `inactive` marker of the panel at `index`.
    fn set_panel_inactive(&mut self, index: usize, inactive: bool);

    /// Replace the chrome markers (trigger, nav overlay, stack container).
    fn set_chrome(&mut self, markers: Markers);
}
