//! Navigation state machine for the page stack.
//!
//! [`PageStack`] owns the deck, the current page index and the navigation
//! phase. Every operation rewrites panel styles from [`geometry`] and, for
//! page changes, arms a completion on the target panel through its
//! [`TransitionNotifier`].
//!
//! # Phases
//!
//! ```text
//!            open_menu                 open_page / close_menu
//!   Idle ─────────────────▶ MenuOpen ──────────────────────────┐
//!    ▲  \                                                      ▼
//!    │   └──────────── open_page ────────────────────▶ Transitioning
//!    └──────────────── finish_transition(ticket) ◀─────────────┘
//! ```
//!
//! # Invariants
//!
//! 1. Outside `Transitioning`, exactly one panel is active and it is the
//!    panel at [`PageStack::current_index`].
//! 2. The current index changes only in `open_page` with a resolvable id,
//!    before the animation runs.
//! 3. Chrome markers are a function of the phase, never stored.
//! 4. Only the ticket of the in-flight transition finalizes it.
//! 5. A transition is armed only when the target's style differs from what
//!    the surface last showed; otherwise it finalizes in the same call.
//!
//! # Re-entry
//!
//! Requests arriving while `Transitioning` follow the configured
//! [`BusyPolicy`]: `Queue` keeps the latest one in a single slot and replays
//! it right after finalization, `Ignore` drops it.
//!
//! [`geometry`]: crate::geometry

use tracing::{debug, debug_span, warn};

use crate::Surface;
use crate::config::{BusyPolicy, DeckConfig};
use crate::geometry::{PanelStyle, Placement, stack_indices, stack_opacity, z_order};
use crate::markers::Markers;
use crate::notifier::{
    Arming, ImmediateNotifier, ManualNotifier, SignalOrigin, TransitionNotifier, TransitionTicket,
};
use crate::panel::{Deck, Panel, PanelId};

/// Navigation phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavPhase {
    /// One page shown, menu closed.
    Idle { current: usize },
    /// Menu open, stack fanned out behind the current page.
    MenuOpen { current: usize },
    /// A page is sliding to the front; waiting for `ticket`.
    Transitioning {
        from: usize,
        to: usize,
        ticket: TransitionTicket,
        /// The transition started with the menu open.
        from_menu: bool,
    },
}

/// A request that can be deferred while a transition is in flight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    ToggleMenu,
    OpenMenu,
    CloseMenu,
    OpenPage(Option<PanelId>),
}

/// The page stack navigation state machine.
#[derive(Debug)]
pub struct PageStack<N = ImmediateNotifier> {
    deck: Deck,
    config: DeckConfig,
    notifier: N,
    current: usize,
    phase: NavPhase,
    pending: Option<Request>,
    next_ticket: u64,
    /// Panels whose style or active flag changed since the last present.
    dirty: Vec<bool>,
    /// Style each panel had at the last present, if any.
    presented: Vec<Option<PanelStyle>>,
    presented_chrome: Option<Markers>,
}

impl PageStack<ImmediateNotifier> {
    /// Machine with default config and no animations.
    #[must_use]
    pub fn immediate(deck: Deck) -> Self {
        Self::new(deck, DeckConfig::default(), ImmediateNotifier)
    }
}

impl<N: TransitionNotifier> PageStack<N> {
    /// Create the machine in `Idle` on panel 0 and lay out the stack.
    #[must_use]
    pub fn new(deck: Deck, config: DeckConfig, notifier: N) -> Self {
        let total = deck.len();
        let mut stack = Self {
            deck,
            config,
            notifier,
            current: 0,
            phase: NavPhase::Idle { current: 0 },
            pending: None,
            next_ticket: 1,
            dirty: vec![true; total],
            presented: vec![None; total],
            presented_chrome: None,
        };
        stack.initialize_layout();
        stack
    }

    // --- Queries ---

    /// Index of the current page.
    #[inline]
    #[must_use]
    pub fn current_index(&self) -> usize {
        self.current
    }

    /// Identifier of the current page.
    #[must_use]
    pub fn current_id(&self) -> &PanelId {
        self.deck.panels()[self.current].id()
    }

    /// Navigation phase.
    #[inline]
    #[must_use]
    pub fn phase(&self) -> NavPhase {
        self.phase
    }

    /// Whether the menu counts as open. Stays true through a transition that
    /// started from the open menu, until it finalizes.
    #[must_use]
    pub fn is_menu_open(&self) -> bool {
        matches!(
            self.phase,
            NavPhase::MenuOpen { .. }
                | NavPhase::Transitioning {
                    from_menu: true,
                    ..
                }
        )
    }

    /// Whether a transition is in flight.
    #[must_use]
    pub fn is_transitioning(&self) -> bool {
        matches!(self.phase, NavPhase::Transitioning { .. })
    }

    /// Chrome markers projected from the phase.
    #[must_use]
    pub fn chrome(&self) -> Markers {
        match self.phase {
            NavPhase::MenuOpen { .. } => Markers::MENU,
            NavPhase::Transitioning {
                from_menu: true, ..
            } => Markers::STACK_OPEN,
            _ => Markers::empty(),
        }
    }

    /// The deck.
    #[must_use]
    pub fn deck(&self) -> &Deck {
        &self.deck
    }

    /// All panels in deck order.
    #[must_use]
    pub fn panels(&self) -> &[Panel] {
        self.deck.panels()
    }

    /// Active configuration.
    #[must_use]
    pub fn config(&self) -> &DeckConfig {
        &self.config
    }

    /// The request waiting for the in-flight transition, if any.
    #[must_use]
    pub fn pending_request(&self) -> Option<&Request> {
        self.pending.as_ref()
    }

    /// The notifier.
    #[must_use]
    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    /// Mutable access to the notifier.
    pub fn notifier_mut(&mut self) -> &mut N {
        &mut self.notifier
    }

    // --- Operations ---

    /// Reconcile every panel with the current index.
    ///
    /// The current panel is active, in front, fully opaque. Other stack
    /// members wait below the viewport with opacity falling per position;
    /// everything else is hidden and transparent.
    pub fn initialize_layout(&mut self) {
        let total = self.deck.len();
        let current = self.current;
        let stack = stack_indices(current, total, None);

        for index in 0..total {
            let placement = if index == current {
                Placement::Front
            } else if stack.contains(index) {
                Placement::BelowViewport
            } else {
                Placement::Hidden
            };
            let offset = placement.offset(&self.config);
            let opacity = stack
                .position(index)
                .map_or(0.0, |position| stack_opacity(position, &self.config));
            let z_index = z_order(index, current, total);

            self.update_panel(index, |panel| {
                panel.active = index == current;
                panel.style.offset = offset;
                panel.style.opacity = opacity;
                panel.style.z_index = z_index;
            });
        }
    }

    /// Toggle the menu: close it when open, open it otherwise.
    pub fn toggle_menu(&mut self) -> bool {
        if self.is_transitioning() {
            return self.defer(Request::ToggleMenu);
        }
        if self.is_menu_open() {
            self.close_menu()
        } else {
            self.open_menu()
        }
    }

    /// Open the menu, fanning the stack out behind the viewport.
    ///
    /// Valid from `Idle` only. Returns whether the request was applied (or
    /// queued).
    pub fn open_menu(&mut self) -> bool {
        let _span = debug_span!("page_stack_op", op = "open_menu").entered();
        let current = match self.phase {
            NavPhase::Idle { current } => current,
            NavPhase::Transitioning { .. } => return self.defer(Request::OpenMenu),
            NavPhase::MenuOpen { .. } => {
                debug!("menu already open");
                return false;
            }
        };

        let stack = stack_indices(current, self.deck.len(), None);
        for (position, index) in stack.iter() {
            let offset = Placement::Receding { position }.offset(&self.config);
            self.update_panel(index, |panel| panel.style.offset = offset);
        }
        self.phase = NavPhase::MenuOpen { current };
        true
    }

    /// Close the menu by reopening the current page.
    ///
    /// Valid from `MenuOpen` only.
    pub fn close_menu(&mut self) -> bool {
        match self.phase {
            NavPhase::MenuOpen { .. } => self.begin_open_page(None),
            NavPhase::Transitioning { .. } => self.defer(Request::CloseMenu),
            NavPhase::Idle { .. } => {
                debug!("close_menu ignored: menu not open");
                false
            }
        }
    }

    /// Bring a page to the front.
    ///
    /// `None` reopens the current page (how the menu closes). An id that is
    /// not in the deck falls back to the current page.
    pub fn open_page(&mut self, target: Option<&str>) -> bool {
        if self.is_transitioning() {
            return self.defer(Request::OpenPage(target.map(PanelId::new)));
        }
        self.begin_open_page(target)
    }

    /// Finalize the transition identified by `ticket`.
    ///
    /// Returns false for stale tickets and when nothing is in flight.
    pub fn finish_transition(&mut self, ticket: TransitionTicket) -> bool {
        match self.phase {
            NavPhase::Transitioning { ticket: armed, .. } if armed == ticket => {
                self.finalize();
                true
            }
            NavPhase::Transitioning { ticket: armed, .. } => {
                debug!(
                    stale = ticket.id(),
                    armed = armed.id(),
                    "ignoring stale transition ticket"
                );
                false
            }
            _ => {
                debug!(ticket = ticket.id(), "no transition in flight");
                false
            }
        }
    }

    /// Push changed panels and chrome markers to `surface`.
    pub fn present<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        for (index, dirty) in self.dirty.iter_mut().enumerate() {
            if !*dirty {
                continue;
            }
            let panel = &self.deck.panels()[index];
            surface.set_panel_style(index, panel.style());
            surface.set_panel_inactive(index, !panel.is_active());
            self.presented[index] = Some(*panel.style());
            *dirty = false;
        }

        let chrome = self.chrome();
        if self.presented_chrome != Some(chrome) {
            surface.set_chrome(chrome);
            self.presented_chrome = Some(chrome);
        }
    }

    /// Push every panel and the chrome markers to `surface`.
    pub fn present_all<S: Surface + ?Sized>(&mut self, surface: &mut S) {
        self.dirty.iter_mut().for_each(|d| *d = true);
        self.presented_chrome = None;
        self.present(surface);
    }

    /// Whether any panel or the chrome changed since the last present.
    #[must_use]
    pub fn needs_present(&self) -> bool {
        self.dirty.iter().any(|&d| d) || self.presented_chrome != Some(self.chrome())
    }

    // --- Internals ---

    fn begin_open_page(&mut self, target: Option<&str>) -> bool {
        let _span = debug_span!("page_stack_op", op = "open_page", panel_id = ?target).entered();
        let from = self.current;
        let from_menu = matches!(self.phase, NavPhase::MenuOpen { .. });

        let to = match target {
            None => from,
            Some(id) => match self.deck.index_of(id) {
                Some(index) => index,
                None => {
                    warn!(panel_id = id, "unknown panel id; reopening current page");
                    from
                }
            },
        };

        let front = Placement::Front.offset(&self.config);
        let moved = self.update_panel(to, |panel| {
            panel.style.offset = front;
            panel.style.opacity = 1.0;
        });

        let below = Placement::BelowViewport.offset(&self.config);
        for (_, index) in stack_indices(to, self.deck.len(), Some(to)).iter() {
            self.update_panel(index, |panel| panel.style.offset = below);
        }

        self.current = to;

        let ticket = TransitionTicket::new(self.next_ticket);
        self.next_ticket += 1;
        self.phase = NavPhase::Transitioning {
            from,
            to,
            ticket,
            from_menu,
        };
        debug!(from, to, ticket = ticket.id(), "transition started");

        // Only a visible change fires a transition end. Once a surface has
        // been presented, "visible" means relative to what it last showed: a
        // request replayed inside `finalize` can restore a style the surface
        // never saw change.
        let visible = match self.presented[to] {
            Some(shown) => shown.offset != front || shown.opacity != 1.0,
            None => moved,
        };
        if !visible || self.notifier.arm(to, ticket) == Arming::Immediate {
            self.finalize();
        }
        true
    }

    fn finalize(&mut self) {
        self.phase = NavPhase::Idle {
            current: self.current,
        };
        self.initialize_layout();
        debug_assert_eq!(self.deck.active_count(), 1);
        debug!(current = self.current, "transition finished");

        if let Some(request) = self.pending.take() {
            debug!(?request, "replaying deferred request");
            self.replay(request);
        }
    }

    fn replay(&mut self, request: Request) {
        match request {
            Request::ToggleMenu => self.toggle_menu(),
            Request::OpenMenu => self.open_menu(),
            Request::CloseMenu => self.close_menu(),
            Request::OpenPage(target) => self.open_page(target.as_ref().map(PanelId::as_str)),
        };
    }

    fn defer(&mut self, request: Request) -> bool {
        match self.config.busy_policy {
            BusyPolicy::Queue => {
                if let Some(replaced) = self.pending.replace(request) {
                    debug!(?replaced, "pending request replaced");
                }
                true
            }
            BusyPolicy::Ignore => {
                debug!(?request, "transition in flight; request dropped");
                false
            }
        }
    }

    /// Apply `f` to a panel, marking it dirty when it changed.
    fn update_panel(&mut self, index: usize, f: impl FnOnce(&mut Panel)) -> bool {
        let Some(panel) = self.deck.get_mut(index) else {
            return false;
        };
        let before = (panel.active, panel.style);
        f(panel);
        let changed = (panel.active, panel.style) != before;
        if changed {
            self.dirty[index] = true;
        }
        changed
    }
}

impl PageStack<ManualNotifier> {
    /// Report an end-of-transition signal on `panel` and finalize any
    /// transition it completes.
    pub fn signal_transition_end(&mut self, panel: usize, origin: SignalOrigin) -> bool {
        let tickets = self.notifier.signal(panel, origin);
        let mut finished = false;
        for ticket in tickets {
            finished |= self.finish_transition(ticket);
        }
        finished
    }
}
