//! End-of-transition notification.
//!
//! When a page opens, the machine arms a [`TransitionTicket`] on the target
//! panel and waits for the host to report that the panel's CSS transition
//! finished. The host then calls
//! [`PageStack::finish_transition`](crate::PageStack::finish_transition)
//! with that ticket.
//!
//! # Contract
//!
//! - A ticket is released at most once.
//! - Only signals whose origin is the armed panel itself count; signals
//!   bubbling up from descendants are ignored.
//! - Environments without transitions answer [`Arming::Immediate`], and the
//!   machine finalizes inside the same call.
//! - There is no cancellation. A signal that never arrives leaves the machine
//!   transitioning.

/// Identifier of one armed transition.
///
/// Tickets increase monotonically per machine, so a late signal from an
/// older transition can be told apart from the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TransitionTicket(u64);

impl TransitionTicket {
    pub(crate) const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// Raw ticket value.
    #[inline]
    #[must_use]
    pub const fn id(self) -> u64 {
        self.0
    }
}

/// How the notifier will deliver completion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Arming {
    /// The host will report completion later.
    Pending,
    /// No animation will run; finalize now.
    Immediate,
}

/// Where an end-of-transition signal originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalOrigin {
    /// The armed panel's own transition.
    Target,
    /// A transition inside the panel's content, bubbled up.
    Descendant,
}

/// Arms a one-shot completion for a panel transition.
pub trait TransitionNotifier {
    /// Arrange for `ticket` to be reported once the transition on panel
    /// `panel` ends.
    fn arm(&mut self, panel: usize, ticket: TransitionTicket) -> Arming;
}

impl<N: TransitionNotifier + ?Sized> TransitionNotifier for Box<N> {
    fn arm(&mut self, panel: usize, ticket: TransitionTicket) -> Arming {
        (**self).arm(panel, ticket)
    }
}

/// Notifier for environments without CSS transitions.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImmediateNotifier;

impl TransitionNotifier for ImmediateNotifier {
    fn arm(&mut self, _panel: usize, _ticket: TransitionTicket) -> Arming {
        Arming::Immediate
    }
}

/// Host-driven notifier: records armed tickets and releases them when the
/// caller reports a signal.
///
/// Used by hosts that receive transition events through their own loop, and
/// by tests that step through transitions deterministically.
#[derive(Debug, Clone, Default)]
pub struct ManualNotifier {
    armed: Vec<(usize, TransitionTicket)>,
}

impl ManualNotifier {
    /// Create a notifier with nothing armed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Report an end-of-transition signal on `panel`.
    ///
    /// Returns every ticket armed on that panel, each exactly once.
    /// Descendant signals release nothing.
    pub fn signal(&mut self, panel: usize, origin: SignalOrigin) -> Vec<TransitionTicket> {
        if origin == SignalOrigin::Descendant {
            return Vec::new();
        }
        let mut released = Vec::new();
        self.armed.retain(|&(armed_panel, ticket)| {
            if armed_panel == panel {
                released.push(ticket);
                false
            } else {
                true
            }
        });
        released
    }

    /// Whether any ticket is armed on `panel`.
    #[must_use]
    pub fn is_armed(&self, panel: usize) -> bool {
        self.armed.iter().any(|&(p, _)| p == panel)
    }

    /// Armed `(panel, ticket)` pairs in arming order.
    #[must_use]
    pub fn armed(&self) -> &[(usize, TransitionTicket)] {
        &self.armed
    }
}

impl TransitionNotifier for ManualNotifier {
    fn arm(&mut self, panel: usize, ticket: TransitionTicket) -> Arming {
        self.armed.push((panel, ticket));
        Arming::Pending
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn immediate_always_immediate() {
        let mut n = ImmediateNotifier;
        assert_eq!(n.arm(0, TransitionTicket::new(1)), Arming::Immediate);
    }

    #[test]
    fn manual_releases_once() {
        let mut n = ManualNotifier::new();
        assert_eq!(n.arm(2, TransitionTicket::new(7)), Arming::Pending);
        assert!(n.is_armed(2));
        assert_eq!(
            n.signal(2, SignalOrigin::Target),
            vec![TransitionTicket::new(7)]
        );
        assert!(n.signal(2, SignalOrigin::Target).is_empty());
        assert!(!n.is_armed(2));
    }

    #[test]
    fn manual_ignores_descendant_signals() {
        let mut n = ManualNotifier::new();
        n.arm(1, TransitionTicket::new(3));
        assert!(n.signal(1, SignalOrigin::Descendant).is_empty());
        assert!(n.is_armed(1));
    }

    #[test]
    fn manual_scopes_to_panel() {
        let mut n = ManualNotifier::new();
        n.arm(1, TransitionTicket::new(3));
        n.arm(4, TransitionTicket::new(4));
        assert!(n.signal(0, SignalOrigin::Target).is_empty());
        assert_eq!(
            n.signal(4, SignalOrigin::Target),
            vec![TransitionTicket::new(4)]
        );
        assert_eq!(n.armed(), &[(1, TransitionTicket::new(3))]);
    }

    #[test]
    fn boxed_notifier_delegates() {
        let mut n: Box<dyn TransitionNotifier> = Box::new(ManualNotifier::new());
        assert_eq!(n.arm(0, TransitionTicket::new(1)), Arming::Pending);
    }
}
