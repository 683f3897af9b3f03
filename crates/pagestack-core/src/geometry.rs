//! Stack geometry: which panels form the visible stack and where they sit.
//!
//! The stack is the current panel followed by the next two panels in deck
//! order, wrapping at the end. Position in the stack is visual depth:
//! position 0 is the front.
//!
//! # Invariants
//!
//! 1. [`stack_indices`] never returns an index twice.
//! 2. For `total >= 3` the unexcluded stack holds exactly three indices and
//!    starts with `current`.
//! 3. An excluded index never appears in the result.
//! 4. [`z_order`] gives `current` the value `total` and every other panel a
//!    distinct value in `1..total`, decreasing in deck order from `current`.
//!
//! # Small decks
//!
//! With fewer than three panels the three candidates collide. Duplicates are
//! dropped, keeping first occurrence, so the stack holds at most `total`
//! panels.

use crate::config::DeckConfig;

/// Maximum number of panels in the stack, including the current one.
pub const STACK_DEPTH: usize = 3;

/// Ordered stack membership, at most [`STACK_DEPTH`] panel indices.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StackIndices {
    slots: [usize; STACK_DEPTH],
    len: usize,
}

impl StackIndices {
    fn push(&mut self, index: usize) {
        if self.len < STACK_DEPTH && !self.contains(index) {
            self.slots[self.len] = index;
            self.len += 1;
        }
    }

    /// The indices in stack order.
    #[inline]
    #[must_use]
    pub fn as_slice(&self) -> &[usize] {
        &self.slots[..self.len]
    }

    /// Number of panels in the stack.
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether the stack is empty.
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Whether `index` is part of the stack.
    #[must_use]
    pub fn contains(&self, index: usize) -> bool {
        self.as_slice().contains(&index)
    }

    /// Stack position of `index`, if present.
    #[must_use]
    pub fn position(&self, index: usize) -> Option<usize> {
        self.as_slice().iter().position(|&i| i == index)
    }

    /// Iterate `(position, index)` pairs from the front.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.as_slice().iter().copied().enumerate()
    }
}

/// Compute the stack for `current` in a deck of `total` panels.
///
/// Candidates are `current`, `current + 1` and `current + 2`, all modulo
/// `total`, in that order. `exclude` removes one index from the result.
/// An empty deck yields an empty stack.
#[must_use]
pub fn stack_indices(current: usize, total: usize, exclude: Option<usize>) -> StackIndices {
    let mut out = StackIndices::default();
    if total == 0 {
        return out;
    }
    debug_assert!(current < total, "current {current} out of range for {total}");
    for step in 0..STACK_DEPTH {
        let index = (current + step) % total;
        if exclude != Some(index) {
            out.push(index);
        }
    }
    out
}

/// Z-order of panel `index` when `current` is in front.
///
/// Panels before `current` get `current - index`; the rest get
/// `total + current - index`, so ordering wraps around the deck.
#[must_use]
pub fn z_order(index: usize, current: usize, total: usize) -> i32 {
    let z = if index < current {
        current - index
    } else {
        total + current - index
    };
    i32::try_from(z).unwrap_or(i32::MAX)
}

/// A 3D translation: x/y in percent of the panel size, z in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Offset3d {
    pub x_pct: f32,
    pub y_pct: f32,
    pub z_px: f32,
}

impl Offset3d {
    /// No translation.
    pub const ORIGIN: Self = Self::new(0.0, 0.0, 0.0);

    /// Create an offset.
    #[must_use]
    pub const fn new(x_pct: f32, y_pct: f32, z_px: f32) -> Self {
        Self { x_pct, y_pct, z_px }
    }

    /// CSS `transform` value, e.g. `translate3d(0%,75%,-300px)`.
    #[must_use]
    pub fn css_transform(&self) -> String {
        format!(
            "translate3d({}%,{}%,{}px)",
            self.x_pct, self.y_pct, self.z_px
        )
    }
}

/// The four style channels a panel exposes to the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PanelStyle {
    pub offset: Offset3d,
    pub opacity: f32,
    pub z_index: i32,
}

impl Default for PanelStyle {
    fn default() -> Self {
        Self {
            offset: Offset3d::ORIGIN,
            opacity: 1.0,
            z_index: 0,
        }
    }
}

/// Named panel placements.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Placement {
    /// Fully in view.
    Front,
    /// Waiting below the viewport; also where the receding set goes during
    /// a transition.
    BelowViewport,
    /// Outside the stack, pushed back and sunk.
    Hidden,
    /// Fanned out behind the viewport while the menu is open.
    Receding { position: usize },
}

impl Placement {
    /// Resolve to a concrete offset.
    #[must_use]
    pub fn offset(self, config: &DeckConfig) -> Offset3d {
        match self {
            Self::Front => Offset3d::ORIGIN,
            Self::BelowViewport => Offset3d::new(0.0, config.reveal_y_pct, 0.0),
            Self::Hidden => Offset3d::new(0.0, config.hidden_y_pct, config.hidden_z_px),
            Self::Receding { position } => Offset3d::new(
                0.0,
                config.receding_y_pct,
                config.receding_base_z_px + config.receding_step_z_px * position as f32,
            ),
        }
    }
}

/// Opacity of the panel at stack `position`.
#[must_use]
pub fn stack_opacity(position: usize, config: &DeckConfig) -> f32 {
    (1.0 - config.opacity_step * position as f32).clamp(0.0, 1.0)
}
