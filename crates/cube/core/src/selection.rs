//! Edit-mode selection for manual recoloring.
//!
//! Two-step protocol: the first pointer interaction records a target without
//! mutating anything; the following color choice applies to exactly that
//! target and clears it. While a session is enabled the input layer is
//! expected to suppress click-to-rotate.

use crate::state::{Color, LatticePos, Slot};

/// Pending recolor target: a lattice position plus a sticker slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Selection {
    pub position: LatticePos,
    pub slot: Slot,
}

/// Manual recoloring session.
#[derive(Clone, Copy, Debug, Default)]
pub struct EditSession {
    enabled: bool,
    target: Option<Selection>,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether edit mode is on (and turn-by-click should be suppressed).
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Toggles edit mode; any pending target is dropped either way.
    pub fn toggle(&mut self) -> bool {
        self.enabled = !self.enabled;
        self.target = None;
        self.enabled
    }

    /// Records the pending target. Ignored while edit mode is off.
    pub fn select(&mut self, position: LatticePos, slot: Slot) {
        if self.enabled {
            self.target = Some(Selection { position, slot });
        }
    }

    pub fn target(&self) -> Option<Selection> {
        self.target
    }

    /// Resolves a color choice against the pending target, clearing it.
    ///
    /// Returns the edit to apply, or `None` when nothing was selected.
    pub fn apply_color(&mut self, color: Color) -> Option<(Selection, Color)> {
        self.target.take().map(|selection| (selection, color))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_requires_edit_mode() {
        let mut session = EditSession::new();
        session.select(LatticePos::new(1, 0, 0), Slot::PosX);
        assert_eq!(session.target(), None);

        session.toggle();
        session.select(LatticePos::new(1, 0, 0), Slot::PosX);
        assert!(session.target().is_some());
    }

    #[test]
    fn color_choice_consumes_the_target() {
        let mut session = EditSession::new();
        session.toggle();
        session.select(LatticePos::new(0, 1, 0), Slot::PosY);

        let (selection, color) = session.apply_color(Color::Red).unwrap();
        assert_eq!(selection.position, LatticePos::new(0, 1, 0));
        assert_eq!(selection.slot, Slot::PosY);
        assert_eq!(color, Color::Red);

        // Second choice with no new selection is a no-op.
        assert_eq!(session.apply_color(Color::Blue), None);
    }

    #[test]
    fn toggling_off_clears_pending_target() {
        let mut session = EditSession::new();
        session.toggle();
        session.select(LatticePos::new(0, 0, 1), Slot::PosZ);
        session.toggle();
        assert!(!session.is_enabled());
        assert_eq!(session.target(), None);
    }
}
