//! Player state management.

/// Player identifier. Valid players are `1..=players`; `0` marks an empty cell.
pub type PlayerId = u32;

/// Per-player bookkeeping kept alongside the grid.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlayerState {
    /// Number of maximal connected areas the player currently owns.
    pub busy_areas: u32,
    /// Whether the player has already spent their golden move.
    pub golden_used: bool,
}

impl PlayerState {
    /// Create the state of a player who owns nothing yet.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            busy_areas: 0,
            golden_used: false,
        }
    }

    /// Whether the golden move is still available.
    #[must_use]
    pub const fn has_golden(&self) -> bool {
        !self.golden_used
    }

    /// Spend the golden move. Never resets.
    pub fn use_golden(&mut self) {
        debug_assert!(!self.golden_used, "golden move spent twice");
        self.golden_used = true;
    }

    /// Apply a signed correction to the area count.
    ///
    /// Corrections are computed from connectivity and can never take the
    /// count below zero on a consistent board.
    pub fn adjust_areas(&mut self, delta: i64) {
        let next = i64::from(self.busy_areas) + delta;
        debug_assert!(next >= 0, "area count went negative");
        self.busy_areas = u32::try_from(next.max(0)).unwrap_or(u32::MAX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_player_creation() {
        let player = PlayerState::new();
        assert_eq!(player.busy_areas, 0);
        assert!(player.has_golden());
    }

    #[test]
    fn test_player_use_golden() {
        let mut player = PlayerState::new();
        player.use_golden();
        assert!(player.golden_used);
        assert!(!player.has_golden());
    }

    #[test]
    fn test_player_adjust_areas() {
        let mut player = PlayerState::new();
        player.adjust_areas(3);
        assert_eq!(player.busy_areas, 3);
        player.adjust_areas(-2);
        assert_eq!(player.busy_areas, 1);
        player.adjust_areas(0);
        assert_eq!(player.busy_areas, 1);
    }
}
