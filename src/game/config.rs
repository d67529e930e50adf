//! Board parameters.

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::game::grid::cell_count;

/// Fixed parameters of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Number of players; ids are `1..=players`.
    pub players: u32,
    /// Maximum number of areas one player may own at a time.
    pub areas: u32,
}

impl GameConfig {
    /// Bundle board parameters.
    #[must_use]
    pub const fn new(width: u32, height: u32, players: u32, areas: u32) -> Self {
        Self {
            width,
            height,
            players,
            areas,
        }
    }

    /// Check that every parameter is at least 1 and the grid is addressable.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("players", self.players),
            ("areas", self.areas),
        ] {
            if value == 0 {
                return Err(ConfigError::ZeroParameter { name });
            }
        }
        cell_count(self.width, self.height)?;
        Ok(())
    }

    /// Number of cells on the board.
    #[must_use]
    pub const fn cells(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}
