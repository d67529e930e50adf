//! JSON summary of a finished game.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use serde::Serialize;

use crate::error::GammaResult;
use crate::game::{Board, GameConfig, PlayerId};

/// Final standing of one player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct PlayerSummary {
    /// Player id.
    pub id: PlayerId,
    /// Cells owned.
    pub busy_fields: u64,
    /// Areas owned.
    pub areas: u32,
    /// Whether the golden move was spent.
    pub golden_used: bool,
}

/// Snapshot of a board suitable for machine consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GameSummary {
    /// Parameters the game was played with.
    pub config: GameConfig,
    /// One entry per player, in id order.
    pub players: Vec<PlayerSummary>,
    /// Text rendering of the final board.
    pub board: String,
}

impl GameSummary {
    /// Summarize the current state of `board`.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if the board cannot be rendered.
    pub fn from_board(board: &Board) -> GammaResult<Self> {
        let players = (1..=board.players())
            .filter_map(|id| {
                board.player(id).map(|state| PlayerSummary {
                    id,
                    busy_fields: board.busy_fields(id),
                    areas: state.busy_areas,
                    golden_used: state.golden_used,
                })
            })
            .collect();

        Ok(Self {
            config: *board.config(),
            players,
            board: board.render()?,
        })
    }

    /// Write the summary as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or written.
    pub fn write_json(&self, path: &Path) -> io::Result<()> {
        let mut writer = BufWriter::new(File::create(path)?);
        serde_json::to_writer_pretty(&mut writer, self)?;
        writeln!(writer)?;
        writer.flush()
    }
}
