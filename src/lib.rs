// Allow unwrap and truncating casts in tests (test code is not production)
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::cast_possible_truncation))]
//! Gamma: an engine for a territory-claiming board game.
//!
//! Players take turns claiming single cells of a rectangular grid. The
//! cells one player owns form areas (maximal 4-connected regions), and no
//! player may own more than a fixed number of areas at once. Once per game
//! each player may make a golden move: take over a single cell of an
//! opponent, provided nobody ends up above the area limit.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────┐
//! │   Batch protocol  │  Interactive UI │
//! ├─────────────────────────────────────┤
//! │    Board (moves, golden moves)      │
//! ├─────────────────────────────────────┤
//! │  Area deltas  │  Flood fill (BFS)   │
//! └─────────────────────────────────────┘
//! ```

pub mod batch;
pub mod error;
pub mod game;
pub mod render;
pub mod summary;

pub use error::{ConfigError, GammaResult, OutOfMemory};

// Re-export key game types at crate root for convenience
pub use game::{Board, Coord, GameConfig, Grid, PlayerId, PlayerState, Rejection};
