//! Game layer for gamma.
//!
//! Implements the rules on top of a plain ownership grid:
//! - Grid of cells owned by players
//! - Per-player area counters kept in sync incrementally
//! - Flood-fill connectivity analysis around a single cell
//! - Ordinary and golden move validation

mod areas;
mod config;
mod flood;
mod grid;
mod invariants;
mod moves;
mod player;
mod state;

pub use areas::{AreaDelta, NeighborSummary, measure_placement, neighbor_components};
pub use config::GameConfig;
pub use flood::{Scratch, mark_component};
pub use grid::{Coord, EMPTY, Grid};
pub use invariants::{
    InvariantViolation, assert_invariants, check_invariants, count_areas, miscounted_players,
};
pub use moves::{Plan, Planned, Planner, Rejection};
pub use player::{PlayerId, PlayerState};
pub use state::Board;
