//! Board invariants - exhaustive checks that detect bookkeeping bugs.
//!
//! The engine maintains area counts incrementally. These functions recount
//! everything from scratch and compare; they are meant for tests, fuzzing
//! and debugging, never for the move path.

use crate::error::GammaResult;
use crate::game::flood::{Scratch, mark_component};
use crate::game::grid::EMPTY;
use crate::game::{Board, Grid, PlayerId};

/// Invariant violation error.
#[derive(Debug, Clone)]
pub struct InvariantViolation {
    /// Description of the violated invariant.
    pub message: String,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Invariant violation: {}", self.message)
    }
}

impl std::error::Error for InvariantViolation {}

/// Count the connected areas of every player by flooding the whole grid.
///
/// Index `p - 1` holds the count for player `p`. Cells owned by ids above
/// `players` are ignored.
///
/// # Errors
///
/// Returns [`crate::OutOfMemory`] if scratch space cannot be allocated.
pub fn count_areas(grid: &Grid, players: u32) -> GammaResult<Vec<u32>> {
    let mut scratch = Scratch::new(grid.len()).map_err(|_| crate::OutOfMemory)?;
    let mut counts = vec![0u32; players as usize];

    for (coord, owner) in grid.iter() {
        if owner == EMPTY || owner > players || scratch.is_marked(grid.index(coord)) {
            continue;
        }
        mark_component(grid, coord, &mut scratch)?;
        counts[owner as usize - 1] += 1;
    }

    Ok(counts)
}

/// Check all board invariants.
///
/// Returns a list of violations found, or empty if all invariants hold.
#[must_use]
pub fn check_invariants(board: &Board) -> Vec<InvariantViolation> {
    let mut violations = Vec::new();
    let players = board.players();

    // Cells hold 0 or a valid player id
    for (coord, owner) in board.grid().iter() {
        if owner > players {
            violations.push(InvariantViolation {
                message: format!("Cell at {coord:?} owned by unknown player {owner}"),
            });
        }
    }

    let counts = match count_areas(board.grid(), players) {
        Ok(counts) => counts,
        Err(e) => {
            violations.push(InvariantViolation {
                message: format!("Could not recount areas: {e}"),
            });
            return violations;
        }
    };

    for (player, &actual) in (1..=players).zip(&counts) {
        let Some(recorded) = board.busy_areas(player) else {
            continue;
        };

        // Incremental count matches a full recount
        if recorded != actual {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} has {recorded} recorded areas but {actual} on the board"
                ),
            });
        }

        // Area limit holds
        if recorded > board.area_limit() {
            violations.push(InvariantViolation {
                message: format!(
                    "Player {player} has {recorded} areas > limit {}",
                    board.area_limit()
                ),
            });
        }
    }

    violations
}

/// Assert all board invariants hold, panicking if any are violated.
///
/// Only active in debug builds. No-op in release builds.
///
/// # Panics
///
/// Panics with detailed message if any invariant is violated.
#[cfg(debug_assertions)]
pub fn assert_invariants(board: &Board) {
    let violations = check_invariants(board);
    if !violations.is_empty() {
        let messages: Vec<_> = violations.iter().map(|v| v.message.as_str()).collect();
        panic!("Board invariant violations:\n  - {}", messages.join("\n  - "));
    }
}

/// No-op in release builds.
#[cfg(not(debug_assertions))]
pub fn assert_invariants(_board: &Board) {}

/// Ids of players whose recorded area count disagrees with a recount.
///
/// # Errors
///
/// Returns [`crate::OutOfMemory`] if scratch space cannot be allocated.
pub fn miscounted_players(board: &Board) -> GammaResult<Vec<PlayerId>> {
    let counts = count_areas(board.grid(), board.players())?;
    Ok((1..=board.players())
        .zip(counts)
        .filter(|&(player, actual)| board.busy_areas(player) != Some(actual))
        .map(|(player, _)| player)
        .collect())
}
