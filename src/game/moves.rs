//! Validation of ordinary and golden moves.
//!
//! Planning never leaves a trace on the board: it measures the tentative
//! write, checks every affected area count against the limit and returns
//! the full set of corrections. [`crate::Board`] commits a plan in one step.

use std::fmt;

use arrayvec::ArrayVec;

use crate::error::GammaResult;
use crate::game::areas::measure_placement;
use crate::game::flood::Scratch;
use crate::game::{Coord, Grid, PlayerId, PlayerState};

/// Why a syntactically valid move was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rejection {
    /// Player id outside `1..=players`.
    UnknownPlayer,
    /// Coordinates outside the board.
    OutOfBounds,
    /// Ordinary move onto an owned cell.
    Occupied,
    /// Golden move onto an empty cell or onto the mover's own cell.
    NotCapturable,
    /// The golden move was already spent.
    GoldenUsed,
    /// Some player would end up above the area limit.
    AreaLimit {
        /// The player whose count would exceed the limit.
        player: PlayerId,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::UnknownPlayer => write!(f, "unknown player"),
            Rejection::OutOfBounds => write!(f, "coordinates out of bounds"),
            Rejection::Occupied => write!(f, "cell already taken"),
            Rejection::NotCapturable => write!(f, "cell cannot be captured"),
            Rejection::GoldenUsed => write!(f, "golden move already used"),
            Rejection::AreaLimit { player } => {
                write!(f, "player {player} would exceed the area limit")
            }
        }
    }
}

/// Area-count corrections of one accepted move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Plan {
    /// Target cell.
    pub coord: Coord,
    /// Owner written into the target cell.
    pub owner: PlayerId,
    /// Signed change of `busy_areas` per player; zero entries are omitted.
    pub corrections: ArrayVec<(PlayerId, i64), 6>,
}

impl Plan {
    fn new(coord: Coord, owner: PlayerId) -> Self {
        Self {
            coord,
            owner,
            corrections: ArrayVec::new(),
        }
    }

    fn add(&mut self, player: PlayerId, delta: i64) {
        if delta == 0 {
            return;
        }
        if let Some(entry) = self.corrections.iter_mut().find(|(p, _)| *p == player) {
            entry.1 += delta;
        } else {
            self.corrections.push((player, delta));
        }
    }

    /// Net correction for `player`.
    #[must_use]
    pub fn correction(&self, player: PlayerId) -> i64 {
        self.corrections
            .iter()
            .find(|(p, _)| *p == player)
            .map_or(0, |&(_, d)| d)
    }
}

/// Outcome of planning: a committable plan or the reason it was refused.
pub type Planned = Result<Plan, Rejection>;

/// Shared view of the board needed for planning.
#[derive(Debug)]
pub struct Planner<'a> {
    /// Board cells; written only tentatively.
    pub grid: &'a mut Grid,
    /// Per-player counters, indexed by `player - 1`.
    pub players: &'a [PlayerState],
    /// Maximum number of areas per player.
    pub area_limit: u32,
    /// Scratch space for flood fills.
    pub scratch: &'a mut Scratch,
}

impl Planner<'_> {
    fn areas(&self, player: PlayerId) -> i64 {
        i64::from(self.players[player as usize - 1].busy_areas)
    }

    fn exceeds_limit(&self, player: PlayerId, delta: i64) -> bool {
        self.areas(player) + delta > i64::from(self.area_limit)
    }

    /// Plan the correction for the mover's own areas.
    ///
    /// A cell with no friendly neighbour opens a new area; otherwise the
    /// friendly components around it merge into one.
    fn mover_correction(
        &self,
        player: PlayerId,
        merged: i64,
        plan: &mut Plan,
    ) -> Result<(), Rejection> {
        if self.grid.touches(plan.coord, player) {
            plan.add(player, merged);
        } else {
            if self.exceeds_limit(player, 1) {
                return Err(Rejection::AreaLimit { player });
            }
            plan.add(player, 1);
        }
        Ok(())
    }

    /// Plan an ordinary move of `player` onto the empty cell at `coord`.
    ///
    /// The caller has validated the player id, bounds and emptiness.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails.
    pub fn plan_move(&mut self, player: PlayerId, coord: Coord) -> GammaResult<Planned> {
        let delta = measure_placement(self.grid, coord, player, self.scratch)?;

        let mut plan = Plan::new(coord, player);
        if let Err(rejection) = self.mover_correction(player, delta.delta(player), &mut plan) {
            return Ok(Err(rejection));
        }
        Ok(Ok(plan))
    }

    /// Plan a golden move of `player` onto the opponent cell at `coord`.
    ///
    /// Every owner around the cell is checked: the captured player may see
    /// one area split into several, and the mover may open or merge areas.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails.
    pub fn plan_golden(&mut self, player: PlayerId, coord: Coord) -> GammaResult<Planned> {
        let victim = self.grid.owner(coord);
        let delta = measure_placement(self.grid, coord, player, self.scratch)?;

        let mut plan = Plan::new(coord, player);

        // The captured cell was an area of its own: it simply disappears.
        if !self.grid.touches(coord, victim) {
            plan.add(victim, -1);
        }

        for owner in delta.owners() {
            if owner == player {
                continue;
            }
            plan.add(owner, delta.delta(owner));
            if self.exceeds_limit(owner, plan.correction(owner)) {
                return Ok(Err(Rejection::AreaLimit { player: owner }));
            }
        }

        if let Err(rejection) = self.mover_correction(player, delta.delta(player), &mut plan) {
            return Ok(Err(rejection));
        }
        Ok(Ok(plan))
    }
}
