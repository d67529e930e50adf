//! Board state management.

use log::{debug, info, warn};

use crate::error::{ConfigError, GammaResult};
use crate::game::flood::Scratch;
use crate::game::grid::EMPTY;
use crate::game::moves::{Plan, Planned, Planner, Rejection};
use crate::game::{Coord, GameConfig, Grid, PlayerId, PlayerState};
use crate::render::render_grid;

/// Complete state of one gamma game.
///
/// Every operation either completes or leaves the board exactly as it was:
/// cells, area counters and golden-move flags alike.
#[derive(Debug, Clone)]
pub struct Board {
    /// Parameters the board was created with.
    config: GameConfig,
    /// Cell ownership.
    grid: Grid,
    /// Per-player counters, indexed by `player - 1`.
    players: Vec<PlayerState>,
    /// Flood-fill buffers reused by every connectivity query.
    scratch: Scratch,
}

impl Board {
    /// Create an empty board.
    ///
    /// All scratch space for connectivity analysis except the BFS queue is
    /// reserved here, so most allocation failures surface at creation.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if a parameter is zero or the board cannot be
    /// allocated.
    pub fn new(config: GameConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let grid = Grid::new(config.width, config.height)?;
        let scratch = Scratch::new(grid.len())?;

        let count = usize::try_from(config.players).map_err(|_| ConfigError::OutOfMemory)?;
        let mut players = Vec::new();
        players.try_reserve_exact(count)?;
        players.resize(count, PlayerState::new());

        info!(
            "new board {}x{} ({} cells) for {} players, area limit {}",
            config.width,
            config.height,
            config.cells(),
            config.players,
            config.areas
        );

        Ok(Self {
            config,
            grid,
            players,
            scratch,
        })
    }

    /// Create an empty board from individual parameters.
    ///
    /// # Errors
    ///
    /// See [`Board::new`].
    pub fn with_params(
        width: u32,
        height: u32,
        players: u32,
        areas: u32,
    ) -> Result<Self, ConfigError> {
        Self::new(GameConfig::new(width, height, players, areas))
    }

    /// Parameters the board was created with.
    #[must_use]
    pub const fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Number of columns.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.config.width
    }

    /// Number of rows.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.config.height
    }

    /// Number of players.
    #[must_use]
    pub const fn players(&self) -> u32 {
        self.config.players
    }

    /// Maximum number of areas per player.
    #[must_use]
    pub const fn area_limit(&self) -> u32 {
        self.config.areas
    }

    /// Read-only view of the cells.
    #[must_use]
    pub const fn grid(&self) -> &Grid {
        &self.grid
    }

    /// Owner of the cell at `(x, y)`; `Some(0)` for an empty cell.
    #[must_use]
    pub fn owner(&self, x: u32, y: u32) -> Option<PlayerId> {
        self.grid.get(Coord::new(x, y))
    }

    /// Whether `player` is one of `1..=players`.
    #[must_use]
    pub const fn is_player(&self, player: PlayerId) -> bool {
        player >= 1 && player <= self.config.players
    }

    /// Counters of `player`, if the id is valid.
    #[must_use]
    pub fn player(&self, player: PlayerId) -> Option<&PlayerState> {
        if self.is_player(player) {
            self.players.get(player as usize - 1)
        } else {
            None
        }
    }

    /// Number of areas `player` currently owns.
    #[must_use]
    pub fn busy_areas(&self, player: PlayerId) -> Option<u32> {
        self.player(player).map(|p| p.busy_areas)
    }

    /// Whether `player` has spent the golden move.
    #[must_use]
    pub fn golden_used(&self, player: PlayerId) -> Option<bool> {
        self.player(player).map(|p| p.golden_used)
    }

    fn planner(&mut self) -> Planner<'_> {
        Planner {
            grid: &mut self.grid,
            players: &self.players,
            area_limit: self.config.areas,
            scratch: &mut self.scratch,
        }
    }

    fn target(&self, player: PlayerId, x: u32, y: u32) -> Result<Coord, Rejection> {
        if !self.is_player(player) {
            return Err(Rejection::UnknownPlayer);
        }
        let coord = Coord::new(x, y);
        if !self.grid.in_bounds(coord) {
            return Err(Rejection::OutOfBounds);
        }
        Ok(coord)
    }

    /// Validate an ordinary move without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails; the
    /// board is unchanged.
    pub fn check_move(&mut self, player: PlayerId, x: u32, y: u32) -> GammaResult<Planned> {
        let coord = match self.target(player, x, y) {
            Ok(coord) => coord,
            Err(rejection) => return Ok(Err(rejection)),
        };
        if self.grid.owner(coord) != EMPTY {
            return Ok(Err(Rejection::Occupied));
        }

        self.planner().plan_move(player, coord).inspect_err(|e| {
            warn!("move of player {player} at ({x}, {y}) aborted: {e}");
        })
    }

    /// Place a pawn of `player` on the empty cell `(x, y)`.
    ///
    /// Returns `Ok(false)` if the move breaks a rule.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails; the
    /// board is unchanged and the game cannot reliably continue.
    pub fn try_move(&mut self, player: PlayerId, x: u32, y: u32) -> GammaResult<bool> {
        match self.check_move(player, x, y)? {
            Ok(plan) => {
                self.commit(&plan);
                Ok(true)
            }
            Err(rejection) => {
                debug!("move of player {player} at ({x}, {y}) rejected: {rejection}");
                Ok(false)
            }
        }
    }

    /// Validate a golden move without applying it.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails; the
    /// board is unchanged.
    pub fn check_golden_move(
        &mut self,
        player: PlayerId,
        x: u32,
        y: u32,
    ) -> GammaResult<Planned> {
        if !self.is_player(player) {
            return Ok(Err(Rejection::UnknownPlayer));
        }
        if self.players[player as usize - 1].golden_used {
            return Ok(Err(Rejection::GoldenUsed));
        }
        let coord = match self.target(player, x, y) {
            Ok(coord) => coord,
            Err(rejection) => return Ok(Err(rejection)),
        };
        let victim = self.grid.owner(coord);
        if victim == EMPTY || victim == player {
            return Ok(Err(Rejection::NotCapturable));
        }

        self.planner().plan_golden(player, coord).inspect_err(|e| {
            warn!("golden move of player {player} at ({x}, {y}) aborted: {e}");
        })
    }

    /// Capture the opponent cell `(x, y)` with the one-time golden move.
    ///
    /// Returns `Ok(false)` if the move breaks a rule, including when it would
    /// push any affected player above the area limit.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails; the
    /// board is unchanged.
    pub fn try_golden_move(&mut self, player: PlayerId, x: u32, y: u32) -> GammaResult<bool> {
        match self.check_golden_move(player, x, y)? {
            Ok(plan) => {
                let victim = self.grid.owner(plan.coord);
                self.commit(&plan);
                self.players[player as usize - 1].use_golden();
                info!("player {player} captured ({x}, {y}) from player {victim}");
                Ok(true)
            }
            Err(rejection) => {
                debug!("golden move of player {player} at ({x}, {y}) rejected: {rejection}");
                Ok(false)
            }
        }
    }

    /// Whether `player` could perform a golden move anywhere right now.
    ///
    /// Tries every opponent cell in turn; the board is unchanged afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if connectivity analysis fails.
    pub fn golden_possible(&mut self, player: PlayerId) -> GammaResult<bool> {
        match self.player(player) {
            Some(state) if state.has_golden() => {}
            _ => return Ok(false),
        }

        for idx in 0..self.grid.len() {
            let owner = self.grid.cells()[idx];
            if owner == EMPTY || owner == player {
                continue;
            }
            let width = self.grid.width() as usize;
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % width) as u32, (idx / width) as u32);
            if self.planner().plan_golden(player, coord)?.is_ok() {
                return Ok(true);
            }
        }

        Ok(false)
    }

    /// Number of cells owned by `player`; 0 for an unknown player.
    #[must_use]
    pub fn busy_fields(&self, player: PlayerId) -> u64 {
        if !self.is_player(player) {
            return 0;
        }
        self.grid.count_owned(player)
    }

    /// Number of empty cells `player` could take with an ordinary move.
    ///
    /// Below the area limit that is every empty cell; at the limit only
    /// empty cells adjacent to the player's existing areas qualify.
    #[must_use]
    pub fn free_fields(&self, player: PlayerId) -> u64 {
        let Some(state) = self.player(player) else {
            return 0;
        };

        let at_limit = state.busy_areas >= self.config.areas;
        self.grid
            .iter()
            .filter(|&(coord, owner)| {
                owner == EMPTY && (!at_limit || self.grid.touches(coord, player))
            })
            .count() as u64
    }

    /// Text snapshot of the board, top row first.
    ///
    /// # Errors
    ///
    /// Returns [`crate::OutOfMemory`] if the text buffer cannot be allocated.
    pub fn render(&self) -> GammaResult<String> {
        render_grid(&self.grid, self.config.players)
    }

    fn commit(&mut self, plan: &Plan) {
        self.grid.set(plan.coord, plan.owner);
        for &(player, delta) in &plan.corrections {
            self.players[player as usize - 1].adjust_areas(delta);
        }
    }

    /// Cap the flood-fill frontier at `budget` cells.
    ///
    /// Any operation whose connectivity analysis needs more reports
    /// [`crate::OutOfMemory`] and leaves the board unchanged. Unlimited by
    /// default.
    pub fn set_queue_budget(&mut self, budget: usize) {
        self.scratch.set_queue_budget(budget);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::OutOfMemory;

    fn snapshot(board: &Board) -> (Vec<PlayerId>, Vec<PlayerState>) {
        (board.grid.cells().to_vec(), board.players.clone())
    }

    #[test]
    fn test_new_rejects_zero_parameters() {
        assert!(Board::with_params(0, 1, 1, 1).is_err());
        assert!(Board::with_params(1, 0, 1, 1).is_err());
        assert!(Board::with_params(1, 1, 0, 1).is_err());
        assert!(Board::with_params(1, 1, 1, 0).is_err());
    }

    #[test]
    fn test_single_cell_board() {
        let mut board = Board::with_params(1, 1, 2, 1).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert_eq!(board.busy_fields(1), 1);
        assert_eq!(board.free_fields(1), 0);
        assert_eq!(board.busy_areas(1), Some(1));
    }

    #[test]
    fn test_move_onto_occupied_cell() {
        let mut board = Board::with_params(2, 1, 2, 1).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        let before = snapshot(&board);
        assert!(!board.try_move(2, 0, 0).unwrap());
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.check_move(2, 0, 0).unwrap(), Err(Rejection::Occupied));
    }

    #[test]
    fn test_move_second_area_over_limit() {
        let mut board = Board::with_params(3, 1, 1, 1).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(!board.try_move(1, 2, 0).unwrap());
        assert_eq!(board.busy_areas(1), Some(1));
        assert_eq!(board.owner(2, 0), Some(0));
    }

    #[test]
    fn test_move_invalid_arguments() {
        let mut board = Board::with_params(3, 2, 2, 1).unwrap();
        assert_eq!(board.check_move(0, 0, 0).unwrap(), Err(Rejection::UnknownPlayer));
        assert_eq!(board.check_move(3, 0, 0).unwrap(), Err(Rejection::UnknownPlayer));
        assert_eq!(board.check_move(1, 3, 0).unwrap(), Err(Rejection::OutOfBounds));
        assert_eq!(board.check_move(1, 0, 2).unwrap(), Err(Rejection::OutOfBounds));
        assert!(!board.try_move(1, u32::MAX, u32::MAX).unwrap());
    }

    #[test]
    fn test_merging_areas() {
        let mut board = Board::with_params(5, 1, 1, 3).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(1, 2, 0).unwrap());
        assert!(board.try_move(1, 4, 0).unwrap());
        assert_eq!(board.busy_areas(1), Some(3));

        assert!(board.try_move(1, 1, 0).unwrap());
        assert_eq!(board.busy_areas(1), Some(2));
        assert!(board.try_move(1, 3, 0).unwrap());
        assert_eq!(board.busy_areas(1), Some(1));
    }

    #[test]
    fn test_golden_move_merges_capturer_areas() {
        let mut board = Board::with_params(3, 1, 2, 2).unwrap();
        assert!(board.try_move(1, 1, 0).unwrap());
        assert!(board.try_move(2, 0, 0).unwrap());
        assert!(board.try_move(2, 2, 0).unwrap());
        assert_eq!(board.busy_areas(2), Some(2));

        assert!(board.try_golden_move(2, 1, 0).unwrap());
        assert_eq!(board.golden_used(2), Some(true));
        assert_eq!(board.busy_areas(1), Some(0));
        assert_eq!(board.busy_areas(2), Some(1));
        assert_eq!(board.busy_fields(2), 3);
    }

    #[test]
    fn test_golden_move_rejected_when_capturer_would_exceed_limit() {
        let mut board = Board::with_params(3, 1, 2, 1).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(2, 2, 0).unwrap());

        let before = snapshot(&board);
        assert!(!board.try_golden_move(2, 0, 0).unwrap());
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.golden_used(2), Some(false));
    }

    #[test]
    fn test_golden_move_once_per_player() {
        let mut board = Board::with_params(4, 1, 2, 4).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(1, 2, 0).unwrap());
        assert!(board.try_move(2, 3, 0).unwrap());

        assert!(board.try_golden_move(2, 0, 0).unwrap());
        assert_eq!(
            board.check_golden_move(2, 2, 0).unwrap(),
            Err(Rejection::GoldenUsed)
        );
        assert!(!board.try_golden_move(2, 2, 0).unwrap());
        assert!(!board.golden_possible(2).unwrap());
    }

    #[test]
    fn test_golden_move_preconditions() {
        let mut board = Board::with_params(2, 2, 2, 2).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert_eq!(
            board.check_golden_move(1, 0, 0).unwrap(),
            Err(Rejection::NotCapturable)
        );
        assert_eq!(
            board.check_golden_move(2, 1, 1).unwrap(),
            Err(Rejection::NotCapturable)
        );
        assert_eq!(
            board.check_golden_move(2, 2, 0).unwrap(),
            Err(Rejection::OutOfBounds)
        );
        assert_eq!(
            board.check_golden_move(3, 0, 0).unwrap(),
            Err(Rejection::UnknownPlayer)
        );
    }

    #[test]
    fn test_golden_move_split_raises_victim_areas() {
        // 1 1 1  ->  1 2 1
        let mut board = Board::with_params(3, 2, 2, 2).unwrap();
        assert!(board.try_move(1, 0, 1).unwrap());
        assert!(board.try_move(1, 1, 1).unwrap());
        assert!(board.try_move(1, 2, 1).unwrap());
        assert!(board.try_move(2, 1, 0).unwrap());

        assert!(board.try_golden_move(2, 1, 1).unwrap());
        assert_eq!(board.busy_areas(1), Some(2));
        assert_eq!(board.busy_areas(2), Some(1));
    }

    #[test]
    fn test_golden_possible() {
        let mut board = Board::with_params(3, 1, 3, 1).unwrap();
        assert!(!board.golden_possible(1).unwrap());
        assert!(!board.golden_possible(4).unwrap());

        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(2, 2, 0).unwrap());
        // Player 3 owns nothing and may open one area anywhere.
        assert!(board.golden_possible(3).unwrap());
        // Player 2 is at the limit and cannot capture the far cell.
        assert!(!board.golden_possible(2).unwrap());

        assert!(board.try_move(1, 1, 0).unwrap());
        assert!(board.golden_possible(2).unwrap());
    }

    #[test]
    fn test_golden_possible_leaves_board_untouched() {
        let mut board = Board::with_params(3, 3, 2, 1).unwrap();
        for (x, y) in [(0, 1), (1, 1), (2, 1), (1, 2)] {
            assert!(board.try_move(1, x, y).unwrap());
        }
        assert!(board.try_move(2, 0, 0).unwrap());
        let before = snapshot(&board);
        let _ = board.golden_possible(2).unwrap();
        assert_eq!(snapshot(&board), before);
    }

    #[test]
    fn test_free_fields_at_limit() {
        let mut board = Board::with_params(4, 2, 2, 1).unwrap();
        assert_eq!(board.free_fields(1), 8);
        assert!(board.try_move(1, 0, 0).unwrap());
        // At the limit: only (1, 0) and (0, 1) border the area.
        assert_eq!(board.free_fields(1), 2);
        assert_eq!(board.free_fields(2), 7);
        assert_eq!(board.free_fields(3), 0);
    }

    #[test]
    fn test_busy_fields_invalid_player() {
        let mut board = Board::with_params(2, 2, 1, 1).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert_eq!(board.busy_fields(0), 0);
        assert_eq!(board.busy_fields(2), 0);
    }

    #[test]
    fn test_out_of_memory_leaves_board_unchanged() {
        // 1 1 . 2
        let mut board = Board::with_params(4, 1, 2, 2).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(1, 1, 0).unwrap());
        assert!(board.try_move(2, 3, 0).unwrap());
        let before = snapshot(&board);

        board.set_queue_budget(0);
        assert_eq!(board.try_move(1, 2, 0), Err(OutOfMemory));
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.try_golden_move(2, 1, 0), Err(OutOfMemory));
        assert_eq!(snapshot(&board), before);
        assert_eq!(board.golden_possible(2), Err(OutOfMemory));
        assert_eq!(snapshot(&board), before);

        board.set_queue_budget(usize::MAX);
        assert!(board.try_move(1, 2, 0).unwrap());
        assert_eq!(board.busy_areas(1), Some(1));
    }

    #[test]
    fn test_render_snapshot() {
        let mut board = Board::with_params(3, 2, 2, 2).unwrap();
        assert!(board.try_move(1, 0, 0).unwrap());
        assert!(board.try_move(2, 2, 1).unwrap());
        assert_eq!(board.render().unwrap(), "..2\n1..\n");
    }
}
