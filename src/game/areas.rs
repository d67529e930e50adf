//! Per-owner component counting around a single cell.
//!
//! A placement can only merge or split areas that touch the placed cell,
//! so the area bookkeeping never needs a full-board scan: counting the
//! distinct components around the cell before and after a tentative write
//! gives the exact change for every owner involved.

use arrayvec::ArrayVec;

use crate::error::GammaResult;
use crate::game::flood::{Scratch, mark_component};
use crate::game::grid::EMPTY;
use crate::game::{Coord, Grid, PlayerId};

/// Distinct owners around a cell and how many of their components touch it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NeighborSummary {
    /// `(owner, components)` in first-seen order. At most one entry per owner.
    entries: ArrayVec<(PlayerId, u32), 4>,
}

impl NeighborSummary {
    /// Count one more component of `owner`.
    fn record(&mut self, owner: PlayerId) {
        if let Some(entry) = self.entries.iter_mut().find(|(o, _)| *o == owner) {
            entry.1 += 1;
        } else {
            self.entries.push((owner, 1));
        }
    }

    /// Number of distinct components of `owner` touching the cell.
    #[must_use]
    pub fn count(&self, owner: PlayerId) -> u32 {
        self.entries
            .iter()
            .find(|(o, _)| *o == owner)
            .map_or(0, |&(_, n)| n)
    }

    /// Owners found around the cell.
    pub fn owners(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.entries.iter().map(|&(owner, _)| owner)
    }

    /// Whether no owned cell touches the target.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Count, per owner, the distinct components adjacent to `coord`.
///
/// Starts from a freshly reset `scratch`. A neighbour already reached by the
/// flood from an earlier direction belongs to a component that was counted,
/// so two directions touching one region count once.
///
/// # Errors
///
/// Returns [`crate::OutOfMemory`] if the flood fill cannot grow its queue.
pub fn neighbor_components(
    grid: &Grid,
    coord: Coord,
    scratch: &mut Scratch,
) -> GammaResult<NeighborSummary> {
    scratch.reset();
    let mut summary = NeighborSummary::default();

    let (adjacent, count) = grid.neighbors(coord);
    for &adj in &adjacent[..count as usize] {
        let owner = grid.owner(adj);
        if owner == EMPTY || scratch.is_marked(grid.index(adj)) {
            continue;
        }
        mark_component(grid, adj, scratch)?;
        summary.record(owner);
    }

    Ok(summary)
}

/// Neighbour summaries before and after writing a new owner into one cell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AreaDelta {
    /// Components around the cell on the unmodified board.
    pub before: NeighborSummary,
    /// Components around the cell with the tentative owner written.
    pub after: NeighborSummary,
}

impl AreaDelta {
    /// Change in the number of components of `owner` touching the cell.
    ///
    /// Negative when the write merges areas, positive when it splits one.
    #[must_use]
    pub fn delta(&self, owner: PlayerId) -> i64 {
        i64::from(self.after.count(owner)) - i64::from(self.before.count(owner))
    }

    /// Every owner seen on either side, without repeats.
    #[must_use]
    pub fn owners(&self) -> ArrayVec<PlayerId, 8> {
        let mut owners = ArrayVec::new();
        for owner in self.before.owners().chain(self.after.owners()) {
            if !owners.contains(&owner) {
                owners.push(owner);
            }
        }
        owners
    }
}

/// Run the before/after protocol for writing `owner` into `coord`.
///
/// The grid is borrowed mutably only for the tentative write and is always
/// restored before returning, on success and on failure alike.
///
/// # Errors
///
/// Returns [`crate::OutOfMemory`] if either flood fill fails.
pub fn measure_placement(
    grid: &mut Grid,
    coord: Coord,
    owner: PlayerId,
    scratch: &mut Scratch,
) -> GammaResult<AreaDelta> {
    let before = neighbor_components(grid, coord, scratch)?;

    let previous = grid.owner(coord);
    grid.set(coord, owner);
    let after = neighbor_components(grid, coord, scratch);
    grid.set(coord, previous);

    Ok(AreaDelta {
        before,
        after: after?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid_from_rows(rows: &[&[u32]]) -> Grid {
        let height = rows.len() as u32;
        let width = rows[0].len() as u32;
        let mut grid = Grid::new(width, height).unwrap();
        for (r, row) in rows.iter().enumerate() {
            for (x, &owner) in row.iter().enumerate() {
                grid.set(Coord::new(x as u32, height - 1 - r as u32), owner);
            }
        }
        grid
    }

    #[test]
    fn test_summary_counts_distinct_components() {
        // Player 1 touches the centre from the left and from above, through
        // one L-shaped region; from the right through a separate region.
        let grid = grid_from_rows(&[
            &[1, 1, 0], //
            &[1, 0, 1],
            &[0, 2, 0],
        ]);
        let mut scratch = Scratch::new(grid.len()).unwrap();
        let summary = neighbor_components(&grid, Coord::new(1, 1), &mut scratch).unwrap();

        assert_eq!(summary.count(1), 2);
        assert_eq!(summary.count(2), 1);
        assert_eq!(summary.count(3), 0);
        assert_eq!(summary.owners().count(), 2);
    }

    #[test]
    fn test_summary_empty_surroundings() {
        let grid = grid_from_rows(&[&[0, 0, 0]]);
        let mut scratch = Scratch::new(grid.len()).unwrap();
        let summary = neighbor_components(&grid, Coord::new(1, 0), &mut scratch).unwrap();
        assert!(summary.is_empty());
    }

    #[test]
    fn test_measure_merge() {
        let mut grid = grid_from_rows(&[&[1, 0, 1]]);
        let original = grid.clone();
        let mut scratch = Scratch::new(grid.len()).unwrap();

        let delta = measure_placement(&mut grid, Coord::new(1, 0), 1, &mut scratch).unwrap();
        assert_eq!(delta.before.count(1), 2);
        assert_eq!(delta.after.count(1), 1);
        assert_eq!(delta.delta(1), -1);
        assert_eq!(grid, original);
    }

    #[test]
    fn test_measure_split_of_removed_owner() {
        // Replacing the middle 2 by a 1 cuts player 2's row in two.
        let mut grid = grid_from_rows(&[&[2, 2, 2]]);
        let mut scratch = Scratch::new(grid.len()).unwrap();

        let delta = measure_placement(&mut grid, Coord::new(1, 0), 1, &mut scratch).unwrap();
        assert_eq!(delta.before.count(2), 1);
        assert_eq!(delta.after.count(2), 2);
        assert_eq!(delta.delta(2), 1);
        assert_eq!(delta.delta(1), 0);
        assert_eq!(delta.owners().as_slice(), &[2]);
    }

    #[test]
    fn test_measure_restores_grid_on_failure() {
        let mut grid = grid_from_rows(&[&[2, 2, 2]]);
        let original = grid.clone();
        let mut scratch = Scratch::new(grid.len()).unwrap();
        scratch.set_queue_budget(0);

        assert!(measure_placement(&mut grid, Coord::new(1, 0), 1, &mut scratch).is_err());
        assert_eq!(grid, original);
    }
}
