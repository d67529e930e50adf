//! Breadth-first flood fill over same-owner cells.
//!
//! Every board owns one [`Scratch`] buffer that is reused by all
//! connectivity queries. Visited marks are epoch stamps, so clearing the
//! buffer between queries is O(1) instead of O(width * height).

use std::collections::VecDeque;

use crate::error::{ConfigError, GammaResult, OutOfMemory};
use crate::game::{Coord, Grid};

/// Reusable visited-grid and FIFO queue for connectivity queries.
#[derive(Debug, Clone)]
pub struct Scratch {
    /// Cell is visited when its stamp equals `epoch`.
    marks: Vec<u32>,
    /// Current generation of marks.
    epoch: u32,
    /// Frontier of the flood fill in progress.
    queue: VecDeque<Coord>,
    /// Maximum frontier length before the fill reports exhaustion.
    queue_budget: usize,
}

impl Scratch {
    /// Allocate scratch space for a grid of `cells` cells.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::OutOfMemory`] if the marks cannot be allocated.
    pub fn new(cells: usize) -> Result<Self, ConfigError> {
        let mut marks = Vec::new();
        marks.try_reserve_exact(cells)?;
        marks.resize(cells, 0);

        Ok(Self {
            marks,
            epoch: 1,
            queue: VecDeque::new(),
            queue_budget: usize::MAX,
        })
    }

    /// Forget all visited marks.
    pub fn reset(&mut self) {
        self.epoch = self.epoch.wrapping_add(1);
        if self.epoch == 0 {
            self.marks.fill(0);
            self.epoch = 1;
        }
    }

    /// Whether the cell at `idx` was visited since the last reset.
    #[must_use]
    #[inline]
    pub fn is_marked(&self, idx: usize) -> bool {
        self.marks[idx] == self.epoch
    }

    #[inline]
    fn mark(&mut self, idx: usize) {
        self.marks[idx] = self.epoch;
    }

    fn enqueue(&mut self, coord: Coord) -> GammaResult<()> {
        if self.queue.len() >= self.queue_budget {
            return Err(OutOfMemory);
        }
        self.queue.try_reserve(1)?;
        self.queue.push_back(coord);
        Ok(())
    }

    /// Cap the frontier length. A fill that would grow past it fails with
    /// [`OutOfMemory`] as if the allocation had been refused.
    pub fn set_queue_budget(&mut self, budget: usize) {
        self.queue_budget = budget;
    }
}

/// Mark every cell connected to `start` through cells with the same owner.
///
/// Cells already marked in `scratch` are neither revisited nor crossed.
/// The grid is only read.
///
/// # Errors
///
/// Returns [`OutOfMemory`] if the queue cannot grow. The marks are then
/// partial and the caller must reset the scratch before reusing it.
pub fn mark_component(grid: &Grid, start: Coord, scratch: &mut Scratch) -> GammaResult<()> {
    let owner = grid.owner(start);

    scratch.queue.clear();
    scratch.mark(grid.index(start));
    scratch.enqueue(start)?;

    while let Some(current) = scratch.queue.pop_front() {
        let (adjacent, count) = grid.neighbors(current);
        for &adj in &adjacent[..count as usize] {
            let idx = grid.index(adj);
            if grid.owner(adj) == owner && !scratch.is_marked(idx) {
                scratch.mark(idx);
                scratch.enqueue(adj)?;
            }
        }
    }

    Ok(())
}
