//! Grid and coordinate types.

use crate::error::ConfigError;
use crate::game::PlayerId;

/// Marker stored in cells nobody has claimed.
pub const EMPTY: PlayerId = 0;

/// A coordinate on the board. `y` grows upwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Coord {
    /// X coordinate (column).
    pub x: u32,
    /// Y coordinate (row, 0 is the bottom row).
    pub y: u32,
}

impl Coord {
    /// Create a new coordinate.
    #[must_use]
    pub const fn new(x: u32, y: u32) -> Self {
        Self { x, y }
    }

    /// Get adjacent coordinates (left, right, down, up).
    ///
    /// Returns a fixed-size array and count to avoid heap allocation.
    /// The array contains valid coordinates in indices 0..count.
    #[must_use]
    #[inline]
    pub fn adjacent(&self, width: u32, height: u32) -> ([Coord; 4], u8) {
        let mut result = [Coord::new(0, 0); 4];
        let mut count = 0u8;

        if self.x > 0 {
            result[count as usize] = Coord::new(self.x - 1, self.y); // left
            count += 1;
        }
        if self.x.saturating_add(1) < width {
            result[count as usize] = Coord::new(self.x + 1, self.y); // right
            count += 1;
        }
        if self.y > 0 {
            result[count as usize] = Coord::new(self.x, self.y - 1); // down
            count += 1;
        }
        if self.y.saturating_add(1) < height {
            result[count as usize] = Coord::new(self.x, self.y + 1); // up
            count += 1;
        }

        (result, count)
    }
}

/// Ownership of every cell on the board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    /// Width of the grid in cells.
    width: u32,
    /// Height of the grid in cells.
    height: u32,
    /// Owners stored in row-major order, bottom row first.
    cells: Vec<PlayerId>,
}

/// Number of cells in a `width` x `height` grid, if it is addressable.
pub(crate) fn cell_count(width: u32, height: u32) -> Result<usize, ConfigError> {
    usize::try_from(u64::from(width) * u64::from(height))
        .map_err(|_| ConfigError::TooLarge { width, height })
}

impl Grid {
    /// Create an empty grid.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroParameter`] for a zero dimension,
    /// [`ConfigError::TooLarge`] if the cell count overflows `usize`, and
    /// [`ConfigError::OutOfMemory`] if the cells cannot be allocated.
    pub fn new(width: u32, height: u32) -> Result<Self, ConfigError> {
        if width == 0 {
            return Err(ConfigError::ZeroParameter { name: "width" });
        }
        if height == 0 {
            return Err(ConfigError::ZeroParameter { name: "height" });
        }

        let size = cell_count(width, height)?;
        let mut cells = Vec::new();
        cells.try_reserve_exact(size)?;
        cells.resize(size, EMPTY);

        Ok(Self {
            width,
            height,
            cells,
        })
    }

    /// Get the width of the grid.
    #[must_use]
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Get the height of the grid.
    #[must_use]
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Total number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Always `false`: a grid has at least one cell.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Raw owners in row-major order.
    #[must_use]
    #[inline]
    pub fn cells(&self) -> &[PlayerId] {
        &self.cells
    }

    /// Check if a coordinate is within the grid bounds.
    #[must_use]
    pub const fn in_bounds(&self, coord: Coord) -> bool {
        coord.x < self.width && coord.y < self.height
    }

    /// Convert an in-bounds coordinate to an index into the cells array.
    ///
    /// Callers must have checked [`Grid::in_bounds`].
    #[must_use]
    #[inline]
    pub(crate) fn index(&self, coord: Coord) -> usize {
        debug_assert!(self.in_bounds(coord));
        coord.y as usize * self.width as usize + coord.x as usize
    }

    /// Owner of the cell at `coord`, or `None` when out of bounds.
    #[must_use]
    pub fn get(&self, coord: Coord) -> Option<PlayerId> {
        self.in_bounds(coord).then(|| self.cells[self.index(coord)])
    }

    /// Owner of an in-bounds cell.
    #[must_use]
    #[inline]
    pub(crate) fn owner(&self, coord: Coord) -> PlayerId {
        self.cells[self.index(coord)]
    }

    /// Overwrite the owner of an in-bounds cell.
    #[inline]
    pub(crate) fn set(&mut self, coord: Coord, owner: PlayerId) {
        let idx = self.index(coord);
        self.cells[idx] = owner;
    }

    /// In-bounds 4-neighbours of `coord`.
    #[must_use]
    #[inline]
    pub fn neighbors(&self, coord: Coord) -> ([Coord; 4], u8) {
        coord.adjacent(self.width, self.height)
    }

    /// Whether any 4-neighbour of `coord` is owned by `owner`.
    #[must_use]
    pub fn touches(&self, coord: Coord, owner: PlayerId) -> bool {
        let (adjacent, count) = self.neighbors(coord);
        adjacent[..count as usize]
            .iter()
            .any(|&adj| self.owner(adj) == owner)
    }

    /// Iterate over all coordinates and owners.
    pub fn iter(&self) -> impl Iterator<Item = (Coord, PlayerId)> + '_ {
        let width = self.width as usize;
        self.cells.iter().enumerate().map(move |(idx, &owner)| {
            #[allow(clippy::cast_possible_truncation)]
            let coord = Coord::new((idx % width) as u32, (idx / width) as u32);
            (coord, owner)
        })
    }

    /// Number of cells owned by `owner`.
    #[must_use]
    pub fn count_owned(&self, owner: PlayerId) -> u64 {
        self.cells.iter().filter(|&&cell| cell == owner).count() as u64
    }
}
