use crate::{Cell, GridInt};

use thiserror::Error;

pub const MIN_GRID: GridInt = 6;
pub const MAX_GRID: GridInt = 60;
pub const DEFAULT_GRID: GridInt = 20;

#[derive(Debug, Error)]
#[error("grid size must be between {MIN_GRID} and {MAX_GRID}, got {0}")]
pub struct ConfigError(pub GridInt);

/// The N×N playfield. Coordinates are 0-based; anything that leaves the
/// grid re-enters on the opposite side.
#[derive(Copy, Clone)]
pub struct Grid {
    size: GridInt,
}

impl Grid {
    pub fn new(size: GridInt) -> Result<Self, ConfigError> {
        if (MIN_GRID..=MAX_GRID).contains(&size) {
            Ok(Grid { size })
        } else {
            Err(ConfigError(size))
        }
    }

    pub fn size(&self) -> GridInt {
        self.size
    }

    pub fn cell_count(&self) -> usize {
        self.size as usize * self.size as usize
    }

    pub fn center(&self) -> Cell {
        (self.size / 2, self.size / 2)
    }

    /// Applies a delta to a cell with wrap-around on both axes. Euclidean
    /// modulo keeps the result in [0, N) for negative deltas too.
    pub fn wrap(&self, cell: Cell, delta: (i32, i32)) -> Cell {
        let n = self.size as i32;
        let x = (cell.0 as i32 + delta.0).rem_euclid(n);
        let y = (cell.1 as i32 + delta.1).rem_euclid(n);
        (x as GridInt, y as GridInt)
    }

    /// All cells of the grid, row by row.
    pub fn cells(&self) -> impl Iterator<Item = Cell> {
        let n = self.size;
        (0..n).flat_map(move |y| (0..n).map(move |x| (x, y)))
    }

    /// Saturates a candidate size into the allowed range, for the
    /// start-screen chooser.
    pub fn clamp_size(size: GridInt) -> GridInt {
        size.clamp(MIN_GRID, MAX_GRID)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_stays_in_bounds() {
        let grid = Grid::new(10).unwrap();
        for cell in grid.cells() {
            for delta in [(1, 0), (-1, 0), (0, 1), (0, -1), (25, -13)] {
                let (x, y) = grid.wrap(cell, delta);
                assert!(x < 10 && y < 10, "{:?} + {:?} left the grid", cell, delta);
            }
        }
    }

    #[test]
    fn wrap_right_edge() {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.wrap((9, 4), (1, 0)), (0, 4));
    }

    #[test]
    fn wrap_negative_deltas() {
        let grid = Grid::new(10).unwrap();
        assert_eq!(grid.wrap((0, 0), (-1, 0)), (9, 0));
        assert_eq!(grid.wrap((0, 0), (0, -1)), (0, 9));
        assert_eq!(grid.wrap((3, 3), (-13, -23)), (0, 0));
    }

    #[test]
    fn wrap_zero_delta_is_identity() {
        let grid = Grid::new(7).unwrap();
        assert_eq!(grid.wrap((6, 6), (0, 0)), (6, 6));
    }

    #[test]
    fn rejects_out_of_range_sizes() {
        assert!(Grid::new(MIN_GRID - 1).is_err());
        assert!(Grid::new(MAX_GRID + 1).is_err());
        assert!(Grid::new(MIN_GRID).is_ok());
        assert!(Grid::new(MAX_GRID).is_ok());
    }

    #[test]
    fn clamp_size_saturates() {
        assert_eq!(Grid::clamp_size(2), MIN_GRID);
        assert_eq!(Grid::clamp_size(200), MAX_GRID);
        assert_eq!(Grid::clamp_size(20), 20);
    }

    #[test]
    fn cells_cover_the_grid() {
        let grid = Grid::new(6).unwrap();
        assert_eq!(grid.cells().count(), grid.cell_count());
    }
}
