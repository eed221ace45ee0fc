use crate::grid::Grid;
use crate::snake::Snake;
use crate::Cell;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use thiserror::Error;

#[derive(Debug, Error)]
#[error("no free cell left on the grid")]
pub struct GridFullError;

/// Picks food cells uniformly among the cells the snake doesn't occupy.
/// The RNG is owned so a fixed seed gives a fully reproducible run.
pub struct FoodSpawner {
    rng: StdRng,
}

impl FoodSpawner {
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        FoodSpawner { rng }
    }

    pub fn spawn(&mut self, grid: &Grid, snake: &Snake) -> Result<Cell, GridFullError> {
        let free: Vec<Cell> = grid.cells().filter(|&c| !snake.contains(c)).collect();
        free.choose(&mut self.rng).copied().ok_or(GridFullError)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snake::Direction;

    #[test]
    fn never_spawns_on_the_body() {
        let grid = Grid::new(8).unwrap();
        let snake = Snake::from_cells(
            &[(3, 3), (3, 4), (4, 4), (4, 3), (5, 3), (5, 4)],
            Direction::Up,
        );
        let mut spawner = FoodSpawner::new(Some(7));
        for _ in 0..1000 {
            let cell = spawner.spawn(&grid, &snake).unwrap();
            assert!(!snake.contains(cell), "food landed on the snake: {:?}", cell);
        }
    }

    #[test]
    fn full_grid_reports_grid_full() {
        let grid = Grid::new(6).unwrap();
        let everything: Vec<_> = grid.cells().collect();
        let snake = Snake::from_cells(&everything, Direction::Right);
        let mut spawner = FoodSpawner::new(Some(1));
        assert!(spawner.spawn(&grid, &snake).is_err());
    }

    #[test]
    fn single_free_cell_is_found() {
        let grid = Grid::new(6).unwrap();
        let almost: Vec<_> = grid.cells().filter(|&c| c != (2, 4)).collect();
        let snake = Snake::from_cells(&almost, Direction::Right);
        let mut spawner = FoodSpawner::new(Some(1));
        assert_eq!(spawner.spawn(&grid, &snake).unwrap(), (2, 4));
    }

    #[test]
    fn same_seed_same_sequence() {
        let grid = Grid::new(8).unwrap();
        let snake = Snake::from_cells(&[(0, 0)], Direction::Right);
        let mut a = FoodSpawner::new(Some(42));
        let mut b = FoodSpawner::new(Some(42));
        for _ in 0..20 {
            assert_eq!(
                a.spawn(&grid, &snake).unwrap(),
                b.spawn(&grid, &snake).unwrap()
            );
        }
    }
}
