use std::collections::VecDeque;

use crate::grid::Grid;
use crate::Cell;

use Direction::*;
use MoveResult::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub fn delta(&self) -> (i32, i32) {
        match self {
            Up => (0, -1),
            Down => (0, 1),
            Left => (-1, 0),
            Right => (1, 0),
        }
    }

    pub fn opposite(&self) -> Direction {
        match self {
            Up => Down,
            Down => Up,
            Left => Right,
            Right => Left,
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum MoveResult {
    Moved {
        new_head: Cell,
        old_tail: Option<Cell>,
        ate: bool,
    },
    Crashed,
}

pub struct Snake {
    body: VecDeque<Cell>,
    direction: Direction,
}

impl Snake {
    /// Builds a contiguous snake with its head at `head`, trailing away
    /// from the heading, wrapped onto the grid where it doesn't fit.
    pub fn new(head: Cell, len: usize, direction: Direction, grid: &Grid) -> Self {
        let (dx, dy) = direction.delta();
        let body = (0..len as i32)
            .map(|i| grid.wrap(head, (-dx * i, -dy * i)))
            .collect();
        Snake { body, direction }
    }

    /// Ordered body cells, head first.
    pub fn body(&self) -> &VecDeque<Cell> {
        &self.body
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn contains(&self, cell: Cell) -> bool {
        self.body.contains(&cell)
    }

    pub fn direction(&self) -> Direction {
        self.direction
    }

    /// Accepts a new heading unless it is the exact reverse of the current
    /// one while the body is longer than one cell, which would mean moving
    /// straight into the neck.
    pub fn set_direction(&mut self, new_direction: Direction) {
        if self.body.len() > 1 && new_direction == self.direction.opposite() {
            return;
        }
        self.direction = new_direction;
    }

    /// Moves the snake one cell along its heading. The tail vacates on the
    /// same tick unless the new head lands on `food`, so the tail cell only
    /// blocks when the snake is growing.
    pub fn advance(&mut self, grid: &Grid, food: Option<Cell>) -> MoveResult {
        let head = self.body[0];
        let new_head = grid.wrap(head, self.direction.delta());
        let ate = food == Some(new_head);

        let blocking = if ate { self.body.len() } else { self.body.len() - 1 };
        if self.body.iter().take(blocking).any(|&c| c == new_head) {
            return Crashed;
        }

        self.body.push_front(new_head);
        let old_tail = if ate { None } else { self.body.pop_back() };
        Moved { new_head, old_tail, ate }
    }

    #[cfg(test)]
    pub fn from_cells(cells: &[Cell], direction: Direction) -> Self {
        Snake { body: cells.iter().copied().collect(), direction }
    }
}
