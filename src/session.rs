use std::cmp::max;
use std::collections::VecDeque;
use std::time::Duration;

use log::info;

use crate::food::FoodSpawner;
use crate::grid::Grid;
use crate::score::HighscoreStore;
use crate::snake::{Direction, MoveResult, Snake};
use crate::{Cell, GridInt};

pub const INITIAL_SNAKE_LENGTH: usize = 3;
pub const SCORE_PER_FOOD: u64 = 10;

const BASE_TICK_MS: u64 = 200;
const MIN_TICK_MS: u64 = 40;
const SPEED_DIVISOR: u64 = 50;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    StartScreen,
    Running,
    Paused,
    GameOver,
}

/// Abstract input, already translated from whatever device produced it.
/// The session never sees a key code.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Command {
    MoveUp,
    MoveDown,
    MoveLeft,
    MoveRight,
    Start,
    TogglePause,
    Restart,
    ToggleGridLines,
    IncreaseGridSize,
    DecreaseGridSize,
}

/// Everything the presentation needs to draw one tick.
pub struct Frame<'a> {
    pub grid_size: GridInt,
    pub snake: &'a VecDeque<Cell>,
    pub heading: Direction,
    pub food: Option<Cell>,
    pub score: u64,
    pub highscore: u64,
    pub phase: Phase,
    pub grid_lines: bool,
    pub pending_grid: GridInt,
    pub won: bool,
}

/// The whole game state, owned in one place and driven from outside by
/// `handle_command` and `tick`. Holds no terminal or timing concerns, so
/// every transition is testable without a terminal.
pub struct GameSession {
    grid: Grid,
    snake: Snake,
    spawner: FoodSpawner,
    store: HighscoreStore,
    food: Option<Cell>,
    score: u64,
    highscore: u64,
    phase: Phase,
    queued: Option<Direction>,
    grid_lines: bool,
    pending_grid: GridInt,
    won: bool,
}

impl GameSession {
    pub fn new(grid: Grid, spawner: FoodSpawner, store: HighscoreStore) -> Self {
        let highscore = store.load();
        let snake = Snake::new(grid.center(), INITIAL_SNAKE_LENGTH, Direction::Right, &grid);
        GameSession {
            grid,
            snake,
            spawner,
            store,
            food: None,
            score: 0,
            highscore,
            phase: Phase::StartScreen,
            queued: None,
            grid_lines: false,
            pending_grid: grid.size(),
            won: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn frame(&self) -> Frame<'_> {
        Frame {
            grid_size: self.grid.size(),
            snake: self.snake.body(),
            heading: self.snake.direction(),
            food: self.food,
            score: self.score,
            highscore: self.highscore,
            phase: self.phase,
            grid_lines: self.grid_lines,
            pending_grid: self.pending_grid,
            won: self.won,
        }
    }

    /// The time between game steps, shrinking as the score grows and
    /// bottoming out at a floor so the game stays playable.
    pub fn tick_period(&self) -> Duration {
        let ms = BASE_TICK_MS * SPEED_DIVISOR / (SPEED_DIVISOR + self.score);
        Duration::from_millis(max(ms, MIN_TICK_MS))
    }

    pub fn handle_command(&mut self, cmd: Command) {
        use Command::*;

        match (self.phase, cmd) {
            (_, ToggleGridLines) => self.grid_lines = !self.grid_lines,

            (Phase::StartScreen, IncreaseGridSize) => {
                self.pending_grid = Grid::clamp_size(self.pending_grid.saturating_add(1));
            }
            (Phase::StartScreen, DecreaseGridSize) => {
                self.pending_grid = Grid::clamp_size(self.pending_grid.saturating_sub(1));
            }
            (Phase::StartScreen, Start) => self.start_run(),

            (Phase::Running, MoveUp) => self.queued = Some(Direction::Up),
            (Phase::Running, MoveDown) => self.queued = Some(Direction::Down),
            (Phase::Running, MoveLeft) => self.queued = Some(Direction::Left),
            (Phase::Running, MoveRight) => self.queued = Some(Direction::Right),
            (Phase::Running, TogglePause) => self.phase = Phase::Paused,
            (Phase::Paused, TogglePause) => self.phase = Phase::Running,
            (Phase::Running | Phase::Paused, Restart) => self.start_run(),

            (Phase::GameOver, Restart) => self.start_run(),
            (Phase::GameOver, Start) => {
                self.pending_grid = self.grid.size();
                self.phase = Phase::StartScreen;
            }

            // Anything else doesn't apply to the current phase.
            _ => {}
        }
    }

    /// One game step. Does nothing outside `Running`; the driver keeps
    /// calling on schedule and the paused game simply stands still.
    pub fn tick(&mut self) {
        if self.phase != Phase::Running {
            return;
        }

        if let Some(dir) = self.queued.take() {
            self.snake.set_direction(dir);
        }

        match self.snake.advance(&self.grid, self.food) {
            MoveResult::Crashed => self.enter_game_over(false),
            MoveResult::Moved { ate: true, .. } => {
                self.score += SCORE_PER_FOOD;
                match self.spawner.spawn(&self.grid, &self.snake) {
                    Ok(cell) => self.food = Some(cell),
                    // Nowhere left to put food: the snake covers the
                    // grid, which counts as winning.
                    Err(_) => {
                        self.food = None;
                        self.enter_game_over(true);
                    }
                }
            }
            MoveResult::Moved { .. } => {}
        }
    }

    fn start_run(&mut self) {
        self.persist_highscore_if_beaten();

        if let Ok(grid) = Grid::new(Grid::clamp_size(self.pending_grid)) {
            self.grid = grid;
        }
        self.snake = Snake::new(
            self.grid.center(),
            INITIAL_SNAKE_LENGTH,
            Direction::Right,
            &self.grid,
        );
        self.food = self.spawner.spawn(&self.grid, &self.snake).ok();
        self.score = 0;
        self.queued = None;
        self.won = false;
        self.phase = Phase::Running;

        info!("starting a run on a {0}x{0} grid", self.grid.size());
    }

    fn enter_game_over(&mut self, won: bool) {
        self.won = won;
        self.persist_highscore_if_beaten();
        self.phase = Phase::GameOver;
        info!(
            "{} with score {}",
            if won { "won" } else { "game over" },
            self.score
        );
    }

    fn persist_highscore_if_beaten(&mut self) {
        if self.score > self.highscore {
            self.highscore = self.score;
            self.store.save(self.highscore);
        }
    }

    #[cfg(test)]
    fn place_food(&mut self, cell: Cell) {
        self.food = Some(cell);
    }

    #[cfg(test)]
    fn replace_snake(&mut self, snake: Snake) {
        self.snake = snake;
    }
}
