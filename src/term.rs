use std::io::{stdout, Stdout, Write};
use std::time::Duration;

use crossterm::event::{poll, read, Event, KeyEvent};
use crossterm::terminal::{self, ClearType, EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{cursor, execute, queue, style, Result};

use crate::session::{Frame, Phase};
use crate::snake::Direction::{self, *};
use crate::{Cell, GridInt};

const SNAKE_BODY_CHAR: char = '█';
const DEAD_SNAKE_CHAR: char = 'X';
const FOOD_CHAR: char = 'O';
const GRID_DOT_CHAR: char = '·';

// HUD lines are padded to a fixed width so shorter text overwrites
// whatever was there on the previous frame.
const HUD_WIDTH: usize = 48;

/// Thin crossterm wrapper: paints a whole `Frame` every pass and polls
/// key events. The playfield sits at the top-left corner with a one-cell
/// border around it and two HUD lines underneath.
pub struct TermManager {
    stdout: Stdout,
    last_phase: Option<Phase>,
    last_grid: GridInt,
}

impl TermManager {
    pub fn new() -> Self {
        TermManager { stdout: stdout(), last_phase: None, last_grid: 0 }
    }

    pub fn setup(&mut self) -> Result<()> {
        execute!(self.stdout, EnterAlternateScreen)?;
        terminal::enable_raw_mode()?;
        execute!(self.stdout, cursor::Hide, cursor::DisableBlinking)?;
        Ok(())
    }

    pub fn restore(&mut self) -> Result<()> {
        execute!(self.stdout, cursor::Show, cursor::EnableBlinking)?;
        terminal::disable_raw_mode()?;
        execute!(self.stdout, LeaveAlternateScreen)?;
        Ok(())
    }

    /// Waits up to `timeout` for a first key event, then drains whatever
    /// else is already queued.
    pub fn read_key_events(&self, timeout: Duration) -> Result<Vec<KeyEvent>> {
        let mut events = vec![];
        let mut wait = timeout;

        while poll(wait)? {
            if let Event::Key(ev) = read()? {
                events.push(ev);
            }
            wait = Duration::from_millis(0);
        }

        Ok(events)
    }

    pub fn draw_frame(&mut self, frame: &Frame) -> Result<()> {
        // Overlays can poke outside the playfield, so wipe the screen
        // when one appears or goes away, or when the grid is resized.
        if self.last_phase != Some(frame.phase) || self.last_grid != frame.grid_size {
            execute!(self.stdout, terminal::Clear(ClearType::All))?;
            self.last_phase = Some(frame.phase);
            self.last_grid = frame.grid_size;
        }

        let n = frame.grid_size;
        self.draw_border(n)?;
        self.draw_cells(frame)?;
        self.draw_hud(frame)?;

        match frame.phase {
            Phase::Running => {}
            Phase::StartScreen => {
                let lines = [
                    "W R A P S N A K E".to_string(),
                    String::new(),
                    format!("Grid size: {:>2}  (Up/Down to change)", frame.pending_grid),
                    format!("Best: {}", frame.highscore),
                    String::new(),
                    "Enter or Space to start".to_string(),
                ];
                self.draw_message(n, &lines)?;
            }
            Phase::Paused => {
                let lines = ["Paused".to_string(), "P or Esc to resume".to_string()];
                self.draw_message(n, &lines)?;
            }
            Phase::GameOver => {
                let title = if frame.won { "You won!" } else { "Game over!" };
                let lines = [
                    title.to_string(),
                    format!("Score: {}", frame.score),
                    format!("Best: {}", frame.highscore),
                    String::new(),
                    "R to restart, Enter for menu".to_string(),
                ];
                self.draw_message(n, &lines)?;
            }
        }

        self.stdout.flush()?;
        Ok(())
    }

    ///////////////////////////////////////////////////////////////////////////

    fn draw_cells(&mut self, frame: &Frame) -> Result<()> {
        let n = frame.grid_size;
        let head = frame.snake.front().copied();
        let dead = frame.phase == Phase::GameOver && !frame.won;
        let background = if frame.grid_lines { GRID_DOT_CHAR } else { ' ' };

        for y in 0..n {
            for x in 0..n {
                let cell: Cell = (x, y);
                let ch = if head == Some(cell) {
                    if dead { DEAD_SNAKE_CHAR } else { head_glyph(frame.heading) }
                } else if frame.snake.contains(&cell) {
                    if dead { DEAD_SNAKE_CHAR } else { SNAKE_BODY_CHAR }
                } else if frame.food == Some(cell) {
                    FOOD_CHAR
                } else {
                    background
                };
                self.put((x + 1, y + 1), ch)?;
            }
        }

        Ok(())
    }

    fn draw_border(&mut self, n: GridInt) -> Result<()> {
        let end = n + 1;

        for x in 0..=end {
            let ch = if x == 0 || x == end { '+' } else { '-' };
            self.put((x, 0), ch)?;
            self.put((x, end), ch)?;
        }

        for y in 1..end {
            self.put((0, y), '|')?;
            self.put((end, y), '|')?;
        }

        Ok(())
    }

    fn draw_hud(&mut self, frame: &Frame) -> Result<()> {
        let line1 = format!("Score {:>4}   Best {:>4}", frame.score, frame.highscore);
        let line2 = format!(
            "Grid {0}x{0}   P pause  R restart  G lines  Q quit",
            frame.grid_size
        );

        for (i, line) in [line1, line2].iter().enumerate() {
            let y = frame.grid_size + 2 + i as GridInt;
            queue!(
                self.stdout,
                cursor::MoveTo(0, y),
                style::Print(format!("{line: <width$}", line = line, width = HUD_WIDTH))
            )?;
        }

        Ok(())
    }

    /// Prints a box of centered lines over the middle of the playfield.
    fn draw_message(&mut self, n: GridInt, lines: &[String]) -> Result<()> {
        let width = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0) + 4;
        let height = lines.len() + 2;
        let center = (n as i32 + 2) / 2;
        let left = (center - width as i32 / 2).max(0) as GridInt;
        let top = (center - height as i32 / 2).max(0) as GridInt;

        let blank = " ".repeat(width);
        for row in 0..height {
            let text = match row.checked_sub(1).and_then(|i| lines.get(i)) {
                Some(line) => format!("{line: ^width$}", line = line, width = width),
                None => blank.clone(),
            };
            for (i, ch) in text.chars().enumerate() {
                self.put((left + i as GridInt, top + row as GridInt), ch)?;
            }
        }

        Ok(())
    }

    fn put(&mut self, pos: Cell, ch: char) -> Result<()> {
        queue!(self.stdout, cursor::MoveTo(pos.0, pos.1), style::Print(ch))?;
        Ok(())
    }
}

fn head_glyph(direction: Direction) -> char {
    match direction {
        Up => '^',
        Down => 'v',
        Left => '<',
        Right => '>',
    }
}
