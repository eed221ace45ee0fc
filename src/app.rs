use std::time::Instant;

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use crossterm::Result;

use crate::session::{Command, GameSession, Phase};
use crate::term::TermManager;

/// Owns the terminal and the session and runs the fixed-tick loop:
/// draw, wait for input up to the tick period, feed commands in, step.
pub struct App {
    term: TermManager,
    session: GameSession,
}

impl App {
    pub fn new(session: GameSession) -> Self {
        App { term: TermManager::new(), session }
    }

    pub fn run(&mut self) -> Result<()> {
        self.term.setup()?;
        let res = self.run_loop();

        // Leave the terminal usable even when the loop errored out.
        let restored = self.term.restore();
        res.and(restored)
    }

    fn run_loop(&mut self) -> Result<()> {
        let mut last_step = Instant::now();

        loop {
            self.term.draw_frame(&self.session.frame())?;

            let period = self.session.tick_period();
            let timeout = period.saturating_sub(last_step.elapsed());
            for key_ev in self.term.read_key_events(timeout)? {
                if is_quit(&key_ev) {
                    return Ok(());
                }
                if let Some(cmd) = map_key(&key_ev, self.session.phase()) {
                    self.session.handle_command(cmd);
                }
            }

            if last_step.elapsed() >= period {
                self.session.tick();
                last_step = Instant::now();
            }
        }
    }
}

fn is_quit(ev: &KeyEvent) -> bool {
    matches!(
        ev,
        KeyEvent { code: KeyCode::Char('c'), modifiers: KeyModifiers::CONTROL }
            | KeyEvent { code: KeyCode::Char('q'), .. }
    )
}

/// Key bindings depend on the screen: on the start screen the arrows
/// adjust the grid size, in the game they steer. Unknown keys map to
/// nothing and are dropped.
fn map_key(ev: &KeyEvent, phase: Phase) -> Option<Command> {
    let cmd = match (phase, ev.code) {
        (_, KeyCode::Char('g')) => Command::ToggleGridLines,

        (Phase::StartScreen, KeyCode::Up | KeyCode::Char('+')) => Command::IncreaseGridSize,
        (Phase::StartScreen, KeyCode::Down | KeyCode::Char('-')) => Command::DecreaseGridSize,
        (Phase::StartScreen, KeyCode::Enter | KeyCode::Char(' ')) => Command::Start,

        (Phase::GameOver, KeyCode::Char('r')) => Command::Restart,
        (Phase::GameOver, KeyCode::Enter | KeyCode::Char(' ')) => Command::Start,

        (_, KeyCode::Char('w') | KeyCode::Up) => Command::MoveUp,
        (_, KeyCode::Char('a') | KeyCode::Left) => Command::MoveLeft,
        (_, KeyCode::Char('s') | KeyCode::Down) => Command::MoveDown,
        (_, KeyCode::Char('d') | KeyCode::Right) => Command::MoveRight,
        (_, KeyCode::Char('p') | KeyCode::Esc) => Command::TogglePause,
        (_, KeyCode::Char('r')) => Command::Restart,

        _ => return None,
    };

    Some(cmd)
}
