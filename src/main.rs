mod app;
mod food;
mod grid;
mod score;
mod session;
mod snake;
mod term;

pub type GridInt = u16;
pub type Cell = (GridInt, GridInt);

use std::fs::File;
use std::path::PathBuf;
use std::process::exit;

use clap::Parser;
use log::{error, info};
use simplelog::{Config as LogConfig, LevelFilter, WriteLogger};

use app::App;
use food::FoodSpawner;
use grid::{Grid, DEFAULT_GRID};
use score::HighscoreStore;
use session::GameSession;

const LOG_FILE: &str = "wrapsnake.log";

/// Wrap-around snake for the terminal.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Grid size N for an NxN playfield; chosen on the start screen if omitted
    #[arg(long)]
    grid: Option<GridInt>,

    /// File the highscore is kept in
    #[arg(long, default_value = "highscore.txt")]
    highscore_file: PathBuf,

    /// Seed for food placement, for reproducible runs
    #[arg(long)]
    seed: Option<u64>,
}

fn main() {
    let args = Args::parse();
    init_logger();

    // A bad --grid is fatal before any terminal state is touched.
    let grid = match Grid::new(args.grid.unwrap_or(DEFAULT_GRID)) {
        Ok(grid) => grid,
        Err(err) => {
            eprintln!("{}", err);
            exit(2);
        }
    };

    let session = GameSession::new(
        grid,
        FoodSpawner::new(args.seed),
        HighscoreStore::new(args.highscore_file),
    );

    if let Err(err) = App::new(session).run() {
        error!("terminal error: {}", err);
        eprintln!("terminal error: {}", err);
        exit(1);
    }

    info!("clean exit");
}

fn init_logger() {
    // The terminal belongs to the game, so logs go to a file. Running
    // without logs is fine if the file can't be created.
    if let Ok(file) = File::create(LOG_FILE) {
        let _ = WriteLogger::init(LevelFilter::Info, LogConfig::default(), file);
    }
}
