use std::fs;
use std::io::ErrorKind;
use std::path::PathBuf;

use log::warn;

/// Persists the highscore as a single ASCII decimal integer in a text
/// file. Both directions are failure-proof: a missing or garbled file
/// loads as 0, and a failed write is logged and swallowed. A game session
/// must never die because of this file.
pub struct HighscoreStore {
    path: PathBuf,
}

impl HighscoreStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        HighscoreStore { path: path.into() }
    }

    pub fn load(&self) -> u64 {
        match fs::read_to_string(&self.path) {
            Ok(contents) => match contents.trim().parse() {
                Ok(value) => value,
                Err(_) => {
                    warn!(
                        "highscore file {} is not a number, starting from 0",
                        self.path.display()
                    );
                    0
                }
            },
            Err(err) => {
                if err.kind() != ErrorKind::NotFound {
                    warn!(
                        "could not read highscore file {}: {}",
                        self.path.display(),
                        err
                    );
                }
                0
            }
        }
    }

    pub fn save(&self, value: u64) {
        if let Err(err) = fs::write(&self.path, value.to_string()) {
            warn!(
                "could not save highscore to {}: {}",
                self.path.display(),
                err
            );
        }
    }
}
