//! High-water mark for the run score
//!
//! Persisted as a small JSON file. Only the single best score is kept.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::present::ScoreSink;

/// Best score seen across sessions
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct HighScore {
    /// Best final score (elapsed seconds)
    pub best: f64,
    /// Score of the run in progress
    #[serde(skip)]
    pub current: f64,
    /// File the mark is saved to, if any
    #[serde(skip)]
    path: Option<PathBuf>,
}

impl HighScore {
    /// In-memory high score
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from `path`. A missing file starts fresh; the path is kept for saving.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let mut score = match fs::read_to_string(path) {
            Ok(json) => {
                let score: HighScore = serde_json::from_str(&json)?;
                log::info!("Loaded high score {:.2} from {}", score.best, path.display());
                score
            }
            Err(err) if err.kind() == ErrorKind::NotFound => {
                log::info!("No high score at {}, starting fresh", path.display());
                Self::new()
            }
            Err(err) => return Err(err.into()),
        };
        score.path = Some(path.to_path_buf());
        Ok(score)
    }

    /// Write to the load path. No-op for an in-memory score.
    pub fn save(&self) -> Result<(), ConfigError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        log::info!("High score {:.2} saved", self.best);
        Ok(())
    }

    /// Record a final score. Returns true if it set a new best.
    pub fn record(&mut self, score: f64) -> bool {
        if score > self.best {
            self.best = score;
            true
        } else {
            false
        }
    }
}

impl ScoreSink for HighScore {
    fn score_changed(&mut self, score: f64) {
        self.current = score;
    }

    fn game_over(&mut self, final_score: f64) {
        self.current = final_score;
        if self.record(final_score) {
            if let Err(err) = self.save() {
                log::error!("Failed to save high score: {}", err);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_best() {
        let mut score = HighScore::new();
        assert!(score.record(10.0));
        assert!(!score.record(5.0));
        assert!(!score.record(10.0));
        assert!(score.record(12.5));
        assert_eq!(score.best, 12.5);
    }

    #[test]
    fn test_missing_file_starts_fresh() {
        let dir = tempfile::tempdir().unwrap();
        let score = HighScore::load(dir.path().join("best.json")).unwrap();
        assert_eq!(score.best, 0.0);
    }

    #[test]
    fn test_game_over_persists_new_best() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");

        let mut score = HighScore::load(&path).unwrap();
        score.game_over(42.0);
        score.game_over(7.0);

        let reloaded = HighScore::load(&path).unwrap();
        assert_eq!(reloaded.best, 42.0);
    }

    #[test]
    fn test_corrupt_file_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "not json").unwrap();
        assert!(matches!(HighScore::load(&path), Err(ConfigError::Json(_))));
    }
}
