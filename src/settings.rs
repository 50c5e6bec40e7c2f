//! Game settings and tuning
//!
//! Loaded from an optional JSON file. Every field falls back to its default,
//! so a partial file only overrides what it names.

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::consts::FRAME_RATE;
use crate::error::ConfigError;
use crate::sim::{Game, PlayerTuning, SpawnTuning};

/// Session settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed for obstacle lanes, kinds and spawn gaps
    pub seed: u64,
    /// Driver frame rate (Hz)
    pub frame_rate: u32,
    /// Stop the headless driver after this many frames
    pub max_frames: u64,
    /// Where the high score is kept. None keeps it in memory.
    pub high_score_path: Option<PathBuf>,
    /// Print one JSON frame per tick to stdout
    pub json_frames: bool,
    pub player: PlayerTuning,
    pub spawner: SpawnTuning,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: 0x5eed,
            frame_rate: FRAME_RATE,
            max_frames: 60 * 60 * 5,
            high_score_path: None,
            json_frames: false,
            player: PlayerTuning::default(),
            spawner: SpawnTuning::default(),
        }
    }
}

impl Settings {
    /// Load and validate settings from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        let settings: Settings = serde_json::from_str(&json)?;
        settings.validate()?;
        log::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Reject tuning that would break the simulation's assumptions
    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.frame_rate == 0 {
            return invalid("frame_rate must be positive");
        }

        let p = &self.player;
        if p.jump_force <= 0.0 || p.gravity <= 0.0 {
            return invalid("jump_force and gravity must be positive");
        }
        if p.lateral_speed <= 0.0 || p.max_lateral < 0.0 {
            return invalid("lateral_speed must be positive and max_lateral non-negative");
        }
        if !(p.box_shrink > 0.0 && p.box_shrink <= 1.0) {
            return invalid("box_shrink must be in (0, 1]");
        }
        if p.extents.iter().any(|&e| e <= 0.0) {
            return invalid("player extents must be positive");
        }

        let s = &self.spawner;
        if s.base_speed <= 0.0 || s.speed_increase_rate < 0.0 {
            return invalid("base_speed must be positive and speed_increase_rate non-negative");
        }
        if s.min_interval <= 0.0 || s.max_interval < s.min_interval {
            return invalid("spawn interval must satisfy 0 < min_interval <= max_interval");
        }
        if s.spawn_distance <= 0.0 || s.passed_threshold <= 0.0 {
            return invalid("spawn_distance and passed_threshold must be positive");
        }
        if let Some(cap) = s.max_obstacles {
            if cap < s.preload_count {
                return invalid("max_obstacles must be at least preload_count");
            }
        }

        Ok(())
    }

    /// Fixed frame delta in seconds
    pub fn frame_dt(&self) -> f64 {
        1.0 / self.frame_rate as f64
    }

    /// Build a game from these settings
    pub fn new_game(&self) -> Game {
        Game::new(self.player, self.spawner, self.seed)
    }
}
