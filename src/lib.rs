//! Lane Runner - simulation core for a lane-based endless runner
//!
//! Core modules:
//! - `sim`: Deterministic simulation (player motion, obstacle pool, collisions, game loop)
//! - `present`: Render and score sinks fed from per-tick snapshots
//! - `highscores`: Persisted high-water mark
//! - `settings`: JSON configuration and tuning
//! - `error`: Error types

pub mod error;
pub mod highscores;
pub mod present;
pub mod settings;
pub mod sim;

pub use error::{ConfigError, SimError};
pub use highscores::HighScore;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Target frame rate of the driver (Hz)
    pub const FRAME_RATE: u32 = 60;

    /// Player motion (per call, not scaled by dt)
    pub const JUMP_FORCE: f64 = 0.15;
    pub const GRAVITY: f64 = 0.005;
    pub const LATERAL_SPEED: f64 = 0.3;
    pub const MAX_LATERAL: f64 = 3.0;

    /// Collider shrink relative to the player mesh (gameplay forgiveness)
    pub const PLAYER_BOX_SHRINK: f64 = 0.8;
    /// Player mesh extents (width, height, depth)
    pub const PLAYER_EXTENTS: [f64; 3] = [1.0, 2.0, 0.6];

    /// Lean feedback
    pub const TILT_LIMIT: f64 = 0.2;
    pub const TILT_STEP: f64 = 0.05;
    pub const TILT_DECAY: f64 = 0.01;

    /// Idle limb swing (cosmetic)
    pub const LIMB_STEP: f64 = 0.1;
    pub const LIMB_MAX_ANGLE: f64 = 0.5;

    /// Lateral distance between lane centers
    pub const LANE_WIDTH: f64 = 2.0;

    /// Obstacle scheduling
    pub const BASE_SPEED: f64 = 0.2;
    pub const SPEED_INCREASE_RATE: f64 = 0.001;
    pub const MIN_SPAWN_INTERVAL: f64 = 1.5;
    pub const MAX_SPAWN_INTERVAL: f64 = 3.0;
    /// Obstacles appear this far ahead of the player
    pub const SPAWN_DISTANCE: f64 = 80.0;
    /// Depth past which an obstacle has left the view and is recycled
    pub const PASSED_THRESHOLD: f64 = 10.0;
    /// Pooled records created up front
    pub const PRELOAD_COUNT: usize = 10;
}
