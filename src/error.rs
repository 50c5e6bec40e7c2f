//! Error types for Lane Runner

use thiserror::Error;

use crate::sim::ObstacleId;

/// Internal-consistency failures in the simulation core
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SimError {
    #[error("Obstacle {0} is already in the pool")]
    AlreadyPooled(ObstacleId),

    #[error("Obstacle {0} is already active")]
    AlreadyActive(ObstacleId),

    #[error("Obstacle not found: {0}")]
    UnknownObstacle(ObstacleId),
}

/// Failures loading or saving configuration and score files
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}

/// Result type alias for simulation operations
pub type Result<T> = std::result::Result<T, SimError>;
