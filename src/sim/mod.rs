//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed per-call motion steps
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod autopilot;
pub mod bounds;
pub mod collision;
pub mod obstacle;
pub mod player;
pub mod spawner;
pub mod state;
pub mod tick;

pub use bounds::{Aabb, Pose};
pub use collision::{check_collisions, first_collision};
pub use obstacle::{Lane, Membership, Obstacle, ObstacleId, ObstacleKind};
pub use player::{JumpPhase, LimbSwing, PlayerState, PlayerTuning};
pub use spawner::{ObstacleSpawner, SpawnTuning, SpawnerEvent};
pub use state::{Command, Game, GameEvent, GamePhase};
pub use tick::tick;
