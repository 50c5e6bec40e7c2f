//! Obstacle records and per-kind collider shapes

use std::fmt;

use glam::DVec3;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::bounds::{Aabb, Pose};
use crate::consts::LANE_WIDTH;

/// Stable handle to an obstacle record (index into the spawner arena)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ObstacleId(pub u32);

impl ObstacleId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ObstacleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Obstacle types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObstacleKind {
    Rock,
    Log,
    Tree,
    Puddle,
    Barrier,
}

impl ObstacleKind {
    pub const ALL: [ObstacleKind; 5] = [
        ObstacleKind::Rock,
        ObstacleKind::Log,
        ObstacleKind::Tree,
        ObstacleKind::Puddle,
        ObstacleKind::Barrier,
    ];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    /// Raw mesh extents (width, height, depth)
    pub fn extents(&self) -> DVec3 {
        match self {
            ObstacleKind::Rock => DVec3::new(1.2, 1.0, 1.2),
            ObstacleKind::Log => DVec3::new(3.0, 0.6, 0.8),
            ObstacleKind::Tree => DVec3::new(1.0, 3.0, 1.0),
            ObstacleKind::Puddle => DVec3::new(1.6, 0.1, 1.6),
            ObstacleKind::Barrier => DVec3::new(1.8, 1.2, 0.4),
        }
    }

    /// Collider scale applied to the mesh extents.
    ///
    /// Tree colliders cover the trunk only. The puddle collider is raised so
    /// it still reaches the shrunk player box at ground level.
    pub fn collider_scale(&self) -> DVec3 {
        match self {
            ObstacleKind::Rock => DVec3::new(0.8, 0.8, 0.8),
            ObstacleKind::Log => DVec3::new(0.9, 0.7, 0.7),
            ObstacleKind::Tree => DVec3::new(0.5, 1.0, 0.5),
            ObstacleKind::Puddle => DVec3::new(0.9, 4.0, 0.9),
            ObstacleKind::Barrier => DVec3::new(0.9, 0.9, 0.8),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ObstacleKind::Rock => "rock",
            ObstacleKind::Log => "log",
            ObstacleKind::Tree => "tree",
            ObstacleKind::Puddle => "puddle",
            ObstacleKind::Barrier => "barrier",
        }
    }
}

/// One of the three lanes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Lane {
    Left,
    #[default]
    Center,
    Right,
}

impl Lane {
    pub const ALL: [Lane; 3] = [Lane::Left, Lane::Center, Lane::Right];

    pub fn random(rng: &mut impl Rng) -> Self {
        Self::ALL[rng.random_range(0..Self::ALL.len())]
    }

    pub fn index(&self) -> i32 {
        match self {
            Lane::Left => -1,
            Lane::Center => 0,
            Lane::Right => 1,
        }
    }

    pub fn from_index(index: i32) -> Option<Self> {
        match index {
            -1 => Some(Lane::Left),
            0 => Some(Lane::Center),
            1 => Some(Lane::Right),
            _ => None,
        }
    }

    /// Lateral offset of the lane center
    pub fn offset(&self) -> f64 {
        self.index() as f64 * LANE_WIDTH
    }
}

/// Which of the spawner's sets holds the record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Membership {
    Pooled,
    Active,
}

/// An obstacle record. Owned by the spawner arena for the whole session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Obstacle {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub lane: Lane,
    /// Depth along the travel axis. Negative is ahead of the player.
    pub position_z: f64,
    pub membership: Membership,
    pub bounds: Aabb,
}

impl Obstacle {
    /// A pooled record
    pub fn new(id: ObstacleId, kind: ObstacleKind) -> Self {
        let mut obstacle = Self {
            id,
            kind,
            lane: Lane::Center,
            position_z: 0.0,
            membership: Membership::Pooled,
            bounds: Aabb::default(),
        };
        obstacle.refresh_bounds();
        obstacle
    }

    pub fn is_active(&self) -> bool {
        self.membership == Membership::Active
    }

    pub fn lateral_offset(&self) -> f64 {
        self.lane.offset()
    }

    /// Mesh center: resting on the ground
    fn mesh_center(&self) -> DVec3 {
        DVec3::new(
            self.lateral_offset(),
            self.kind.extents().y * 0.5,
            self.position_z,
        )
    }

    pub fn refresh_bounds(&mut self) {
        self.bounds = Aabb::scaled(
            self.mesh_center(),
            self.kind.extents(),
            self.kind.collider_scale(),
        );
    }

    /// Move toward the player by `speed` units
    pub fn advance(&mut self, speed: f64) {
        self.position_z += speed;
        self.refresh_bounds();
    }

    pub fn pose(&self) -> Pose {
        Pose {
            position: DVec3::new(self.lateral_offset(), 0.0, self.position_z),
            rotation: DVec3::ZERO,
        }
    }
}
