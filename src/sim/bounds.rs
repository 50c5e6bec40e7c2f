//! Axis-aligned bounding boxes and entity poses
//!
//! A box is derived from an entity's pose and its raw mesh extents, scaled
//! per axis. Boxes are closed intervals on every axis: touching faces count
//! as an overlap.

use glam::DVec3;
use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Aabb {
    pub min: DVec3,
    pub max: DVec3,
}

impl Aabb {
    pub fn new(min: DVec3, max: DVec3) -> Self {
        Self { min, max }
    }

    /// Box centered at `center` spanning `extents` (full size, not half size)
    pub fn from_center_extents(center: DVec3, extents: DVec3) -> Self {
        let half = extents.abs() * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Box around a mesh of `extents` with each axis multiplied by `scale`
    pub fn scaled(center: DVec3, extents: DVec3, scale: DVec3) -> Self {
        Self::from_center_extents(center, extents * scale)
    }

    /// Get center of the box
    pub fn center(&self) -> DVec3 {
        (self.min + self.max) * 0.5
    }

    /// Full size along each axis
    pub fn size(&self) -> DVec3 {
        self.max - self.min
    }

    /// Overlap test: intervals intersect on all three axes
    #[inline]
    pub fn intersects(&self, other: &Aabb) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }

    /// Check if a point is inside the box
    pub fn contains(&self, point: DVec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    /// Box moved by `offset`
    pub fn translated(&self, offset: DVec3) -> Self {
        Self {
            min: self.min + offset,
            max: self.max + offset,
        }
    }
}

/// Position and rotation (Euler angles, radians) read by the renderer
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec3,
    pub rotation: DVec3,
}
