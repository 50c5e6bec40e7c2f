//! Player state machine: lateral steps, jump arc, lean recovery
//!
//! Every motion step is a fixed per-call increment. Neither gravity nor the
//! cosmetic lean and limb swing are scaled by the frame delta.

use glam::DVec3;
use serde::{Deserialize, Serialize};

use super::bounds::{Aabb, Pose};
use crate::consts::*;

/// Vertical motion phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JumpPhase {
    #[default]
    Grounded,
    Ascending,
    Descending,
}

impl JumpPhase {
    pub fn is_airborne(&self) -> bool {
        !matches!(self, JumpPhase::Grounded)
    }
}

/// Tunable player motion parameters
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlayerTuning {
    /// Upward velocity applied on jump
    pub jump_force: f64,
    /// Velocity removed per update while airborne
    pub gravity: f64,
    /// Lateral distance covered per move command
    pub lateral_speed: f64,
    /// Largest allowed distance from the center lane
    pub max_lateral: f64,
    /// Collider size relative to the mesh on each axis
    pub box_shrink: f64,
    /// Mesh extents (width, height, depth)
    pub extents: [f64; 3],
}

impl Default for PlayerTuning {
    fn default() -> Self {
        Self {
            jump_force: JUMP_FORCE,
            gravity: GRAVITY,
            lateral_speed: LATERAL_SPEED,
            max_lateral: MAX_LATERAL,
            box_shrink: PLAYER_BOX_SHRINK,
            extents: PLAYER_EXTENTS,
        }
    }
}

/// Idle arm/leg swing. Bounded oscillator that reverses at `LIMB_MAX_ANGLE`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LimbSwing {
    pub angle: f64,
    pub direction: f64,
}

impl Default for LimbSwing {
    fn default() -> Self {
        Self {
            angle: 0.0,
            direction: 1.0,
        }
    }
}

impl LimbSwing {
    pub fn step(&mut self) {
        self.angle += LIMB_STEP * self.direction;
        if self.angle.abs() >= LIMB_MAX_ANGLE {
            self.direction = -self.direction;
        }
    }
}

/// The runner
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerState {
    pub tuning: PlayerTuning,
    /// Signed lateral steps from the center lane
    lateral_steps: i32,
    vertical_velocity: f64,
    /// Height above the ground
    vertical_offset: f64,
    phase: JumpPhase,
    /// Lean about the travel axis (radians)
    tilt: f64,
    limbs: LimbSwing,
    /// None until the first recompute
    bounds: Option<Aabb>,
}

impl Default for PlayerState {
    fn default() -> Self {
        Self::new(PlayerTuning::default())
    }
}

impl PlayerState {
    /// A player with no collider yet. Call `reset` (or any motion) to place it.
    pub fn new(tuning: PlayerTuning) -> Self {
        Self {
            tuning,
            lateral_steps: 0,
            vertical_velocity: 0.0,
            vertical_offset: 0.0,
            phase: JumpPhase::Grounded,
            tilt: 0.0,
            limbs: LimbSwing::default(),
            bounds: None,
        }
    }

    /// Signed distance from the center lane. Always a whole number of steps.
    pub fn lateral_offset(&self) -> f64 {
        let max = self.tuning.max_lateral;
        (self.lateral_steps as f64 * self.tuning.lateral_speed).clamp(-max, max)
    }

    /// Steps that fit between the center lane and the road edge
    fn max_steps(&self) -> i32 {
        (self.tuning.max_lateral / self.tuning.lateral_speed + 1e-9).floor() as i32
    }

    pub fn vertical_offset(&self) -> f64 {
        self.vertical_offset
    }

    pub fn vertical_velocity(&self) -> f64 {
        self.vertical_velocity
    }

    pub fn phase(&self) -> JumpPhase {
        self.phase
    }

    pub fn tilt(&self) -> f64 {
        self.tilt
    }

    pub fn limbs(&self) -> LimbSwing {
        self.limbs
    }

    /// Collider from the most recent recompute
    pub fn bounds(&self) -> Option<Aabb> {
        self.bounds
    }

    /// Start a jump. Ignored unless grounded.
    pub fn jump(&mut self) {
        if self.phase == JumpPhase::Grounded {
            self.phase = JumpPhase::Ascending;
            self.vertical_velocity = self.tuning.jump_force;
        }
    }

    /// Step one lateral increment left. Returns false when the step would leave the road.
    pub fn move_left(&mut self) -> bool {
        let moved = self.step_lateral(-1);
        if moved {
            self.tilt = (self.tilt + TILT_STEP).min(TILT_LIMIT);
        }
        self.refresh_bounds();
        moved
    }

    /// Step one lateral increment right. Returns false when the step would leave the road.
    pub fn move_right(&mut self) -> bool {
        let moved = self.step_lateral(1);
        if moved {
            self.tilt = (self.tilt - TILT_STEP).max(-TILT_LIMIT);
        }
        self.refresh_bounds();
        moved
    }

    /// The edge refuses the whole step instead of clamping to it
    fn step_lateral(&mut self, direction: i32) -> bool {
        let next = self.lateral_steps + direction;
        if next.abs() <= self.max_steps() {
            self.lateral_steps = next;
            true
        } else {
            false
        }
    }

    /// Advance one frame
    pub fn update(&mut self, _dt: f64) {
        match self.phase {
            JumpPhase::Ascending | JumpPhase::Descending => {
                self.vertical_velocity -= self.tuning.gravity;
                self.vertical_offset += self.vertical_velocity;

                if self.phase == JumpPhase::Ascending {
                    if self.vertical_velocity <= 0.0 {
                        self.phase = JumpPhase::Descending;
                    }
                } else if self.vertical_offset <= 0.0 {
                    self.vertical_offset = 0.0;
                    self.vertical_velocity = 0.0;
                    self.phase = JumpPhase::Grounded;
                }
            }
            JumpPhase::Grounded => self.limbs.step(),
        }

        self.decay_tilt();
        self.refresh_bounds();
    }

    fn decay_tilt(&mut self) {
        if self.tilt > 0.0 {
            self.tilt = (self.tilt - TILT_DECAY).max(0.0);
        } else if self.tilt < 0.0 {
            self.tilt = (self.tilt + TILT_DECAY).min(0.0);
        }
    }

    /// Back to the center lane, on the ground, upright
    pub fn reset(&mut self) {
        self.phase = JumpPhase::Grounded;
        self.vertical_offset = 0.0;
        self.vertical_velocity = 0.0;
        self.tilt = 0.0;
        self.lateral_steps = 0;
        self.limbs = LimbSwing::default();
        self.refresh_bounds();
    }

    /// Center of the mesh: feet rest on the ground at depth 0
    fn mesh_center(&self) -> DVec3 {
        let height = self.tuning.extents[1];
        DVec3::new(self.lateral_offset(), self.vertical_offset + height * 0.5, 0.0)
    }

    /// Collider built from the current pose and tuning, without caching it
    pub fn collider(&self) -> Aabb {
        Aabb::scaled(
            self.mesh_center(),
            DVec3::from_array(self.tuning.extents),
            DVec3::splat(self.tuning.box_shrink),
        )
    }

    /// Recompute the cached collider from the current pose
    pub fn refresh_bounds(&mut self) {
        self.bounds = Some(self.collider());
    }

    /// Pose for the renderer: lean on Z, limb swing on X
    pub fn pose(&self) -> Pose {
        Pose {
            position: DVec3::new(self.lateral_offset(), self.vertical_offset, 0.0),
            rotation: DVec3::new(self.limbs.angle, 0.0, self.tilt),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grounded_player() -> PlayerState {
        let mut player = PlayerState::default();
        player.reset();
        player
    }

    #[test]
    fn test_new_player_has_no_bounds() {
        let player = PlayerState::default();
        assert!(player.bounds().is_none());
    }

    #[test]
    fn test_jump_only_from_ground() {
        let mut player = grounded_player();
        player.jump();
        assert_eq!(player.phase(), JumpPhase::Ascending);
        assert_eq!(player.vertical_velocity(), JUMP_FORCE);

        player.update(1.0);
        let velocity = player.vertical_velocity();
        player.jump();
        assert_eq!(player.vertical_velocity(), velocity, "no double jump");
    }

    #[test]
    fn test_jump_arc_returns_to_ground() {
        let mut player = grounded_player();
        player.jump();

        let expected_ascent = (JUMP_FORCE / GRAVITY).ceil() as usize;
        let mut steps = 0;
        let mut ascent = None;
        while player.phase() != JumpPhase::Grounded {
            player.update(1.0);
            steps += 1;
            assert!(player.vertical_offset() >= 0.0);
            if ascent.is_none() && player.phase() == JumpPhase::Descending {
                ascent = Some(steps);
            }
            assert!(steps < 1000, "jump never landed");
        }

        assert_eq!(ascent, Some(expected_ascent));
        assert_eq!(player.vertical_offset(), 0.0);
    }

    #[test]
    fn test_move_refuses_step_past_edge() {
        let mut player = grounded_player();
        let mut applied = 0;
        for _ in 0..20 {
            if player.move_left() {
                applied += 1;
            }
            assert!(player.lateral_offset() >= -MAX_LATERAL);
        }
        assert_eq!(applied, 10);
        assert!(!player.move_left());
    }

    #[test]
    fn test_move_tilts_within_limit() {
        let mut player = grounded_player();
        for _ in 0..3 {
            player.move_right();
        }
        assert!((player.tilt() + 0.15).abs() < 1e-9);
        for _ in 0..3 {
            player.move_right();
        }
        assert_eq!(player.tilt(), -TILT_LIMIT);
    }

    #[test]
    fn test_tilt_decays_to_zero() {
        let mut player = grounded_player();
        player.move_left();
        for _ in 0..4 {
            player.update(1.0 / 60.0);
        }
        assert!((player.tilt() - 0.01).abs() < 1e-9);
        player.update(1.0 / 60.0);
        player.update(1.0 / 60.0);
        assert_eq!(player.tilt(), 0.0);
    }

    #[test]
    fn test_move_refreshes_bounds() {
        let mut player = grounded_player();
        let before = player.bounds().unwrap();
        player.move_right();
        let after = player.bounds().unwrap();
        assert!((after.center().x - before.center().x - LATERAL_SPEED).abs() < 1e-9);
    }

    #[test]
    fn test_bounds_shrunk_from_mesh() {
        let player = grounded_player();
        let size = player.bounds().unwrap().size();
        assert!((size.x - PLAYER_EXTENTS[0] * PLAYER_BOX_SHRINK).abs() < 1e-9);
        assert!((size.y - PLAYER_EXTENTS[1] * PLAYER_BOX_SHRINK).abs() < 1e-9);
        assert!((size.z - PLAYER_EXTENTS[2] * PLAYER_BOX_SHRINK).abs() < 1e-9);
    }

    #[test]
    fn test_limb_swing_reverses() {
        let mut limbs = LimbSwing::default();
        for _ in 0..5 {
            limbs.step();
        }
        assert_eq!(limbs.direction, -1.0);
        limbs.step();
        assert!(limbs.angle < LIMB_MAX_ANGLE);
    }

    #[test]
    fn test_limbs_hold_while_airborne() {
        let mut player = grounded_player();
        player.jump();
        let limbs = player.limbs();
        player.update(1.0);
        assert_eq!(player.limbs(), limbs);
    }

    #[test]
    fn test_reset_twice_matches_once() {
        let mut player = grounded_player();
        player.move_left();
        player.jump();
        player.update(1.0);

        player.reset();
        let once = player.clone();
        player.reset();
        assert_eq!(player.lateral_offset(), once.lateral_offset());
        assert_eq!(player.phase(), once.phase());
        assert_eq!(player.tilt(), once.tilt());
        assert_eq!(player.bounds(), once.bounds());
        assert_eq!(player.pose(), once.pose());
    }

    #[test]
    fn test_lateral_round_trip_lands_on_center() {
        let mut player = grounded_player();
        for _ in 0..10 {
            assert!(player.move_left());
        }
        assert_eq!(player.lateral_offset(), -MAX_LATERAL);
        for _ in 0..10 {
            assert!(player.move_right());
        }
        assert_eq!(player.lateral_offset(), 0.0);
        assert_eq!(player.bounds().unwrap().center().x, 0.0);
    }

    #[test]
    fn test_collider_follows_tuning_change() {
        let mut player = grounded_player();
        player.tuning.extents = [0.01; 3];
        let size = player.collider().size();
        assert!((size.x - 0.01 * PLAYER_BOX_SHRINK).abs() < 1e-12);
        // The cache only changes on the next refresh
        assert!(player.bounds().unwrap().size().x > 0.5);
    }
}
