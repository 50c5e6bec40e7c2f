//! Player versus obstacle collision
//!
//! Box overlap only. These queries never mutate the player or the spawner.

use super::obstacle::ObstacleId;
use super::player::PlayerState;
use super::spawner::ObstacleSpawner;

/// First active obstacle overlapping the player, if any.
///
/// A player that has never been placed is not collidable. Otherwise the
/// player's box is rebuilt from its current pose and tuning.
pub fn first_collision(player: &PlayerState, spawner: &ObstacleSpawner) -> Option<ObstacleId> {
    player.bounds()?;
    let player_box = player.collider();
    spawner
        .active()
        .find(|obstacle| obstacle.bounds.intersects(&player_box))
        .map(|obstacle| obstacle.id)
}

/// True if the player overlaps any active obstacle
#[inline]
pub fn check_collisions(player: &PlayerState, spawner: &ObstacleSpawner) -> bool {
    first_collision(player, spawner).is_some()
}
