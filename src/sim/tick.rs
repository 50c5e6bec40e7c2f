//! Per-frame simulation tick
//!
//! Sequence: score, player, obstacles, collision. A hit ends the run and
//! later ticks have no effect until a restart.

use super::collision::first_collision;
use super::spawner::SpawnerEvent;
use super::state::{Game, GameEvent, GamePhase};
use crate::error::Result;

/// Advance the game by one frame of `dt` seconds
pub fn tick(game: &mut Game, dt: f64) -> Result<()> {
    if game.phase != GamePhase::Playing {
        return Ok(());
    }

    game.time_ticks += 1;
    game.score += dt;

    game.player.update(dt);
    game.spawner.update(dt, game.score)?;

    for event in game.spawner.drain_events() {
        let event = match event {
            SpawnerEvent::Spawned(id) => match game.spawner.get(id) {
                Some(obstacle) => GameEvent::Spawned {
                    id,
                    kind: obstacle.kind,
                    lane: obstacle.lane,
                },
                None => continue,
            },
            SpawnerEvent::Recycled(id) => GameEvent::Recycled { id },
        };
        game.events.push(event);
    }

    if let Some(id) = first_collision(&game.player, &game.spawner) {
        game.phase = GamePhase::GameOver;
        game.events.push(GameEvent::Collided { id });
        game.events.push(GameEvent::GameOver { score: game.score });
        log::info!(
            "Collision with obstacle {} after {} ticks, score {:.2}",
            id,
            game.time_ticks,
            game.score
        );
    }

    Ok(())
}
