//! Idle/demo mode: picks commands from the current world view

use super::bounds::Aabb;
use super::obstacle::{Lane, Obstacle};
use super::state::{Command, Game, GamePhase};

/// How far ahead the autopilot looks for threats
pub const LOOK_AHEAD: f64 = 20.0;

/// Obstacles between the look-ahead horizon and the back of the player
fn in_window(obstacle: &Obstacle, player_box: &Aabb) -> bool {
    obstacle.bounds.max.z >= -LOOK_AHEAD && obstacle.bounds.min.z <= player_box.max.z
}

/// Choose the next command, if any
pub fn decide(game: &Game) -> Option<Command> {
    match game.phase {
        GamePhase::Start | GamePhase::GameOver => return Some(Command::Jump),
        GamePhase::Playing => {}
    }

    let player = &game.player;
    player.bounds()?;
    let player_box = player.collider();

    // Something in the window whose lateral span crosses the player's
    let threatened = game.spawner.active().any(|o| {
        in_window(o, &player_box)
            && o.bounds.min.x <= player_box.max.x
            && o.bounds.max.x >= player_box.min.x
    });
    if !threatened {
        return None;
    }

    let blocked = |lane: Lane| {
        game.spawner
            .active()
            .any(|o| o.lane == lane && in_window(o, &player_box))
    };

    let x = player.lateral_offset();
    let escape = Lane::ALL
        .into_iter()
        .filter(|&lane| !blocked(lane))
        .min_by(|a, b| (a.offset() - x).abs().total_cmp(&(b.offset() - x).abs()));

    let step = player.tuning.lateral_speed;
    match escape {
        Some(lane) if lane.offset() < x - step * 0.5 => Some(Command::MoveLeft),
        Some(lane) if lane.offset() > x + step * 0.5 => Some(Command::MoveRight),
        Some(_) => None,
        None if !player.phase().is_airborne() => Some(Command::Jump),
        None => None,
    }
}
