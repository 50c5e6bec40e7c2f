//! Presentation seam
//!
//! The simulation never holds a renderer or a score widget. After each tick
//! the driver builds a `Frame` and hands it to whatever sinks are attached.

use std::io::Write;

use serde::Serialize;

use crate::sim::{Game, GamePhase, ObstacleId, ObstacleKind, Pose};

/// Pose of one active obstacle
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ObstacleView {
    pub id: ObstacleId,
    pub kind: ObstacleKind,
    pub pose: Pose,
}

/// Everything a renderer reads after a tick
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Frame {
    pub tick: u64,
    pub phase: GamePhase,
    pub score: f64,
    pub player: Pose,
    pub obstacles: Vec<ObstacleView>,
}

impl Frame {
    pub fn capture(game: &Game) -> Self {
        Self {
            tick: game.time_ticks,
            phase: game.phase,
            score: game.score,
            player: game.player.pose(),
            obstacles: game
                .spawner
                .active()
                .map(|o| ObstacleView {
                    id: o.id,
                    kind: o.kind,
                    pose: o.pose(),
                })
                .collect(),
        }
    }
}

/// Consumer of per-tick frames
pub trait RenderSink {
    fn present(&mut self, frame: &Frame);
}

/// Consumer of score updates
pub trait ScoreSink {
    fn score_changed(&mut self, score: f64);
    fn game_over(&mut self, final_score: f64);
}

/// Traces each frame through the `log` facade
#[derive(Debug, Default)]
pub struct LogSink;

impl RenderSink for LogSink {
    fn present(&mut self, frame: &Frame) {
        log::trace!(
            "tick {} {:?} score {:.2} player ({:.2}, {:.2}) obstacles {}",
            frame.tick,
            frame.phase,
            frame.score,
            frame.player.position.x,
            frame.player.position.y,
            frame.obstacles.len()
        );
    }
}

/// Writes one JSON object per frame
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }
}

impl<W: Write> RenderSink for JsonLinesSink<W> {
    fn present(&mut self, frame: &Frame) {
        let written = serde_json::to_writer(&mut self.out, frame)
            .map_err(std::io::Error::from)
            .and_then(|_| writeln!(self.out));
        if let Err(err) = written {
            log::warn!("Dropping frame {}: {}", frame.tick, err);
        }
    }
}

/// Capture the game and feed the attached sinks
pub fn publish(game: &Game, render: &mut dyn RenderSink, score: &mut dyn ScoreSink) {
    render.present(&Frame::capture(game));
    score.score_changed(game.score);
    if game.phase == GamePhase::GameOver {
        score.game_over(game.score);
    }
}
