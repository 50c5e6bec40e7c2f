//! Game state and lifecycle commands
//!
//! The game owns the player and the obstacle spawner and moves between
//! `Start`, `Playing` and `GameOver`. A restart goes straight back to
//! `Playing`.

use serde::{Deserialize, Serialize};

use super::obstacle::{Lane, ObstacleId, ObstacleKind};
use super::player::{PlayerState, PlayerTuning};
use super::spawner::{ObstacleSpawner, SpawnTuning};
use crate::error::Result;

/// Current phase of the run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum GamePhase {
    /// Waiting for the first start command
    #[default]
    Start,
    /// Active gameplay
    Playing,
    /// Run ended on a collision
    GameOver,
}

/// Discrete input, delivered between ticks in any order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Command {
    Start,
    Restart,
    Jump,
    MoveLeft,
    MoveRight,
}

/// Something the presentation layer may want to react to
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    Started,
    Spawned {
        id: ObstacleId,
        kind: ObstacleKind,
        lane: Lane,
    },
    Recycled {
        id: ObstacleId,
    },
    Collided {
        id: ObstacleId,
    },
    GameOver {
        score: f64,
    },
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    pub phase: GamePhase,
    /// Elapsed seconds of play in the current run
    pub score: f64,
    /// Ticks simulated in the current run
    pub time_ticks: u64,
    pub player: PlayerState,
    pub spawner: ObstacleSpawner,
    /// Events since the last drain
    pub events: Vec<GameEvent>,
}

impl Game {
    pub fn new(player: PlayerTuning, spawner: SpawnTuning, seed: u64) -> Self {
        Self {
            phase: GamePhase::Start,
            score: 0.0,
            time_ticks: 0,
            player: PlayerState::new(player),
            spawner: ObstacleSpawner::new(spawner, seed),
            events: Vec::new(),
        }
    }

    /// Game with default tuning
    pub fn with_seed(seed: u64) -> Self {
        Self::new(PlayerTuning::default(), SpawnTuning::default(), seed)
    }

    /// Whether the driver should keep scheduling ticks
    pub fn is_running(&self) -> bool {
        self.phase == GamePhase::Playing
    }

    /// Apply one input command
    pub fn handle(&mut self, command: Command) -> Result<()> {
        match (self.phase, command) {
            (GamePhase::Start, Command::Start | Command::Jump) => self.begin_run(),
            (GamePhase::GameOver, Command::Restart | Command::Jump) => self.begin_run(),
            (GamePhase::Playing, Command::Jump) => {
                self.player.jump();
                Ok(())
            }
            (GamePhase::Playing, Command::MoveLeft) => {
                self.player.move_left();
                Ok(())
            }
            (GamePhase::Playing, Command::MoveRight) => {
                self.player.move_right();
                Ok(())
            }
            (phase, command) => {
                log::debug!("Ignoring {:?} while {:?}", command, phase);
                Ok(())
            }
        }
    }

    /// Reset score, player and obstacles, then play
    fn begin_run(&mut self) -> Result<()> {
        self.score = 0.0;
        self.time_ticks = 0;
        self.player.reset();
        self.spawner.reset()?;
        self.phase = GamePhase::Playing;
        self.events.push(GameEvent::Started);
        log::info!("Run started");
        Ok(())
    }

    /// Take the events recorded since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }
}
