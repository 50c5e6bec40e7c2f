//! Lane Runner entry point
//!
//! Headless driver: runs an autopilot session at a fixed frame rate and
//! feeds the render and score sinks after every tick.
//!
//! Usage: `lane-runner [settings.json]`

use std::error::Error;
use std::io::{self, BufWriter};

use lane_runner::present::{JsonLinesSink, LogSink, RenderSink, publish};
use lane_runner::sim::{GameEvent, autopilot, tick};
use lane_runner::{HighScore, Settings};

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(err) = run() {
        log::error!("{}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn Error>> {
    let settings = match std::env::args().nth(1) {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };

    let mut high_score = match &settings.high_score_path {
        Some(path) => HighScore::load(path)?,
        None => HighScore::new(),
    };

    let mut render: Box<dyn RenderSink> = if settings.json_frames {
        Box::new(JsonLinesSink::new(BufWriter::new(io::stdout())))
    } else {
        Box::new(LogSink)
    };

    let mut game = settings.new_game();
    let dt = settings.frame_dt();
    log::info!(
        "Lane Runner starting (seed {}, {} Hz, best {:.2})",
        settings.seed,
        settings.frame_rate,
        high_score.best
    );

    // First command starts the run
    if let Some(command) = autopilot::decide(&game) {
        game.handle(command)?;
    }

    let mut frames = 0;
    while game.is_running() && frames < settings.max_frames {
        if let Some(command) = autopilot::decide(&game) {
            game.handle(command)?;
        }
        tick(&mut game, dt)?;
        frames += 1;

        for event in game.drain_events() {
            match event {
                GameEvent::Spawned { id, kind, lane } => {
                    log::debug!("Spawned {:?} {} in {:?}", kind, id, lane)
                }
                GameEvent::GameOver { score } => log::info!("Game over, score {:.2}", score),
                _ => {}
            }
        }

        publish(&game, render.as_mut(), &mut high_score);
    }

    if game.is_running() {
        log::info!(
            "Frame limit reached after {:.2}s, {} obstacle records",
            game.score,
            game.spawner.total_records()
        );
    }
    log::info!("Best score {:.2}", high_score.best);
    Ok(())
}
