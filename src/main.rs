//! Tile Platformer headless runner
//!
//! Loads a level configuration, holds the given commands and steps the level
//! at a fixed rate, logging the outcome. Follows `next_level` on a win.
//!
//! Usage: `tile-platformer <config.json> [steps] [Command...]`

use std::path::PathBuf;
use std::process::ExitCode;

use tile_platformer::consts::FRAMES_PER_SECOND;
use tile_platformer::{Command, GameModel, ModelError};

const DEFAULT_STEPS: u32 = 60 * FRAMES_PER_SECOND;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = std::env::args().skip(1);
    let Some(config_path) = args.next().map(PathBuf::from) else {
        eprintln!("usage: tile-platformer <config.json> [steps] [Command...]");
        return ExitCode::FAILURE;
    };
    let steps = match args.next() {
        Some(s) => match s.parse::<u32>() {
            Ok(steps) => steps,
            Err(_) => {
                eprintln!("invalid step count {s:?}");
                return ExitCode::FAILURE;
            }
        },
        None => DEFAULT_STEPS,
    };
    let mut commands = Vec::new();
    for name in args {
        match Command::from_str(&name) {
            Some(command) => commands.push(command),
            None => log::warn!("Ignoring unknown command {name:?}"),
        }
    }

    match run(config_path, steps, &commands) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e} ({:?})", e.reason());
            ExitCode::FAILURE
        }
    }
}

fn run(mut config_path: PathBuf, steps: u32, commands: &[Command]) -> Result<(), ModelError> {
    let mut total_score = 0;
    loop {
        log::info!("Tile Platformer starting {}", config_path.display());
        let mut model = GameModel::from_config_path(&config_path)?;
        for &command in commands {
            model.apply_command(command);
        }

        let mut frame = 0;
        while frame < steps && !model.is_level_won() && !model.is_level_lost() {
            model.update_game();
            frame += 1;
        }
        total_score += model.score();
        log::info!(
            "Stopped after {frame} steps: won={} lost={} score={}",
            model.is_level_won(),
            model.is_level_lost(),
            model.score()
        );

        let next = match model.next_config_path() {
            Some(next) if model.is_level_won() => config_path.with_file_name(next),
            _ => break,
        };
        config_path = next;
    }
    log::info!("Total score {total_score}");
    Ok(())
}
