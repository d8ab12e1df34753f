use std::path::PathBuf;
use std::sync::mpsc;
use std::time::Duration;

use clap::Parser;
use crossterm::event::{self, Event};
use log::{LevelFilter, info};
use threaded_snake::app_error::AppError;
use threaded_snake::config::{DEFAULT_GRID, INPUT_POLL_INTERVAL_MS, THEME_CLASSIC};
use threaded_snake::driver::{Driver, DriverConfig, SharedGame, latest_frame};
use threaded_snake::game::GameState;
use threaded_snake::input::{GameInput, map_key};
use threaded_snake::logging::init_file_logger;
use threaded_snake::renderer;
use threaded_snake::terminal_runtime::TerminalSession;

#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Seed the food placement for a reproducible game.
    #[arg(long)]
    seed: Option<u64>,

    /// Write a log to this file.
    #[arg(long = "log-file", value_name = "PATH")]
    log_file: Option<PathBuf>,

    /// Log verbosity when --log-file is set.
    #[arg(long = "log-level", value_name = "LEVEL", default_value = "info")]
    log_level: LevelFilter,
}

fn main() -> Result<(), AppError> {
    let cli = Cli::parse();

    if let Some(path) = &cli.log_file {
        init_file_logger(path, cli.log_level)?;
    }

    info!("starting threaded-snake {}", env!("CARGO_PKG_VERSION"));
    run(&cli)
}

fn run(cli: &Cli) -> Result<(), AppError> {
    let state = match cli.seed {
        Some(seed) => {
            info!("using seed {seed}");
            GameState::new_with_seed(DEFAULT_GRID, seed)
        }
        None => GameState::new(DEFAULT_GRID),
    };
    let game = SharedGame::new(state);

    let mut session = TerminalSession::enter()?;
    let (frames_tx, frames_rx) = mpsc::channel();
    let mut driver = Driver::spawn(game.clone(), DriverConfig::default(), frames_tx)
        .map_err(AppError::SpawnDriver)?;

    let mut latest = game.snapshot();
    loop {
        latest = latest_frame(&frames_rx, latest);
        session
            .terminal_mut()
            .draw(|frame| renderer::render(frame, &latest, &THEME_CLASSIC))?;

        if !event::poll(Duration::from_millis(INPUT_POLL_INTERVAL_MS))? {
            continue;
        }

        let Event::Key(key) = event::read()? else {
            continue;
        };

        match map_key(key) {
            Some(GameInput::Quit) => break,
            Some(input) => {
                if let Some(snapshot) = game.apply_input(input) {
                    latest = snapshot;
                }
            }
            None => {}
        }
    }

    driver.stop();
    info!("exiting");
    Ok(())
}
