use std::io;
use std::path::PathBuf;

use log::SetLoggerError;
use thiserror::Error;

/// Failures of the application shell. Game logic itself never fails.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal error: {0}")]
    Terminal(#[from] io::Error),
    #[error("cannot open log file {}: {source}", path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("cannot install logger: {0}")]
    Logger(#[from] SetLoggerError),
    #[error("cannot start game loop thread: {0}")]
    SpawnDriver(#[source] io::Error),
}
