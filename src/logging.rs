use std::fs::File;
use std::path::Path;

use simplelog::{ConfigBuilder, LevelFilter, ThreadLogMode, WriteLogger};

use crate::app_error::AppError;

/// Routes `log` records to `path`. The terminal belongs to the game, so
/// nothing is ever logged to stdout or stderr.
pub fn init_file_logger(path: &Path, level: LevelFilter) -> Result<(), AppError> {
    let file = File::create(path).map_err(|source| AppError::LogFile {
        path: path.to_path_buf(),
        source,
    })?;

    let config = ConfigBuilder::new()
        .set_thread_level(LevelFilter::Error)
        .set_thread_mode(ThreadLogMode::Names)
        .set_target_level(LevelFilter::Off)
        .build();

    WriteLogger::init(level, config, file)?;
    Ok(())
}
