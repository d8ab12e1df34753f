pub mod app_error;
pub mod config;
pub mod driver;
pub mod food;
pub mod game;
pub mod input;
pub mod logging;
pub mod renderer;
pub mod snake;
pub mod snapshot;
pub mod terminal_runtime;
pub mod ui;
