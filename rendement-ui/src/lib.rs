pub mod app;
pub mod config;
pub mod csv_loader;
pub mod format;
pub mod logging;
pub mod models;
pub mod state;
pub mod utils;
pub mod views;

pub use app::{Command, CommandError, Outcome, Session};
pub use config::{AppConfig, ConfigError, DisplayConfig, LoggingConfig};
pub use state::{AppState, StateError};
