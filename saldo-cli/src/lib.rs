pub mod app;
pub mod cli;
pub mod config;
pub mod report;

pub use app::{run, AppError};
pub use cli::Cli;
pub use config::{AppConfig, ConfigError, Defaults};
pub use report::Report;
