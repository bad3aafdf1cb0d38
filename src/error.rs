use crate::config::ConfigError;
use druid::PlatformError;
use thiserror::Error;

/// Errors that stop the application before or while the window runs
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Platform error: {0}")]
    Platform(#[from] PlatformError),
}
