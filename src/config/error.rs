//! Configuration error types.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur during configuration validation.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// `model_dir` was set to an empty path.
    #[error("model directory cannot be empty")]
    EmptyModelDir,

    /// Port value is outside valid range (1-65535).
    #[error("invalid port {port}: must be between 1 and 65535")]
    InvalidPort { port: u16 },

    /// Specified path does not exist on the filesystem.
    #[error("path does not exist: {path}")]
    PathNotFound { path: PathBuf },

    /// Path exists but is not a directory.
    #[error("path is not a directory: {path}")]
    NotADirectory { path: PathBuf },
}
