//! Environment-backed configuration.
//!
//! The only environment override is `MODEL_DIR`; everything else has a fixed
//! default that can be changed programmatically.

pub mod error;


pub use error::ConfigError;

use std::env;
use std::net::{IpAddr, Ipv4Addr};
use std::path::PathBuf;

use crate::constants::{DEFAULT_MAX_MODEL_LEN, DEFAULT_MODEL_DIR, DEFAULT_PORT};
use crate::engine::EngineConfig;

/// Server configuration.
///
/// Use [`Config::from_env`] to read `MODEL_DIR` on top of defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Model artifacts directory. Default: `/models/Qwen3-Reranker-0.6B`.
    pub model_dir: PathBuf,

    /// HTTP server port. Default: `8000`.
    pub port: u16,

    /// IP address to bind to. Default: `0.0.0.0`.
    pub bind_addr: IpAddr,

    /// Maximum prompt + generated tokens. Default: `4096`.
    pub max_model_len: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            port: DEFAULT_PORT,
            bind_addr: IpAddr::V4(Ipv4Addr::UNSPECIFIED),
            max_model_len: DEFAULT_MAX_MODEL_LEN,
        }
    }
}

impl Config {
    pub const ENV_MODEL_DIR: &'static str = "MODEL_DIR";

    /// Loads configuration from the environment (falling back to defaults).
    ///
    /// An empty `MODEL_DIR` counts as unset; any other value is used as-is.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        let model_dir = env::var(Self::ENV_MODEL_DIR)
            .ok()
            .filter(|v| !v.is_empty())
            .map(PathBuf::from)
            .unwrap_or(defaults.model_dir);

        Self {
            model_dir,
            ..defaults
        }
    }

    /// Validates the model directory (does not inspect its contents).
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.model_dir.as_os_str().is_empty() {
            return Err(ConfigError::EmptyModelDir);
        }

        if !self.model_dir.exists() {
            return Err(ConfigError::PathNotFound {
                path: self.model_dir.clone(),
            });
        }

        if !self.model_dir.is_dir() {
            return Err(ConfigError::NotADirectory {
                path: self.model_dir.clone(),
            });
        }

        if self.port == 0 {
            return Err(ConfigError::InvalidPort { port: self.port });
        }

        Ok(())
    }

    /// Returns `"{bind_addr}:{port}"` (useful for logging/binding).
    pub fn socket_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }

    /// Engine settings derived from this configuration.
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig::new(self.model_dir.clone()).with_max_model_len(self.max_model_len)
    }
}
