use std::path::PathBuf;

use candle_core::DType;

use crate::constants::{DEFAULT_MAX_MODEL_LEN, DEFAULT_MODEL_DIR};

use super::device::DevicePreference;
use super::error::EngineError;

/// Configuration for [`CandleGenerator`](super::CandleGenerator).
#[derive(Debug, Clone)]
pub struct EngineConfig {
    /// Directory holding `config.json`, `tokenizer.json` and safetensors weights.
    pub model_dir: PathBuf,
    /// Maximum prompt + generated tokens.
    pub max_model_len: usize,
    /// Weight and activation dtype.
    pub dtype: DType,
    pub device: DevicePreference,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            model_dir: PathBuf::from(DEFAULT_MODEL_DIR),
            max_model_len: DEFAULT_MAX_MODEL_LEN,
            dtype: DType::F32,
            device: DevicePreference::Auto,
        }
    }
}

impl EngineConfig {
    pub fn new<P: Into<PathBuf>>(model_dir: P) -> Self {
        Self {
            model_dir: model_dir.into(),
            ..Default::default()
        }
    }

    pub fn with_max_model_len(mut self, max_model_len: usize) -> Self {
        self.max_model_len = max_model_len;
        self
    }

    pub fn with_dtype(mut self, dtype: DType) -> Self {
        self.dtype = dtype;
        self
    }

    pub fn with_device(mut self, device: DevicePreference) -> Self {
        self.device = device;
        self
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.model_dir.as_os_str().is_empty() {
            return Err(EngineError::InvalidConfig {
                reason: "model_dir cannot be empty".to_string(),
            });
        }

        if self.max_model_len == 0 {
            return Err(EngineError::InvalidConfig {
                reason: "max_model_len must be greater than 0".to_string(),
            });
        }

        Ok(())
    }

    pub fn config_path(&self) -> PathBuf {
        self.model_dir.join("config.json")
    }

    pub fn tokenizer_path(&self) -> PathBuf {
        self.model_dir.join("tokenizer.json")
    }
}
