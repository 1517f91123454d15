use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EngineError {
    #[error("model not found at path: {path}")]
    ModelNotFound { path: PathBuf },

    #[error("failed to load model: {reason}")]
    ModelLoadFailed { reason: String },

    #[error("{device} device unavailable: {reason}")]
    DeviceUnavailable { device: String, reason: String },

    #[error("tokenization failed: {reason}")]
    TokenizationFailed { reason: String },

    #[error("inference failed: {reason}")]
    InferenceFailed { reason: String },

    #[error("prompt is empty after tokenization")]
    EmptyPrompt,

    #[error("prompt of {prompt_tokens} tokens plus {max_tokens} new tokens exceeds max_model_len {max_model_len}")]
    PromptTooLong {
        prompt_tokens: usize,
        max_tokens: usize,
        max_model_len: usize,
    },

    #[error("unsupported sampling parameters: {reason}")]
    UnsupportedSampling { reason: String },

    #[error("invalid engine configuration: {reason}")]
    InvalidConfig { reason: String },
}

impl From<candle_core::Error> for EngineError {
    fn from(err: candle_core::Error) -> Self {
        EngineError::InferenceFailed {
            reason: err.to_string(),
        }
    }
}

impl From<std::io::Error> for EngineError {
    fn from(err: std::io::Error) -> Self {
        EngineError::ModelLoadFailed {
            reason: err.to_string(),
        }
    }
}
