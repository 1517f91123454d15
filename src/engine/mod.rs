//! Inference engine: the [`TextGenerator`] capability and its implementations.
//!
//! - [`CandleGenerator`] runs a local Qwen3 checkpoint (greedy decoding only).
//! - `MockGenerator` returns scripted log-probabilities (tests / `mock` feature).

pub mod config;
/// Device selection (CPU / Metal / CUDA).
pub mod device;
mod error;
pub mod generator;
#[cfg(any(test, feature = "mock"))]
pub mod mock;
pub mod qwen3;
pub mod types;
/// Tokenizer and weight-file loading helpers.
pub mod utils;


pub use config::EngineConfig;
pub use device::{DevicePreference, resolve_device};
pub use error::EngineError;
pub use generator::TextGenerator;
#[cfg(any(test, feature = "mock"))]
pub use mock::{MOCK_NO_ID, MOCK_OTHER_ID, MOCK_YES_ID, MockGenerator};
pub use qwen3::CandleGenerator;
pub use types::{
    CompletionOutput, FinishReason, Logprob, RequestOutput, SamplingParams, TokenLogprobs,
    greedy_token, position_logprobs, top_logprobs,
};
