//! Qwen3 yes/no relevance reranker (used by the server binary and integration tests).
//!
//! # Public API Surface
//!
//! - [`Config`], [`ConfigError`] - Server configuration
//! - [`build_prompt`] - Reranker chat template
//! - [`RelevanceScorer`], [`ScoreOutcome`] - Yes/no reduction over engine log-probabilities
//! - [`TextGenerator`], [`CandleGenerator`] - Inference engine capability and the candle backend
//! - [`gateway`] - Axum router, handlers and shared state
//!
//! ## Test/Mock Support
//! `MockGenerator` is available behind `#[cfg(any(test, feature = "mock"))]`.

pub mod config;
pub mod constants;
pub mod engine;
pub mod gateway;
pub mod prompt;
pub mod scoring;

pub use config::{Config, ConfigError};
#[cfg(any(test, feature = "mock"))]
pub use engine::MockGenerator;
pub use engine::{
    CandleGenerator, EngineConfig, EngineError, RequestOutput, SamplingParams, TextGenerator,
};
pub use gateway::{AppState, GatewayError, create_router_with_state};
pub use prompt::{build_prompt, format_instruction};
pub use scoring::{
    AnswerTokens, MalformedOutput, RelevanceScorer, ScoreOutcome, ScoringError, log_score,
    softmax_pair,
};
