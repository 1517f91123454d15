//! Cross-cutting, shared constants.
//!
//! The yes/no reduction constants are part of the scoring contract: changing
//! any of them changes the numbers clients see.

/// Model directory used when `MODEL_DIR` is not set.
pub const DEFAULT_MODEL_DIR: &str = "/models/Qwen3-Reranker-0.6B";

/// Maximum prompt + generated tokens accepted by the engine.
pub const DEFAULT_MAX_MODEL_LEN: usize = 4096;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 8000;

/// Instruction applied when a request does not carry one.
pub const DEFAULT_INSTRUCTION: &str = "Given a vacancy title, retrieve relevant job description of the candidate that is suitable for the vacancy";

/// Instruction substituted by the prompt builder when none is supplied at all.
pub const FALLBACK_INSTRUCTION: &str =
    "Given a web search query, retrieve relevant passages that answer the query";

/// Vocabulary entry read as a positive answer.
pub const YES_TOKEN: &str = "yes";

/// Vocabulary entry read as a negative answer.
pub const NO_TOKEN: &str = "no";

/// Log-probability assumed for an answer token missing from the top-k set.
pub const MISSING_LOGPROB_FLOOR: f64 = -10.0;

/// Lower bound applied before taking `ln` of a probability.
pub const PROBABILITY_FLOOR: f64 = 1e-10;

/// Number of top log-probabilities requested per generated position.
pub const ANSWER_TOP_LOGPROBS: usize = 2;

/// Service name reported by the root endpoint.
pub const SERVICE_NAME: &str = "Qwen3 Reranker API";

/// Service version reported by the root endpoint.
pub const SERVICE_VERSION: &str = "1.0.0";
