//! Yes/no relevance scoring.
//!
//! A prompt is sent to a [`TextGenerator`](crate::engine::TextGenerator) for a
//! single greedy token with its top-2 log-probabilities. The "yes" and "no"
//! entries are reduced with a two-class softmax:
//!
//! ```text
//! probability = e^yes / (e^yes + e^no)
//! score       = ln(max(probability, 1e-10))
//! ```
//!
//! An answer token absent from the top-2 set counts as log-probability `-10.0`.
//! Unreadable engine output yields [`ScoreOutcome::Defaulted`] (probability
//! `0.0`) instead of an error.

pub mod error;
pub mod scorer;
pub mod types;


pub use error::ScoringError;
pub use scorer::{RelevanceScorer, extract_outcome};
pub use types::{AnswerTokens, MalformedOutput, ScoreOutcome, log_score, softmax_pair};
