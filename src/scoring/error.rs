use thiserror::Error;

use crate::engine::EngineError;

#[derive(Debug, Error)]
pub enum ScoringError {
    #[error("engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("answer token '{token}' is not in the model vocabulary")]
    UnknownAnswerToken { token: &'static str },
}
