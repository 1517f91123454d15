use std::sync::Arc;

use super::error::EngineError;
use super::types::{RequestOutput, SamplingParams};

/// Text generation capability required by the scorer.
///
/// Implementations are synchronous and may block for the whole forward pass;
/// async callers should run them on a blocking thread.
pub trait TextGenerator: Send + Sync {
    /// Generates one [`RequestOutput`] per prompt, in input order.
    fn generate(
        &self,
        prompts: &[String],
        params: &SamplingParams,
    ) -> Result<Vec<RequestOutput>, EngineError>;

    /// Looks up the vocabulary id of a single token string.
    fn token_id(&self, token: &str) -> Option<u32>;
}

impl<T: TextGenerator + ?Sized> TextGenerator for Arc<T> {
    fn generate(
        &self,
        prompts: &[String],
        params: &SamplingParams,
    ) -> Result<Vec<RequestOutput>, EngineError> {
        (**self).generate(prompts, params)
    }

    fn token_id(&self, token: &str) -> Option<u32> {
        (**self).token_id(token)
    }
}
