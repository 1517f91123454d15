//! In-memory generator for tests (no model files).

use std::collections::HashMap;

use parking_lot::Mutex;

use super::error::EngineError;
use super::generator::TextGenerator;
use super::types::{
    CompletionOutput, FinishReason, Logprob, RequestOutput, SamplingParams, TokenLogprobs,
};

/// Vocabulary id of `"yes"` in the mock vocabulary (matches Qwen3).
pub const MOCK_YES_ID: u32 = 9693;
/// Vocabulary id of `"no"` in the mock vocabulary (matches Qwen3).
pub const MOCK_NO_ID: u32 = 2152;
/// An unrelated token id.
pub const MOCK_OTHER_ID: u32 = 785;

#[derive(Debug, Clone)]
enum MockResponse {
    Logprobs(Vec<(u32, f32)>),
    Outputs(Vec<RequestOutput>),
    Fail(String),
}

/// Scripted [`TextGenerator`] that records every call.
#[derive(Debug)]
pub struct MockGenerator {
    vocab: HashMap<String, u32>,
    response: MockResponse,
    prompts: Mutex<Vec<String>>,
    params: Mutex<Vec<SamplingParams>>,
}

impl MockGenerator {
    /// Answers every prompt with one token carrying `entries` as its top log-probabilities.
    pub fn with_logprobs(entries: &[(u32, f32)]) -> Self {
        Self::with_response(MockResponse::Logprobs(entries.to_vec()))
    }

    /// Answers "yes" with `yes` and "no" with `no` log-probabilities.
    pub fn yes_no(yes: f32, no: f32) -> Self {
        Self::with_logprobs(&[(MOCK_YES_ID, yes), (MOCK_NO_ID, no)])
    }

    /// Returns `outputs` verbatim, regardless of the prompts.
    pub fn with_outputs(outputs: Vec<RequestOutput>) -> Self {
        Self::with_response(MockResponse::Outputs(outputs))
    }

    /// Fails every call with an inference error carrying `reason`.
    pub fn failing(reason: impl Into<String>) -> Self {
        Self::with_response(MockResponse::Fail(reason.into()))
    }

    fn with_response(response: MockResponse) -> Self {
        let vocab = [("yes", MOCK_YES_ID), ("no", MOCK_NO_ID), ("the", MOCK_OTHER_ID)]
            .into_iter()
            .map(|(t, id)| (t.to_string(), id))
            .collect();

        Self {
            vocab,
            response,
            prompts: Mutex::new(Vec::new()),
            params: Mutex::new(Vec::new()),
        }
    }

    /// Drops `token` from the mock vocabulary.
    pub fn without_token(mut self, token: &str) -> Self {
        self.vocab.remove(token);
        self
    }

    /// Prompts received so far, in call order.
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().clone()
    }

    /// Sampling parameters received so far, one per call.
    pub fn params(&self) -> Vec<SamplingParams> {
        self.params.lock().clone()
    }

    fn completion_for(prompt: &str, entries: &[(u32, f32)]) -> RequestOutput {
        let mut ranked = entries.to_vec();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));

        let position: TokenLogprobs = ranked
            .iter()
            .enumerate()
            .map(|(i, &(id, lp))| (id, Logprob::new(lp, i + 1)))
            .collect();

        let token_ids = ranked.first().map(|&(id, _)| vec![id]).unwrap_or_default();

        RequestOutput {
            prompt: prompt.to_string(),
            prompt_token_ids: Vec::new(),
            outputs: vec![CompletionOutput {
                index: 0,
                text: String::new(),
                token_ids,
                logprobs: Some(vec![position]),
                finish_reason: Some(FinishReason::Length),
            }],
        }
    }
}

impl TextGenerator for MockGenerator {
    fn generate(
        &self,
        prompts: &[String],
        params: &SamplingParams,
    ) -> Result<Vec<RequestOutput>, EngineError> {
        self.prompts.lock().extend(prompts.iter().cloned());
        self.params.lock().push(params.clone());

        match &self.response {
            MockResponse::Logprobs(entries) => Ok(prompts
                .iter()
                .map(|p| Self::completion_for(p, entries))
                .collect()),
            MockResponse::Outputs(outputs) => Ok(outputs.clone()),
            MockResponse::Fail(reason) => Err(EngineError::InferenceFailed {
                reason: reason.clone(),
            }),
        }
    }

    fn token_id(&self, token: &str) -> Option<u32> {
        self.vocab.get(token).copied()
    }
}
