use std::cmp::Ordering;
use std::collections::HashMap;

use crate::constants::ANSWER_TOP_LOGPROBS;

use super::error::EngineError;

/// Generation settings for a single call.
#[derive(Debug, Clone, PartialEq)]
pub struct SamplingParams {
    /// `0.0` selects greedy decoding.
    pub temperature: f32,
    /// Maximum number of tokens to generate.
    pub max_tokens: usize,
    /// Number of top log-probabilities reported per generated position.
    pub logprobs: usize,
}

impl SamplingParams {
    /// Greedy, one token, top-2 log-probabilities.
    pub fn yes_no() -> Self {
        Self {
            temperature: 0.0,
            max_tokens: 1,
            logprobs: ANSWER_TOP_LOGPROBS,
        }
    }

    pub fn is_greedy(&self) -> bool {
        self.temperature == 0.0
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.max_tokens == 0 {
            return Err(EngineError::UnsupportedSampling {
                reason: "max_tokens must be at least 1".to_string(),
            });
        }

        if !self.temperature.is_finite() || self.temperature < 0.0 {
            return Err(EngineError::UnsupportedSampling {
                reason: format!(
                    "temperature must be finite and non-negative, got {}",
                    self.temperature
                ),
            });
        }

        Ok(())
    }
}

impl Default for SamplingParams {
    fn default() -> Self {
        Self::yes_no()
    }
}

/// Log-probability of one candidate token at one position.
#[derive(Debug, Clone, PartialEq)]
pub struct Logprob {
    pub logprob: f32,
    /// 1-based rank among all vocabulary entries at this position.
    pub rank: usize,
    pub decoded_token: Option<String>,
}

impl Logprob {
    pub fn new(logprob: f32, rank: usize) -> Self {
        Self {
            logprob,
            rank,
            decoded_token: None,
        }
    }
}

/// Top-k log-probabilities at one generated position, keyed by token id.
pub type TokenLogprobs = HashMap<u32, Logprob>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FinishReason {
    /// `max_tokens` reached.
    Length,
    /// A stop token was generated.
    Stop,
}

/// One generated continuation of a prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionOutput {
    pub index: usize,
    pub text: String,
    pub token_ids: Vec<u32>,
    /// One entry per generated token, `None` when not requested.
    pub logprobs: Option<Vec<TokenLogprobs>>,
    pub finish_reason: Option<FinishReason>,
}

/// Engine result for one prompt.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestOutput {
    pub prompt: String,
    pub prompt_token_ids: Vec<u32>,
    pub outputs: Vec<CompletionOutput>,
}

/// Returns the `k` highest entries as `(token_id, logprob)`, best first.
///
/// Ties keep the lower token id first.
pub fn top_logprobs(logprobs: &[f32], k: usize) -> Vec<(u32, f32)> {
    let mut top: Vec<(u32, f32)> = Vec::with_capacity(k + 1);
    if k == 0 {
        return top;
    }

    for (id, &value) in logprobs.iter().enumerate() {
        if top.len() == k
            && top
                .last()
                .is_some_and(|&(_, worst)| value.total_cmp(&worst) != Ordering::Greater)
        {
            continue;
        }

        let pos = top.partition_point(|&(_, v)| v.total_cmp(&value) != Ordering::Less);
        top.insert(pos, (id as u32, value));
        top.truncate(k);
    }

    top
}

/// Greedy selection over a log-probability row.
pub fn greedy_token(logprobs: &[f32]) -> Option<u32> {
    top_logprobs(logprobs, 1).first().map(|&(id, _)| id)
}

/// Top-`k` entries of one position plus the sampled token, which is always
/// reported. Ranks are 1-based over the whole row.
pub fn position_logprobs(row: &[f32], sampled: u32, k: usize) -> TokenLogprobs {
    let mut entries: TokenLogprobs = top_logprobs(row, k)
        .into_iter()
        .enumerate()
        .map(|(i, (id, lp))| (id, Logprob::new(lp, i + 1)))
        .collect();

    if !entries.contains_key(&sampled)
        && let Some(&value) = row.get(sampled as usize)
    {
        let rank = 1 + row.iter().filter(|&&v| v > value).count();
        entries.insert(sampled, Logprob::new(value, rank));
    }

    entries
}
