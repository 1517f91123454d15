use tracing::{debug, error};

use crate::constants::{MISSING_LOGPROB_FLOOR, NO_TOKEN, YES_TOKEN};
use crate::engine::{RequestOutput, SamplingParams, TextGenerator};

use super::error::ScoringError;
use super::types::{AnswerTokens, MalformedOutput, ScoreOutcome, softmax_pair};

/// Scores a rendered prompt by asking the generator for a single yes/no token.
pub struct RelevanceScorer<G: TextGenerator> {
    generator: G,
    tokens: AnswerTokens,
    params: SamplingParams,
}

impl<G: TextGenerator> std::fmt::Debug for RelevanceScorer<G> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RelevanceScorer")
            .field("tokens", &self.tokens)
            .field("params", &self.params)
            .finish()
    }
}

impl<G: TextGenerator> RelevanceScorer<G> {
    /// Wraps `generator`, resolving the "yes"/"no" ids from its vocabulary.
    pub fn new(generator: G) -> Result<Self, ScoringError> {
        let yes_id = generator
            .token_id(YES_TOKEN)
            .ok_or(ScoringError::UnknownAnswerToken { token: YES_TOKEN })?;
        let no_id = generator
            .token_id(NO_TOKEN)
            .ok_or(ScoringError::UnknownAnswerToken { token: NO_TOKEN })?;

        debug!(yes_id, no_id, "Resolved answer token ids");

        Ok(Self {
            generator,
            tokens: AnswerTokens { yes_id, no_id },
            params: SamplingParams::yes_no(),
        })
    }

    pub fn tokens(&self) -> AnswerTokens {
        self.tokens
    }

    pub fn params(&self) -> &SamplingParams {
        &self.params
    }

    pub fn generator(&self) -> &G {
        &self.generator
    }

    /// Runs one generation for `prompt` and reduces it to a [`ScoreOutcome`].
    ///
    /// Engine failures are returned as errors; unreadable engine output is not.
    pub fn score(&self, prompt: &str) -> Result<ScoreOutcome, ScoringError> {
        debug!(prompt_len = prompt.len(), "Scoring prompt");

        let outputs = self
            .generator
            .generate(&[prompt.to_string()], &self.params)?;

        let outcome = extract_outcome(&outputs, self.tokens);
        if let ScoreOutcome::Defaulted { reason } = &outcome {
            error!(reason = %reason, "Error extracting probability, defaulting to 0.0");
        }

        Ok(outcome)
    }
}

/// Reads the first generated position of the first completion and reduces the
/// yes/no log-probabilities found there.
///
/// Answer tokens missing from the position use [`MISSING_LOGPROB_FLOOR`].
pub fn extract_outcome(outputs: &[RequestOutput], tokens: AnswerTokens) -> ScoreOutcome {
    let Some(output) = outputs.first() else {
        return ScoreOutcome::Defaulted {
            reason: MalformedOutput::NoRequestOutputs,
        };
    };

    let Some(completion) = output.outputs.first() else {
        return ScoreOutcome::Defaulted {
            reason: MalformedOutput::NoCompletions,
        };
    };

    let Some(position) = completion
        .logprobs
        .as_ref()
        .and_then(|positions| positions.first())
    else {
        return ScoreOutcome::Defaulted {
            reason: MalformedOutput::MissingLogprobs,
        };
    };

    let lookup = |id: u32| {
        position
            .get(&id)
            .map(|entry| f64::from(entry.logprob))
            .unwrap_or(MISSING_LOGPROB_FLOOR)
    };

    let yes_logprob = lookup(tokens.yes_id);
    let no_logprob = lookup(tokens.no_id);

    ScoreOutcome::Scored {
        probability: softmax_pair(yes_logprob, no_logprob),
        yes_logprob,
        no_logprob,
    }
}
