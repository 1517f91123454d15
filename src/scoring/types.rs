use crate::constants::PROBABILITY_FLOOR;

/// Vocabulary ids of the two answer tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AnswerTokens {
    pub yes_id: u32,
    pub no_id: u32,
}

/// Why engine output could not be read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MalformedOutput {
    /// The engine returned no request outputs.
    NoRequestOutputs,
    /// The request output carried no completions.
    NoCompletions,
    /// The completion carried no log-probabilities for its first position.
    MissingLogprobs,
}

impl std::fmt::Display for MalformedOutput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MalformedOutput::NoRequestOutputs => write!(f, "engine returned no request outputs"),
            MalformedOutput::NoCompletions => write!(f, "request output has no completions"),
            MalformedOutput::MissingLogprobs => {
                write!(f, "completion has no log-probabilities for the first token")
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
/// Result of reducing one generation to a relevance probability.
pub enum ScoreOutcome {
    /// Log-probabilities were read and reduced.
    Scored {
        /// `P(yes) / (P(yes) + P(no))`.
        probability: f64,
        /// Log-probability used for "yes" (floored when absent).
        yes_logprob: f64,
        /// Log-probability used for "no" (floored when absent).
        no_logprob: f64,
    },
    /// Engine output was unreadable; probability defaults to `0.0`.
    Defaulted {
        /// What was missing.
        reason: MalformedOutput,
    },
}

impl ScoreOutcome {
    /// Relevance probability (`0.0` when defaulted).
    pub fn probability(&self) -> f64 {
        match self {
            ScoreOutcome::Scored { probability, .. } => *probability,
            ScoreOutcome::Defaulted { .. } => 0.0,
        }
    }

    /// `ln(max(probability, 1e-10))`.
    pub fn score(&self) -> f64 {
        log_score(self.probability())
    }

    /// Returns `true` if the engine output was unreadable.
    pub fn is_defaulted(&self) -> bool {
        matches!(self, ScoreOutcome::Defaulted { .. })
    }
}

impl std::fmt::Display for ScoreOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScoreOutcome::Scored { probability, .. } => {
                write!(f, "SCORED (probability: {:.4})", probability)
            }
            ScoreOutcome::Defaulted { reason } => write!(f, "DEFAULTED ({})", reason),
        }
    }
}

/// Two-class softmax over log-probabilities.
///
/// Returns `0.0` when both exponentials underflow to zero.
pub fn softmax_pair(yes_logprob: f64, no_logprob: f64) -> f64 {
    let yes = yes_logprob.exp();
    let no = no_logprob.exp();
    let total = yes + no;

    if total == 0.0 {
        return 0.0;
    }

    yes / total
}

/// `ln(max(probability, 1e-10))`.
pub fn log_score(probability: f64) -> f64 {
    probability.max(PROBABILITY_FLOOR).ln()
}
