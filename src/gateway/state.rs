use std::sync::{Arc, OnceLock};

use thiserror::Error;

use crate::engine::TextGenerator;
use crate::scoring::RelevanceScorer;

/// Returned when a scorer is installed into state that already holds one.
#[derive(Debug, Error)]
#[error("scorer already installed")]
pub struct AlreadyInstalled;

/// Shared handler state: a write-once slot for the loaded scorer.
///
/// Handlers observe an empty slot as "not ready".
pub struct AppState<G: TextGenerator + 'static> {
    scorer: Arc<OnceLock<Arc<RelevanceScorer<G>>>>,
}

impl<G: TextGenerator + 'static> Clone for AppState<G> {
    fn clone(&self) -> Self {
        Self {
            scorer: Arc::clone(&self.scorer),
        }
    }
}

impl<G: TextGenerator + 'static> Default for AppState<G> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: TextGenerator + 'static> AppState<G> {
    /// Creates state with no scorer installed.
    pub fn new() -> Self {
        Self {
            scorer: Arc::new(OnceLock::new()),
        }
    }

    /// Creates state with `scorer` already installed.
    pub fn with_scorer(scorer: RelevanceScorer<G>) -> Self {
        let state = Self::new();
        // A freshly created slot is always empty.
        let _ = state.scorer.set(Arc::new(scorer));
        state
    }

    /// Installs the scorer; only the first call succeeds.
    pub fn install(&self, scorer: RelevanceScorer<G>) -> Result<(), AlreadyInstalled> {
        self.scorer
            .set(Arc::new(scorer))
            .map_err(|_| AlreadyInstalled)
    }

    pub fn scorer(&self) -> Option<Arc<RelevanceScorer<G>>> {
        self.scorer.get().cloned()
    }

    pub fn is_model_loaded(&self) -> bool {
        self.scorer.get().is_some()
    }
}
