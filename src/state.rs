//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor. It
//! owns the repository behind one `RwLock`: reads (listings, floor fetches)
//! share it, while paints, floor saves, and booking transitions take the write
//! guard for their whole read-modify-write. That lock is the only mutual
//! exclusion the editor and booking flows need.

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::config::DEFAULT_SUGGESTION_MAX_TOKENS;
use crate::llm::LlmChat;
use crate::store::Repository;

/// Clone is required by Axum; all inner fields are Arc-wrapped or Copy.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<RwLock<Repository>>,
    /// `None` when LLM env vars are not configured; suggestions then fail soft.
    pub llm: Option<Arc<dyn LlmChat>>,
    pub suggestion_max_tokens: u32,
}

impl AppState {
    #[must_use]
    pub fn new(repo: Repository, llm: Option<Arc<dyn LlmChat>>) -> Self {
        Self { repo: Arc::new(RwLock::new(repo)), llm, suggestion_max_tokens: DEFAULT_SUGGESTION_MAX_TOKENS }
    }

    #[must_use]
    pub fn with_suggestion_max_tokens(mut self, max_tokens: u32) -> Self {
        self.suggestion_max_tokens = max_tokens;
        self
    }
}

#[cfg(test)]
#[path = "state_helpers_test.rs"]
pub mod test_helpers;
