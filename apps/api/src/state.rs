use std::sync::Arc;

use crate::llm_client::ChatModel;
use crate::models::job::JobPosting;
use crate::submissions::store::SubmissionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable chat backend. Default: `LlmClient` (OpenAI chat completions).
    pub llm: Arc<dyn ChatModel>,
    /// Normalized job corpus, loaded once at startup and read-only afterwards.
    pub corpus: Arc<Vec<JobPosting>>,
    pub submissions: Arc<dyn SubmissionStore>,
}
