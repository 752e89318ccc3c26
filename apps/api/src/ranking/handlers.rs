//! Axum route handlers for the Search API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::models::job::ScoredJob;
use crate::models::preferences::PreferenceProfile;
use crate::ranking::rank;
use crate::state::AppState;

const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub preferences: Option<PreferenceProfile>,
    #[serde(default = "default_page")]
    pub page: u32,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_page() -> u32 {
    1
}

fn default_limit() -> i64 {
    DEFAULT_LIMIT
}

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub jobs: Vec<ScoredJob>,
    pub total: usize,
    pub query: String,
    pub page: u32,
}

/// POST /api/emmy/search
///
/// Ranks the loaded corpus against the candidate's preferences.
pub async fn handle_search(
    State(state): State<AppState>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, AppError> {
    let preferences = request
        .preferences
        .ok_or_else(|| AppError::Validation("Preferences are required".to_string()))?;

    // Negative limits fall through to the ranker's own validation.
    let limit = usize::try_from(request.limit).unwrap_or(0);
    let jobs = rank(&state.corpus, &preferences, limit)?;

    let query = describe_query(&preferences);
    info!(
        "Ranked {} postings for query '{}', returning {}",
        state.corpus.len(),
        query,
        jobs.len()
    );

    Ok(Json(SearchResponse {
        total: jobs.len(),
        jobs,
        query,
        page: request.page,
    }))
}

/// "<role> in <location>", dropping whichever part is absent.
fn describe_query(preferences: &PreferenceProfile) -> String {
    [preferences.role(), preferences.location()]
        .into_iter()
        .flatten()
        .collect::<Vec<_>>()
        .join(" in ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_describe_query_variants() {
        let mut prefs = PreferenceProfile {
            role: Some("Designer".to_string()),
            location: Some("Wellington".to_string()),
            ..Default::default()
        };
        assert_eq!(describe_query(&prefs), "Designer in Wellington");

        prefs.location = None;
        assert_eq!(describe_query(&prefs), "Designer");

        prefs.role = None;
        prefs.location = Some("Remote".to_string());
        assert_eq!(describe_query(&prefs), "Remote");

        assert_eq!(describe_query(&PreferenceProfile::default()), "");

        prefs.role = Some(String::new());
        prefs.location = Some("Wellington".to_string());
        assert_eq!(describe_query(&prefs), "Wellington");
    }

    #[test]
    fn test_request_defaults() {
        let request: SearchRequest = serde_json::from_str(r#"{"preferences": {}}"#).unwrap();
        assert_eq!(request.page, 1);
        assert_eq!(request.limit, 10);
        assert!(request.preferences.is_some());
    }
}
