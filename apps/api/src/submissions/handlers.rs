//! Axum route handlers for the Submissions API.

use axum::{
    extract::{Query, State},
    Json,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::errors::AppError;
use crate::submissions::Submission;
use crate::state::AppState;

const RECEIVED_MESSAGE: &str = "Submission received! Emmy will send you jobs within 24 hours.";

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub linkedin_url: String,
    // Accepted from the client but deliberately not stored.
    #[allow(dead_code)]
    #[serde(default)]
    pub transcript: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitResponse {
    pub success: bool,
    pub message: String,
    pub submission_id: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsQuery {
    pub email: Option<String>,
    pub submission_id: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionsResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submissions: Option<Vec<Submission>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub submission: Option<Submission>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_submissions: Option<usize>,
}

impl SubmissionsResponse {
    fn many(submissions: Vec<Submission>) -> Self {
        Self {
            success: true,
            total_submissions: Some(submissions.len()),
            submissions: Some(submissions),
            submission: None,
        }
    }

    fn one(submission: Submission) -> Self {
        Self {
            success: true,
            submissions: None,
            submission: Some(submission),
            total_submissions: None,
        }
    }
}

/// POST /api/emmy/submit
///
/// Stores the candidate's contact details for follow-up.
pub async fn handle_submit(
    State(state): State<AppState>,
    Json(request): Json<SubmitRequest>,
) -> Result<Json<SubmitResponse>, AppError> {
    let email = request.email.trim();
    let linkedin_url = request.linkedin_url.trim();
    if email.is_empty() || linkedin_url.is_empty() {
        return Err(AppError::Validation(
            "Email and LinkedIn URL are required".to_string(),
        ));
    }

    let submission = Submission::new(email.to_string(), linkedin_url.to_string(), Utc::now());
    let location = state.submissions.put(&submission).await?;

    info!(
        submission_id = %submission.submission_id,
        email = %submission.email,
        linkedin_url = %submission.linkedin_url,
        location = %location,
        "New Emmy submission"
    );

    Ok(Json(SubmitResponse {
        success: true,
        message: RECEIVED_MESSAGE.to_string(),
        submission_id: submission.submission_id,
    }))
}

/// GET /api/emmy/submissions?email=&submissionId=
///
/// `email` takes precedence over `submissionId`. With neither, returns everything.
pub async fn handle_list_submissions(
    State(state): State<AppState>,
    Query(params): Query<SubmissionsQuery>,
) -> Result<Json<SubmissionsResponse>, AppError> {
    let all = state.submissions.list().await?;

    if all.is_empty() {
        return Err(AppError::NotFound("No submissions found".to_string()));
    }

    if let Some(email) = params.email.as_deref().filter(|e| !e.is_empty()) {
        let email_lower = email.to_lowercase();
        let matching: Vec<Submission> = all
            .into_iter()
            .filter(|s| s.email.to_lowercase() == email_lower)
            .collect();

        if matching.is_empty() {
            return Err(AppError::NotFound(format!(
                "No submissions found for email: {email}"
            )));
        }
        return Ok(Json(SubmissionsResponse::many(matching)));
    }

    if let Some(id) = params.submission_id.as_deref().filter(|id| !id.is_empty()) {
        let submission = all
            .into_iter()
            .find(|s| s.submission_id == id)
            .ok_or_else(|| AppError::NotFound(format!("Submission not found: {id}")))?;
        return Ok(Json(SubmissionsResponse::one(submission)));
    }

    Ok(Json(SubmissionsResponse::many(all)))
}
