//! Axum route handlers for the Conversation API.

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::conversation::gate::{ConversationGate, GateState};
use crate::errors::AppError;
use crate::models::conversation::ConversationTurn;
use crate::models::preferences::PreferenceProfile;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageRequest {
    #[serde(default)]
    pub conversation_history: Vec<ConversationTurn>,
    #[serde(default)]
    pub current_message: String,
    // Accepted for client compatibility; sessions are owned by the caller.
    #[allow(dead_code)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub state: GateState,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageResponse {
    pub reply: String,
    pub is_complete: bool,
    pub state: GateState,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extracted_data: Option<PreferenceProfile>,
}

/// POST /api/emmy/message
///
/// Runs one candidate turn through the gate.
pub async fn handle_message(
    State(state): State<AppState>,
    Json(request): Json<MessageRequest>,
) -> Result<Json<MessageResponse>, AppError> {
    let gate = ConversationGate::new(state.llm.as_ref());
    let outcome = gate
        .advance(
            request.state,
            &request.conversation_history,
            &request.current_message,
        )
        .await?;

    Ok(Json(MessageResponse {
        is_complete: outcome.is_complete(),
        reply: outcome.reply,
        state: outcome.state,
        extracted_data: outcome.extracted,
    }))
}
