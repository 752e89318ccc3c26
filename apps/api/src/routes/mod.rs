pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::conversation::handlers::handle_message;
use crate::ranking::handlers::handle_search;
use crate::state::AppState;
use crate::submissions::handlers::{handle_list_submissions, handle_submit};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Conversation API
        .route("/api/emmy/message", post(handle_message))
        // Search API
        .route("/api/emmy/search", post(handle_search))
        // Submissions API
        .route("/api/emmy/submit", post(handle_submit))
        .route("/api/emmy/submissions", get(handle_list_submissions))
        .with_state(state)
}
