//! Conversation gate — decides turn by turn whether enough has been gathered, and
//! triggers preference extraction exactly once when the conversation completes.
//!
//! The gate holds no state of its own. The caller keeps the history and the
//! `GateState`, passes both in, and stores the state handed back.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::info;

use crate::conversation::extraction::extract_preferences;
use crate::conversation::prompts::{COMPLETION_PHRASE, EMMY_SYSTEM_PROMPT, EMPTY_REPLY_FALLBACK};
use crate::llm_client::{ChatMessage, ChatModel, ChatRequest, ChatRole, LlmError};
use crate::models::conversation::{ConversationTurn, Speaker};
use crate::models::preferences::PreferenceProfile;

const CHAT_TEMPERATURE: f32 = 0.7;
const CHAT_MAX_TOKENS: u32 = 500;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GateState {
    #[default]
    Gathering,
    /// Terminal. Entered once, on the first reply carrying the completion phrase.
    Complete,
}

#[derive(Debug, Error)]
pub enum GateError {
    #[error("{0}")]
    InvalidArgument(String),

    #[error("Conversation is already complete; start a new one")]
    ConversationClosed,

    #[error("Language model unavailable: {0}")]
    UpstreamUnavailable(#[source] LlmError),
}

/// Result of one `advance` call.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnOutcome {
    pub reply: String,
    pub state: GateState,
    /// Present only on the completing turn, and only if extraction succeeded.
    pub extracted: Option<PreferenceProfile>,
}

impl TurnOutcome {
    pub fn is_complete(&self) -> bool {
        self.state == GateState::Complete
    }
}

pub struct ConversationGate<'a> {
    model: &'a dyn ChatModel,
}

impl<'a> ConversationGate<'a> {
    pub fn new(model: &'a dyn ChatModel) -> Self {
        Self { model }
    }

    /// Runs one candidate turn.
    ///
    /// Re-submitting the same `utterance` against the same `history` after an
    /// `UpstreamUnavailable` is safe.
    pub async fn advance(
        &self,
        state: GateState,
        history: &[ConversationTurn],
        utterance: &str,
    ) -> Result<TurnOutcome, GateError> {
        if state == GateState::Complete {
            return Err(GateError::ConversationClosed);
        }

        let utterance = utterance.trim();
        if utterance.is_empty() {
            return Err(GateError::InvalidArgument("Message is required".to_string()));
        }

        let reply = self
            .model
            .complete(chat_request(history, utterance))
            .await
            .map_err(GateError::UpstreamUnavailable)?;

        let reply = if reply.trim().is_empty() {
            EMPTY_REPLY_FALLBACK.to_string()
        } else {
            reply
        };

        if !signals_completion(&reply) {
            return Ok(TurnOutcome {
                reply,
                state: GateState::Gathering,
                extracted: None,
            });
        }

        info!(
            "Conversation complete after {} turns, extracting preferences",
            history.len() + 1
        );
        let extracted = extract_preferences(self.model, history, utterance).await;

        Ok(TurnOutcome {
            reply,
            state: GateState::Complete,
            extracted,
        })
    }
}

/// True iff the reply contains the completion phrase, ignoring case.
pub fn signals_completion(reply: &str) -> bool {
    reply.to_lowercase().contains(COMPLETION_PHRASE)
}

fn chat_request(history: &[ConversationTurn], utterance: &str) -> ChatRequest {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(ChatMessage::new(ChatRole::System, EMMY_SYSTEM_PROMPT));
    messages.extend(history.iter().map(|turn| {
        let role = match turn.from {
            Speaker::Assistant => ChatRole::Assistant,
            Speaker::Candidate => ChatRole::User,
        };
        ChatMessage::new(role, turn.text.clone())
    }));
    messages.push(ChatMessage::new(ChatRole::User, utterance));

    ChatRequest {
        messages,
        temperature: CHAT_TEMPERATURE,
        max_tokens: CHAT_MAX_TOKENS,
    }
}
