//! Preference extraction — one schema-constrained model call that turns a finished
//! transcript into a `PreferenceProfile`.
//!
//! Failure here never propagates: a broken call or unparseable reply yields `None`.

use tracing::{debug, warn};

use crate::conversation::prompts::EXTRACTION_PROMPT_TEMPLATE;
use crate::llm_client::{extract_json_object, ChatMessage, ChatModel, ChatRequest, ChatRole};
use crate::models::conversation::{ConversationTurn, Speaker};
use crate::models::preferences::PreferenceProfile;

const EXTRACTION_TEMPERATURE: f32 = 0.3;
const EXTRACTION_MAX_TOKENS: u32 = 1000;

/// Runs the extraction call over `history` plus the latest candidate utterance.
pub async fn extract_preferences(
    model: &dyn ChatModel,
    history: &[ConversationTurn],
    latest_utterance: &str,
) -> Option<PreferenceProfile> {
    let prompt = EXTRACTION_PROMPT_TEMPLATE.replace("{transcript}", &transcript(history, latest_utterance));
    let request = ChatRequest {
        messages: vec![ChatMessage::new(ChatRole::User, prompt)],
        temperature: EXTRACTION_TEMPERATURE,
        max_tokens: EXTRACTION_MAX_TOKENS,
    };

    let reply = match model.complete(request).await {
        Ok(reply) => reply,
        Err(e) => {
            warn!("Preference extraction call failed: {e}");
            return None;
        }
    };

    let profile = parse_profile(&reply);
    if profile.is_none() {
        warn!("Preference extraction returned unparseable content");
        debug!("Unparseable extraction reply: {reply}");
    }
    profile
}

/// One "speaker: text" line per turn, the latest utterance last.
pub fn transcript(history: &[ConversationTurn], latest_utterance: &str) -> String {
    history
        .iter()
        .map(|turn| format!("{}: {}", turn.from.label(), turn.text))
        .chain(std::iter::once(format!(
            "{}: {}",
            Speaker::Candidate.label(),
            latest_utterance
        )))
        .collect::<Vec<_>>()
        .join("\n")
}

fn parse_profile(reply: &str) -> Option<PreferenceProfile> {
    let json = extract_json_object(reply)?;
    serde_json::from_str(json).ok()
}
