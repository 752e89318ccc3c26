use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Speaker {
    #[serde(rename = "emmy", alias = "assistant")]
    Assistant,
    #[serde(rename = "user", alias = "candidate")]
    Candidate,
}

impl Speaker {
    /// Label used when a transcript is flattened into a prompt.
    pub fn label(self) -> &'static str {
        match self {
            Speaker::Assistant => "emmy",
            Speaker::Candidate => "user",
        }
    }
}

/// One entry of the append-only dialogue history held by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub from: Speaker,
    pub text: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

impl ConversationTurn {
    pub fn new(from: Speaker, text: impl Into<String>) -> Self {
        Self {
            from,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}
