// Conversation: completion gate + one-shot preference extraction.
// All LLM calls go through llm_client::ChatModel.

pub mod extraction;
pub mod gate;
pub mod handlers;
pub mod prompts;
