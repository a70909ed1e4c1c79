#[cfg(test)]
#[path = "context_test.rs"]
mod tests;

use serde::Deserialize;

use crate::config::constants::HISTORY_WINDOW;
use crate::models::{ChatMessage, Message};

/// A history entry as supplied by a stateless client. Either field may
/// be missing, malformed entries are dropped instead of rejected.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HistoryEntry {
    pub role: Option<String>,
    pub content: Option<String>,
}

/// Builds the message list for a persisted conversation. The stored
/// history already ends with the just-appended user message, so nothing
/// is added beyond the system prompt.
pub fn build_conversation_context(system_prompt: &str, history: &[Message]) -> Vec<ChatMessage> {
    let mut context = Vec::with_capacity(history.len() + 1);
    context.push(ChatMessage::system(system_prompt));
    context.extend(history.iter().map(ChatMessage::from));
    context
}

/// Builds the message list for the stateless inquiry path: the trailing
/// window of the caller-supplied history, then the new message.
pub fn build_inquiry_context(
    system_prompt: &str,
    history: &[HistoryEntry],
    message: &str,
) -> Vec<ChatMessage> {
    let start = history.len().saturating_sub(HISTORY_WINDOW);
    let mut context = vec![ChatMessage::system(system_prompt)];
    context.extend(history[start..].iter().filter_map(|entry| {
        match (entry.role.as_deref(), entry.content.as_deref()) {
            (Some(role), Some(content)) => Some(ChatMessage::new(role, content)),
            _ => None,
        }
    }));
    context.push(ChatMessage::user(message));
    context
}
