#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use crate::config::constants::NEW_CONVERSATION_TITLE;
use crate::models::Message;

#[derive(Debug, Clone)]
pub struct Conversation {
    id: String,
    user_id: String,
    subject_id: String,
    title: String,
    messages: Vec<Message>,
    created_at: chrono::DateTime<chrono::Utc>,
}

impl Conversation {
    pub fn new(user_id: impl Into<String>, subject_id: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            subject_id: subject_id.into(),
            ..Self::default()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_created_at(mut self, timestamp: chrono::DateTime<chrono::Utc>) -> Self {
        self.created_at = timestamp;
        self
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self.messages
            .sort_by(|a, b| a.created_at().cmp(&b.created_at()));
        self
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    /// Title still equals the placeholder, i.e. no user message has
    /// rewritten it yet.
    pub fn has_placeholder_title(&self) -> bool {
        self.title == NEW_CONVERSATION_TITLE
    }

    pub fn append_message(&mut self, message: Message) {
        self.messages.push(message);
        self.messages
            .sort_by(|a, b| a.created_at().cmp(&b.created_at()));
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn subject_id(&self) -> &str {
        &self.subject_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn created_at(&self) -> chrono::DateTime<chrono::Utc> {
        self.created_at
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last_message(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

impl Default for Conversation {
    fn default() -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            user_id: String::new(),
            subject_id: String::new(),
            title: NEW_CONVERSATION_TITLE.to_string(),
            messages: vec![],
            created_at: chrono::Utc::now(),
        }
    }
}
