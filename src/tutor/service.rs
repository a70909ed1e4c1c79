#[cfg(test)]
#[path = "service_test.rs"]
mod tests;

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use crate::backend::{ArcBackend, Manager};
use crate::config::BackendConfig;
use crate::config::constants::{
    FALLBACK_CONFIDENCE, GENERIC_SYSTEM_PROMPT, MODEL_CONFIDENCE, QUESTION_TYPE,
};
use crate::models::{Conversation, Message};
use crate::storage::ArcStorage;
use crate::tutor::context::{HistoryEntry, build_conversation_context, build_inquiry_context};
use crate::tutor::fallback::fallback_question;
use crate::tutor::title::derive_title;

#[derive(Error, Debug)]
pub enum TutorError {
    #[error("{0}")]
    InvalidInput(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Backend(eyre::Report),
    #[error("{0}")]
    Storage(eyre::Report),
}

#[derive(Debug, Clone, Deserialize)]
pub struct InquiryRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub conversation_history: Vec<HistoryEntry>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SocraticReply {
    pub response: String,
    pub confidence: f64,
    pub metadata: ReplyMetadata,
}

#[derive(Debug, Clone, Serialize)]
pub struct ReplyMetadata {
    pub subject: Option<String>,
    #[serde(rename = "questionType")]
    pub question_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub fallback: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Drives the two tutoring flows: the persisted conversation exchange
/// and the stateless inquiry.
pub struct TutorService {
    storage: ArcStorage,
    chat_backend: ArcBackend,
    socratic_backend: ArcBackend,
}

impl TutorService {
    pub fn new(storage: ArcStorage, chat_backend: ArcBackend, socratic_backend: ArcBackend) -> Self {
        Self {
            storage,
            chat_backend,
            socratic_backend,
        }
    }

    pub fn from_manager(
        storage: ArcStorage,
        manager: &Manager,
        config: &BackendConfig,
    ) -> eyre::Result<Arc<Self>> {
        let chat_backend = manager
            .get_connection(&config.chat_backend)
            .ok_or_else(|| eyre::eyre!("chat backend {} is not configured", config.chat_backend))?;
        let socratic_backend = manager.get_connection(&config.socratic_backend).ok_or_else(
            || eyre::eyre!("socratic backend {} is not configured", config.socratic_backend),
        )?;
        Ok(Arc::new(Self::new(storage, chat_backend, socratic_backend)))
    }

    /// One persisted exchange. The user message is stored before the
    /// model call so it survives a backend failure; the assistant reply
    /// is stored only on success.
    pub async fn chat(
        &self,
        user_id: &str,
        conversation_id: &str,
        message: &str,
    ) -> Result<Conversation, TutorError> {
        if message.trim().is_empty() {
            return Err(TutorError::InvalidInput("No message provided".to_string()));
        }

        let conversation = self
            .storage
            .get_conversation(user_id, conversation_id)
            .await
            .map_err(TutorError::Storage)?
            .ok_or_else(|| TutorError::NotFound("Conversation not found".to_string()))?;

        let subject = self
            .storage
            .get_subject(conversation.subject_id())
            .await
            .map_err(TutorError::Storage)?
            .ok_or_else(|| TutorError::NotFound("Subject not found".to_string()))?;

        self.storage
            .append_message(conversation.id(), &Message::new_user(message))
            .await
            .map_err(TutorError::Storage)?;

        if conversation.has_placeholder_title() {
            self.storage
                .set_title(conversation.id(), &derive_title(message))
                .await
                .map_err(TutorError::Storage)?;
        }

        // Re-read so the context reflects exactly what was persisted,
        // the stored history already ends with the new user message.
        let conversation = self
            .storage
            .get_conversation(user_id, conversation_id)
            .await
            .map_err(TutorError::Storage)?
            .ok_or_else(|| TutorError::NotFound("Conversation not found".to_string()))?;

        let context = build_conversation_context(subject.system_prompt(), conversation.messages());
        let reply = self
            .chat_backend
            .generate(&context)
            .await
            .map_err(TutorError::Backend)?;

        self.storage
            .append_message(conversation.id(), &Message::new_assistant(reply))
            .await
            .map_err(TutorError::Storage)?;

        self.storage
            .get_conversation(user_id, conversation_id)
            .await
            .map_err(TutorError::Storage)?
            .ok_or_else(|| TutorError::NotFound("Conversation not found".to_string()))
    }

    /// Stateless inquiry. This path never fails: any error past input
    /// validation degrades to a canned question with lower confidence.
    pub async fn socratic(&self, request: &InquiryRequest) -> SocraticReply {
        let subject_name = request.subject.as_deref().unwrap_or_default();

        // A blank subject must not LIKE-match the whole catalog.
        let system_prompt = if subject_name.trim().is_empty() {
            GENERIC_SYSTEM_PROMPT.to_string()
        } else {
            match self.storage.find_subject_by_name(subject_name).await {
                Ok(Some(subject)) => subject.system_prompt().to_string(),
                Ok(None) => GENERIC_SYSTEM_PROMPT.to_string(),
                Err(err) => {
                    log::warn!("Subject lookup failed: {:#}", err);
                    GENERIC_SYSTEM_PROMPT.to_string()
                }
            }
        };

        let context =
            build_inquiry_context(&system_prompt, &request.conversation_history, &request.message);

        match self.socratic_backend.generate(&context).await {
            Ok(response) => SocraticReply {
                response,
                confidence: MODEL_CONFIDENCE,
                metadata: ReplyMetadata {
                    subject: request.subject.clone(),
                    question_type: QUESTION_TYPE,
                    model: Some(self.socratic_backend.model().to_string()),
                    fallback: false,
                    error: None,
                },
            },
            Err(err) => {
                log::warn!("Socratic backend failed, serving fallback: {:#}", err);
                SocraticReply {
                    response: fallback_question(subject_name).to_string(),
                    confidence: FALLBACK_CONFIDENCE,
                    metadata: ReplyMetadata {
                        subject: request.subject.clone(),
                        question_type: QUESTION_TYPE,
                        model: None,
                        fallback: true,
                        error: Some("API unavailable".to_string()),
                    },
                }
            }
        }
    }
}
