#[cfg(test)]
#[path = "handlers_test.rs"]
mod tests;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Extension, Path, State};
use axum::http::StatusCode;
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::config;
use crate::models::{Conversation, Message, Subject};
use crate::server::AppState;
use crate::server::error::ApiError;
use crate::server::guard::AuthUser;
use crate::tutor::{InquiryRequest, SocraticReply};

#[derive(Debug, Serialize)]
pub struct SubjectPayload {
    id: String,
    name: String,
    description: String,
}

#[derive(Debug, Serialize)]
pub struct MessagePayload {
    id: String,
    role: String,
    content: String,
    timestamp: String,
}

#[derive(Debug, Serialize)]
pub struct ConversationPayload {
    id: String,
    subject_id: String,
    title: String,
    created_at: String,
    messages: Vec<MessagePayload>,
}

#[derive(Debug, Deserialize)]
pub struct CreateConversationRequest {
    subject_id: String,
}

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    message: String,
}

impl From<&Subject> for SubjectPayload {
    fn from(subject: &Subject) -> Self {
        Self {
            id: subject.id().to_string(),
            name: subject.name().to_string(),
            description: subject.description().to_string(),
        }
    }
}

impl From<&Message> for MessagePayload {
    fn from(message: &Message) -> Self {
        Self {
            id: message.id().to_string(),
            role: message.role().to_string(),
            content: message.content().to_string(),
            timestamp: message.created_at().to_rfc3339(),
        }
    }
}

impl From<&Conversation> for ConversationPayload {
    fn from(conversation: &Conversation) -> Self {
        Self {
            id: conversation.id().to_string(),
            subject_id: conversation.subject_id().to_string(),
            title: conversation.title().to_string(),
            created_at: conversation.created_at().to_rfc3339(),
            messages: conversation.messages().iter().map(Into::into).collect(),
        }
    }
}

pub async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": config::version() }))
}

pub async fn list_subjects(
    State(state): State<AppState>,
) -> Result<Json<Vec<SubjectPayload>>, ApiError> {
    let subjects = state.storage.list_subjects().await?;
    Ok(Json(subjects.iter().map(Into::into).collect()))
}

pub async fn list_conversations(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Vec<ConversationPayload>>, ApiError> {
    let conversations = state.storage.get_conversations(&user).await?;
    Ok(Json(conversations.iter().map(Into::into).collect()))
}

pub async fn create_conversation(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    payload: Result<Json<CreateConversationRequest>, JsonRejection>,
) -> Result<Json<ConversationPayload>, ApiError> {
    let Json(payload) = payload?;

    let subject = state
        .storage
        .get_subject(&payload.subject_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Subject not found"))?;

    let conversation = Conversation::new(&user, subject.id());
    state.storage.create_conversation(&conversation).await?;
    Ok(Json((&conversation).into()))
}

pub async fn get_conversation(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<Json<ConversationPayload>, ApiError> {
    let conversation = state
        .storage
        .get_conversation(&user, &id)
        .await?
        .ok_or_else(|| ApiError::not_found("Conversation not found"))?;
    Ok(Json((&conversation).into()))
}

pub async fn delete_conversation(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.storage.delete_conversation(&user, &id).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ApiError::not_found("Conversation not found"))
    }
}

pub async fn chat(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<String>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ConversationPayload>, ApiError> {
    let Json(payload) = payload?;
    let conversation = state.tutor.chat(&user, &id, &payload.message).await?;
    Ok(Json((&conversation).into()))
}

pub async fn socratic_response(
    State(state): State<AppState>,
    payload: Result<Json<InquiryRequest>, JsonRejection>,
) -> Result<Json<SocraticReply>, ApiError> {
    let Json(payload) = payload?;
    if payload.message.trim().is_empty() {
        return Err(ApiError::bad_request("No message provided"));
    }
    Ok(Json(state.tutor.socratic(&payload).await))
}
