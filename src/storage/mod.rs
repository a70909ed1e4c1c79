pub mod seed;
pub mod sqlite;

use std::sync::Arc;

use async_trait::async_trait;
use eyre::Result;

use crate::config::StorageConfig;
use crate::models::{Conversation, Message, Subject};
use sqlite::Sqlite;

/// Conversation persistence, always scoped to the owning user where a
/// user id is taken.
#[async_trait]
pub trait ConversationRepository {
    async fn get_conversation(&self, user_id: &str, id: &str) -> Result<Option<Conversation>>;
    async fn get_conversations(&self, user_id: &str) -> Result<Vec<Conversation>>;
    async fn create_conversation(&self, conversation: &Conversation) -> Result<()>;
    async fn append_message(&self, conversation_id: &str, message: &Message) -> Result<()>;
    async fn set_title(&self, conversation_id: &str, title: &str) -> Result<()>;
    /// Returns false when no conversation matched. Messages cascade.
    async fn delete_conversation(&self, user_id: &str, id: &str) -> Result<bool>;
}

#[async_trait]
pub trait SubjectCatalog {
    async fn list_subjects(&self) -> Result<Vec<Subject>>;
    async fn get_subject(&self, id: &str) -> Result<Option<Subject>>;
    /// Case-insensitive name containment, mirroring how clients send
    /// `"physics"` for the catalog entry `"Physics"`.
    async fn find_subject_by_name(&self, name: &str) -> Result<Option<Subject>>;
    async fn insert_subject(&self, subject: &Subject) -> Result<()>;
}

pub trait Storage: ConversationRepository + SubjectCatalog + Send + Sync {}

impl<T: ConversationRepository + SubjectCatalog + Send + Sync> Storage for T {}

pub type ArcStorage = Arc<dyn Storage>;

pub async fn new_storage(config: &StorageConfig) -> Result<ArcStorage> {
    let storage = match config {
        StorageConfig::Sqlite(sqlite_config) => {
            Arc::new(Sqlite::new(sqlite_config.path.as_deref()).await?)
        }
    };
    Ok(storage)
}
