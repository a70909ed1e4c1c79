#[cfg(test)]
#[path = "sqlite_test.rs"]
mod tests;

use async_trait::async_trait;
use eyre::{Context, Result};
use std::str::FromStr;
use tokio_rusqlite::{Connection, OpenFlags, named_params, params};

use crate::models::{Conversation, Message, Role, Subject};
use crate::storage::{ConversationRepository, SubjectCatalog};

use super::migration::MIGRATION;

pub struct Sqlite {
    conn: Connection,
}

impl Sqlite {
    pub async fn new(path: Option<&str>) -> Result<Self> {
        let conn = match path {
            Some(path) => Connection::open_with_flags(
                path,
                OpenFlags::SQLITE_OPEN_READ_WRITE | OpenFlags::SQLITE_OPEN_CREATE,
            )
            .await
            .wrap_err(format!("opening database path: {}", path))?,
            None => Connection::open_in_memory()
                .await
                .wrap_err("opening in-memory database")?,
        };

        let ret = Self { conn };
        ret.run_migration().await.wrap_err("running migration")?;
        Ok(ret)
    }

    async fn run_migration(&self) -> Result<()> {
        self.conn
            .call(|conn| Ok(conn.execute_batch(MIGRATION)?))
            .await
            .wrap_err("executing migration")?;
        Ok(())
    }

    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>> {
        let conversation_id = conversation_id.to_string();
        let messages = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, role, content, created_at FROM messages
                     WHERE conversation_id = ? ORDER BY created_at ASC, rowid ASC",
                )?;

                let mut rows = stmt.query(params![conversation_id])?;
                let mut messages = vec![];
                while let Some(row) = rows.next()? {
                    let id: String = row.get(0)?;
                    let role: String = row.get(1)?;
                    let content: String = row.get(2)?;
                    let created_at: i64 = row.get(3)?;

                    let role = Role::from_str(&role)
                        .map_err(|err| tokio_rusqlite::Error::Other(err.into()))?;
                    let created_at = chrono::DateTime::from_timestamp_millis(created_at).ok_or(
                        tokio_rusqlite::Error::Other(eyre::eyre!("invalid timestamp").into()),
                    )?;

                    messages.push(
                        Message::new(role, content)
                            .with_id(id)
                            .with_created_at(created_at),
                    );
                }
                Ok(messages)
            })
            .await?;
        Ok(messages)
    }
}

#[async_trait]
impl ConversationRepository for Sqlite {
    async fn get_conversation(&self, user_id: &str, id: &str) -> Result<Option<Conversation>> {
        let user_id = user_id.to_string();
        let id = id.to_string();
        let conversation = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, user_id, subject_id, title, created_at FROM conversations
                     WHERE id = :id AND user_id = :user_id",
                )?;
                let mut rows = stmt.query(named_params! { ":id": id, ":user_id": user_id })?;
                match rows.next()? {
                    Some(row) => Ok(Some(conversation_from_row(row)?)),
                    None => Ok(None),
                }
            })
            .await?;

        let conversation = match conversation {
            Some(conversation) => conversation,
            None => return Ok(None),
        };
        let messages = self.get_messages(conversation.id()).await?;
        Ok(Some(conversation.with_messages(messages)))
    }

    async fn get_conversations(&self, user_id: &str) -> Result<Vec<Conversation>> {
        let user_id = user_id.to_string();
        let mut conversations = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, user_id, subject_id, title, created_at FROM conversations
                     WHERE user_id = ? ORDER BY created_at DESC",
                )?;
                let mut rows = stmt.query(params![user_id])?;
                let mut conversations = vec![];
                while let Some(row) = rows.next()? {
                    conversations.push(conversation_from_row(row)?);
                }
                Ok(conversations)
            })
            .await?;

        for conversation in &mut conversations {
            let messages = self.get_messages(conversation.id()).await?;
            *conversation = conversation.clone().with_messages(messages);
        }

        Ok(conversations)
    }

    async fn create_conversation(&self, conversation: &Conversation) -> Result<()> {
        let conversation = conversation.clone();
        self.conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                tx.execute(
                    r#"INSERT INTO conversations (id, user_id, subject_id, title, created_at)
                VALUES (:id, :user_id, :subject_id, :title, :created_at)"#,
                    named_params! {
                        ":id": conversation.id(),
                        ":user_id": conversation.user_id(),
                        ":subject_id": conversation.subject_id(),
                        ":title": conversation.title(),
                        ":created_at": conversation.created_at().timestamp_millis(),
                    },
                )?;
                tx.commit()?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn append_message(&self, conversation_id: &str, message: &Message) -> Result<()> {
        let conversation_id = conversation_id.to_string();
        let id = message.id().to_string();
        let role = message.role().as_str();
        let content = message.content().to_string();
        let created_at = message.created_at().timestamp_millis();
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO messages (id, conversation_id, role, content, created_at)
                VALUES (:id, :conversation_id, :role, :content, :created_at)"#,
                    named_params! {
                        ":id": id,
                        ":conversation_id": conversation_id,
                        ":role": role,
                        ":content": content,
                        ":created_at": created_at,
                    },
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn set_title(&self, conversation_id: &str, title: &str) -> Result<()> {
        let conversation_id = conversation_id.to_string();
        let title = title.to_string();
        self.conn
            .call(move |conn| {
                conn.execute(
                    "UPDATE conversations SET title = :title WHERE id = :id",
                    named_params! { ":title": title, ":id": conversation_id },
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }

    async fn delete_conversation(&self, user_id: &str, id: &str) -> Result<bool> {
        let user_id = user_id.to_string();
        let id = id.to_string();
        let affected_rows = self
            .conn
            .call(move |conn| {
                let tx = conn.transaction()?;
                let affected = tx.execute(
                    "DELETE FROM conversations WHERE id = :id AND user_id = :user_id",
                    named_params! { ":id": id, ":user_id": user_id },
                )?;
                tx.commit()?;
                Ok(affected)
            })
            .await?;
        Ok(affected_rows > 0)
    }
}

#[async_trait]
impl SubjectCatalog for Sqlite {
    async fn list_subjects(&self) -> Result<Vec<Subject>> {
        let subjects = self
            .conn
            .call(|conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, system_prompt FROM subjects ORDER BY name ASC",
                )?;
                let mut rows = stmt.query([])?;
                let mut subjects = vec![];
                while let Some(row) = rows.next()? {
                    subjects.push(subject_from_row(row)?);
                }
                Ok(subjects)
            })
            .await?;
        Ok(subjects)
    }

    async fn get_subject(&self, id: &str) -> Result<Option<Subject>> {
        let id = id.to_string();
        let subject = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, system_prompt FROM subjects WHERE id = ?",
                )?;
                let mut rows = stmt.query(params![id])?;
                match rows.next()? {
                    Some(row) => Ok(Some(subject_from_row(row)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(subject)
    }

    async fn find_subject_by_name(&self, name: &str) -> Result<Option<Subject>> {
        // Escape LIKE metacharacters so the lookup stays a plain
        // containment match on the caller's literal input.
        let escaped = name
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_");
        let pattern = format!("%{}%", escaped);
        let subject = self
            .conn
            .call(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, system_prompt FROM subjects
                     WHERE name LIKE ? ESCAPE '\\' ORDER BY name ASC",
                )?;
                let mut rows = stmt.query(params![pattern])?;
                match rows.next()? {
                    Some(row) => Ok(Some(subject_from_row(row)?)),
                    None => Ok(None),
                }
            })
            .await?;
        Ok(subject)
    }

    async fn insert_subject(&self, subject: &Subject) -> Result<()> {
        let subject = subject.clone();
        self.conn
            .call(move |conn| {
                conn.execute(
                    r#"INSERT INTO subjects (id, name, description, system_prompt)
                VALUES (:id, :name, :description, :system_prompt)
                ON CONFLICT(name) DO NOTHING"#,
                    named_params! {
                        ":id": subject.id(),
                        ":name": subject.name(),
                        ":description": subject.description(),
                        ":system_prompt": subject.system_prompt(),
                    },
                )?;
                Ok(())
            })
            .await?;
        Ok(())
    }
}

fn conversation_from_row(row: &tokio_rusqlite::Row<'_>) -> tokio_rusqlite::Result<Conversation> {
    let id: String = row.get(0)?;
    let user_id: String = row.get(1)?;
    let subject_id: String = row.get(2)?;
    let title: String = row.get(3)?;
    let created_at: i64 = row.get(4)?;
    let created_at = chrono::DateTime::from_timestamp_millis(created_at).ok_or(
        tokio_rusqlite::Error::Other(eyre::eyre!("invalid created_at").into()),
    )?;

    Ok(Conversation::new(user_id, subject_id)
        .with_id(id)
        .with_title(title)
        .with_created_at(created_at))
}

fn subject_from_row(row: &tokio_rusqlite::Row<'_>) -> tokio_rusqlite::Result<Subject> {
    let id: String = row.get(0)?;
    let name: String = row.get(1)?;
    let description: String = row.get(2)?;
    let system_prompt: String = row.get(3)?;

    Ok(Subject::new(name)
        .with_id(id)
        .with_description(description)
        .with_system_prompt(system_prompt))
}
