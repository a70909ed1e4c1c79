pub mod manager;
pub mod nvidia;
pub mod openai;

pub use manager::Manager;
pub use nvidia::Nvidia;
pub use openai::OpenAI;

#[cfg(test)]
use mockall::{automock, predicate::*};

use crate::config::BackendConfig;
use crate::models::{BackendKind, ChatMessage};
use async_trait::async_trait;
use eyre::{Context, Result};
use std::sync::Arc;

/// A chat-completion provider. `generate` performs exactly one request;
/// a failed call is surfaced immediately and never retried.
#[async_trait]
#[cfg_attr(test, automock)]
pub trait Backend {
    fn name(&self) -> &str;
    fn model(&self) -> &str;
    async fn generate(&self, messages: &[ChatMessage]) -> Result<String>;
}

pub type ArcBackend = Arc<dyn Backend + Send + Sync>;

pub fn new_manager(config: &BackendConfig) -> Result<Manager> {
    let mut manager = Manager::default();
    for connection in config.connections.iter().filter(|c| c.enabled()) {
        let mut connection = connection.clone();
        if connection.timeout_secs().is_none() {
            if let Some(timeout) = config.timeout_secs {
                connection = connection.with_timeout_secs(timeout);
            }
        }

        let backend: ArcBackend = match connection.kind() {
            BackendKind::OpenAI => Arc::new(OpenAI::from(&connection)),
            BackendKind::Nvidia => Arc::new(Nvidia::from(&connection)),
        };

        let name = backend.name().to_string();
        manager
            .add_connection(backend)
            .wrap_err(format!("adding backend connection {}", name))?;
        log::debug!("Added backend connection: {}", name);
    }

    if manager.is_empty() {
        eyre::bail!("No backend connections configured");
    }
    Ok(manager)
}
