use serde::{Deserialize, Serialize};

use crate::models::BackendConnection;

use super::defaults::*;

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct Configuration {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub log: LogConfig,

    #[serde(default)]
    pub backend: BackendConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct ServerConfig {
    /// Address the HTTP server binds to.
    #[serde(default = "listen_addr")]
    pub listen: String,

    /// Shared token checked by the request guard. When unset, the guard
    /// lets every request through (local development).
    #[serde(default)]
    pub auth_token: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct LogConfig {
    #[serde(default = "log_level")]
    pub level: Option<String>,

    #[serde(default)]
    pub filters: Option<Vec<LogFilter>>,

    #[serde(default)]
    pub file: Option<LogFile>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LogFilter {
    pub module: String,

    #[serde(default)]
    pub level: Option<String>,
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct LogFile {
    pub path: String,

    #[serde(default)]
    pub append: bool,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct BackendConfig {
    /// Default request timeout applied to connections that don't set
    /// their own.
    #[serde(default)]
    pub timeout_secs: Option<u64>,

    /// Alias of the connection serving the persisted-conversation chat
    /// endpoint.
    #[serde(default = "chat_backend")]
    pub chat_backend: String,

    /// Alias of the connection serving the stateless socratic endpoint.
    #[serde(default = "socratic_backend")]
    pub socratic_backend: String,

    #[serde(default = "connections")]
    pub connections: Vec<BackendConnection>,
}

#[derive(Deserialize, Serialize, Debug, Clone)]
pub enum StorageConfig {
    #[serde(rename = "sqlite")]
    Sqlite(SqliteStorage),
}

#[derive(Deserialize, Serialize, Debug, Clone, Default)]
pub struct SqliteStorage {
    /// Database file path. `None` opens an in-memory database.
    pub path: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen: listen_addr(),
            auth_token: None,
        }
    }
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: log_level(),
            filters: None,
            file: None,
        }
    }
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            timeout_secs: None,
            chat_backend: chat_backend(),
            socratic_backend: socratic_backend(),
            connections: connections(),
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        StorageConfig::Sqlite(SqliteStorage::default())
    }
}
