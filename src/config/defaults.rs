use super::constants::*;
use crate::models::{BackendConnection, BackendKind};

pub(crate) fn listen_addr() -> String {
    LISTEN_ADDR.to_string()
}

pub(crate) fn log_level() -> Option<String> {
    Some("info".to_string())
}

pub(crate) fn chat_backend() -> String {
    "openai".to_string()
}

pub(crate) fn socratic_backend() -> String {
    "nvidia".to_string()
}

pub(crate) fn connections() -> Vec<BackendConnection> {
    vec![
        BackendConnection::new(BackendKind::OpenAI, OPENAI_ENDPOINT)
            .with_enabled(true)
            .with_alias("openai")
            .with_model(OPENAI_MODEL)
            .with_api_key_env(OPENAI_API_KEY_ENV),
        BackendConnection::new(BackendKind::Nvidia, NVIDIA_ENDPOINT)
            .with_enabled(true)
            .with_alias("nvidia")
            .with_model(NVIDIA_MODEL)
            .with_api_key_env(NVIDIA_API_KEY_ENV),
    ]
}
