use super::*;
use crate::config::StorageConfig;

#[test]
fn test_basename() {
    assert_eq!(basename("src/cli/config.rs"), "config.rs");
    assert_eq!(basename("config.rs"), "config.rs");
}

#[test]
fn test_resolve_path_expands_env_vars() {
    unsafe { std::env::set_var("SORATIC_TEST_DIR", "/tmp") };
    let resolved = resolve_path("${SORATIC_TEST_DIR}/soratic.db").expect("Failed to resolve path");
    assert_eq!(resolved, "/tmp/soratic.db");

    let resolved = resolve_path("$SORATIC_TEST_DIR/soratic.db").expect("Failed to resolve path");
    assert_eq!(resolved, "/tmp/soratic.db");
}

#[test]
fn test_parse_configuration() {
    let raw = r#"
[server]
listen = "0.0.0.0:9000"
auth_token = "secret"

[log]
level = "debug"

[backend]
timeout_secs = 30
chat_backend = "openai"
socratic_backend = "nvidia"

[[backend.connections]]
enabled = true
kind = "openai"
alias = "openai"
endpoint = "https://api.openai.com"
model = "gpt-3.5-turbo"

[[backend.connections]]
enabled = true
kind = "nvidia"
alias = "nvidia"
endpoint = "https://integrate.api.nvidia.com"
model = "meta/llama-3.1-405b-instruct"

[storage.sqlite]
path = "/tmp/soratic.db"
"#;

    let config: Configuration = toml::from_str(raw).expect("Failed to parse configuration");
    assert_eq!(config.server.listen, "0.0.0.0:9000");
    assert_eq!(config.server.auth_token.as_deref(), Some("secret"));
    assert_eq!(config.log.level.as_deref(), Some("debug"));
    assert_eq!(config.backend.timeout_secs, Some(30));
    assert_eq!(config.backend.connections.len(), 2);
    assert_eq!(
        config.backend.connections[1].model(),
        Some("meta/llama-3.1-405b-instruct")
    );

    let StorageConfig::Sqlite(sqlite) = &config.storage;
    assert_eq!(sqlite.path.as_deref(), Some("/tmp/soratic.db"));
}

#[test]
fn test_default_configuration() {
    let config = Configuration::default();
    assert_eq!(config.server.listen, "127.0.0.1:8000");
    assert!(config.server.auth_token.is_none());
    assert_eq!(config.backend.chat_backend, "openai");
    assert_eq!(config.backend.socratic_backend, "nvidia");
    assert_eq!(config.backend.connections.len(), 2);
}
