#[cfg(test)]
#[path = "nvidia_test.rs"]
mod tests;

use crate::backend::Backend;
use crate::config::constants::{NVIDIA_API_KEY_ENV, NVIDIA_ENDPOINT, NVIDIA_MODEL};
use crate::config::user_agent;
use crate::models::{BackendConnection, ChatMessage};
use async_trait::async_trait;
use eyre::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{fmt::Display, time};
use thiserror::Error;

/// Socratic backend, served by the NVIDIA Integrate API (OpenAI
/// compatible wire format). Low temperature keeps the guided-inquiry
/// questions focused.
pub struct Nvidia {
    alias: String,
    endpoint: String,
    api_key: Option<String>,
    api_key_env: String,
    model: String,
    timeout: Option<time::Duration>,
}

const TEMPERATURE: f32 = 0.2;
const TOP_P: f32 = 0.7;
const MAX_TOKENS: usize = 1024;

#[async_trait]
impl Backend for Nvidia {
    fn name(&self) -> &str {
        &self.alias
    }

    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(&self, messages: &[ChatMessage]) -> Result<String> {
        let completion_req = CompletionRequest {
            model: self.model.clone(),
            messages: messages.to_vec(),
            temperature: TEMPERATURE,
            top_p: TOP_P,
            max_tokens: MAX_TOKENS,
            stream: false,
        };

        let mut req = reqwest::Client::new()
            .post(format!("{}/v1/chat/completions", self.endpoint))
            .header("Content-Type", "application/json")
            .header("User-Agent", user_agent());

        if let Some(timeout) = self.timeout {
            req = req.timeout(timeout);
        }

        if let Some(token) = self.api_key() {
            req = req.bearer_auth(token);
        }

        log::trace!("Sending completion request: {:?}", completion_req);

        let res = req
            .json(&completion_req)
            .send()
            .await
            .wrap_err("sending completion request")?;

        if !res.status().is_success() {
            let http_code = res.status().as_u16();
            let resp = res.text().await.wrap_err("reading error response")?;
            log::error!("Error response: {}", resp);
            // The Integrate API is not consistent about its error body
            // shape, fall back to the raw text.
            return match serde_json::from_str::<ErrorResponse>(&resp) {
                Ok(err) => {
                    let mut err = err.error;
                    err.http_code = http_code;
                    Err(err.into())
                }
                Err(_) => bail!("NVIDIA error ({}): {}", http_code, resp),
            };
        }

        let res = res
            .json::<CompletionResponse>()
            .await
            .wrap_err("parsing completion response")?;

        let content = res
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content);

        match content {
            Some(text) if !text.is_empty() => Ok(text),
            _ => bail!("empty completion response"),
        }
    }
}

impl From<&BackendConnection> for Nvidia {
    fn from(value: &BackendConnection) -> Self {
        let mut nvidia = Nvidia::default();

        if !value.endpoint().is_empty() {
            nvidia.endpoint = value.endpoint().to_string();
        }

        if let Some(api_key) = value.api_key() {
            nvidia.api_key = Some(api_key.to_string());
        }

        if let Some(api_key_env) = value.api_key_env() {
            nvidia.api_key_env = api_key_env.to_string();
        }

        if let Some(model) = value.model() {
            nvidia.model = model.to_string();
        }

        if let Some(timeout) = value.timeout_secs() {
            nvidia.timeout = Some(time::Duration::from_secs(timeout));
        }

        if let Some(alias) = value.alias() {
            nvidia.alias = alias.to_string();
        }

        nvidia
    }
}

impl Nvidia {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_endpoint(mut self, endpoint: &str) -> Self {
        self.endpoint = endpoint.to_string();
        self
    }

    pub fn with_api_key(mut self, api_key: &str) -> Self {
        self.api_key = Some(api_key.to_string());
        self
    }

    pub fn with_model(mut self, model: &str) -> Self {
        self.model = model.to_string();
        self
    }

    pub fn with_timeout(mut self, timeout: time::Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    fn api_key(&self) -> Option<String> {
        self.api_key
            .clone()
            .or_else(|| std::env::var(&self.api_key_env).ok())
    }
}

impl Default for Nvidia {
    fn default() -> Self {
        Self {
            alias: "nvidia".to_string(),
            endpoint: NVIDIA_ENDPOINT.to_string(),
            api_key: None,
            api_key_env: NVIDIA_API_KEY_ENV.to_string(),
            model: NVIDIA_MODEL.to_string(),
            timeout: None,
        }
    }
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
    top_p: f32,
    max_tokens: usize,
    stream: bool,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoiceResponse>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionChoiceResponse {
    message: CompletionMessageResponse,
    finish_reason: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct CompletionMessageResponse {
    content: Option<String>,
}

#[derive(Default, Debug, Serialize, Deserialize)]
struct ErrorResponse {
    error: NvidiaError,
}

#[derive(Default, Error, Debug, Serialize, Deserialize)]
pub struct NvidiaError {
    #[serde(skip)]
    pub http_code: u16,
    pub message: String,
    #[serde(rename = "type")]
    pub err_type: Option<String>,
    pub code: Option<String>,
}

impl Display for NvidiaError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "NVIDIA error ({}): {}", self.http_code, self.message)
    }
}
