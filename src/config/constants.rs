/// Placeholder title assigned to a conversation until the first user
/// message rewrites it.
pub const NEW_CONVERSATION_TITLE: &str = "New Conversation";

/// Max title length (in characters) derived from the first message.
pub const TITLE_MAX_CHARS: usize = 50;

pub const TITLE_ELLIPSIS: &str = "...";

/// Number of trailing history entries forwarded on the stateless
/// inquiry path.
pub const HISTORY_WINDOW: usize = 5;

pub const LISTEN_ADDR: &str = "127.0.0.1:8000";

pub const OPENAI_ENDPOINT: &str = "https://api.openai.com";
pub const OPENAI_MODEL: &str = "gpt-3.5-turbo";
pub const OPENAI_API_KEY_ENV: &str = "OPENAI_API_KEY";

pub const NVIDIA_ENDPOINT: &str = "https://integrate.api.nvidia.com";
pub const NVIDIA_MODEL: &str = "meta/llama-3.1-405b-instruct";
pub const NVIDIA_API_KEY_ENV: &str = "NVIDIA_API_KEY";

/// System prompt used when the requested subject has no catalog entry.
pub const GENERIC_SYSTEM_PROMPT: &str =
    "You are a Socratic tutor. Guide students through questions, never give direct answers.";

pub const MODEL_CONFIDENCE: f64 = 0.95;
pub const FALLBACK_CONFIDENCE: f64 = 0.5;

pub const QUESTION_TYPE: &str = "guided_inquiry";
