use std::time::Duration;

/// Unified enum to wrap different provider configurations
#[derive(Debug, Clone)]
pub enum ProviderConfig {
    OpenAi(OpenAiProviderConfig),
    Gemini(GeminiProviderConfig),
    Offline,
}

/// How hard to try before giving up on a request.
#[derive(Debug, Clone, PartialEq)]
pub struct RequestPolicy {
    /// Per-request timeout applied to the HTTP client
    pub timeout: Duration,
    /// Extra attempts after the first one, only for transient failures
    pub max_retries: u32,
    /// Delay before the first retry; doubles on each subsequent one
    pub initial_backoff: Duration,
}

impl Default for RequestPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            max_retries: 3,
            initial_backoff: Duration::from_millis(500),
        }
    }
}

#[derive(Debug, Clone)]
pub struct OpenAiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub policy: RequestPolicy,
}

#[derive(Debug, Clone)]
pub struct GeminiProviderConfig {
    pub host: String,
    pub api_key: String,
    pub model: String,
    pub temperature: Option<f32>,
    pub max_tokens: Option<i32>,
    pub policy: RequestPolicy,
}
