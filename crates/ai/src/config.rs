use std::time::Duration;

/// Default Gemini model.
pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";

/// Default Gemini REST base URL.
pub const DEFAULT_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default per-call timeout in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Language model client configuration.
#[derive(Debug, Clone)]
pub struct AiConfig {
    /// `None` leaves the client unconfigured; every call fails with
    /// `AiError::NotConfigured` and the rest of the service keeps working.
    pub api_key: Option<String>,
    pub model: String,
    pub api_url: String,
    pub timeout: Duration,
}

impl AiConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env var                   | Default                                              |
    /// |---------------------------|------------------------------------------------------|
    /// | `GEMINI_API_KEY`          | unset                                                |
    /// | `GEMINI_MODEL`            | `gemini-1.5-flash`                                   |
    /// | `GEMINI_API_URL`          | `https://generativelanguage.googleapis.com/v1beta`  |
    /// | `AI_REQUEST_TIMEOUT_SECS` | `60`                                                 |
    pub fn from_env() -> Self {
        let api_key = std::env::var("GEMINI_API_KEY")
            .ok()
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        let model = std::env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());
        let api_url = std::env::var("GEMINI_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = std::env::var("AI_REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("AI_REQUEST_TIMEOUT_SECS must be a valid u64");

        Self {
            api_key,
            model,
            api_url,
            timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Whether an API key is present.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_MODEL.into(),
            api_url: DEFAULT_API_URL.into(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}
