/// Errors from the language model adapter.
#[derive(Debug, thiserror::Error)]
pub enum AiError {
    /// No API key is configured.
    #[error("AI service is not configured: {0}")]
    NotConfigured(String),

    /// The article was rejected before any call was made.
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("AI request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The API returned a non-2xx status code.
    #[error("AI API error ({status}): {body}")]
    Api { status: u16, body: String },

    /// The API answered but produced no text.
    #[error("AI returned an empty response: {0}")]
    EmptyResponse(String),

    /// The response body did not have the expected shape.
    #[error("Failed to decode AI response: {0}")]
    Decode(String),
}
