//! Error types for the completion capability

use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T> = std::result::Result<T, LlmError>;

/// Everything that can go wrong while talking to a model provider
#[derive(Debug, Error)]
pub enum LlmError {
    /// Transport-level failure (DNS, TLS, connection reset, ...)
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The provider answered with a non-success status
    #[error("provider returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// The provider answered 2xx but the payload was not usable
    #[error("malformed provider response: {0}")]
    MalformedResponse(String),

    /// JSON (de)serialization failure
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// The selected provider requires a key that is not configured
    #[error("missing API key: set {env_var}")]
    MissingApiKey { env_var: String },

    /// Model identifier names a provider this crate does not know
    #[error("unsupported provider `{0}` (expected openai, openrouter or ollama)")]
    UnsupportedProvider(String),

    /// Any other provider failure
    #[error("provider error: {0}")]
    Provider(String),
}

impl LlmError {
    /// Whether the error came from the remote side rather than local setup
    pub fn is_remote(&self) -> bool {
        matches!(
            self,
            LlmError::Http(_) | LlmError::Api { .. } | LlmError::MalformedResponse(_)
        )
    }
}
