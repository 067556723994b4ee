//! Error types for the Gemini adapter

/// Gemini adapter errors
#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    /// GEMINI_API_KEY absent or empty at startup
    #[error("GEMINI_API_KEY not found - set it in the environment before starting")]
    MissingCredential,

    /// Transport-level failure (connect, timeout, body read)
    #[error("request to the model service failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Non-success HTTP status from the API
    #[error("model service returned HTTP {status}: {message}")]
    Api { status: u16, message: String },

    /// The prompt was blocked by a safety filter
    #[error("prompt blocked by the model service: {0}")]
    Blocked(String),

    /// Success status but no usable candidate text
    #[error("model service returned an empty response")]
    EmptyResponse,
}

impl GeminiError {
    /// Whether the failure came from the upstream service rather than the
    /// caller's input. Used to pick the response status class.
    #[inline]
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        !matches!(self, Self::MissingCredential)
    }
}
