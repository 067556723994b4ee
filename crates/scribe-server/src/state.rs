//! Shared request state

use scribe_gemini::{GeminiClient, GeminiConfig};

/// State handed to every handler. Cheap to clone; the client shares its
/// connection pool and configuration internally.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Gemini adapter
    pub client: GeminiClient,
}

impl AppState {
    /// Create state over a built client.
    #[inline]
    #[must_use]
    pub fn new(client: GeminiClient) -> Self {
        Self { client }
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        self.client.config()
    }
}
