//! Gemini configuration
//!
//! Built once at process start and shared read-only by every request
//! handler. A missing credential fails construction - the service must not
//! come up without a working backend.

use crate::error::GeminiError;
use serde::{Deserialize, Serialize};

/// Default model name
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash-preview-09-2025";

/// Default API base URL
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Environment variable holding the API credential
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Environment variable overriding the model name
pub const MODEL_ENV: &str = "SCRIBE_MODEL";

/// Environment variable overriding the API base URL (used by tests)
pub const BASE_URL_ENV: &str = "SCRIBE_GEMINI_BASE_URL";

/// Generation parameters sent with every request
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GenerationParams {
    /// Sampling temperature
    pub temperature: f32,
    /// Nucleus sampling mass
    pub top_p: f32,
    /// Top-k cutoff
    pub top_k: i32,
    /// Output token cap
    pub max_output_tokens: i32,
}

impl Default for GenerationParams {
    fn default() -> Self {
        Self {
            temperature: 0.3,
            top_p: 0.95,
            top_k: 64,
            max_output_tokens: 8192,
        }
    }
}

/// Immutable Gemini configuration
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    /// API credential
    pub api_key: String,
    /// Model name
    pub model: String,
    /// API base URL
    pub base_url: String,
    /// Generation parameters
    pub generation: GenerationParams,
    /// Per-request timeout in seconds
    pub request_timeout_secs: u64,
}

impl GeminiConfig {
    /// Create a configuration with the given credential.
    ///
    /// # Errors
    /// Returns [`GeminiError::MissingCredential`] for a blank key.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeminiError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(GeminiError::MissingCredential);
        }
        Ok(Self {
            api_key,
            model: DEFAULT_MODEL.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            generation: GenerationParams::default(),
            request_timeout_secs: 120,
        })
    }

    /// Build from the environment, failing fast on a missing credential.
    pub fn from_env() -> Result<Self, GeminiError> {
        let api_key = std::env::var(API_KEY_ENV).unwrap_or_default();
        let mut config = Self::new(api_key)?;
        if let Ok(model) = std::env::var(MODEL_ENV) {
            if !model.trim().is_empty() {
                config.model = model;
            }
        }
        if let Ok(base_url) = std::env::var(BASE_URL_ENV) {
            if !base_url.trim().is_empty() {
                config.base_url = base_url;
            }
        }
        Ok(config)
    }

    /// With model name
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// With API base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With generation parameters
    #[inline]
    #[must_use]
    pub fn with_generation(mut self, generation: GenerationParams) -> Self {
        self.generation = generation;
        self
    }
}
