//! Async Gemini client
//!
//! One `generateContent` call per report. Nothing is retried - an upstream
//! failure surfaces as a typed error and the caller decides how to degrade.

use crate::config::GeminiConfig;
use crate::error::GeminiError;
use crate::persona::Persona;
use crate::wire::{
    default_safety_settings, Content, GenerateContentRequest, GenerateContentResponse, Part,
};
use std::sync::Arc;
use std::time::Duration;

/// Longest upstream error body echoed into an error message.
const ERROR_BODY_LIMIT: usize = 300;

/// Shared Gemini client
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    config: Arc<GeminiConfig>,
}

impl GeminiClient {
    /// Build a client over the given configuration.
    pub fn new(config: Arc<GeminiConfig>) -> Result<Self, GeminiError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self { http, config })
    }

    /// Configuration in use
    #[inline]
    #[must_use]
    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    /// Generate text under the given persona.
    ///
    /// The credential travels in the `x-goog-api-key` header so it never
    /// appears in URLs or access logs.
    pub async fn generate(&self, persona: Persona, prompt: &str) -> Result<String, GeminiError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: persona.system_instruction().to_string(),
                }],
            },
            generation_config: self.config.generation.into(),
            safety_settings: default_safety_settings(),
        };

        tracing::debug!(persona = persona.name(), prompt_len = prompt.len(), "calling model");
        let response = self
            .http
            .post(&url)
            .header("x-goog-api-key", &self.config.api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(persona = persona.name(), status = status.as_u16(), "model call failed");
            return Err(GeminiError::Api {
                status: status.as_u16(),
                message: truncate(&body, ERROR_BODY_LIMIT),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        if let Some(reason) = parsed
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.clone())
        {
            return Err(GeminiError::Blocked(reason));
        }

        let text = parsed.first_candidate_text();
        if text.trim().is_empty() {
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }
}

/// Truncate on a char boundary.
fn truncate(text: &str, limit: usize) -> String {
    if text.len() <= limit {
        return text.to_string();
    }
    let mut end = limit;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}
