//! Scribe Gemini - the hosted-model adapter
//!
//! Owns everything that touches the Gemini API:
//! - Immutable configuration built once at startup (credential fail-fast)
//! - The persona catalogue with fixed system instructions
//! - Prompt builders per report type
//! - Wire types and the async client
//!
//! # Example
//!
//! ```rust,ignore
//! use scribe_gemini::{GeminiClient, GeminiConfig, Persona, prompt};
//! use std::sync::Arc;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Arc::new(GeminiConfig::from_env()?);
//! let client = GeminiClient::new(config)?;
//!
//! let markdown = client
//!     .generate(Persona::Documentation, &prompt::documentation("def f(): pass"))
//!     .await?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod client;
pub mod config;
pub mod error;
pub mod persona;
pub mod prompt;
pub mod wire;

// Re-exports for convenience
pub use client::GeminiClient;
pub use config::{GeminiConfig, GenerationParams, API_KEY_ENV, DEFAULT_MODEL};
pub use error::GeminiError;
pub use persona::Persona;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
