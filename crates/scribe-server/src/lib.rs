//! Scribe Server - the CodeScribe HTTP service
//!
//! JSON endpoints over the Gemini adapter:
//! - `POST /analyze-all` (alias `/document-code`) - full snippet report
//! - `POST /upload-zip` - whole-project report from a ZIP archive
//! - `POST /generate-test` - pytest scaffolding for one function
//! - `POST /refactor-code` - targeted vulnerability fix
//! - `POST /live-metrics` - local structural metrics
//! - `GET /health` - liveness probe
//!
//! Requests are stateless; the only shared state is the read-only
//! configuration and client built once at startup.

#![warn(unreachable_pub)]

pub mod api;
pub mod error;
mod handlers;
pub mod routes;
pub mod state;

// Re-exports for convenience
pub use error::AppError;
pub use routes::app;
pub use state::AppState;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
