//! Scribe Analysis - local static analysis for submitted Python code
//!
//! Everything here runs in-process with no network access:
//! - Function isolation for targeted test generation
//! - Call graphs (single snippet and cross-file project) with Mermaid output
//! - Inline SQL detection for the DBA report
//! - Quick structural metrics for the Live Metrics panel
//! - ZIP archive reading for project uploads
//!
//! # Example
//!
//! ```rust
//! use scribe_analysis::isolate_function;
//!
//! let source = "def f(): pass\n";
//! let isolated = isolate_function(source, "f").unwrap();
//! assert!(isolated.starts_with("def f"));
//! ```

#![warn(unreachable_pub)]

pub mod archive;
pub mod callgraph;
pub mod error;
pub mod metrics;
pub mod python;
pub mod sql;

// Re-exports for convenience
pub use archive::collect_python_sources;
pub use callgraph::{
    project_graph, snippet_graph, GraphEdge, GraphMetadata, GraphNode, ProjectGraph, SnippetGraph,
};
pub use error::{AnalysisError, ArchiveError};
pub use metrics::{calculate_code_metrics, CodeMetrics};
pub use python::isolate_function;
pub use sql::extract_sql_queries;

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
