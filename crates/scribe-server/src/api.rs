//! Request and response envelopes
//!
//! The analysis response is a tagged record with one field per report
//! section. Model markdown passes through untouched; a failed section
//! carries its failure string in the same slot.

use scribe_analysis::{CodeMetrics, ProjectGraph, SnippetGraph};
use serde::{Deserialize, Serialize};

/// Placeholder shown when no invocation snippet was provided.
pub const TRACE_PLACEHOLDER: &str = "Please provide a sample input to run the Live Trace.";

/// Placeholder shown when a pasted snippet holds no SQL.
pub const NO_SQL_PLACEHOLDER: &str = "No SQL queries detected in the provided code.";

/// Placeholder shown when an uploaded project holds no SQL.
pub const NO_PROJECT_SQL_PLACEHOLDER: &str =
    "No SQL queries detected across the uploaded project.";

/// Placeholder shown when an uploaded archive holds no Python files.
pub const NO_PYTHON_FILES_PLACEHOLDER: &str =
    "No Python files detected in the uploaded archive.";

/// Body of `/analyze-all` and `/document-code`
#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub trace_input: String,
}

/// Full analysis report for a pasted snippet
#[derive(Debug, Serialize)]
pub struct AnalysisResponse {
    pub documentation: String,
    pub audit: String,
    pub visualizer: SnippetGraph,
    pub trace: String,
    pub database_report: String,
}

/// Report for an uploaded project archive
#[derive(Debug, Serialize)]
pub struct ProjectResponse {
    pub project_summary: String,
    pub project_security: String,
    pub visualizer: ProjectGraph,
    pub file_count: usize,
    pub database_report: String,
}

/// Body of `/generate-test`
#[derive(Debug, Deserialize)]
pub struct GenerateTestRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub function_name: String,
}

/// Response of `/generate-test`
#[derive(Debug, Serialize)]
pub struct GenerateTestResponse {
    pub test_code: String,
    pub function_source: String,
}

/// Body of `/refactor-code`
#[derive(Debug, Deserialize)]
pub struct RefactorRequest {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub vulnerability_context: String,
}

/// Response of `/refactor-code`
#[derive(Debug, Serialize)]
pub struct RefactorResponse {
    pub refactored_code: String,
}

/// Body of `/live-metrics`
#[derive(Debug, Deserialize)]
pub struct MetricsRequest {
    #[serde(default)]
    pub code: String,
}

/// Response of `/live-metrics`
pub type MetricsResponse = CodeMetrics;
