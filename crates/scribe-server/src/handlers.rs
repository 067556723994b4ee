//! Endpoint handlers
//!
//! Validation happens before any model call: a blank `code` never leaves
//! the process. Report sections degrade independently - a failed persona
//! call becomes a failure string in its own slot while the rest of the
//! response stands.

use crate::api::{
    AnalysisResponse, AnalyzeRequest, GenerateTestRequest, GenerateTestResponse, MetricsRequest,
    MetricsResponse, ProjectResponse, RefactorRequest, RefactorResponse, NO_PROJECT_SQL_PLACEHOLDER,
    NO_PYTHON_FILES_PLACEHOLDER, NO_SQL_PLACEHOLDER, TRACE_PLACEHOLDER,
};
use crate::error::AppError;
use crate::state::AppState;
use axum::extract::{Multipart, State};
use axum::Json;
use scribe_analysis::SnippetGraph;
use scribe_gemini::{prompt, GeminiError, Persona};
use serde_json::json;

/// Multipart field carrying the project archive.
const PROJECT_ZIP_FIELD: &str = "projectZip";

/// Turn a section result into its response slot text.
fn section_text(what: &str, result: Result<String, GeminiError>) -> String {
    match result {
        Ok(text) => text,
        Err(err) => {
            tracing::warn!("{what} failed: {err}");
            format!("{what} failed: {err}")
        }
    }
}

/// Liveness probe.
pub(crate) async fn health() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "version": env!("CARGO_PKG_VERSION") }))
}

/// `POST /analyze-all` (alias `/document-code`): the full snippet report.
pub(crate) async fn analyze_all(
    State(state): State<AppState>,
    Json(request): Json<AnalyzeRequest>,
) -> Result<Json<AnalysisResponse>, AppError> {
    let code = request.code.trim().to_string();
    let trace_input = request.trace_input.trim().to_string();
    if code.is_empty() {
        return Err(AppError::BadRequest("No code provided".to_string()));
    }
    tracing::info!(code_len = code.len(), has_trace = !trace_input.is_empty(), "analyzing snippet");

    let visualizer = scribe_analysis::snippet_graph(&code).unwrap_or_else(|err| SnippetGraph {
        mermaid: String::new(),
        message: Some(format!("Failed to parse code: {err}")),
    });
    let sql_queries = scribe_analysis::extract_sql_queries(&code);

    let client = &state.client;
    // Prompts outlive the futures they feed into the join below.
    let doc_prompt = prompt::documentation(&code);
    let audit_prompt = prompt::security_audit(&code);
    let documentation_fut = client.generate(Persona::Documentation, &doc_prompt);
    let audit_fut = client.generate(Persona::SecurityAudit, &audit_prompt);
    let trace_fut = async {
        if trace_input.is_empty() {
            None
        } else {
            Some(
                client
                    .generate(Persona::TraceExplainer, &prompt::trace(&code, &trace_input))
                    .await,
            )
        }
    };
    let dba_fut = async {
        if sql_queries.is_empty() {
            None
        } else {
            Some(
                client
                    .generate(Persona::DatabaseAdmin, &prompt::database_report(&sql_queries))
                    .await,
            )
        }
    };

    let (documentation, audit, trace, database_report) =
        tokio::join!(documentation_fut, audit_fut, trace_fut, dba_fut);

    Ok(Json(AnalysisResponse {
        documentation: section_text("Documentation generation", documentation),
        audit: section_text("Security audit", audit),
        visualizer,
        trace: trace
            .map(|result| section_text("Live trace explanation", result))
            .unwrap_or_else(|| TRACE_PLACEHOLDER.to_string()),
        database_report: database_report
            .map(|result| section_text("Database analysis", result))
            .unwrap_or_else(|| NO_SQL_PLACEHOLDER.to_string()),
    }))
}

/// `POST /upload-zip`: whole-project report from an uploaded archive.
pub(crate) async fn upload_zip(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<ProjectResponse>, AppError> {
    let mut archive_bytes: Option<Vec<u8>> = None;
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|err| AppError::BadRequest(err.to_string()))?
    {
        if field.name() != Some(PROJECT_ZIP_FIELD) {
            continue;
        }
        if field.file_name().unwrap_or_default().is_empty() {
            return Err(AppError::BadRequest("No file selected.".to_string()));
        }
        let bytes = field
            .bytes()
            .await
            .map_err(|err| AppError::BadRequest(err.to_string()))?;
        archive_bytes = Some(bytes.to_vec());
        break;
    }
    let Some(bytes) = archive_bytes else {
        return Err(AppError::BadRequest(
            "No project .zip file was uploaded.".to_string(),
        ));
    };

    let files = scribe_analysis::collect_python_sources(&bytes)?;
    tracing::info!(file_count = files.len(), "project archive accepted");
    if files.is_empty() {
        return Ok(Json(ProjectResponse {
            project_summary: NO_PYTHON_FILES_PLACEHOLDER.to_string(),
            project_security: NO_PYTHON_FILES_PLACEHOLDER.to_string(),
            visualizer: scribe_analysis::project_graph(&files),
            file_count: 0,
            database_report: NO_PROJECT_SQL_PLACEHOLDER.to_string(),
        }));
    }

    let mut graph = scribe_analysis::project_graph(&files);
    let mut all_sql = Vec::new();
    for (_, source) in &files {
        all_sql.extend(scribe_analysis::extract_sql_queries(source));
    }
    graph.metadata.sql_queries = all_sql.len();

    let combined = prompt::combine_project_sources(&files);
    let client = &state.client;
    let summary_prompt = prompt::project_overview(&combined);
    let security_prompt = prompt::security_audit(&combined);
    let summary_fut = client.generate(Persona::Architect, &summary_prompt);
    let security_fut = client.generate(Persona::SecurityAudit, &security_prompt);
    let dba_fut = async {
        if all_sql.is_empty() {
            None
        } else {
            Some(
                client
                    .generate(Persona::DatabaseAdmin, &prompt::database_report(&all_sql))
                    .await,
            )
        }
    };
    let (summary, security, database_report) = tokio::join!(summary_fut, security_fut, dba_fut);

    Ok(Json(ProjectResponse {
        project_summary: section_text("Project overview generation", summary),
        project_security: section_text("Project security audit", security),
        visualizer: graph,
        file_count: files.len(),
        database_report: database_report
            .map(|result| section_text("Database analysis", result))
            .unwrap_or_else(|| NO_PROJECT_SQL_PLACEHOLDER.to_string()),
    }))
}

/// `POST /generate-test`: pytest scaffolding for one top-level function.
pub(crate) async fn generate_test(
    State(state): State<AppState>,
    Json(request): Json<GenerateTestRequest>,
) -> Result<Json<GenerateTestResponse>, AppError> {
    let code = request.code.trim();
    let function_name = request.function_name.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("No code provided".to_string()));
    }
    if function_name.is_empty() {
        return Err(AppError::BadRequest(
            "No function name provided".to_string(),
        ));
    }

    let function_source = scribe_analysis::isolate_function(code, function_name)?;
    let test_code = state
        .client
        .generate(
            Persona::TestGeneration,
            &prompt::generate_tests(&function_source, function_name),
        )
        .await?;

    Ok(Json(GenerateTestResponse {
        test_code,
        function_source,
    }))
}

/// `POST /refactor-code`: targeted vulnerability fix.
pub(crate) async fn refactor_code(
    State(state): State<AppState>,
    Json(request): Json<RefactorRequest>,
) -> Result<Json<RefactorResponse>, AppError> {
    let code = request.code.trim();
    let context = request.vulnerability_context.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("No code provided".to_string()));
    }
    if context.is_empty() {
        return Err(AppError::BadRequest(
            "No vulnerability context provided".to_string(),
        ));
    }

    let refactored_code = state
        .client
        .generate(Persona::Refactor, &prompt::refactor(code, context))
        .await?;

    Ok(Json(RefactorResponse { refactored_code }))
}

/// `POST /live-metrics`: local structural metrics, no model call.
pub(crate) async fn live_metrics(
    Json(request): Json<MetricsRequest>,
) -> Result<Json<MetricsResponse>, AppError> {
    let code = request.code.trim();
    if code.is_empty() {
        return Err(AppError::BadRequest("No code provided".to_string()));
    }
    Ok(Json(scribe_analysis::calculate_code_metrics(code)))
}
