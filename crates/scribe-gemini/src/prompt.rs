//! Prompt builders
//!
//! One builder per report type. The user's code always travels inside a
//! fenced block so the model sees it verbatim.

/// Documentation request prompt.
#[must_use]
pub fn documentation(code: &str) -> String {
    format!("Here is the code:\n\n```\n{code}\n```")
}

/// Security audit prompt.
#[must_use]
pub fn security_audit(code: &str) -> String {
    format!("Audit the following code:\n\n```\n{code}\n```")
}

/// Trace narration prompt: source plus the invocation snippet.
#[must_use]
pub fn trace(code: &str, trace_input: &str) -> String {
    format!(
        "Source Code:\n\n```python\n{code}\n```\n\nInvocation:\n\n```python\n{trace_input}\n```"
    )
}

/// Refactor prompt: original code plus the vulnerability to fix.
#[must_use]
pub fn refactor(code: &str, vulnerability_context: &str) -> String {
    format!(
        "Original Code:\n\n```python\n{code}\n```\n\nVulnerability Context:\n{vulnerability_context}"
    )
}

/// Test generation prompt for an isolated function.
#[must_use]
pub fn generate_tests(function_source: &str, function_name: &str) -> String {
    format!(
        "Generate pytest tests for the following function `{function_name}`.\n\n```python\n{function_source}\n```"
    )
}

/// Project overview prompt over concatenated sources.
#[must_use]
pub fn project_overview(project_code: &str) -> String {
    format!("Provide a project-wide architecture brief for the following source files:\n\n{project_code}")
}

/// DBA prompt: numbered fenced SQL queries.
#[must_use]
pub fn database_report(sql_queries: &[String]) -> String {
    sql_queries
        .iter()
        .enumerate()
        .map(|(idx, query)| format!("Query {}:\n```sql\n{query}\n```", idx + 1))
        .collect::<Vec<_>>()
        .join("\n\n")
}

/// Concatenate project files into one annotated blob for the Architect.
#[must_use]
pub fn combine_project_sources(files: &[(String, String)]) -> String {
    files
        .iter()
        .map(|(rel_path, source)| format!("# File: {rel_path}\n{source}\n"))
        .collect::<Vec<_>>()
        .join("\n")
}
