//! End-to-end endpoint tests against an in-process router and a mocked
//! model backend.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use scribe_gemini::{GeminiClient, GeminiConfig};
use scribe_server::{app, AppState};
use serde_json::{json, Value};
use std::io::{Cursor, Write};
use std::sync::Arc;
use tower::ServiceExt;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};
use zip::write::SimpleFileOptions;
use zip::ZipWriter;

fn test_app(base_url: String) -> Router {
    let config = GeminiConfig::new("test-key")
        .unwrap()
        .with_model("test-model")
        .with_base_url(base_url);
    let client = GeminiClient::new(Arc::new(config)).unwrap();
    app(AppState::new(client))
}

fn model_reply(text: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "candidates": [{ "content": { "parts": [{ "text": text }] } }]
    }))
}

async fn mock_model(server: &MockServer, text: &str, expected_calls: u64) {
    Mock::given(method("POST"))
        .and(path("/v1beta/models/test-model:generateContent"))
        .respond_with(model_reply(text))
        .expect(expected_calls)
        .mount(server)
        .await;
}

async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

fn build_zip(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    for (name, data) in entries {
        writer
            .start_file(*name, SimpleFileOptions::default())
            .unwrap();
        writer.write_all(data).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

async fn post_zip(app: Router, bytes: &[u8]) -> (StatusCode, Value) {
    let boundary = "XBOUNDARYX";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"projectZip\"; \
             filename=\"project.zip\"\r\nContent-Type: application/zip\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload-zip")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = serde_json::from_slice(&bytes).unwrap();
    (status, value)
}

#[tokio::test]
async fn blank_code_is_rejected_without_a_model_call() {
    let server = MockServer::start().await;
    mock_model(&server, "should never be called", 0).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(app, "/analyze-all", json!({ "code": "   " })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No code provided");
}

#[tokio::test]
async fn analyze_all_returns_every_section() {
    let server = MockServer::start().await;
    // documentation + audit, no trace input and no SQL
    mock_model(&server, "The function `f` does nothing.", 2).await;

    let app = test_app(server.uri());
    let (status, body) =
        post_json(app, "/analyze-all", json!({ "code": "def f(): pass" })).await;
    assert_eq!(status, StatusCode::OK);
    // Byte-for-byte passthrough of the model's markdown
    assert_eq!(body["documentation"], "The function `f` does nothing.");
    assert_eq!(body["audit"], "The function `f` does nothing.");
    assert_eq!(
        body["trace"],
        "Please provide a sample input to run the Live Trace."
    );
    assert_eq!(
        body["database_report"],
        "No SQL queries detected in the provided code."
    );
    assert!(body["visualizer"]["mermaid"]
        .as_str()
        .unwrap()
        .starts_with("graph TD"));
}

#[tokio::test]
async fn document_code_alias_serves_the_same_report() {
    let server = MockServer::start().await;
    mock_model(&server, "docs", 2).await;

    let app = test_app(server.uri());
    let (status, body) =
        post_json(app, "/document-code", json!({ "code": "def f(): pass" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["documentation"], "docs");
}

#[tokio::test]
async fn trace_and_sql_sections_activate_with_input() {
    let server = MockServer::start().await;
    // documentation + audit + trace + dba
    mock_model(&server, "section text", 4).await;

    let app = test_app(server.uri());
    let code = "def q():\n    return run(\"SELECT 1 FROM t\")\n";
    let (status, body) = post_json(
        app,
        "/analyze-all",
        json!({ "code": code, "trace_input": "q()" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trace"], "section text");
    assert_eq!(body["database_report"], "section text");
}

#[tokio::test]
async fn sections_degrade_independently_on_upstream_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let app = test_app(server.uri());
    let (status, body) =
        post_json(app, "/analyze-all", json!({ "code": "def f(): pass" })).await;
    // The envelope still succeeds; failed sections carry failure strings.
    assert_eq!(status, StatusCode::OK);
    assert!(body["documentation"]
        .as_str()
        .unwrap()
        .starts_with("Documentation generation failed:"));
    assert!(body["audit"]
        .as_str()
        .unwrap()
        .starts_with("Security audit failed:"));
}

#[tokio::test]
async fn empty_archive_reports_zero_files_without_model_calls() {
    let server = MockServer::start().await;
    mock_model(&server, "unused", 0).await;

    let app = test_app(server.uri());
    let bytes = build_zip(&[("notes.txt", b"no python here")]);
    let (status, body) = post_zip(app, &bytes).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_count"], 0);
    assert_eq!(
        body["project_summary"],
        "No Python files detected in the uploaded archive."
    );
}

#[tokio::test]
async fn project_upload_builds_graph_and_reports() {
    let server = MockServer::start().await;
    // architect + project audit, no SQL in sources
    mock_model(&server, "Project brief.", 2).await;

    let app = test_app(server.uri());
    let bytes = build_zip(&[
        ("util.py", b"def shared():\n    pass\n"),
        ("main.py", b"def run():\n    shared()\n"),
    ]);
    let (status, body) = post_zip(app, &bytes).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["file_count"], 2);
    assert_eq!(body["project_summary"], "Project brief.");
    assert_eq!(body["visualizer"]["mode"], "project");
    assert_eq!(body["visualizer"]["metadata"]["files"], 2);
    assert_eq!(body["visualizer"]["metadata"]["sql_queries"], 0);
    let edges = body["visualizer"]["edges"].as_array().unwrap();
    assert!(edges
        .iter()
        .any(|e| e["source"] == "main.py:run" && e["target"] == "util.py:shared"));
}

#[tokio::test]
async fn missing_archive_field_is_a_client_error() {
    let server = MockServer::start().await;
    let app = test_app(server.uri());

    let boundary = "XBOUNDARYX";
    let body = format!(
        "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{boundary}--\r\n"
    );
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/upload-zip")
                .header(
                    header::CONTENT_TYPE,
                    format!("multipart/form-data; boundary={boundary}"),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["error"], "No project .zip file was uploaded.");
}

#[tokio::test]
async fn corrupt_archive_is_a_client_error() {
    let server = MockServer::start().await;
    let app = test_app(server.uri());
    let (status, body) = post_zip(app, b"definitely not a zip").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("not a valid zip archive"));
}

#[tokio::test]
async fn generate_test_unknown_function_is_404() {
    let server = MockServer::start().await;
    mock_model(&server, "unused", 0).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/generate-test",
        json!({ "code": "def f(): pass", "function_name": "g" }),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "Function 'g' not found.");
}

#[tokio::test]
async fn generate_test_returns_isolated_source() {
    let server = MockServer::start().await;
    mock_model(&server, "```python\ndef test_f():\n    assert f() is None\n```", 1).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/generate-test",
        json!({ "code": "def f(): pass\n\ndef g(): pass", "function_name": "f" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["function_source"], "def f(): pass");
    assert!(body["test_code"].as_str().unwrap().contains("def test_f"));
}

#[tokio::test]
async fn refactor_requires_vulnerability_context() {
    let server = MockServer::start().await;
    mock_model(&server, "unused", 0).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/refactor-code",
        json!({ "code": "def f(): pass", "vulnerability_context": "" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "No vulnerability context provided");
}

#[tokio::test]
async fn refactor_passes_model_output_through() {
    let server = MockServer::start().await;
    mock_model(&server, "```python\nsafe()\n```", 1).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/refactor-code",
        json!({ "code": "unsafe()", "vulnerability_context": "command injection" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["refactored_code"], "```python\nsafe()\n```");
}

#[tokio::test]
async fn upstream_failure_is_surfaced_generically() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(403).set_body_string("API key invalid"))
        .mount(&server)
        .await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/generate-test",
        json!({ "code": "def f(): pass", "function_name": "f" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"], "The model service failed to process the request.");
}

#[tokio::test]
async fn live_metrics_never_touch_the_model() {
    let server = MockServer::start().await;
    mock_model(&server, "unused", 0).await;

    let app = test_app(server.uri());
    let (status, body) = post_json(
        app,
        "/live-metrics",
        json!({ "code": "def f():\n    return 1\n" }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["loc"], 2);
    assert_eq!(body["cyclomatic_complexity_max"], 1.0);
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start().await;
    let app = test_app(server.uri());
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/health")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(value["status"], "ok");
}
