//! Transport Tests
//!
//! Tests for the HTTP client and submitter against a local mock API:
//! - 2xx yields the created id
//! - 409 is a name conflict, 401/403 a session error
//! - other statuses carry the server message
//! - a pending submission rejects re-entry
//! - invalid state never reaches the server

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use formsmith::builder::BuilderState;
use formsmith::cli::{self, Config};
use formsmith::store::Session;
use formsmith::transport::{ApiClient, SessionError, SubmitError, Submitter};
use serde_json::{json, Value};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

type Reply = (StatusCode, Json<Value>);

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}/api", addr)
}

async fn forms_server(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/api/forms",
        post(move || {
            let body = body.clone();
            async move { (status, Json(body)) }
        }),
    );
    spawn(app).await
}

fn client(base: &str) -> ApiClient {
    ApiClient::new(base, Duration::from_secs(5)).unwrap()
}

fn valid_state() -> BuilderState {
    let mut state = BuilderState::new();
    state.set_form_name("F1");
    let section = state.add_section();
    state.rename_section(section, "Main").unwrap();
    let field = state.add_field(section).unwrap();
    state.rename_field(section, field, "Name").unwrap();
    state
}

// =============================================================================
// Status Mapping Tests
// =============================================================================

#[tokio::test]
async fn test_created_returns_id_and_sends_bearer() {
    let app = Router::new().route(
        "/api/forms",
        post(|headers: HeaderMap, Json(body): Json<Value>| async move {
            let auth = headers
                .get("authorization")
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default();
            if auth != "Bearer tok-1" {
                return (StatusCode::UNAUTHORIZED, Json(json!({})));
            }
            let reply: Reply = (
                StatusCode::CREATED,
                Json(json!({ "id": 42, "name": body["name"] })),
            );
            reply
        }),
    );
    let base = spawn(app).await;

    let submitter = Submitter::new(client(&base));
    let submission = submitter.submit(&valid_state(), Some("tok-1")).await.unwrap();
    assert_eq!(submission.created.id.as_deref(), Some("42"));
    assert_eq!(submission.created.status, 201);
    assert_eq!(submission.schema.name, "F1");
}

#[tokio::test]
async fn test_conflict_is_distinct() {
    let base = forms_server(StatusCode::CONFLICT, json!({ "message": "exists" })).await;

    let err = Submitter::new(client(&base))
        .submit(&valid_state(), Some("tok"))
        .await
        .unwrap_err();
    assert!(err.is_conflict());
    assert_eq!(err.to_string(), "A form named 'F1' already exists");
}

#[tokio::test]
async fn test_unauthorized_is_session_error() {
    for status in [StatusCode::UNAUTHORIZED, StatusCode::FORBIDDEN] {
        let base = forms_server(status, json!({})).await;
        let err = Submitter::new(client(&base))
            .submit(&valid_state(), Some("expired"))
            .await
            .unwrap_err();
        assert!(err.is_session());
        assert!(matches!(err, SubmitError::Session(SessionError::Rejected)));
    }
}

#[tokio::test]
async fn test_server_error_carries_message() {
    let base = forms_server(
        StatusCode::INTERNAL_SERVER_ERROR,
        json!({ "message": "Database unavailable" }),
    )
    .await;

    let err = Submitter::new(client(&base))
        .submit(&valid_state(), Some("tok"))
        .await
        .unwrap_err();
    match err {
        SubmitError::Http { status, message } => {
            assert_eq!(status, 500);
            assert_eq!(message, "Database unavailable");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn test_server_error_without_message_uses_reason() {
    let base = forms_server(StatusCode::BAD_GATEWAY, Value::Null).await;

    let err = Submitter::new(client(&base))
        .submit(&valid_state(), Some("tok"))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        SubmitError::Http { status: 502, ref message } if message == "Bad Gateway"
    ));
}

#[tokio::test]
async fn test_unreachable_server_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = Submitter::new(client(&format!("http://{}/api", addr)))
        .submit(&valid_state(), Some("tok"))
        .await
        .unwrap_err();
    assert!(matches!(err, SubmitError::Network(_)));
}

// =============================================================================
// Pipeline Ordering Tests
// =============================================================================

/// Invalid state fails locally; the server is never called.
#[tokio::test]
async fn test_invalid_state_never_sent() {
    let hits = Arc::new(AtomicUsize::new(0));
    let counter = hits.clone();
    let app = Router::new().route(
        "/api/forms",
        post(move || {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                StatusCode::CREATED
            }
        }),
    );
    let base = spawn(app).await;

    let mut state = valid_state();
    state.set_field_type(0, 0, "select").unwrap();

    let err = Submitter::new(client(&base))
        .submit(&state, Some("tok"))
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Options are required for select field \"Name\"");
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

/// A second submit while the first is pending is refused.
#[tokio::test]
async fn test_reentry_rejected_while_pending() {
    let app = Router::new().route(
        "/api/forms",
        post(|| async {
            tokio::time::sleep(Duration::from_millis(200)).await;
            (StatusCode::CREATED, Json(json!({ "id": 1 })))
        }),
    );
    let base = spawn(app).await;

    let submitter = Submitter::new(client(&base));
    let state = valid_state();

    let (first, second) = tokio::join!(
        submitter.submit(&state, Some("tok")),
        submitter.submit(&state, Some("tok"))
    );
    assert!(first.is_ok());
    assert!(matches!(second, Err(SubmitError::InProgress)));
    assert!(!submitter.is_submitting());

    let third = submitter.submit(&state, Some("tok")).await;
    assert!(third.is_ok());
}

// =============================================================================
// Login Tests
// =============================================================================

async fn login_server(status: StatusCode, body: Value) -> String {
    let app = Router::new().route(
        "/api/newlogin",
        post(move |Json(request): Json<Value>| {
            let body = body.clone();
            async move {
                assert_eq!(request["email"], "ada@example.com");
                (status, Json(body))
            }
        }),
    );
    spawn(app).await
}

#[tokio::test]
async fn test_login_returns_token() {
    let base = login_server(StatusCode::OK, json!({ "access_token": "abc" })).await;
    let token = client(&base).login("ada@example.com", "pw").await.unwrap();
    assert_eq!(token, "abc");
}

#[tokio::test]
async fn test_login_without_token() {
    let base = login_server(StatusCode::OK, json!({ "user": "ada" })).await;
    let err = client(&base).login("ada@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "No token received from server");
}

#[tokio::test]
async fn test_login_rejected() {
    let base = login_server(StatusCode::UNAUTHORIZED, json!({ "message": "Bad credentials" })).await;
    let err = client(&base).login("ada@example.com", "pw").await.unwrap_err();
    assert!(matches!(err, SubmitError::Login(ref m) if m == "Bad credentials"));

    let base = login_server(StatusCode::UNAUTHORIZED, json!({})).await;
    let err = client(&base).login("ada@example.com", "pw").await.unwrap_err();
    assert_eq!(err.to_string(), "Login failed. Please check your credentials.");
}

// =============================================================================
// CLI Send Tests
// =============================================================================

fn cli_config(temp_dir: &TempDir, base: &str) -> Config {
    Config {
        api_base_url: base.to_string(),
        workspace_dir: temp_dir.path().join("ws").to_string_lossy().into_owned(),
        request_timeout_secs: 5,
        ..Config::default()
    }
}

fn write_builder(temp_dir: &TempDir) -> std::path::PathBuf {
    let path = temp_dir.path().join("builder.json");
    std::fs::write(&path, serde_json::to_string(&valid_state()).unwrap()).unwrap();
    path
}

#[tokio::test]
async fn test_cli_send_stores_form_id() {
    let base = forms_server(StatusCode::CREATED, json!({ "data": { "id": "frm-7" } })).await;
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(&temp_dir, &base);
    config.workspace().save_session(&Session::new("tok")).unwrap();

    let data = cli::send(&config, &write_builder(&temp_dir)).await.unwrap();
    assert_eq!(data["form_id"], "frm-7");

    let stored = config.workspace().load_current_schema().unwrap().unwrap();
    assert_eq!(stored.form_id.as_deref(), Some("frm-7"));
    assert_eq!(stored.schema.name, "F1");
}

#[tokio::test]
async fn test_cli_send_rejected_session_logs_out() {
    let base = forms_server(StatusCode::UNAUTHORIZED, json!({})).await;
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(&temp_dir, &base);
    config.workspace().save_session(&Session::new("stale")).unwrap();

    let err = cli::send(&config, &write_builder(&temp_dir)).await.unwrap_err();
    assert_eq!(err.code_str(), "FORMSMITH_CLI_SESSION_INVALID");
    assert_eq!(config.workspace().load_session().unwrap(), None);
}

#[tokio::test]
async fn test_cli_login_stores_session() {
    let base = login_server(StatusCode::OK, json!({ "access_token": "fresh" })).await;
    let temp_dir = TempDir::new().unwrap();
    let config = cli_config(&temp_dir, &base);

    cli::login(&config, "ada@example.com", "pw").await.unwrap();
    let session = config.workspace().load_session().unwrap().unwrap();
    assert_eq!(session.token, "fresh");
}
