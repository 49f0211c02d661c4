//! Integration tests for the HTTP API.
//!
//! Each test builds the router against a temporary secret path and drives it
//! in-process with `tower::ServiceExt::oneshot`; no socket is bound.
//!
//! Run with: cargo test --test api_tests

use std::path::Path;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use proptest::prelude::*;
use secure_ci_demo::{create_router, AppConfig, AppState};
use tempfile::TempDir;
use tower::ServiceExt;

fn config_for(secret_path: &Path) -> AppConfig {
    AppConfig::parse(&format!(
        "[http]\nhost = \"127.0.0.1\"\nport = 0\n[secret]\npath = {:?}\n",
        secret_path.display().to_string()
    ))
    .unwrap()
}

/// Router whose secret file lives in a fresh temp dir (initially absent).
fn setup() -> (axum::Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(AppState::new(config_for(&dir.path().join("api_key"))));
    (app, dir)
}

fn setup_with_secret(contents: &str) -> (axum::Router, TempDir) {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_key");
    std::fs::write(&path, contents).unwrap();
    let app = create_router(AppState::new(config_for(&path)));
    (app, dir)
}

async fn get(app: axum::Router, uri: &str) -> axum::response::Response {
    app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap()
}

async fn body_string(response: axum::response::Response) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

async fn get_json(app: axum::Router, uri: &str) -> serde_json::Value {
    let response = get(app, uri).await;
    assert_eq!(response.status(), StatusCode::OK);
    serde_json::from_str(&body_string(response).await).unwrap()
}

#[tokio::test]
async fn test_root_returns_service_info() {
    let (app, _dir) = setup();
    let json = get_json(app, "/").await;
    assert_eq!(
        json,
        serde_json::json!({"service": "Secure CI Demo", "version": "1.0"})
    );
}

#[tokio::test]
async fn test_root_independent_of_secret_and_headers() {
    let (app, _dir) = setup_with_secret("supersecretvalue123");
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("accept", "text/html")
                .header("x-forwarded-for", "10.0.0.1")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body = body_string(response).await;
    assert_eq!(body, r#"{"service":"Secure CI Demo","version":"1.0"}"#);
}

#[tokio::test]
async fn test_health_is_healthy_regardless_of_secret() {
    let (absent, _dir_a) = setup();
    let (present, _dir_b) = setup_with_secret("supersecretvalue123");

    for _ in 0..3 {
        assert_eq!(
            get_json(absent.clone(), "/health").await,
            serde_json::json!({"status": "healthy"})
        );
        assert_eq!(
            get_json(present.clone(), "/health").await,
            serde_json::json!({"status": "healthy"})
        );
    }
}

#[tokio::test]
async fn test_health_ok_when_secret_unreadable() {
    // Secret path points at a directory: reading it fails with an I/O error
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(AppState::new(config_for(dir.path())));
    assert_eq!(
        get_json(app, "/health").await,
        serde_json::json!({"status": "healthy"})
    );
}

#[tokio::test]
async fn test_config_absent_secret() {
    let (app, _dir) = setup();
    assert_eq!(
        get_json(app, "/config").await,
        serde_json::json!({
            "api_key_configured": false,
            "api_key_preview": "NOT_SET",
            "version": "1.0",
        })
    );
}

#[tokio::test]
async fn test_config_present_secret() {
    let (app, _dir) = setup_with_secret("supersecretvalue123");
    let response = get(app, "/config").await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_string(response).await;
    assert!(!body.contains("supersecretvalue123"));
    assert!(!body.contains("superse"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(
        json,
        serde_json::json!({
            "api_key_configured": true,
            "api_key_preview": "supe...",
            "version": "1.0",
        })
    );
}

#[tokio::test]
async fn test_config_trims_trailing_newline() {
    let (app, _dir) = setup_with_secret("\n  abcdefgh \n");
    let json = get_json(app, "/config").await;
    assert_eq!(json["api_key_preview"], "abcd...");
}

#[tokio::test]
async fn test_config_short_secret_shown_whole() {
    let (app, _dir) = setup_with_secret("ab");
    let json = get_json(app, "/config").await;
    assert_eq!(json["api_key_configured"], true);
    assert_eq!(json["api_key_preview"], "ab...");
}

#[tokio::test]
async fn test_config_unreadable_secret_reported_absent() {
    let dir = tempfile::tempdir().unwrap();
    let app = create_router(AppState::new(config_for(dir.path())));
    assert_eq!(
        get_json(app, "/config").await,
        serde_json::json!({
            "api_key_configured": false,
            "api_key_preview": "NOT_SET",
            "version": "1.0",
        })
    );
}

#[tokio::test]
async fn test_config_reflects_secret_written_after_startup() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_key");
    let app = create_router(AppState::new(config_for(&path)));

    assert_eq!(get_json(app.clone(), "/config").await["api_key_configured"], false);

    std::fs::write(&path, "lateprovisioned").unwrap();
    let json = get_json(app, "/config").await;
    assert_eq!(json["api_key_configured"], true);
    assert_eq!(json["api_key_preview"], "late...");
}

#[test]
fn test_config_rejects_preview_longer_than_prefix() {
    let result = AppConfig::parse(
        "[http]\nhost = \"127.0.0.1\"\nport = 0\n[secret]\npreview_chars = 100\n",
    );
    assert!(result.is_err());
}

#[tokio::test]
async fn test_config_preview_capped_even_if_config_bypasses_validation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("api_key");
    std::fs::write(&path, "supersecretvalue123").unwrap();
    let mut config = config_for(&path);
    config.secret.preview_chars = 100;
    let app = create_router(AppState::new(config));

    let body = body_string(get(app, "/config").await).await;
    assert!(!body.contains("supersecretvalue123"));
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["api_key_preview"], "supe...");
}

#[tokio::test]
async fn test_cache_control_per_route() {
    let (app, _dir) = setup_with_secret("supersecretvalue123");

    let root = get(app.clone(), "/").await;
    assert_eq!(
        root.headers().get(header::CACHE_CONTROL).unwrap(),
        "public, max-age=60"
    );

    let health = get(app.clone(), "/health").await;
    assert_eq!(health.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");

    let config = get(app, "/config").await;
    assert_eq!(config.headers().get(header::CACHE_CONTROL).unwrap(), "no-store");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let (app, _dir) = setup();
    let id = "5f0c6a8e-3b1d-4c2a-9f4e-2d7b8c9a0e1f";
    let response = app
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.headers().get("x-request-id").unwrap(), id);
}

#[tokio::test]
async fn test_request_id_generated_for_invalid_header() {
    let (app, _dir) = setup();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("x-request-id", "<script>")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    let id = response.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_ne!(id, "<script>");
    assert!(uuid::Uuid::parse_str(id).is_ok());
}

#[tokio::test]
async fn test_unknown_path_is_not_found() {
    let (app, _dir) = setup();
    let response = get(app, "/secrets").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_post_is_rejected() {
    let (app, _dir) = setup();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/config")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// No endpoint ever returns a secret longer than the preview in full.
    #[test]
    fn no_endpoint_leaks_secret(secret in "[A-Za-z0-9_-]{1,48}") {
        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        let (app, _dir) = setup_with_secret(&secret);

        for uri in ["/", "/health", "/config"] {
            let body = runtime.block_on(async {
                body_string(get(app.clone(), uri).await).await
            });
            if secret.len() > 4 {
                prop_assert!(!body.contains(&secret), "{} leaked the secret", uri);
            }
        }

        let json: serde_json::Value = serde_json::from_str(
            &runtime.block_on(async { body_string(get(app.clone(), "/config").await).await }),
        )
        .unwrap();
        let expected: String = secret.chars().take(4).collect::<String>() + "...";
        prop_assert_eq!(json["api_key_preview"].as_str(), Some(expected.as_str()));
    }
}
