// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Route registration, health and voice catalog

use super::helpers::*;
use axum::{
    body::Body,
    http::{Method, Request, StatusCode},
};
use costume_roast::api::http_server::HealthResponse;
use serde_json::json;
use tower::util::ServiceExt;

#[tokio::test]
async fn test_health() {
    let app = app_with(StubBackend::replying(text_reply("x")));

    let (status, body) = get_json(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    let health: HealthResponse = serde_json::from_value(body).unwrap();
    assert_eq!(health.status, "ok");
    assert_eq!(health.version, env!("CARGO_PKG_VERSION"));
    assert!(!health.audio_enabled);
}

#[tokio::test]
async fn test_voices_catalog() {
    let app = app_with(StubBackend::replying(text_reply("x")));

    let (status, body) = get_json(app, "/api/voices").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    let voices = body["data"].as_array().unwrap();
    assert_eq!(voices.len(), 7);
    assert_eq!(voices[0]["id"], "barack-obama");
    assert!(voices.iter().all(|v| v["referenceId"].as_str().is_some_and(|r| !r.is_empty())));
}

#[tokio::test]
async fn test_capability_routes_reject_get() {
    let paths = [
        "/api/analyze",
        "/api/generate-roast",
        "/api/generate-costume",
        "/api/generate-meme",
        "/api/modify-image",
        "/api/generate-audio",
    ];

    for path in paths {
        let app = app_with(StubBackend::replying(text_reply("x")));
        let request = Request::builder()
            .method(Method::GET)
            .uri(path)
            .body(Body::empty())
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED, "{}", path);
    }
}

#[tokio::test]
async fn test_non_object_body_rejected_everywhere() {
    for path in ["/api/analyze", "/api/generate-roast", "/api/generate-meme", "/api/generate-audio"] {
        let app = app_with(StubBackend::replying(text_reply("x")));
        let (status, body) = post_json(app, path, json!(["not", "an", "object"])).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{}", path);
        assert_eq!(body["error"], "Request body is required");
    }
}

#[tokio::test]
async fn test_cors_preflight_allowed() {
    let app = app_with(StubBackend::replying(text_reply("x")));
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/analyze")
        .header("origin", "http://localhost:5173")
        .header("access-control-request-method", "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    assert!(response.headers().contains_key("access-control-allow-origin"));
}

#[tokio::test]
async fn test_missing_prompt_template_is_generic_failure() {
    let backend = StubBackend::replying(text_reply("x"));
    let mut state = state_with(backend.clone(), None);
    state.prompts = costume_roast::prompts::PromptLibrary::new("/nonexistent/prompts");
    let app = costume_roast::api::create_app(std::sync::Arc::new(state));

    let (status, body) = post_json(app, "/api/generate-meme", json!({"roastText": "boo"})).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate meme. Please try again.");
    assert_eq!(backend.call_count(), 0);
}
