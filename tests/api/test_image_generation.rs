// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Tests for the image-producing endpoints: generate-costume, generate-meme
//! and modify-image

use super::helpers::*;
use axum::http::StatusCode;
use costume_roast::{gateway::presets, upstream::UpstreamError};
use serde_json::json;

// ============================================================================
// POST /api/generate-costume
// ============================================================================

#[tokio::test]
async fn test_generate_costume_returns_data_url_and_prompt() {
    let backend = StubBackend::replying(image_reply("image/png", "iVBORw0KGgo="));
    let app = app_with(backend.clone());

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({"image": jpeg_data_url(256), "costumeType": "Dracula"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"]["image"], "data:image/png;base64,iVBORw0KGgo=");
    assert!(body["data"]["prompt"].as_str().unwrap().contains("Dracula"));

    let (model, request) = backend.last_call();
    assert_eq!(model, IMAGE_MODEL);
    assert_eq!(request.generation_config, presets::IMAGE);
    let parts = &request.contents[0].parts;
    assert!(parts[0].text.is_some());
    assert_eq!(parts[1].inline_data.as_ref().unwrap().mime_type, "image/jpeg");
}

#[tokio::test]
async fn test_generate_costume_improvement_prompt_replaces_template() {
    let backend = StubBackend::replying(image_reply("image/png", "iVBORw0KGgo="));
    let app = app_with(backend.clone());

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({
            "image": jpeg_data_url(256),
            "costumeType": "Dracula",
            "improvementPrompt": "Give him a velvet cape"
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["prompt"], "Give him a velvet cape");
    assert_eq!(prompt_text(&backend.last_call().1), "Give him a velvet cape");
}

#[tokio::test]
async fn test_generate_costume_safety_error_is_policy_400() {
    let err = UpstreamError::new("gemini", "Candidate was blocked due to safety");
    let app = app_with(StubBackend::failing(err));

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({"image": jpeg_data_url(256), "costumeType": "Dracula"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["error"].as_str().unwrap().contains("content policy"));
}

#[tokio::test]
async fn test_generate_costume_prompt_feedback_block_is_policy_400() {
    let blocked = serde_json::from_value(json!({"promptFeedback": {"blockReason": "SAFETY"}})).unwrap();
    let app = app_with(StubBackend::replying(blocked));

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({"image": jpeg_data_url(256), "costumeType": "Dracula"}),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Image generation blocked due to content policy. Try a different costume type."
    );
}

#[tokio::test]
async fn test_generate_costume_text_only_reply_is_500() {
    let app = app_with(StubBackend::replying(text_reply("I would rather not draw that.")));

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({"image": jpeg_data_url(256), "costumeType": "Dracula"}),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to generate costume image. Please try again.");
}

#[tokio::test]
async fn test_generate_costume_image_in_later_candidate() {
    let reply = serde_json::from_value(json!({
        "candidates": [
            {"content": {"parts": [{"text": "thinking"}]}},
            {"content": {"parts": [{"inlineData": {"mimeType": "image/webp", "data": "UklGRg=="}}]}}
        ]
    }))
    .unwrap();
    let app = app_with(StubBackend::replying(reply));

    let (status, body) = post_json(
        app,
        "/api/generate-costume",
        json!({"image": jpeg_data_url(256), "costumeType": "Witch"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], "data:image/webp;base64,UklGRg==");
}

#[tokio::test]
async fn test_generate_costume_missing_costume_type() {
    let app = app_with(StubBackend::replying(image_reply("image/png", "x")));

    let (status, body) = post_json(app, "/api/generate-costume", json!({"image": jpeg_data_url(256)})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "costumeType is required");
}

// ============================================================================
// POST /api/generate-meme
// ============================================================================

#[tokio::test]
async fn test_generate_meme_text_only_request() {
    let backend = StubBackend::replying(image_reply("image/png", "bWVtZQ=="));
    let app = app_with(backend.clone());

    let (status, body) = post_json(app, "/api/generate-meme", json!({"roastText": "Nice cape, Count Budget."})).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["image"], "data:image/png;base64,bWVtZQ==");

    let (model, request) = backend.last_call();
    assert_eq!(model, IMAGE_MODEL);
    assert!(request.contents[0].parts.iter().all(|p| p.inline_data.is_none()));
    assert!(prompt_text(&request).contains("Nice cape, Count Budget."));
}

#[tokio::test]
async fn test_generate_meme_calls_are_independent() {
    let backend = StubBackend::replying(image_reply("image/png", "bWVtZQ=="));
    let app = app_with(backend.clone());

    let (first, second) = tokio::join!(
        post_json(app.clone(), "/api/generate-meme", json!({"roastText": "first roast"})),
        post_json(app.clone(), "/api/generate-meme", json!({"roastText": "second roast"})),
    );
    assert_eq!(first.0, StatusCode::OK);
    assert_eq!(second.0, StatusCode::OK);

    let calls = backend.calls.lock().unwrap();
    assert_eq!(calls.len(), 2);
    for (_, request) in calls.iter() {
        let prompt = prompt_text(request);
        assert!(prompt.contains("first roast") ^ prompt.contains("second roast"));
    }
}

#[tokio::test]
async fn test_generate_meme_blank_text_rejected() {
    let app = app_with(StubBackend::replying(image_reply("image/png", "x")));

    let (status, body) = post_json(app.clone(), "/api/generate-meme", json!({"roastText": "  "})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "roastText cannot be empty");

    let (status, body) = post_json(app, "/api/generate-meme", json!({})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "roastText is required");
}

#[tokio::test]
async fn test_generate_meme_policy_message() {
    let app = app_with(StubBackend::failing(UpstreamError::blocked("gemini", "IMAGE_SAFETY")));

    let (status, body) = post_json(app, "/api/generate-meme", json!({"roastText": "boo"})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(
        body["error"],
        "Meme generation blocked due to content policy. Try again with different content."
    );
}

// ============================================================================
// POST /api/modify-image
// ============================================================================

#[tokio::test]
async fn test_modify_image_returns_flat_response() {
    let backend = StubBackend::replying(image_reply("image/png", "bW9k"));
    let app = app_with(backend.clone());

    let (status, body) = post_json(
        app,
        "/api/modify-image",
        json!({
            "imageData": jpeg_data_url(256),
            "prompt": "add glowing eyes",
            "conversationHistory": [
                {"role": "user", "content": "add fangs"},
                {"role": "assistant", "content": "Fangs added."}
            ]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["modifiedImageData"], "data:image/png;base64,bW9k");
    assert_eq!(body["analysis"], "Here you go");
    assert_eq!(body["message"], "Image modification complete.");
    assert!(body.get("data").is_none());

    let prompt = prompt_text(&backend.last_call().1);
    assert!(prompt.contains("add glowing eyes"));
    assert!(prompt.contains("user: add fangs"));
}

#[tokio::test]
async fn test_modify_image_text_only_reply_keeps_analysis() {
    let app = app_with(StubBackend::replying(text_reply("I'd add a cape.")));

    let (status, body) = post_json(
        app,
        "/api/modify-image",
        json!({"imageData": jpeg_data_url(256), "prompt": "add a cape"}),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.get("modifiedImageData").is_none());
    assert_eq!(body["analysis"], "I'd add a cape.");
}

#[tokio::test]
async fn test_modify_image_requires_prompt() {
    let app = app_with(StubBackend::replying(text_reply("x")));

    let (status, body) = post_json(app, "/api/modify-image", json!({"imageData": jpeg_data_url(256)})).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "prompt is required");
}
