// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared fixtures for router tests: stub providers and request helpers
#![allow(dead_code)]

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use bytes::Bytes;
use costume_roast::{
    api::http_server::{create_app, AppState},
    gateway::{GenerateContentRequest, GenerateContentResponse, GenerativeBackend, ModelGateway},
    prompts::PromptLibrary,
    tts::{SpeechRequest, SpeechSynthesizer},
    upstream::UpstreamError,
    vision::ImageLimits,
};
use serde_json::{json, Value};
use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use tower::util::ServiceExt;

pub const VISION_MODEL: &str = "vision-test";
pub const IMAGE_MODEL: &str = "image-test";

/// Model backend that answers every call with the same canned result
pub struct StubBackend {
    reply: Result<GenerateContentResponse, UpstreamError>,
    pub calls: Mutex<Vec<(String, GenerateContentRequest)>>,
}

impl StubBackend {
    pub fn replying(reply: GenerateContentResponse) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(reply),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: UpstreamError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> (String, GenerateContentRequest) {
        self.calls.lock().unwrap().last().cloned().expect("backend was called")
    }
}

#[async_trait]
impl GenerativeBackend for StubBackend {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        self.calls
            .lock()
            .unwrap()
            .push((model.to_string(), request.clone()));
        self.reply.clone()
    }
}

/// Speech backend with a canned result
pub struct StubSpeech {
    reply: Result<Bytes, UpstreamError>,
    pub requests: Mutex<Vec<SpeechRequest>>,
}

impl StubSpeech {
    pub fn replying(audio: &'static [u8]) -> Arc<Self> {
        Arc::new(Self {
            reply: Ok(Bytes::from_static(audio)),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(err: UpstreamError) -> Arc<Self> {
        Arc::new(Self {
            reply: Err(err),
            requests: Mutex::new(Vec::new()),
        })
    }
}

#[async_trait]
impl SpeechSynthesizer for StubSpeech {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, UpstreamError> {
        self.requests.lock().unwrap().push(request.clone());
        self.reply.clone()
    }
}

pub fn prompts_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("prompts")
}

pub fn state_with(
    backend: Arc<StubBackend>,
    speech: Option<Arc<StubSpeech>>,
) -> AppState {
    AppState {
        gateway: ModelGateway::new(backend, VISION_MODEL, IMAGE_MODEL),
        speech: speech.map(|s| s as Arc<dyn SpeechSynthesizer>),
        prompts: PromptLibrary::new(prompts_dir()),
        limits: ImageLimits::default(),
    }
}

pub fn app_with(backend: Arc<StubBackend>) -> Router {
    create_app(Arc::new(state_with(backend, None)))
}

/// Gemini reply carrying only text
pub fn text_reply(text: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{"content": {"role": "model", "parts": [{"text": text}]}}]
    }))
    .unwrap()
}

/// Gemini reply carrying a caption and one inline image
pub fn image_reply(mime_type: &str, data: &str) -> GenerateContentResponse {
    serde_json::from_value(json!({
        "candidates": [{"content": {"role": "model", "parts": [
            {"text": "Here you go"},
            {"inlineData": {"mimeType": mime_type, "data": data}}
        ]}}]
    }))
    .unwrap()
}

/// A JPEG data-URL of roughly `decoded_len` bytes; only the signature is real
pub fn jpeg_data_url(decoded_len: usize) -> String {
    let chars = decoded_len.div_ceil(3) * 4;
    let mut payload = String::from("/9j/");
    payload.push_str(&"A".repeat(chars.saturating_sub(4)));
    format!("data:image/jpeg;base64,{}", payload)
}

pub async fn post_raw(app: Router, uri: &str, body: Body) -> (StatusCode, Vec<(String, String)>, Bytes) {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let headers = response
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or_default().to_string()))
        .collect();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, headers, bytes)
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, _, bytes) = post_raw(app, uri, Body::from(body.to_string())).await;
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

/// Text of the first user turn sent to the backend
pub fn prompt_text(request: &GenerateContentRequest) -> String {
    request.contents[0]
        .parts
        .iter()
        .filter_map(|p| p.text.clone())
        .collect::<Vec<_>>()
        .join("\n")
}
