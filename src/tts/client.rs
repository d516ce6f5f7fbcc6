// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fish Audio text-to-speech client

use anyhow::Result;
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, info};

use crate::upstream::UpstreamError;

pub const DEFAULT_FISH_AUDIO_ENDPOINT: &str = "https://api.fish.audio";

/// Output encodings the TTS provider can produce
pub const AUDIO_FORMATS: &[&str] = &["mp3", "wav", "pcm", "opus"];

pub const DEFAULT_AUDIO_FORMAT: &str = "mp3";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;
pub const DEFAULT_TOP_P: f32 = 0.9;

const PROVIDER: &str = "fish-audio";

/// Body of `POST /v1/tts`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechRequest {
    pub text: String,
    pub format: String,
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference_id: Option<String>,
}

impl SpeechRequest {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            format: DEFAULT_AUDIO_FORMAT.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            top_p: DEFAULT_TOP_P,
            reference_id: None,
        }
    }
}

/// Anything that can turn text into encoded audio
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SpeechSynthesizer: Send + Sync {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, UpstreamError>;
}

/// Client for the Fish Audio REST API
pub struct FishAudioClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl FishAudioClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Fish Audio client configured: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

#[async_trait]
impl SpeechSynthesizer for FishAudioClient {
    async fn synthesize(&self, request: &SpeechRequest) -> Result<Bytes, UpstreamError> {
        let url = format!("{}/v1/tts", self.endpoint);
        debug!(
            "Fish Audio TTS POST {} (chars={}, format={})",
            url,
            request.text.chars().count(),
            request.format
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(UpstreamError::with_status(PROVIDER, status.as_u16(), text));
        }

        response
            .bytes()
            .await
            .map_err(|e| UpstreamError::transport(PROVIDER, &e))
    }
}
