// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roast narration endpoint handler

use async_trait::async_trait;
use axum::response::{IntoResponse, Response};
use serde_json::Value;
use tracing::{debug, warn};

use super::request::{validate_generate_audio_request, GenerateAudioRequest};
use super::response::AudioClip;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{Capability, FailureMessages, StageError};
use crate::vision::ImageLimits;

pub const NOT_CONFIGURED: &str = "Audio service not configured";

/// POST /api/generate-audio
#[derive(Debug, Default)]
pub struct GenerateAudio;

#[async_trait]
impl Capability for GenerateAudio {
    const NAME: &'static str = "generate-audio";
    const MESSAGES: FailureMessages = FailureMessages {
        auth: "Audio service authentication failed",
        rate_limited: "Audio service quota exceeded",
        content_policy: None,
        invalid_parameters: Some("Invalid audio generation parameters"),
        provider_status: Some("Failed to generate audio"),
        failure: "Failed to generate audio. Please try again.",
    };

    type Input = GenerateAudioRequest;
    type Output = AudioClip;

    fn validate(&self, body: &Value, _limits: &ImageLimits) -> Result<GenerateAudioRequest, ApiError> {
        validate_generate_audio_request(body)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: GenerateAudioRequest,
    ) -> Result<AudioClip, StageError> {
        let speech = state.speech.as_ref().ok_or_else(|| {
            warn!("Audio requested but FISH_AUDIO_API_KEY is not set");
            ApiError::Configuration(NOT_CONFIGURED.to_string())
        })?;

        debug!(
            "Synthesizing {} chars as {}",
            input.speech.text.chars().count(),
            input.speech.format
        );
        let audio = speech.synthesize(&input.speech).await?;

        Ok(AudioClip {
            format: input.speech.format,
            audio,
        })
    }

    fn respond(&self, output: AudioClip) -> Response {
        output.into_response()
    }
}
