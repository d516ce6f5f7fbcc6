// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Meme generation endpoint handler

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;

use super::request::{validate_generate_meme_request, GenerateMemeRequest};
use super::response::MemeImage;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{
    generated_image, success_json, Capability, FailureMessages, StageError,
};
use crate::gateway::{presets, Part};
use crate::vision::ImageLimits;

const FAILURE: &str = "Failed to generate meme. Please try again.";
const POLICY: &str =
    "Meme generation blocked due to content policy. Try again with different content.";

/// POST /api/generate-meme
#[derive(Debug, Default)]
pub struct GenerateMeme;

#[async_trait]
impl Capability for GenerateMeme {
    const NAME: &'static str = "generate-meme";
    const MESSAGES: FailureMessages = FailureMessages::gemini(FAILURE, Some(POLICY));

    type Input = GenerateMemeRequest;
    type Output = MemeImage;

    fn validate(&self, body: &Value, _limits: &ImageLimits) -> Result<GenerateMemeRequest, ApiError> {
        validate_generate_meme_request(body)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: GenerateMemeRequest,
    ) -> Result<MemeImage, StageError> {
        let prompt = state
            .prompts
            .render("generate-meme", &[("roastText", input.roast_text.into())])
            .await?;

        let response = state
            .gateway
            .image()
            .generate(vec![Part::text(prompt)], presets::IMAGE)
            .await?;

        Ok(MemeImage {
            image: generated_image(&response, FAILURE)?,
        })
    }

    fn respond(&self, output: MemeImage) -> Response {
        success_json(output)
    }
}
