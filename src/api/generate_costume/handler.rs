// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Improved-costume endpoint handler

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tracing::debug;

use super::request::{validate_generate_costume_request, GenerateCostumeInput};
use super::response::GeneratedArtifact;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{
    generated_image, success_json, Capability, FailureMessages, StageError,
};
use crate::gateway::{presets, Part};
use crate::vision::ImageLimits;

const FAILURE: &str = "Failed to generate costume image. Please try again.";
const POLICY: &str =
    "Image generation blocked due to content policy. Try a different costume type.";

/// POST /api/generate-costume
#[derive(Debug, Default)]
pub struct GenerateCostume;

#[async_trait]
impl Capability for GenerateCostume {
    const NAME: &'static str = "generate-costume";
    const MESSAGES: FailureMessages = FailureMessages::gemini(FAILURE, Some(POLICY));

    type Input = GenerateCostumeInput;
    type Output = GeneratedArtifact;

    fn validate(&self, body: &Value, limits: &ImageLimits) -> Result<GenerateCostumeInput, ApiError> {
        validate_generate_costume_request(body, limits)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: GenerateCostumeInput,
    ) -> Result<GeneratedArtifact, StageError> {
        let prompt = match input.improvement_prompt {
            Some(prompt) => prompt,
            None => {
                state
                    .prompts
                    .render("generate-costume", &[("costumeType", input.costume_type.into())])
                    .await?
            }
        };
        debug!("Generating improved costume, prompt_len={}", prompt.len());

        let parts = vec![
            Part::text(prompt.clone()),
            Part::inline(input.image.mime_type.as_str(), input.image.raw_base64),
        ];
        let response = state.gateway.image().generate(parts, presets::IMAGE).await?;
        let image = generated_image(&response, FAILURE)?;

        Ok(GeneratedArtifact { image, prompt })
    }

    fn respond(&self, output: GeneratedArtifact) -> Response {
        success_json(output)
    }
}
