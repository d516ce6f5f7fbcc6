// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image modification endpoint handler

use async_trait::async_trait;
use axum::{response::IntoResponse, response::Response, Json};
use serde_json::Value;
use tracing::{debug, warn};

use super::request::{validate_modify_image_request, ModifyImageInput};
use super::response::{ModifiedImage, MODIFICATION_COMPLETE};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{Capability, FailureMessages, StageError};
use crate::gateway::{presets, Part};
use crate::vision::ImageLimits;

const FAILURE: &str = "Failed to process image modification request";
const POLICY: &str =
    "Image modification blocked due to content policy. Try a different request.";
const FALLBACK_ANALYSIS: &str = "Here is your modified costume.";

/// POST /api/modify-image
#[derive(Debug, Default)]
pub struct ModifyImage;

#[async_trait]
impl Capability for ModifyImage {
    const NAME: &'static str = "modify-image";
    const MESSAGES: FailureMessages = FailureMessages::gemini(FAILURE, Some(POLICY));

    type Input = ModifyImageInput;
    type Output = ModifiedImage;

    fn validate(&self, body: &Value, limits: &ImageLimits) -> Result<ModifyImageInput, ApiError> {
        validate_modify_image_request(body, limits)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: ModifyImageInput,
    ) -> Result<ModifiedImage, StageError> {
        let history = input.history_transcript();
        let instructions = state
            .prompts
            .render(
                "modify-image",
                &[("prompt", input.prompt.as_str().into()), ("history", history.into())],
            )
            .await?;
        debug!(
            "Modifying image with {} earlier turn(s)",
            input.history.len()
        );

        let parts = vec![
            Part::text(instructions),
            Part::inline(input.image.mime_type.as_str(), input.image.raw_base64),
        ];
        let response = state.gateway.image().generate(parts, presets::IMAGE).await?;

        let text = response.text().trim().to_string();
        let modified_image_data = response.first_inline_image().map(|i| i.to_data_url());

        if modified_image_data.is_none() && text.is_empty() {
            warn!("Modification produced neither image nor text");
            return Err(ApiError::NoImageProduced(FAILURE.to_string()).into());
        }

        Ok(ModifiedImage {
            success: true,
            modified_image_data,
            analysis: if text.is_empty() {
                FALLBACK_ANALYSIS.to_string()
            } else {
                text
            },
            message: MODIFICATION_COMPLETE.to_string(),
        })
    }

    fn respond(&self, output: ModifiedImage) -> Response {
        Json(output).into_response()
    }
}
