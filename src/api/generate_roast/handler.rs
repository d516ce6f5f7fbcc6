// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roast generation endpoint handler

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tracing::debug;

use super::request::{validate_generate_roast_request, GenerateRoastRequest};
use super::response::RoastResult;
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{success_json, Capability, FailureMessages, StageError};
use crate::gateway::{presets, Part};
use crate::vision::ImageLimits;

const FAILURE: &str = "Failed to generate roast. Please try again.";

/// POST /api/generate-roast
#[derive(Debug, Default)]
pub struct GenerateRoast;

#[async_trait]
impl Capability for GenerateRoast {
    const NAME: &'static str = "generate-roast";
    const MESSAGES: FailureMessages = FailureMessages::gemini(FAILURE, None);

    type Input = GenerateRoastRequest;
    type Output = RoastResult;

    fn validate(&self, body: &Value, _limits: &ImageLimits) -> Result<GenerateRoastRequest, ApiError> {
        validate_generate_roast_request(body)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: GenerateRoastRequest,
    ) -> Result<RoastResult, StageError> {
        debug!(
            "Roasting '{}' with {} fail point(s)",
            input.costume_type,
            input.fail_points.len()
        );
        let prompt = state
            .prompts
            .render(
                "generate-roast",
                &[
                    ("costumeType", input.costume_type.into()),
                    ("failPoints", input.fail_points.into()),
                    ("analysis", input.analysis.into()),
                ],
            )
            .await?;

        let response = state
            .gateway
            .vision()
            .generate(vec![Part::text(prompt)], presets::ROAST)
            .await?;

        let roast = response.text().trim().to_string();
        if roast.is_empty() {
            return Err(ApiError::ParseError(FAILURE.to_string()).into());
        }
        Ok(RoastResult { roast })
    }

    fn respond(&self, output: RoastResult) -> Response {
        success_json(output)
    }
}
