// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Costume analysis endpoint handler

use async_trait::async_trait;
use axum::response::Response;
use serde_json::Value;
use tracing::{debug, warn};

use super::request::{validate_analyze_request, AnalyzeInput};
use super::response::{parse_analysis, CostumeAnalysis};
use crate::api::errors::ApiError;
use crate::api::http_server::AppState;
use crate::api::pipeline::{success_json, Capability, FailureMessages, StageError};
use crate::gateway::{presets, Part};
use crate::vision::ImageLimits;

pub const PARSE_FAILURE: &str = "Failed to parse costume analysis. Please try again.";

/// POST /api/analyze
///
/// Sends the image with the `analyze` instructions to the vision model and
/// parses the JSON it answers with.
#[derive(Debug, Default)]
pub struct Analyze;

#[async_trait]
impl Capability for Analyze {
    const NAME: &'static str = "analyze";
    const MESSAGES: FailureMessages =
        FailureMessages::gemini("Failed to analyze costume. Please try again.", None);

    type Input = AnalyzeInput;
    type Output = CostumeAnalysis;

    fn validate(&self, body: &Value, limits: &ImageLimits) -> Result<AnalyzeInput, ApiError> {
        validate_analyze_request(body, limits)
    }

    async fn execute(
        &self,
        state: &AppState,
        input: AnalyzeInput,
    ) -> Result<CostumeAnalysis, StageError> {
        let instructions = state.prompts.render("analyze", &[]).await?;
        debug!(
            "Analyzing {} image ({} bytes)",
            input.image.mime_type, input.image.size_bytes
        );

        let parts = vec![
            Part::inline(input.image.mime_type.as_str(), input.image.raw_base64),
            Part::text(instructions),
        ];
        let response = state.gateway.vision().generate(parts, presets::ANALYSIS).await?;
        let text = response.text();

        parse_analysis(&text).ok_or_else(|| {
            warn!("Unparseable analysis reply: {}", text);
            ApiError::ParseError(PARSE_FAILURE.to_string()).into()
        })
    }

    fn respond(&self, output: CostumeAnalysis) -> Response {
        success_json(output)
    }
}
