// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Costume analysis request validation

use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::{require_object, required_string};
use crate::vision::{validate_base64_image, ImageLimits, ImagePayload};

#[derive(Debug, Clone, PartialEq)]
pub struct AnalyzeInput {
    pub image: ImagePayload,
}

/// Validate a POST /api/analyze body
///
/// `image` must be a non-empty data-URL or bare base64 string that passes
/// the image normalizer.
pub fn validate_analyze_request(body: &Value, limits: &ImageLimits) -> Result<AnalyzeInput, ApiError> {
    let obj = require_object(body)?;
    let image = required_string(obj, "image")?;
    let image = validate_base64_image(image, limits)?;
    Ok(AnalyzeInput { image })
}
