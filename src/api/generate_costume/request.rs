// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Improved-costume request validation

use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::{optional_string, require_object, required_string};
use crate::vision::{validate_base64_image, ImageLimits, ImagePayload};

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateCostumeInput {
    pub image: ImagePayload,
    pub costume_type: String,
    /// Caller-supplied instructions replacing the stock prompt
    pub improvement_prompt: Option<String>,
}

pub fn validate_generate_costume_request(
    body: &Value,
    limits: &ImageLimits,
) -> Result<GenerateCostumeInput, ApiError> {
    let obj = require_object(body)?;
    let image = required_string(obj, "image")?;
    let costume_type = required_string(obj, "costumeType")?.to_string();
    let image = validate_base64_image(image, limits)?;
    let improvement_prompt = optional_string(obj, "improvementPrompt")?.map(str::to_string);

    Ok(GenerateCostumeInput {
        image,
        costume_type,
        improvement_prompt,
    })
}
