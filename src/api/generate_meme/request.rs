// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Meme generation request validation

use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::require_object;

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateMemeRequest {
    pub roast_text: String,
}

/// Validate a POST /api/generate-meme body. Any `image` field is ignored;
/// memes are drawn from scratch.
pub fn validate_generate_meme_request(body: &Value) -> Result<GenerateMemeRequest, ApiError> {
    let obj = require_object(body)?;
    let roast_text = obj
        .get("roastText")
        .and_then(Value::as_str)
        .ok_or_else(|| ApiError::validation("roastText", "roastText is required"))?;

    if roast_text.trim().is_empty() {
        return Err(ApiError::validation("roastText", "roastText cannot be empty"));
    }

    Ok(GenerateMemeRequest {
        roast_text: roast_text.to_string(),
    })
}
