// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roast generation request types and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::{require_object, required_string, string_array};

/// Request for POST /api/generate-roast
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRoastRequest {
    /// What the costume is trying to be
    pub costume_type: String,
    /// Observed problems; may be empty
    pub fail_points: Vec<String>,
    /// Overall assessment from the analysis step
    pub analysis: String,
}

pub fn validate_generate_roast_request(body: &Value) -> Result<GenerateRoastRequest, ApiError> {
    let obj = require_object(body)?;
    let costume_type = required_string(obj, "costumeType")?.to_string();
    let fail_points = string_array(obj, "failPoints")?;
    let analysis = required_string(obj, "analysis")?.to_string();

    Ok(GenerateRoastRequest {
        costume_type,
        fail_points,
        analysis,
    })
}
