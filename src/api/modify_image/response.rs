// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image modification response types

use serde::{Deserialize, Serialize};

pub const MODIFICATION_COMPLETE: &str = "Image modification complete.";

/// Flat response; unlike the other endpoints this one has no `data` envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModifiedImage {
    pub success: bool,
    /// Absent when the model only answered in text
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_image_data: Option<String>,
    pub analysis: String,
    pub message: String,
}
