// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Improved-costume response types

use serde::{Deserialize, Serialize};

/// A generated image and the instructions that produced it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GeneratedArtifact {
    /// `data:<mime>;base64,<data>`
    pub image: String,
    pub prompt: String,
}
