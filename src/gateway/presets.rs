// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Fixed generation parameter bundles, one per kind of task

use serde::Serialize;

/// Generation parameters sent as Gemini's `generationConfig`
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationPreset {
    pub temperature: f32,
    pub top_p: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub top_k: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_output_tokens: Option<u32>,
    #[serde(skip_serializing_if = "no_modalities")]
    pub response_modalities: &'static [&'static str],
}

fn no_modalities(modalities: &&'static [&'static str]) -> bool {
    modalities.is_empty()
}

/// Costume analysis: low randomness, room for a structured answer
pub const ANALYSIS: GenerationPreset = GenerationPreset {
    temperature: 0.4,
    top_p: 0.95,
    top_k: Some(40),
    max_output_tokens: Some(500),
    response_modalities: &[],
};

/// Roast writing: high randomness, short output
pub const ROAST: GenerationPreset = GenerationPreset {
    temperature: 0.9,
    top_p: 0.95,
    top_k: Some(40),
    max_output_tokens: Some(300),
    response_modalities: &[],
};

/// Image synthesis and editing
pub const IMAGE: GenerationPreset = GenerationPreset {
    temperature: 0.7,
    top_p: 0.95,
    top_k: None,
    max_output_tokens: None,
    response_modalities: &["TEXT", "IMAGE"],
};
