// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Narration request types and validation

use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::{optional_number, optional_string, require_object};
use crate::tts::{SpeechRequest, VoiceSelection, AUDIO_FORMATS};

/// Validated body of POST /api/generate-audio
#[derive(Debug, Clone, PartialEq)]
pub struct GenerateAudioRequest {
    pub speech: SpeechRequest,
}

pub fn validate_generate_audio_request(body: &Value) -> Result<GenerateAudioRequest, ApiError> {
    let obj = require_object(body)?;

    let text = obj
        .get("text")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or_else(|| {
            ApiError::validation("text", "Text is required and must be a non-empty string")
        })?;

    let mut speech = SpeechRequest::new(text);

    if let Some(format) = optional_string(obj, "format")? {
        if !AUDIO_FORMATS.contains(&format) {
            return Err(ApiError::validation(
                "format",
                format!("format must be one of: {}", AUDIO_FORMATS.join(", ")),
            ));
        }
        speech.format = format.to_string();
    }
    if let Some(temperature) = optional_number(obj, "temperature")? {
        speech.temperature = temperature as f32;
    }
    if let Some(top_p) = optional_number(obj, "top_p")? {
        speech.top_p = top_p as f32;
    }

    // An explicit reference id wins over a named voice
    speech.reference_id = match optional_string(obj, "reference_id")? {
        Some(id) => Some(id.to_string()),
        None => optional_string(obj, "voice")?
            .map(|v| {
                v.parse::<VoiceSelection>()
                    .map(|voice| voice.reference_id().to_string())
                    .map_err(|e| ApiError::validation("voice", e))
            })
            .transpose()?,
    };

    Ok(GenerateAudioRequest { speech })
}
