// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image modification request types and validation

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::api::errors::ApiError;
use crate::api::validation::{require_object, required_string};
use crate::vision::{validate_base64_image, ImageLimits, ImagePayload};

/// One earlier exchange in the modification conversation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ModifyImageInput {
    pub image: ImagePayload,
    pub prompt: String,
    pub history: Vec<ConversationTurn>,
}

impl ModifyImageInput {
    /// Earlier turns as `role: content` lines, oldest first
    pub fn history_transcript(&self) -> String {
        if self.history.is_empty() {
            return "(no earlier requests)".to_string();
        }
        self.history
            .iter()
            .map(|turn| format!("{}: {}", turn.role, turn.content))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

pub fn validate_modify_image_request(
    body: &Value,
    limits: &ImageLimits,
) -> Result<ModifyImageInput, ApiError> {
    let obj = require_object(body)?;
    let image = required_string(obj, "imageData")?;
    let prompt = required_string(obj, "prompt")?.to_string();

    let history = match obj.get("conversationHistory") {
        None | Some(Value::Null) => Vec::new(),
        Some(value) => serde_json::from_value::<Vec<ConversationTurn>>(value.clone()).map_err(|_| {
            ApiError::validation(
                "conversationHistory",
                "conversationHistory must be an array of {role, content} messages",
            )
        })?,
    };

    let image = validate_base64_image(image, limits)?;

    Ok(ModifyImageInput {
        image,
        prompt,
        history,
    })
}
