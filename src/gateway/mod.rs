// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Access to the vision/text model and the image-generation model

pub mod client;
pub mod presets;
pub mod types;

use std::sync::Arc;
use tracing::debug;

pub use client::{GeminiClient, GenerativeBackend, DEFAULT_GEMINI_ENDPOINT};
#[cfg(test)]
pub use client::MockGenerativeBackend;
pub use presets::GenerationPreset;
pub use types::{GenerateContentRequest, GenerateContentResponse, InlineData, Part};

use crate::upstream::UpstreamError;

pub const DEFAULT_VISION_MODEL: &str = "gemini-2.0-flash-exp";
pub const DEFAULT_IMAGE_MODEL: &str = "gemini-2.0-flash-exp-image-generation";

/// Shared, immutable handle to both models
#[derive(Clone)]
pub struct ModelGateway {
    backend: Arc<dyn GenerativeBackend>,
    vision_model: String,
    image_model: String,
}

/// A model name bound to the backend that serves it
pub struct ModelHandle<'a> {
    backend: &'a dyn GenerativeBackend,
    model: &'a str,
}

impl ModelGateway {
    pub fn new(
        backend: Arc<dyn GenerativeBackend>,
        vision_model: impl Into<String>,
        image_model: impl Into<String>,
    ) -> Self {
        Self {
            backend,
            vision_model: vision_model.into(),
            image_model: image_model.into(),
        }
    }

    /// Model used for analysis, roasts and modification narratives
    pub fn vision(&self) -> ModelHandle<'_> {
        ModelHandle {
            backend: self.backend.as_ref(),
            model: &self.vision_model,
        }
    }

    /// Model used to synthesize images
    pub fn image(&self) -> ModelHandle<'_> {
        ModelHandle {
            backend: self.backend.as_ref(),
            model: &self.image_model,
        }
    }
}

impl ModelHandle<'_> {
    pub fn model(&self) -> &str {
        self.model
    }

    pub async fn generate(
        &self,
        parts: Vec<Part>,
        preset: GenerationPreset,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        debug!(
            "Calling model {} with {} part(s), temperature={}",
            self.model,
            parts.len(),
            preset.temperature
        );
        let request = GenerateContentRequest::user(parts, preset);
        let response = self.backend.generate_content(self.model, &request).await?;

        // Blocks arrive as 200 responses; surface them as failures
        if let Some(reason) = response.block_reason() {
            return Err(UpstreamError::blocked("gemini", reason));
        }
        Ok(response)
    }
}
