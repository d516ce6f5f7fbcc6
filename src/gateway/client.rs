// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Gemini client for `generateContent` over the Generative Language REST API

use anyhow::Result;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use tracing::{debug, info};

use super::types::{GenerateContentRequest, GenerateContentResponse};
use crate::upstream::UpstreamError;

pub const DEFAULT_GEMINI_ENDPOINT: &str = "https://generativelanguage.googleapis.com";

const PROVIDER: &str = "gemini";

/// Anything that can answer a `generateContent` call for a named model
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GenerativeBackend: Send + Sync {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError>;
}

// --- Google error envelope ---

#[derive(Deserialize)]
struct GoogleErrorEnvelope {
    error: GoogleError,
}

#[derive(Deserialize)]
struct GoogleError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: Option<String>,
}

/// Client for the Gemini REST API
pub struct GeminiClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(endpoint: &str, api_key: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        let endpoint = endpoint.trim_end_matches('/').to_string();
        info!("Gemini client configured: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_key: api_key.to_string(),
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

/// Build an [`UpstreamError`] from a non-success response body
fn error_from_body(status: u16, body: &str) -> UpstreamError {
    match serde_json::from_str::<GoogleErrorEnvelope>(body) {
        Ok(envelope) => UpstreamError::with_status(PROVIDER, status, envelope.error.message)
            .with_code(envelope.error.status),
        Err(_) => UpstreamError::with_status(PROVIDER, status, body.to_string()),
    }
}

#[async_trait]
impl GenerativeBackend for GeminiClient {
    async fn generate_content(
        &self,
        model: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, UpstreamError> {
        let url = format!("{}/v1beta/models/{}:generateContent", self.endpoint, model);
        debug!("Gemini generateContent POST {}", url);

        let response = self
            .client
            .post(&url)
            .header("x-goog-api-key", &self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| UpstreamError::transport(PROVIDER, &e))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(error_from_body(status.as_u16(), &text));
        }

        response
            .json()
            .await
            .map_err(|e| UpstreamError::new(PROVIDER, format!("invalid response body: {}", e)))
    }
}
