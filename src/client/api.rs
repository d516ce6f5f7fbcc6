// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Typed access to the roast HTTP API

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use std::time::Duration;
use thiserror::Error;
use tracing::debug;

use crate::api::analyze::CostumeAnalysis;
use crate::api::errors::ErrorResponse;
use crate::api::generate_costume::GeneratedArtifact;
use crate::api::generate_meme::MemeImage;
use crate::api::generate_roast::RoastResult;
use crate::api::modify_image::{ConversationTurn, ModifiedImage};
use crate::tts::VoiceSelection;

pub const DEFAULT_API_URL: &str = "http://localhost:3000";

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with `{success: false, error}`
    #[error("{message} (status {status})")]
    Api { status: u16, message: String },
}

impl ClientError {
    /// Text suitable for showing to the person using the client
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Api { message, .. } => message.clone(),
            ClientError::Http(_) => "Could not reach the roast service. Please try again.".to_string(),
        }
    }
}

/// Operations the client session needs from the server
#[async_trait]
pub trait RoastApi: Send + Sync {
    async fn analyze(&self, image: &str) -> Result<CostumeAnalysis, ClientError>;

    async fn generate_roast(&self, analysis: &CostumeAnalysis) -> Result<RoastResult, ClientError>;

    async fn generate_costume(
        &self,
        image: &str,
        costume_type: &str,
        improvement_prompt: Option<&str>,
    ) -> Result<GeneratedArtifact, ClientError>;

    async fn generate_meme(&self, roast_text: &str) -> Result<MemeImage, ClientError>;

    async fn modify_image(
        &self,
        image: &str,
        prompt: &str,
        history: &[ConversationTurn],
    ) -> Result<ModifiedImage, ClientError>;

    async fn generate_audio(&self, text: &str, voice: VoiceSelection) -> Result<Bytes, ClientError>;
}

#[derive(Deserialize)]
struct Envelope<T> {
    data: T,
}

/// [`RoastApi`] over HTTP
pub struct HttpRoastApi {
    client: Client,
    base_url: String,
}

impl HttpRoastApi {
    pub fn new(base_url: &str) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(120))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> Result<reqwest::Response, ClientError> {
        let url = format!("{}{}", self.base_url, path);
        debug!("POST {}", url);

        let response = self.client.post(&url).json(body).send().await?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let text = response.text().await.unwrap_or_default();
        let message = serde_json::from_str::<ErrorResponse>(&text)
            .map(|e| e.error)
            .unwrap_or(text);
        Err(ClientError::Api {
            status: status.as_u16(),
            message,
        })
    }

    async fn post_data<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl Serialize,
    ) -> Result<T, ClientError> {
        let envelope: Envelope<T> = self.post(path, body).await?.json().await?;
        Ok(envelope.data)
    }
}

#[async_trait]
impl RoastApi for HttpRoastApi {
    async fn analyze(&self, image: &str) -> Result<CostumeAnalysis, ClientError> {
        self.post_data("/api/analyze", &json!({ "image": image })).await
    }

    async fn generate_roast(&self, analysis: &CostumeAnalysis) -> Result<RoastResult, ClientError> {
        let body = json!({
            "costumeType": analysis.costume_type,
            "failPoints": analysis.fail_points,
            "analysis": analysis.overall_assessment,
        });
        self.post_data("/api/generate-roast", &body).await
    }

    async fn generate_costume(
        &self,
        image: &str,
        costume_type: &str,
        improvement_prompt: Option<&str>,
    ) -> Result<GeneratedArtifact, ClientError> {
        let body = json!({
            "image": image,
            "costumeType": costume_type,
            "improvementPrompt": improvement_prompt,
        });
        self.post_data("/api/generate-costume", &body).await
    }

    async fn generate_meme(&self, roast_text: &str) -> Result<MemeImage, ClientError> {
        self.post_data("/api/generate-meme", &json!({ "roastText": roast_text }))
            .await
    }

    async fn modify_image(
        &self,
        image: &str,
        prompt: &str,
        history: &[ConversationTurn],
    ) -> Result<ModifiedImage, ClientError> {
        let body = json!({
            "imageData": image,
            "prompt": prompt,
            "conversationHistory": history,
        });
        Ok(self.post("/api/modify-image", &body).await?.json().await?)
    }

    async fn generate_audio(&self, text: &str, voice: VoiceSelection) -> Result<Bytes, ClientError> {
        let body = json!({
            "text": text,
            "reference_id": voice.reference_id(),
        });
        Ok(self.post("/api/generate-audio", &body).await?.bytes().await?)
    }
}
