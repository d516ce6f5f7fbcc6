// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::Response,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};

use super::analyze::Analyze;
use super::generate_audio::GenerateAudio;
use super::generate_costume::GenerateCostume;
use super::generate_meme::GenerateMeme;
use super::generate_roast::GenerateRoast;
use super::modify_image::ModifyImage;
use super::pipeline::{handle, success_json};
use crate::config::AppConfig;
use crate::gateway::{GeminiClient, ModelGateway};
use crate::prompts::PromptLibrary;
use crate::tts::{FishAudioClient, SpeechSynthesizer, VoiceSelection};
use crate::version::{SERVICE_NAME, VERSION_NUMBER};
use crate::vision::ImageLimits;

/// Room for the JSON envelope around a maximum-size base64 image
const BODY_OVERHEAD_BYTES: usize = 1024 * 1024;

/// Shared, read-only state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub gateway: ModelGateway,
    /// `None` when no TTS key is configured
    pub speech: Option<Arc<dyn SpeechSynthesizer>>,
    pub prompts: PromptLibrary,
    pub limits: ImageLimits,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let gemini = GeminiClient::new(&config.gemini_endpoint, &config.gemini_api_key)?;
        let gateway = ModelGateway::new(
            Arc::new(gemini),
            config.vision_model.clone(),
            config.image_model.clone(),
        );

        let speech: Option<Arc<dyn SpeechSynthesizer>> = match &config.fish_audio_api_key {
            Some(key) => Some(Arc::new(FishAudioClient::new(&config.fish_audio_endpoint, key)?)),
            None => {
                warn!("FISH_AUDIO_API_KEY not set; audio generation disabled");
                None
            }
        };

        info!(
            "Models: vision={} image={}; prompts from {}",
            config.vision_model,
            config.image_model,
            config.prompts_dir.display()
        );

        Ok(Self {
            gateway,
            speech,
            prompts: PromptLibrary::new(config.prompts_dir.clone()),
            limits: config.limits,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthResponse {
    pub status: String,
    pub service: String,
    pub version: String,
    pub audio_enabled: bool,
}

/// Largest request body accepted, derived from the image ceiling
pub fn body_limit(limits: &ImageLimits) -> usize {
    limits.max_bytes.div_ceil(3) * 4 + BODY_OVERHEAD_BYTES
}

pub fn create_app(state: Arc<AppState>) -> Router {
    let body_limit = body_limit(&state.limits);

    Router::new()
        .route("/health", get(health_handler))
        .route("/api/voices", get(voices_handler))
        .route("/api/analyze", post(handle::<Analyze>))
        .route("/api/generate-roast", post(handle::<GenerateRoast>))
        .route("/api/generate-costume", post(handle::<GenerateCostume>))
        .route("/api/generate-meme", post(handle::<GenerateMeme>))
        .route("/api/modify-image", post(handle::<ModifyImage>))
        .route("/api/generate-audio", post(handle::<GenerateAudio>))
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

pub async fn start_server(config: AppConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(config.listen_addr).await?;
    info!("API server listening on {}", config.listen_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

async fn health_handler(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        service: SERVICE_NAME.to_string(),
        version: VERSION_NUMBER.to_string(),
        audio_enabled: state.speech.is_some(),
    })
}

async fn voices_handler() -> Response {
    success_json(VoiceSelection::catalog())
}
