// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod api;
pub mod cli;
pub mod client;
pub mod config;
pub mod gateway;
pub mod prompts;
pub mod tts;
pub mod upstream;
pub mod version;
pub mod vision;

// Re-export main types
pub use api::{create_app, ApiError, AppState, Capability};
pub use client::{HttpRoastApi, RoastApi, RoastSession, SessionStage};
pub use config::{AppConfig, ConfigError, ServerArgs};
pub use gateway::{GeminiClient, GenerativeBackend, ModelGateway};
pub use prompts::{PromptLibrary, TemplateError, TemplateValue};
pub use tts::{FishAudioClient, SpeechRequest, SpeechSynthesizer, VoiceSelection};
pub use upstream::{FailureKind, UpstreamError};
pub use vision::{ImageError, ImageLimits, ImageMime, ImagePayload};
