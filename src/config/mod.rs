// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Server configuration from flags and environment variables
//!
//! Every flag has an environment fallback; a `.env` file in the working
//! directory is loaded before parsing.

use clap::Parser;
use std::net::SocketAddr;
use std::path::PathBuf;
use thiserror::Error;

use crate::gateway::{DEFAULT_GEMINI_ENDPOINT, DEFAULT_IMAGE_MODEL, DEFAULT_VISION_MODEL};
use crate::prompts::DEFAULT_PROMPTS_DIR;
use crate::tts::DEFAULT_FISH_AUDIO_ENDPOINT;
use crate::vision::image_payload::DEFAULT_MAX_IMAGE_SIZE_MB;
use crate::vision::ImageLimits;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("{0} must be set")]
    MissingCredential(&'static str),

    #[error("Invalid listen address {0}")]
    InvalidAddress(String),

    #[error("MAX_IMAGE_SIZE_MB must be greater than zero")]
    InvalidImageLimit,
}

/// Costume roast API server
#[derive(Parser, Debug, Clone)]
#[command(name = "costume-roast")]
#[command(version)]
#[command(about = "HTTP API that analyzes, roasts and reimagines Halloween costumes", long_about = None)]
pub struct ServerArgs {
    /// Gemini API key
    #[arg(long, env = "GEMINI_API_KEY", hide_env_values = true)]
    pub gemini_api_key: Option<String>,

    /// Fish Audio API key; narration is disabled without it
    #[arg(long, env = "FISH_AUDIO_API_KEY", hide_env_values = true)]
    pub fish_audio_api_key: Option<String>,

    /// Largest accepted decoded image, in megabytes
    #[arg(long, env = "MAX_IMAGE_SIZE_MB", default_value_t = DEFAULT_MAX_IMAGE_SIZE_MB)]
    pub max_image_size_mb: usize,

    /// Directory holding the prompt templates
    #[arg(long, env = "PROMPTS_DIR", default_value = DEFAULT_PROMPTS_DIR)]
    pub prompts_dir: PathBuf,

    #[arg(long, env = "API_HOST", default_value = "0.0.0.0")]
    pub host: String,

    #[arg(long, env = "API_PORT", default_value_t = 3000)]
    pub port: u16,

    #[arg(long, env = "GEMINI_ENDPOINT", default_value = DEFAULT_GEMINI_ENDPOINT)]
    pub gemini_endpoint: String,

    /// Model used for analysis, roasts and modification narratives
    #[arg(long, env = "GEMINI_VISION_MODEL", default_value = DEFAULT_VISION_MODEL)]
    pub vision_model: String,

    /// Model used to synthesize images
    #[arg(long, env = "GEMINI_IMAGE_MODEL", default_value = DEFAULT_IMAGE_MODEL)]
    pub image_model: String,

    #[arg(long, env = "FISH_AUDIO_ENDPOINT", default_value = DEFAULT_FISH_AUDIO_ENDPOINT)]
    pub fish_audio_endpoint: String,
}

/// Validated settings the server runs with
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub gemini_api_key: String,
    pub fish_audio_api_key: Option<String>,
    pub limits: ImageLimits,
    pub prompts_dir: PathBuf,
    pub listen_addr: SocketAddr,
    pub gemini_endpoint: String,
    pub vision_model: String,
    pub image_model: String,
    pub fish_audio_endpoint: String,
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl TryFrom<ServerArgs> for AppConfig {
    type Error = ConfigError;

    fn try_from(args: ServerArgs) -> Result<Self, ConfigError> {
        let gemini_api_key = non_empty(args.gemini_api_key)
            .ok_or(ConfigError::MissingCredential("GEMINI_API_KEY"))?;

        if args.max_image_size_mb == 0 {
            return Err(ConfigError::InvalidImageLimit);
        }

        let addr = format!("{}:{}", args.host, args.port);
        let listen_addr = addr
            .parse::<SocketAddr>()
            .map_err(|_| ConfigError::InvalidAddress(addr))?;

        Ok(Self {
            gemini_api_key,
            fish_audio_api_key: non_empty(args.fish_audio_api_key),
            limits: ImageLimits::from_megabytes(args.max_image_size_mb),
            prompts_dir: args.prompts_dir,
            listen_addr,
            gemini_endpoint: args.gemini_endpoint,
            vision_model: args.vision_model,
            image_model: args.image_model,
            fish_audio_endpoint: args.fish_audio_endpoint,
        })
    }
}
