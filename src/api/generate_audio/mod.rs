// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roast narration endpoint
//!
//! Provides POST /api/generate-audio: synthesizes speech with a celebrity
//! voice and returns the encoded audio bytes directly.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::GenerateAudio;
pub use request::{validate_generate_audio_request, GenerateAudioRequest};
pub use response::AudioClip;
