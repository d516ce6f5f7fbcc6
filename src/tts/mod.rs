// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Text-to-speech for narrating roasts

pub mod client;
pub mod voices;

pub use client::{
    FishAudioClient, SpeechRequest, SpeechSynthesizer, AUDIO_FORMATS, DEFAULT_FISH_AUDIO_ENDPOINT,
};
#[cfg(test)]
pub use client::MockSpeechSynthesizer;
pub use voices::{VoiceInfo, VoiceSelection};
