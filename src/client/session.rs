// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! One user's walk through upload, analysis, roast and extras

use tracing::{debug, info, warn};

use super::api::{ClientError, RoastApi};
use super::state::{AudioState, MemeState, ModificationState, RoastReady, SessionStage};
use super::upload::{prepare_upload, UploadError};
use crate::api::modify_image::ConversationTurn;
use crate::tts::VoiceSelection;
use crate::vision::ImageLimits;

/// Drives a [`RoastApi`] through the session stages
///
/// Operations that do not apply to the current stage are no-ops and report
/// `Ok(false)`.
pub struct RoastSession<A: RoastApi> {
    api: A,
    limits: ImageLimits,
    stage: SessionStage,
}

impl<A: RoastApi> RoastSession<A> {
    pub fn new(api: A) -> Self {
        Self::with_limits(api, ImageLimits::default())
    }

    pub fn with_limits(api: A, limits: ImageLimits) -> Self {
        Self {
            api,
            limits,
            stage: SessionStage::Idle,
        }
    }

    pub fn stage(&self) -> &SessionStage {
        &self.stage
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn ready(&self) -> Option<&RoastReady> {
        match &self.stage {
            SessionStage::RoastReady(ready) => Some(ready),
            _ => None,
        }
    }

    fn ready_mut(&mut self) -> Option<&mut RoastReady> {
        match &mut self.stage {
            SessionStage::RoastReady(ready) => Some(ready),
            _ => None,
        }
    }

    /// Accept a new picture, discarding everything from the previous one
    pub fn upload(&mut self, bytes: &[u8], declared_mime: &str) -> Result<(), UploadError> {
        let image = prepare_upload(bytes, declared_mime, &self.limits)?;
        debug!("Upload accepted ({} bytes)", bytes.len());
        self.stage = SessionStage::Uploaded { image };
        Ok(())
    }

    /// Upload, then analyze and roast
    pub async fn upload_and_roast(
        &mut self,
        bytes: &[u8],
        declared_mime: &str,
    ) -> Result<(), UploadError> {
        self.upload(bytes, declared_mime)?;
        self.advance().await;
        Ok(())
    }

    /// Analyze and roast a fresh upload. Runs once per upload; failures are
    /// recorded in the stage and not retried.
    pub async fn advance(&mut self) {
        let image = match std::mem::take(&mut self.stage) {
            SessionStage::Uploaded { image } => image,
            other => {
                self.stage = other;
                return;
            }
        };

        self.stage = SessionStage::Analyzing {
            image: image.clone(),
        };
        let analysis = match self.api.analyze(&image).await {
            Ok(analysis) => analysis,
            Err(e) => {
                warn!("Analysis failed: {}", e);
                self.stage = SessionStage::AnalysisFailed {
                    image,
                    error: e.user_message(),
                };
                return;
            }
        };
        info!("Costume identified as '{}'", analysis.costume_type);

        self.stage = SessionStage::RoastGenerating {
            image: image.clone(),
            analysis: analysis.clone(),
        };
        self.stage = match self.api.generate_roast(&analysis).await {
            Ok(result) => SessionStage::RoastReady(Box::new(RoastReady::new(
                image,
                analysis,
                result.roast,
            ))),
            Err(e) => {
                warn!("Roast generation failed: {}", e);
                SessionStage::RoastFailed {
                    image,
                    analysis,
                    error: e.user_message(),
                }
            }
        };
    }

    /// Narrate the roast. Ignored unless audio is idle.
    pub async fn play_audio(&mut self, voice: VoiceSelection) -> Result<bool, ClientError> {
        let text = match self.ready_mut() {
            Some(ready) if ready.audio == AudioState::Idle => {
                ready.audio = AudioState::Loading { voice };
                ready.roast.clone()
            }
            _ => return Ok(false),
        };

        let result = self.api.generate_audio(&text, voice).await;
        let Some(ready) = self.ready_mut() else {
            return Ok(false);
        };
        match result {
            Ok(clip) => {
                debug!("Playing {} byte clip as {}", clip.len(), voice);
                ready.audio = AudioState::Playing { voice, clip };
                Ok(true)
            }
            Err(e) => {
                ready.audio = AudioState::Idle;
                Err(e)
            }
        }
    }

    /// Stop and discard the current clip
    pub fn stop_audio(&mut self) {
        if let Some(ready) = self.ready_mut() {
            ready.audio = AudioState::Idle;
        }
    }

    /// Playback reached the end of the clip
    pub fn finish_playback(&mut self) {
        if let Some(ready) = self.ready_mut() {
            if matches!(ready.audio, AudioState::Playing { .. }) {
                ready.audio = AudioState::Idle;
            }
        }
    }

    pub async fn request_meme(&mut self) -> Result<bool, ClientError> {
        let roast = match self.ready_mut() {
            Some(ready) => {
                ready.meme = MemeState::Generating;
                ready.roast.clone()
            }
            None => return Ok(false),
        };

        let result = self.api.generate_meme(&roast).await;
        let Some(ready) = self.ready_mut() else {
            return Ok(false);
        };
        match result {
            Ok(meme) => {
                ready.meme = MemeState::Ready { image: meme.image };
                Ok(true)
            }
            Err(e) => {
                ready.meme = MemeState::Failed {
                    error: e.user_message(),
                };
                Err(e)
            }
        }
    }

    /// Ask for a change to the current image. Clears any displayed meme.
    pub async fn request_modification(&mut self, prompt: &str) -> Result<bool, ClientError> {
        let (image, history) = match self.ready_mut() {
            Some(ready) => {
                ready.meme = MemeState::None;
                ready.modification = ModificationState::Pending {
                    prompt: prompt.to_string(),
                };
                (ready.current_image().to_string(), ready.history.clone())
            }
            None => return Ok(false),
        };

        let result = self.api.modify_image(&image, prompt, &history).await;
        let Some(ready) = self.ready_mut() else {
            return Ok(false);
        };
        match result {
            Ok(modified) => {
                ready.history.push(ConversationTurn {
                    role: "user".to_string(),
                    content: prompt.to_string(),
                });
                ready.history.push(ConversationTurn {
                    role: "assistant".to_string(),
                    content: modified.analysis.clone(),
                });
                if let Some(image) = &modified.modified_image_data {
                    ready.modified_image = Some(image.clone());
                }
                ready.modification = ModificationState::Ready {
                    image: modified.modified_image_data,
                    analysis: modified.analysis,
                };
                Ok(true)
            }
            Err(e) => {
                ready.modification = ModificationState::Failed {
                    error: e.user_message(),
                };
                Err(e)
            }
        }
    }

    /// Render a well-made version of the uploaded costume
    pub async fn request_improved_costume(
        &mut self,
        improvement_prompt: Option<&str>,
    ) -> Result<bool, ClientError> {
        let (image, costume_type) = match self.ready() {
            Some(ready) => (ready.image.clone(), ready.analysis.costume_type.clone()),
            None => return Ok(false),
        };

        let artifact = self
            .api
            .generate_costume(&image, &costume_type, improvement_prompt)
            .await?;
        if let Some(ready) = self.ready_mut() {
            ready.improved_costume = Some(artifact);
        }
        Ok(true)
    }
}
