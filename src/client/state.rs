// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client session stages

use bytes::Bytes;

use crate::api::analyze::CostumeAnalysis;
use crate::api::generate_costume::GeneratedArtifact;
use crate::api::modify_image::ConversationTurn;
use crate::tts::VoiceSelection;

/// Where the session is in the upload -> analysis -> roast flow
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionStage {
    #[default]
    Idle,
    Uploaded {
        image: String,
    },
    Analyzing {
        image: String,
    },
    /// Analysis done and the roast not yet requested; `RoastSession::advance`
    /// moves on to `RoastGenerating` without stopping here
    Analyzed {
        image: String,
        analysis: CostumeAnalysis,
    },
    AnalysisFailed {
        image: String,
        error: String,
    },
    RoastGenerating {
        image: String,
        analysis: CostumeAnalysis,
    },
    RoastReady(Box<RoastReady>),
    RoastFailed {
        image: String,
        analysis: CostumeAnalysis,
        error: String,
    },
}

impl SessionStage {
    pub fn name(&self) -> &'static str {
        match self {
            SessionStage::Idle => "idle",
            SessionStage::Uploaded { .. } => "uploaded",
            SessionStage::Analyzing { .. } => "analyzing",
            SessionStage::Analyzed { .. } => "analyzed",
            SessionStage::AnalysisFailed { .. } => "analysis-failed",
            SessionStage::RoastGenerating { .. } => "roast-generating",
            SessionStage::RoastReady(_) => "roast-ready",
            SessionStage::RoastFailed { .. } => "roast-failed",
        }
    }

    pub fn analysis(&self) -> Option<&CostumeAnalysis> {
        match self {
            SessionStage::Analyzed { analysis, .. }
            | SessionStage::RoastGenerating { analysis, .. }
            | SessionStage::RoastFailed { analysis, .. } => Some(analysis),
            SessionStage::RoastReady(ready) => Some(&ready.analysis),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SessionStage::AnalysisFailed { error, .. } | SessionStage::RoastFailed { error, .. } => {
                Some(error)
            }
            _ => None,
        }
    }
}

/// Everything available once the roast exists
#[derive(Debug, Clone, PartialEq)]
pub struct RoastReady {
    pub image: String,
    pub analysis: CostumeAnalysis,
    pub roast: String,
    pub audio: AudioState,
    pub meme: MemeState,
    pub modification: ModificationState,
    /// Earlier modification exchanges, oldest first
    pub history: Vec<ConversationTurn>,
    /// Latest image produced by a modification
    pub modified_image: Option<String>,
    pub improved_costume: Option<GeneratedArtifact>,
}

impl RoastReady {
    pub fn new(image: String, analysis: CostumeAnalysis, roast: String) -> Self {
        Self {
            image,
            analysis,
            roast,
            audio: AudioState::Idle,
            meme: MemeState::None,
            modification: ModificationState::None,
            history: Vec::new(),
            modified_image: None,
            improved_costume: None,
        }
    }

    /// Image further modifications start from
    pub fn current_image(&self) -> &str {
        self.modified_image.as_deref().unwrap_or(&self.image)
    }
}

/// Narration playback; at most one clip at a time
#[derive(Debug, Clone, PartialEq, Default)]
pub enum AudioState {
    #[default]
    Idle,
    Loading {
        voice: VoiceSelection,
    },
    Playing {
        voice: VoiceSelection,
        clip: Bytes,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum MemeState {
    #[default]
    None,
    Generating,
    Ready {
        image: String,
    },
    Failed {
        error: String,
    },
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum ModificationState {
    #[default]
    None,
    Pending {
        prompt: String,
    },
    Ready {
        image: Option<String>,
        analysis: String,
    },
    Failed {
        error: String,
    },
}
