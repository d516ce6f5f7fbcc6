// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
pub mod analyze;
pub mod errors;
pub mod generate_audio;
pub mod generate_costume;
pub mod generate_meme;
pub mod generate_roast;
pub mod http_server;
pub mod modify_image;
pub mod pipeline;
pub mod validation;

pub use analyze::{Analyze, CostumeAnalysis};
pub use errors::{ApiError, ErrorResponse};
pub use generate_audio::{AudioClip, GenerateAudio};
pub use generate_costume::{GenerateCostume, GeneratedArtifact};
pub use generate_meme::{GenerateMeme, MemeImage};
pub use generate_roast::{GenerateRoast, RoastResult};
pub use http_server::{create_app, start_server, AppState, HealthResponse};
pub use modify_image::{ConversationTurn, ModifiedImage, ModifyImage};
pub use pipeline::{Capability, FailureMessages, StageError};
