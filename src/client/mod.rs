// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Client side of the roast flow: upload checks, HTTP access and the
//! session state machine

pub mod api;
pub mod session;
pub mod state;
pub mod upload;

pub use api::{ClientError, HttpRoastApi, RoastApi, DEFAULT_API_URL};
pub use session::RoastSession;
pub use state::{AudioState, MemeState, ModificationState, RoastReady, SessionStage};
pub use upload::{prepare_upload, UploadError, ACCEPTED_UPLOAD_TYPES};
