// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Conversational image modification endpoint
//!
//! Provides POST /api/modify-image: applies a free-text change request to
//! the costume photo and narrates what was changed.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::ModifyImage;
pub use request::{validate_modify_image_request, ConversationTurn, ModifyImageInput};
pub use response::{ModifiedImage, MODIFICATION_COMPLETE};
