// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Meme generation endpoint
//!
//! Provides POST /api/generate-meme: renders a fresh meme image captioned
//! with the roast. Each call is independent.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::GenerateMeme;
pub use request::{validate_generate_meme_request, GenerateMemeRequest};
pub use response::MemeImage;
