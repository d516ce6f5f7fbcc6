// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Improved-costume image endpoint
//!
//! Provides POST /api/generate-costume: re-renders the uploaded photo as a
//! well-made version of the same costume.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::GenerateCostume;
pub use request::{validate_generate_costume_request, GenerateCostumeInput};
pub use response::GeneratedArtifact;
