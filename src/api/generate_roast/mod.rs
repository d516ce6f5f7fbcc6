// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Roast generation endpoint
//!
//! Provides POST /api/generate-roast: turns a costume analysis into a short,
//! shareable roast.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::GenerateRoast;
pub use request::{validate_generate_roast_request, GenerateRoastRequest};
pub use response::RoastResult;
