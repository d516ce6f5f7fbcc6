// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Costume analysis endpoint
//!
//! Provides POST /api/analyze: identifies the attempted costume and lists
//! what is wrong with it.

pub mod handler;
pub mod request;
pub mod response;

pub use handler::Analyze;
pub use request::{validate_analyze_request, AnalyzeInput};
pub use response::{parse_analysis, CostumeAnalysis};
