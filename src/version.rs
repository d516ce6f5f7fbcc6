// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
// Version information for the costume roast service

/// Semantic version number
pub const VERSION_NUMBER: &str = env!("CARGO_PKG_VERSION");

/// Service name used in logs and health responses
pub const SERVICE_NAME: &str = "costume-roast";

/// Capabilities exposed by this build
pub const FEATURES: &[&str] = &[
    "costume-analysis",
    "roast-generation",
    "costume-generation",
    "meme-generation",
    "image-modification",
    "voice-narration",
];

/// Get formatted version string for logging
pub fn get_version_string() -> String {
    format!("Costume Roast {}", VERSION_NUMBER)
}

/// Get full version info for API responses
pub fn get_version_info() -> serde_json::Value {
    serde_json::json!({
        "service": SERVICE_NAME,
        "version": VERSION_NUMBER,
        "features": FEATURES,
    })
}
