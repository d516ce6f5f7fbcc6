// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Local checks on a picked file before anything is sent to the server

use base64::{engine::general_purpose::STANDARD, Engine as _};
use thiserror::Error;

use crate::vision::{detect_format, ImageLimits, ImageMime};

/// Declared types accepted from a file picker; `image/jpg` is a common alias
pub const ACCEPTED_UPLOAD_TYPES: &[&str] = &["image/jpeg", "image/jpg", "image/png", "image/webp"];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    #[error("Please upload a JPG, PNG, or WebP image (got {0})")]
    UnsupportedType(String),

    #[error("File is too large ({size} bytes). Maximum size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("File is empty")]
    Empty,
}

/// Check type and size, then encode as a data-URL
///
/// The data-URL carries the sniffed format when the bytes are recognizable,
/// otherwise the declared one.
pub fn prepare_upload(
    bytes: &[u8],
    declared_mime: &str,
    limits: &ImageLimits,
) -> Result<String, UploadError> {
    let declared = declared_mime.trim().to_ascii_lowercase();
    if !ACCEPTED_UPLOAD_TYPES.contains(&declared.as_str()) {
        return Err(UploadError::UnsupportedType(declared_mime.to_string()));
    }
    if bytes.is_empty() {
        return Err(UploadError::Empty);
    }
    if bytes.len() > limits.max_bytes {
        return Err(UploadError::TooLarge {
            size: bytes.len(),
            max: limits.max_bytes,
        });
    }

    let mime = detect_format(bytes)
        .or_else(|| ImageMime::from_mime(&declared))
        .unwrap_or(ImageMime::Jpeg);

    Ok(format!("data:{};base64,{}", mime, STANDARD.encode(bytes)))
}

/// Guess a mime type from a file extension
pub fn mime_for_path(path: &std::path::Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("webp") => "image/webp",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        _ => "application/octet-stream",
    }
}
