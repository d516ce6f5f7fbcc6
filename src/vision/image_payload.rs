// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Image payload normalization for data-URL and bare base64 inputs
//!
//! Two entry points share the same pattern matching:
//! - [`validate_base64_image`] is strict and is what request validators call.
//! - [`parse_image_data`] is lenient and never fails; it defaults to JPEG.

use std::fmt;
use std::sync::OnceLock;

use image::ImageFormat;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

/// Default ceiling for decoded image size, in megabytes
pub const DEFAULT_MAX_IMAGE_SIZE_MB: usize = 20;

const BYTES_PER_MB: usize = 1024 * 1024;

/// Base64 prefixes of the supported formats' magic bytes
const BASE64_SIGNATURES: &[(&str, ImageMime)] = &[
    ("/9j/", ImageMime::Jpeg),
    ("iVBORw", ImageMime::Png),
    ("UklGR", ImageMime::Webp),
];

fn data_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^data:([A-Za-z\-+/]+);base64,(.+)$").expect("valid data-url regex"))
}

fn base64_charset_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9+/]*={0,2}$").expect("valid base64 regex"))
}

/// Errors raised while normalizing an image payload
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ImageError {
    #[error("Image data is required")]
    Missing,

    #[error("Invalid base64 image format")]
    Format,

    #[error("Image format not supported. Allowed: {}", ImageMime::allowed_list())]
    UnsupportedFormat { mime_type: String },

    #[error("Invalid base64 encoding")]
    Encoding,

    #[error("Image too large. Max size: {}MB", .max / BYTES_PER_MB)]
    SizeLimit { size: usize, max: usize },
}

/// Image encodings accepted by every endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ImageMime {
    #[serde(rename = "image/jpeg")]
    Jpeg,
    #[serde(rename = "image/png")]
    Png,
    #[serde(rename = "image/webp")]
    Webp,
}

impl ImageMime {
    pub const ALL: [ImageMime; 3] = [ImageMime::Jpeg, ImageMime::Png, ImageMime::Webp];

    pub fn as_str(&self) -> &'static str {
        match self {
            ImageMime::Jpeg => "image/jpeg",
            ImageMime::Png => "image/png",
            ImageMime::Webp => "image/webp",
        }
    }

    pub fn from_mime(mime: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|m| m.as_str() == mime)
    }

    pub fn from_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(ImageMime::Jpeg),
            ImageFormat::Png => Some(ImageMime::Png),
            ImageFormat::WebP => Some(ImageMime::Webp),
            _ => None,
        }
    }

    fn allowed_list() -> String {
        Self::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ImageMime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Size ceiling applied to incoming images
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageLimits {
    pub max_bytes: usize,
}

impl ImageLimits {
    pub fn from_megabytes(mb: usize) -> Self {
        Self {
            max_bytes: mb * BYTES_PER_MB,
        }
    }
}

impl Default for ImageLimits {
    fn default() -> Self {
        Self::from_megabytes(DEFAULT_MAX_IMAGE_SIZE_MB)
    }
}

/// A validated image ready to be forwarded to a model
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImagePayload {
    pub raw_base64: String,
    pub mime_type: ImageMime,
    pub size_bytes: usize,
}

impl ImagePayload {
    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type, self.raw_base64)
    }
}

/// Output of the lenient parse path; the mime type is not checked against the allow-list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedImage {
    pub base64: String,
    pub mime_type: String,
}

/// Approximate decoded length of a base64 string
pub fn estimated_decoded_len(base64_len: usize) -> usize {
    (base64_len * 3).div_ceil(4)
}

/// Infer the image type from the leading characters of a base64 payload
pub fn detect_mime_type(base64: &str) -> Option<ImageMime> {
    BASE64_SIGNATURES
        .iter()
        .find(|(signature, _)| base64.starts_with(signature))
        .map(|&(_, mime)| mime)
}

/// Split a data-URL into (mime, payload). `None` when the input is not a well-formed data-URL.
fn split_data_url(input: &str) -> Option<(&str, &str)> {
    let captures = data_url_regex().captures(input)?;
    let mime = captures.get(1)?.as_str();
    let payload = captures.get(2)?.as_str();
    Some((mime, payload))
}

/// Strictly validate an image given as a data-URL or bare base64.
///
/// Rules run in order and the first failure is returned: presence, data-URL
/// shape, size ceiling, mime allow-list, base64 character set.
pub fn validate_base64_image(input: &str, limits: &ImageLimits) -> Result<ImagePayload, ImageError> {
    if input.is_empty() {
        return Err(ImageError::Missing);
    }

    let (mime, payload) = if input.starts_with("data:") {
        let (mime, payload) = split_data_url(input).ok_or(ImageError::Format)?;
        (ImageMime::from_mime(mime).ok_or_else(|| mime.to_string()), payload)
    } else {
        (detect_mime_type(input).ok_or_else(String::new), input)
    };

    let size_bytes = estimated_decoded_len(payload.len());
    if size_bytes > limits.max_bytes {
        return Err(ImageError::SizeLimit {
            size: size_bytes,
            max: limits.max_bytes,
        });
    }

    let mime_type = mime.map_err(|mime_type| ImageError::UnsupportedFormat { mime_type })?;

    if !base64_charset_regex().is_match(payload) {
        return Err(ImageError::Encoding);
    }

    Ok(ImagePayload {
        raw_base64: payload.to_string(),
        mime_type,
        size_bytes,
    })
}

/// Lenient parse: extracts mime and payload, defaulting to JPEG for unknown bare base64
pub fn parse_image_data(input: &str) -> ParsedImage {
    if input.starts_with("data:") {
        if let Some((mime, payload)) = split_data_url(input) {
            return ParsedImage {
                base64: payload.to_string(),
                mime_type: mime.to_string(),
            };
        }
    }

    let mime = detect_mime_type(input).unwrap_or(ImageMime::Jpeg);
    ParsedImage {
        base64: input.to_string(),
        mime_type: mime.as_str().to_string(),
    }
}

/// Detect a supported image format from raw magic bytes
pub fn detect_format(bytes: &[u8]) -> Option<ImageMime> {
    match bytes {
        // JPEG: FF D8 FF
        [0xFF, 0xD8, 0xFF, ..] => Some(ImageMime::Jpeg),
        // PNG: 89 50 4E 47
        [0x89, 0x50, 0x4E, 0x47, ..] => Some(ImageMime::Png),
        // WebP: RIFF .... WEBP
        [0x52, 0x49, 0x46, 0x46, _, _, _, _, 0x57, 0x45, 0x42, 0x50, ..] => Some(ImageMime::Webp),
        _ => image::guess_format(bytes).ok().and_then(ImageMime::from_format),
    }
}
