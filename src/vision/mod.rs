// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Incoming image handling

pub mod image_payload;

pub use image_payload::{
    detect_format, detect_mime_type, parse_image_data, validate_base64_image, ImageError,
    ImageLimits, ImageMime, ImagePayload, ParsedImage,
};
