// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Narration response: raw audio bytes

use axum::{
    http::header,
    response::{IntoResponse, Response},
};
use bytes::Bytes;

#[derive(Debug, Clone, PartialEq)]
pub struct AudioClip {
    pub format: String,
    pub audio: Bytes,
}

impl AudioClip {
    pub fn content_type(&self) -> String {
        format!("audio/{}", self.format)
    }
}

impl IntoResponse for AudioClip {
    fn into_response(self) -> Response {
        (
            [
                (header::CONTENT_TYPE, self.content_type()),
                (header::CONTENT_LENGTH, self.audio.len().to_string()),
            ],
            self.audio,
        )
            .into_response()
    }
}
