// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::vision::ImageError;

/// Body of every failed request
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    ValidationError {
        field: String,
        message: String,
    },
    InvalidImage(ImageError),
    UpstreamAuth(String),
    UpstreamRateLimit(String),
    ContentPolicy(String),
    InvalidParameters(String),
    NoImageProduced(String),
    ParseError(String),
    Configuration(String),
    InternalError(String),
}

impl ApiError {
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        ApiError::ValidationError {
            field: field.to_string(),
            message: message.into(),
        }
    }

    /// Message safe to show to the caller
    pub fn message(&self) -> String {
        match self {
            ApiError::ValidationError { message, .. } => message.clone(),
            ApiError::InvalidImage(e) => e.to_string(),
            ApiError::UpstreamAuth(msg)
            | ApiError::UpstreamRateLimit(msg)
            | ApiError::ContentPolicy(msg)
            | ApiError::InvalidParameters(msg)
            | ApiError::NoImageProduced(msg)
            | ApiError::ParseError(msg)
            | ApiError::Configuration(msg)
            | ApiError::InternalError(msg) => msg.clone(),
        }
    }

    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            success: false,
            error: self.message(),
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::ValidationError { .. }
            | ApiError::InvalidImage(_)
            | ApiError::ContentPolicy(_)
            | ApiError::InvalidParameters(_) => 400,
            ApiError::UpstreamRateLimit(_) => 429,
            ApiError::UpstreamAuth(_)
            | ApiError::NoImageProduced(_)
            | ApiError::ParseError(_)
            | ApiError::Configuration(_)
            | ApiError::InternalError(_) => 500,
        }
    }
}

impl From<ImageError> for ApiError {
    fn from(err: ImageError) -> Self {
        ApiError::InvalidImage(err)
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::ValidationError { field, message } => {
                write!(f, "Validation error for {}: {}", field, message)
            }
            ApiError::InvalidImage(e) => write!(f, "Invalid image: {}", e),
            ApiError::UpstreamAuth(msg) => write!(f, "Upstream authentication failed: {}", msg),
            ApiError::UpstreamRateLimit(msg) => write!(f, "Upstream rate limited: {}", msg),
            ApiError::ContentPolicy(msg) => write!(f, "Content policy: {}", msg),
            ApiError::InvalidParameters(msg) => write!(f, "Invalid parameters: {}", msg),
            ApiError::NoImageProduced(msg) => write!(f, "No image produced: {}", msg),
            ApiError::ParseError(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Configuration(msg) => write!(f, "Configuration error: {}", msg),
            ApiError::InternalError(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self.to_response())).into_response()
    }
}
