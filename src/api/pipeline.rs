// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Shared request pipeline for every model-backed endpoint
//!
//! Each endpoint implements [`Capability`]: `validate` narrows the untyped
//! body, `execute` talks to the providers, `respond` shapes the success
//! payload. [`handle`] drives those stages and turns any failure into the
//! capability's own user-facing message.

use async_trait::async_trait;
use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::Value;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::errors::ApiError;
use super::http_server::{body_limit, AppState};
use crate::gateway::GenerateContentResponse;
use crate::prompts::TemplateError;
use crate::upstream::{FailureKind, UpstreamError};
use crate::vision::image_payload::estimated_decoded_len;
use crate::vision::{ImageError, ImageLimits};

pub const AUTH_MESSAGE: &str = "API configuration error. Please contact support.";
pub const BUSY_MESSAGE: &str = "Service is busy. Please try again in a moment.";
pub const MISSING_BODY_MESSAGE: &str = "Request body is required";
pub const INVALID_JSON_MESSAGE: &str = "Request body must be valid JSON";

/// User-facing text for each way a capability can fail
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FailureMessages {
    pub auth: &'static str,
    pub rate_limited: &'static str,
    /// `None` means policy blocks are reported as a generic failure
    pub content_policy: Option<&'static str>,
    pub invalid_parameters: Option<&'static str>,
    /// Provider answered with an unclassified error status; `None` uses `failure`
    pub provider_status: Option<&'static str>,
    pub failure: &'static str,
}

impl FailureMessages {
    /// Messages shared by the Gemini-backed capabilities
    pub const fn gemini(failure: &'static str, content_policy: Option<&'static str>) -> Self {
        Self {
            auth: AUTH_MESSAGE,
            rate_limited: BUSY_MESSAGE,
            content_policy,
            invalid_parameters: None,
            provider_status: None,
            failure,
        }
    }

    /// Maps a classified provider failure to the response the caller sees
    pub fn translate(&self, err: &UpstreamError) -> ApiError {
        match err.classify() {
            FailureKind::Auth => ApiError::UpstreamAuth(self.auth.to_string()),
            FailureKind::RateLimited => ApiError::UpstreamRateLimit(self.rate_limited.to_string()),
            FailureKind::ContentPolicy => match self.content_policy {
                Some(msg) => ApiError::ContentPolicy(msg.to_string()),
                None => ApiError::InternalError(self.failure.to_string()),
            },
            FailureKind::InvalidParameters => match self.invalid_parameters {
                Some(msg) => ApiError::InvalidParameters(msg.to_string()),
                None => ApiError::InternalError(self.failure.to_string()),
            },
            FailureKind::Other => match (self.provider_status, err.status) {
                (Some(msg), Some(_)) => ApiError::InternalError(msg.to_string()),
                _ => ApiError::InternalError(self.failure.to_string()),
            },
        }
    }
}

/// Anything that can go wrong after validation
#[derive(Debug, Error)]
pub enum StageError {
    #[error(transparent)]
    Api(#[from] ApiError),
    #[error(transparent)]
    Upstream(#[from] UpstreamError),
    #[error(transparent)]
    Image(#[from] ImageError),
    #[error(transparent)]
    Template(#[from] TemplateError),
}

impl StageError {
    pub fn into_api_error(self, messages: &FailureMessages) -> ApiError {
        match self {
            StageError::Api(e) => e,
            StageError::Image(e) => ApiError::from(e),
            StageError::Upstream(e) => messages.translate(&e),
            StageError::Template(_) => ApiError::InternalError(messages.failure.to_string()),
        }
    }
}

/// One model-backed endpoint
#[async_trait]
pub trait Capability: Default + Send + Sync + 'static {
    /// Used in logs
    const NAME: &'static str;
    const MESSAGES: FailureMessages;

    type Input: Send + 'static;
    type Output: Send + 'static;

    fn validate(&self, body: &Value, limits: &ImageLimits) -> Result<Self::Input, ApiError>;

    async fn execute(&self, state: &AppState, input: Self::Input)
        -> Result<Self::Output, StageError>;

    fn respond(&self, output: Self::Output) -> Response;
}

/// `{ "success": true, "data": ... }`
#[derive(Debug, Serialize)]
pub struct DataEnvelope<T> {
    pub success: bool,
    pub data: T,
}

pub fn success_json<T: Serialize>(data: T) -> Response {
    Json(DataEnvelope {
        success: true,
        data,
    })
    .into_response()
}

/// First generated image as a data-URL, or [`ApiError::NoImageProduced`]
pub fn generated_image(
    response: &GenerateContentResponse,
    failure: &str,
) -> Result<String, ApiError> {
    response
        .first_inline_image()
        .map(|image| image.to_data_url())
        .ok_or_else(|| {
            warn!("Model returned no image data");
            ApiError::NoImageProduced(failure.to_string())
        })
}

/// Error for a body that never reached the validator
///
/// Bodies over the router limit can only carry an image over the ceiling, so
/// they report the image size error. The reported size is a lower bound.
pub fn rejection_error(rejection: &JsonRejection, limits: &ImageLimits) -> ApiError {
    if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
        return ApiError::InvalidImage(ImageError::SizeLimit {
            size: estimated_decoded_len(body_limit(limits)),
            max: limits.max_bytes,
        });
    }

    match rejection {
        JsonRejection::JsonSyntaxError(_) | JsonRejection::JsonDataError(_) => {
            ApiError::validation("body", INVALID_JSON_MESSAGE)
        }
        _ => ApiError::validation("body", MISSING_BODY_MESSAGE),
    }
}

/// Axum handler for any capability
pub async fn handle<C: Capability>(
    State(state): State<Arc<AppState>>,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let request_id = Uuid::new_v4();
    let span = info_span!("capability", name = C::NAME, %request_id);
    run(&C::default(), &state, body).instrument(span).await
}

pub async fn run<C: Capability>(
    capability: &C,
    state: &AppState,
    body: Result<Json<Value>, JsonRejection>,
) -> Response {
    let body = match body {
        Ok(Json(body)) => body,
        Err(rejection) => {
            warn!("{} rejected unreadable body: {}", C::NAME, rejection);
            return rejection_error(&rejection, &state.limits).into_response();
        }
    };

    let input = match capability.validate(&body, &state.limits) {
        Ok(input) => input,
        Err(e) => {
            warn!("{} validation failed: {}", C::NAME, e);
            return e.into_response();
        }
    };

    match capability.execute(state, input).await {
        Ok(output) => {
            info!("{} completed", C::NAME);
            capability.respond(output)
        }
        Err(e) => {
            error!("{} failed: {}", C::NAME, e);
            e.into_api_error(&C::MESSAGES).into_response()
        }
    }
}
