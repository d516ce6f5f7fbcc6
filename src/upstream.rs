// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Failures reported by third-party providers and their classification
//!
//! Providers do not share an error schema. Classification reads the
//! structured signals we do get (HTTP status, Google RPC status, block
//! reasons) and only then falls back to matching substrings of the message.
//! The substring fallback is fragile: a provider rewording its messages
//! silently moves failures into [`FailureKind::Other`].

use thiserror::Error;

/// Coarse category of a provider failure, used to pick a response status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Auth,
    RateLimited,
    ContentPolicy,
    InvalidParameters,
    Other,
}

/// Error returned by any outbound provider call
#[derive(Debug, Clone, Error)]
#[error("{provider} error{}: {message}", .status.map(|s| format!(" ({})", s)).unwrap_or_default())]
pub struct UpstreamError {
    pub provider: &'static str,
    /// HTTP status of the provider response, if one was received
    pub status: Option<u16>,
    /// Provider specific status code, e.g. Google's `RESOURCE_EXHAUSTED`
    pub code: Option<String>,
    /// Set when the provider refused the request on safety grounds
    pub blocked: bool,
    pub message: String,
}

impl UpstreamError {
    pub fn new(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            provider,
            status: None,
            code: None,
            blocked: false,
            message: message.into(),
        }
    }

    pub fn with_status(provider: &'static str, status: u16, message: impl Into<String>) -> Self {
        Self {
            status: Some(status),
            ..Self::new(provider, message)
        }
    }

    pub fn with_code(mut self, code: Option<String>) -> Self {
        self.code = code;
        self
    }

    pub fn blocked(provider: &'static str, message: impl Into<String>) -> Self {
        Self {
            blocked: true,
            ..Self::new(provider, message)
        }
    }

    pub fn transport(provider: &'static str, err: &reqwest::Error) -> Self {
        let mut error = Self::new(provider, err.to_string());
        error.status = err.status().map(|s| s.as_u16());
        error
    }

    pub fn classify(&self) -> FailureKind {
        self.classify_structured()
            .unwrap_or_else(|| classify_message(&self.message))
    }

    fn classify_structured(&self) -> Option<FailureKind> {
        if self.blocked {
            return Some(FailureKind::ContentPolicy);
        }

        match self.code.as_deref() {
            Some("UNAUTHENTICATED") | Some("PERMISSION_DENIED") => return Some(FailureKind::Auth),
            Some("RESOURCE_EXHAUSTED") => return Some(FailureKind::RateLimited),
            _ => {}
        }

        match self.status? {
            401 | 403 => Some(FailureKind::Auth),
            402 | 429 => Some(FailureKind::RateLimited),
            422 => Some(FailureKind::InvalidParameters),
            _ => None,
        }
    }
}

/// Last-resort classification by message text
pub fn classify_message(message: &str) -> FailureKind {
    let lower = message.to_lowercase();
    if lower.contains("api key") {
        FailureKind::Auth
    } else if lower.contains("quota") || lower.contains("rate limit") {
        FailureKind::RateLimited
    } else if lower.contains("safety") || lower.contains("blocked") {
        FailureKind::ContentPolicy
    } else {
        FailureKind::Other
    }
}
