// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Field checks shared by the per-endpoint request validators
//!
//! Validators work on the untyped JSON body so that a missing or mistyped
//! field becomes a 400 naming that field rather than a serde rejection.

use serde_json::{Map, Value};

use super::errors::ApiError;
use super::pipeline::MISSING_BODY_MESSAGE;

pub type JsonObject = Map<String, Value>;

pub fn require_object(body: &Value) -> Result<&JsonObject, ApiError> {
    body.as_object()
        .ok_or_else(|| ApiError::validation("body", MISSING_BODY_MESSAGE))
}

/// A string field that must be present and non-empty
pub fn required_string<'a>(obj: &'a JsonObject, field: &str) -> Result<&'a str, ApiError> {
    match obj.get(field).and_then(Value::as_str) {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(ApiError::validation(field, format!("{} is required", field))),
    }
}

/// A string field that may be absent or null; empty strings count as absent
pub fn optional_string<'a>(obj: &'a JsonObject, field: &str) -> Result<Option<&'a str>, ApiError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) if s.is_empty() => Ok(None),
        Some(Value::String(s)) => Ok(Some(s.as_str())),
        Some(_) => Err(ApiError::validation(field, format!("{} must be a string", field))),
    }
}

/// An array of strings; may be empty but must be present
pub fn string_array(obj: &JsonObject, field: &str) -> Result<Vec<String>, ApiError> {
    let items = obj
        .get(field)
        .and_then(Value::as_array)
        .ok_or_else(|| ApiError::validation(field, format!("{} must be an array", field)))?;

    items
        .iter()
        .map(|item| {
            item.as_str().map(str::to_string).ok_or_else(|| {
                ApiError::validation(field, format!("{} must contain only strings", field))
            })
        })
        .collect()
}

/// A numeric field that may be absent or null
pub fn optional_number(obj: &JsonObject, field: &str) -> Result<Option<f64>, ApiError> {
    match obj.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(value) => value
            .as_f64()
            .map(Some)
            .ok_or_else(|| ApiError::validation(field, format!("{} must be a number", field))),
    }
}
