// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Costume analysis result and model-output parsing

use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::OnceLock;

pub const UNKNOWN_COSTUME: &str = "Unknown Costume";
pub const DEFAULT_ASSESSMENT: &str = "Costume needs improvement.";

/// What the model made of the costume
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CostumeAnalysis {
    pub costume_type: String,
    pub fail_points: Vec<String>,
    pub overall_assessment: String,
}

fn json_object_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(?s)\{.*\}").expect("valid object regex"))
}

/// Parse the model's reply into a [`CostumeAnalysis`]
///
/// Models often wrap JSON in markdown fences or chatter, so the outermost
/// `{...}` span is tried first, then the whole reply. Returns `None` when
/// neither parses. Missing or mistyped fields are backfilled.
pub fn parse_analysis(text: &str) -> Option<CostumeAnalysis> {
    let value = json_object_regex()
        .find(text)
        .and_then(|m| serde_json::from_str::<Value>(m.as_str()).ok())
        .or_else(|| serde_json::from_str::<Value>(text.trim()).ok())?;

    Some(backfill(&value))
}

fn backfill(value: &Value) -> CostumeAnalysis {
    let text_field = |name: &str, default: &str| {
        value
            .get(name)
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
            .unwrap_or(default)
            .to_string()
    };

    let fail_points = value
        .get("failPoints")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default();

    CostumeAnalysis {
        costume_type: text_field("costumeType", UNKNOWN_COSTUME),
        fail_points,
        overall_assessment: text_field("overallAssessment", DEFAULT_ASSESSMENT),
    }
}
