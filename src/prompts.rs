// Copyright (c) 2025 Fabstir
// SPDX-License-Identifier: BUSL-1.1
//! Instruction templates stored as markdown files, one per capability
//!
//! `{{name}}` placeholders are replaced textually. Lists are joined with
//! `", "`. Unknown placeholders stay as written and substituted values are
//! never expanded again.

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use regex::{Captures, Regex};
use thiserror::Error;
use tracing::{debug, error};

pub const DEFAULT_PROMPTS_DIR: &str = "prompts";

#[derive(Debug, Error)]
pub enum TemplateError {
    #[error("Prompt file not found: {0}")]
    NotFound(String),
}

/// Value substituted for a placeholder
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateValue {
    Text(String),
    List(Vec<String>),
}

impl TemplateValue {
    fn render(&self) -> String {
        match self {
            TemplateValue::Text(text) => text.clone(),
            TemplateValue::List(items) => items.join(", "),
        }
    }
}

impl From<&str> for TemplateValue {
    fn from(value: &str) -> Self {
        TemplateValue::Text(value.to_string())
    }
}

impl From<String> for TemplateValue {
    fn from(value: String) -> Self {
        TemplateValue::Text(value)
    }
}

impl From<Vec<String>> for TemplateValue {
    fn from(value: Vec<String>) -> Self {
        TemplateValue::List(value)
    }
}

impl From<&[String]> for TemplateValue {
    fn from(value: &[String]) -> Self {
        TemplateValue::List(value.to_vec())
    }
}

/// Directory of `<name>.md` templates
#[derive(Debug, Clone)]
pub struct PromptLibrary {
    dir: PathBuf,
}

impl PromptLibrary {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Read the template for `name`. Read on every call so edits apply without a restart.
    pub async fn load(&self, name: &str) -> Result<String, TemplateError> {
        let path = self.dir.join(format!("{}.md", name));
        match tokio::fs::read_to_string(&path).await {
            Ok(text) => {
                debug!("Loaded prompt '{}' from {}", name, path.display());
                Ok(text)
            }
            Err(e) => {
                error!("Failed to load prompt '{}' from {}: {}", name, path.display(), e);
                Err(TemplateError::NotFound(name.to_string()))
            }
        }
    }

    /// Load `name` and fill it in one step
    pub async fn render(
        &self,
        name: &str,
        vars: &[(&str, TemplateValue)],
    ) -> Result<String, TemplateError> {
        let template = self.load(name).await?;
        Ok(fill_template(&template, vars))
    }
}

fn placeholder_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\{\{([^{}]+)\}\}").expect("valid placeholder regex"))
}

/// Replace every `{{key}}` that has a supplied variable, in a single pass over the template
pub fn fill_template(template: &str, vars: &[(&str, TemplateValue)]) -> String {
    placeholder_regex()
        .replace_all(template, |caps: &Captures| {
            let key = &caps[1];
            vars.iter()
                .find(|(name, _)| *name == key)
                .map(|(_, value)| value.render())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
