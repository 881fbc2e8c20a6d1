//! Runtime settings read from the environment.

pub mod env_file;

use std::time::Duration;

use crate::error::{DatasightError, Result};
use crate::llm::{PromptTemplate, API_KEY_ENV, DEFAULT_MODEL};

/// Environment variable holding the model candidates (comma-separated).
pub const MODEL_ENV: &str = "GEMINI_MODEL";

/// Environment variable overriding the audit prompt template.
pub const PROMPT_ENV: &str = "DATASIGHT_AUDIT_PROMPT";

/// Environment variable overriding the per-request timeout, in seconds.
pub const TIMEOUT_ENV: &str = "DATASIGHT_TIMEOUT_SECS";

/// Settings for an audit run.
#[derive(Debug, Clone)]
pub struct Settings {
    /// API credential, if one is configured.
    pub api_key: Option<String>,
    /// Model candidates, tried in order.
    pub model_candidates: Vec<String>,
    /// Audit prompt template.
    pub prompt_template: PromptTemplate,
    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_key: None,
            model_candidates: vec![DEFAULT_MODEL.to_string()],
            prompt_template: PromptTemplate::default(),
            timeout: Duration::from_secs(60),
        }
    }
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// Callers that want `.env` support load it before calling this.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut settings = Settings::default();

        settings.api_key = lookup(API_KEY_ENV)
            .map(|k| k.trim().to_string())
            .filter(|k| !k.is_empty());

        if let Some(models) = lookup(MODEL_ENV) {
            let candidates = parse_candidates(&models);
            if !candidates.is_empty() {
                settings.model_candidates = candidates;
            }
        }

        if let Some(template) = lookup(PROMPT_ENV).filter(|t| !t.trim().is_empty()) {
            settings.prompt_template = PromptTemplate::new(template)?;
        }

        if let Some(secs) = lookup(TIMEOUT_ENV) {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                DatasightError::Config(format!("{} must be a whole number of seconds", TIMEOUT_ENV))
            })?;
            if secs == 0 {
                return Err(DatasightError::Config(format!(
                    "{} must be greater than zero",
                    TIMEOUT_ENV
                )));
            }
            settings.timeout = Duration::from_secs(secs);
        }

        Ok(settings)
    }

    /// The API key, or a `MissingCredential` error.
    pub fn require_api_key(&self) -> Result<&str> {
        self.api_key
            .as_deref()
            .ok_or_else(|| DatasightError::MissingCredential(API_KEY_ENV.to_string()))
    }

    /// Replace the candidate list when `models` is non-empty.
    pub fn with_candidates(mut self, models: Vec<String>) -> Self {
        let models: Vec<String> = models
            .into_iter()
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .collect();
        if !models.is_empty() {
            self.model_candidates = models;
        }
        self
    }
}

/// Split a comma-separated model list, dropping blanks.
pub fn parse_candidates(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|m| m.trim().trim_matches('"').trim())
        .filter(|m| !m.is_empty())
        .map(str::to_string)
        .collect()
}
