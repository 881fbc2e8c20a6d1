//! Locally synthesized summaries and follow-up hints.

use serde::{Deserialize, Serialize};

use crate::llm::{CandidateFailure, FailureClass};

use super::rules::Finding;

const UNAVAILABLE_PREFIX: &str = "ai summary unavailable. rule-based findings: ";

/// Summary used when no model produced one.
pub fn fallback_summary<S: AsRef<str>>(findings: &[Finding], reasons: &[S]) -> String {
    let mut summary = if findings.is_empty() {
        format!("{}no missing values found.", UNAVAILABLE_PREFIX)
    } else {
        let issues: Vec<&str> = findings.iter().map(|f| f.description.as_str()).collect();
        format!("{}{}", UNAVAILABLE_PREFIX, issues.join("; "))
    };

    if !reasons.is_empty() {
        let lines: Vec<String> = reasons
            .iter()
            .map(|r| format!("- {}", r.as_ref()))
            .collect();
        summary.push_str("\nreasons:\n");
        summary.push_str(&lines.join("\n"));
    }

    summary
}

/// What the user should do after an audit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NextStep {
    /// A model quota is used up.
    QuotaExhausted,
    /// A configured model is not served for this key.
    ModelUnavailable,
    /// Nothing blocked the audit.
    Clear,
}

impl NextStep {
    /// Quota problems take precedence over unavailable models.
    pub fn from_failures(failures: &[CandidateFailure]) -> Self {
        if failures
            .iter()
            .any(|f| f.class == FailureClass::QuotaExhausted)
        {
            NextStep::QuotaExhausted
        } else if failures
            .iter()
            .any(|f| f.class == FailureClass::ModelUnavailable)
        {
            NextStep::ModelUnavailable
        } else {
            NextStep::Clear
        }
    }
}
