//! Failure classification for model calls.

use serde::{Deserialize, Serialize};

use super::provider::GenerationFailure;

/// Cause of a failed model candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureClass {
    /// Rate or quota limiting.
    QuotaExhausted,
    /// The model is not served for this credential.
    ModelUnavailable,
    /// Anything else: network errors, timeouts, malformed responses.
    Unknown,
}

impl FailureClass {
    /// User-facing reason line for a failed candidate.
    pub fn reason(&self, candidate: &str, failure: &GenerationFailure) -> String {
        match self {
            FailureClass::QuotaExhausted => {
                format!("{}: quota exhausted (try later or check billing)", candidate)
            }
            FailureClass::ModelUnavailable => {
                format!("{}: model not available for this api", candidate)
            }
            FailureClass::Unknown => format!("{}: {}", candidate, failure),
        }
    }
}

/// Maps a normalized failure to its class.
pub type Classifier = fn(&GenerationFailure) -> FailureClass;

/// Default classifier: status code first, then indicators in the message.
///
/// Quota indicators are checked before not-found indicators.
pub fn classify_failure(failure: &GenerationFailure) -> FailureClass {
    let message = failure.message.as_str();
    if failure.code == Some(429) || message.contains("RESOURCE_EXHAUSTED") || message.contains("429")
    {
        FailureClass::QuotaExhausted
    } else if failure.code == Some(404)
        || message.contains("NOT_FOUND")
        || message.contains("404")
    {
        FailureClass::ModelUnavailable
    } else {
        FailureClass::Unknown
    }
}
