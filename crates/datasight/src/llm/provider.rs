//! LLM provider trait and types.

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Where a model call broke down.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The service answered with an error status.
    Api,
    /// The request did not complete within the timeout.
    Timeout,
    /// The service could not be reached.
    Connection,
    /// The service answered but the body was unusable.
    Response,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::Api => write!(f, "ApiError"),
            FailureKind::Timeout => write!(f, "TimeoutError"),
            FailureKind::Connection => write!(f, "ConnectionError"),
            FailureKind::Response => write!(f, "ResponseError"),
        }
    }
}

/// A failed model call, normalized to a `(code, message)` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerationFailure {
    /// Broad failure origin.
    pub kind: FailureKind,

    /// HTTP status code, when the service answered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<u16>,

    /// Service or transport message, verbatim.
    pub message: String,
}

impl GenerationFailure {
    /// Create a failure.
    pub fn new(kind: FailureKind, code: Option<u16>, message: impl Into<String>) -> Self {
        Self {
            kind,
            code,
            message: message.into(),
        }
    }

    /// Error status returned by the service.
    pub fn api(code: u16, message: impl Into<String>) -> Self {
        Self::new(FailureKind::Api, Some(code), message)
    }
}

impl fmt::Display for GenerationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for GenerationFailure {}

/// Configuration for LLM providers.
#[derive(Debug, Clone)]
pub struct LlmConfig {
    /// Maximum tokens in response.
    pub max_tokens: usize,

    /// Temperature for generation (0.0-1.0).
    pub temperature: f64,

    /// Upper bound for one request/response cycle.
    pub timeout: Duration,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            max_tokens: 2048,
            temperature: 0.3,
            timeout: Duration::from_secs(60),
        }
    }
}

/// A remote text-generation capability.
///
/// Implementations must be thread-safe (Send + Sync) so one provider can be
/// shared between audits.
pub trait LlmProvider: Send + Sync {
    /// Generate text for `prompt` with the model named `model`.
    ///
    /// Exactly one request is made per call.
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationFailure>;

    /// Get the name of this provider (for logging/debugging).
    fn name(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failure_display() {
        let failure = GenerationFailure::new(FailureKind::Timeout, None, "timed out");
        assert_eq!(failure.to_string(), "TimeoutError: timed out");
        assert_eq!(GenerationFailure::api(503, "busy").code, Some(503));
    }
}
