//! Mock LLM provider for testing.

use std::collections::HashMap;
use std::sync::Mutex;

use super::provider::{GenerationFailure, LlmProvider};

/// Mock provider with scripted per-model replies.
///
/// Models without a scripted reply answer with a canned summary. Every call
/// is recorded so tests can check which models were tried and in what order.
pub struct MockProvider {
    replies: HashMap<String, Result<String, GenerationFailure>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl MockProvider {
    /// Create a new mock provider.
    pub fn new() -> Self {
        Self {
            replies: HashMap::new(),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Script a successful reply for a model.
    pub fn with_response(mut self, model: impl Into<String>, text: impl Into<String>) -> Self {
        self.replies.insert(model.into(), Ok(text.into()));
        self
    }

    /// Script a failure for a model.
    pub fn with_failure(mut self, model: impl Into<String>, failure: GenerationFailure) -> Self {
        self.replies.insert(model.into(), Err(failure));
        self
    }

    /// Models called so far, in call order.
    pub fn calls(&self) -> Vec<String> {
        self.lock_calls().iter().map(|(m, _)| m.clone()).collect()
    }

    /// Prompt of the most recent call.
    pub fn last_prompt(&self) -> Option<String> {
        self.lock_calls().last().map(|(_, p)| p.clone())
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<(String, String)>> {
        // A poisoned log is still a usable log.
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

impl LlmProvider for MockProvider {
    fn generate(&self, model: &str, prompt: &str) -> Result<String, GenerationFailure> {
        self.lock_calls()
            .push((model.to_string(), prompt.to_string()));

        match self.replies.get(model) {
            Some(reply) => reply.clone(),
            None => Ok(format!(
                "Mock audit from {}: reviewed {} characters of metadata. \
                 Check the reported missing values before analysis.",
                model,
                prompt.len()
            )),
        }
    }

    fn name(&self) -> &str {
        "mock"
    }
}
