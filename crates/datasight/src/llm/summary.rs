//! Ordered model fallback for audit summaries.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::metadata::Metadata;

use super::classify::{classify_failure, Classifier, FailureClass};
use super::prompts::PromptTemplate;
use super::provider::{GenerationFailure, LlmProvider};

/// A candidate that did not produce a summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CandidateFailure {
    /// Model identifier that was tried.
    pub candidate: String,

    /// Classified cause.
    pub class: FailureClass,

    /// The underlying failure.
    pub failure: GenerationFailure,

    /// User-facing reason line.
    pub reason: String,
}

/// Result of asking the candidates for a summary.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryOutcome {
    /// Summary text from the first candidate that succeeded.
    pub summary: Option<String>,

    /// The candidate that answered. Set even when its reply was blank, in
    /// which case `summary` stays `None`.
    pub model: Option<String>,

    /// Failures of the candidates tried before success (or of all of them).
    pub failures: Vec<CandidateFailure>,
}

impl SummaryOutcome {
    /// Reason lines, in the order the candidates were tried.
    pub fn reasons(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.reason.as_str()).collect()
    }

    /// True when every candidate was tried and none answered.
    pub fn is_exhausted(&self) -> bool {
        self.model.is_none() && !self.failures.is_empty()
    }
}

/// Requests a natural-language audit summary, trying candidates in order.
pub struct SummaryRequester {
    provider: Arc<dyn LlmProvider>,
    template: PromptTemplate,
    classifier: Classifier,
}

impl SummaryRequester {
    /// Create a requester with the default template and classifier.
    pub fn new(provider: Arc<dyn LlmProvider>) -> Self {
        Self {
            provider,
            template: PromptTemplate::default(),
            classifier: classify_failure,
        }
    }

    /// Use a different prompt template.
    pub fn with_template(mut self, template: PromptTemplate) -> Self {
        self.template = template;
        self
    }

    /// Use a different failure classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Try each candidate in order; the first one that answers ends the
    /// search.
    ///
    /// Candidates are tried one at a time and never raced. Failures are
    /// classified and collected, never raised. A blank reply still ends the
    /// search but yields no summary.
    pub fn request(&self, metadata: &Metadata, candidates: &[String]) -> SummaryOutcome {
        let prompt = self.template.render(metadata);
        let mut outcome = SummaryOutcome::default();

        for candidate in candidates {
            debug!(
                provider = self.provider.name(),
                model = %candidate,
                "requesting audit summary"
            );

            let failure = match self.provider.generate(candidate, &prompt) {
                Ok(text) => {
                    if text.trim().is_empty() {
                        debug!(model = %candidate, "candidate returned blank text");
                    } else {
                        outcome.summary = Some(text);
                    }
                    outcome.model = Some(candidate.clone());
                    return outcome;
                }
                Err(failure) => failure,
            };

            let class = (self.classifier)(&failure);
            let reason = class.reason(candidate, &failure);
            warn!(model = %candidate, ?class, "candidate failed: {}", failure);

            outcome.failures.push(CandidateFailure {
                candidate: candidate.clone(),
                class,
                failure,
                reason,
            });
        }

        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::DataTable;
    use crate::llm::{FailureKind, MockProvider};

    fn metadata() -> Metadata {
        Metadata::from_table(&DataTable::new(vec!["A".into()], vec![vec![None]]))
    }

    fn candidates(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| n.to_string()).collect()
    }

    #[test]
    fn test_first_success_wins() {
        let mock = Arc::new(
            MockProvider::new()
                .with_failure("A", GenerationFailure::api(429, "RESOURCE_EXHAUSTED"))
                .with_response("B", "summary from B")
                .with_response("C", "summary from C"),
        );
        let requester = SummaryRequester::new(mock.clone());

        let outcome = requester.request(&metadata(), &candidates(&["A", "B", "C"]));

        assert_eq!(outcome.summary.as_deref(), Some("summary from B"));
        assert_eq!(outcome.model.as_deref(), Some("B"));
        assert_eq!(
            outcome.reasons(),
            vec!["A: quota exhausted (try later or check billing)"]
        );
        assert_eq!(mock.calls(), vec!["A", "B"]);
    }

    #[test]
    fn test_all_candidates_fail() {
        let mock = Arc::new(
            MockProvider::new()
                .with_failure("A", GenerationFailure::api(429, "quota"))
                .with_failure("B", GenerationFailure::api(404, "NOT_FOUND")),
        );
        let outcome = SummaryRequester::new(mock).request(&metadata(), &candidates(&["A", "B"]));

        assert!(outcome.summary.is_none());
        assert!(outcome.is_exhausted());
        assert_eq!(outcome.failures[0].class, FailureClass::QuotaExhausted);
        assert_eq!(outcome.failures[1].class, FailureClass::ModelUnavailable);
        assert_eq!(
            outcome.reasons(),
            vec![
                "A: quota exhausted (try later or check billing)",
                "B: model not available for this api"
            ]
        );
    }

    #[test]
    fn test_unknown_failure_keeps_message() {
        let mock = Arc::new(MockProvider::new().with_failure(
            "A",
            GenerationFailure::new(FailureKind::Connection, None, "connection refused"),
        ));
        let outcome = SummaryRequester::new(mock).request(&metadata(), &candidates(&["A"]));

        assert_eq!(outcome.reasons(), vec!["A: ConnectionError: connection refused"]);
    }

    #[test]
    fn test_blank_reply_stops_without_summary() {
        let mock = Arc::new(
            MockProvider::new()
                .with_failure("A", GenerationFailure::api(429, "quota"))
                .with_response("B", "   ")
                .with_response("C", "from C"),
        );
        let outcome =
            SummaryRequester::new(mock.clone()).request(&metadata(), &candidates(&["A", "B", "C"]));

        assert_eq!(mock.calls(), vec!["A", "B"]);
        assert_eq!(outcome.summary, None);
        assert_eq!(outcome.model.as_deref(), Some("B"));
        assert_eq!(
            outcome.reasons(),
            vec!["A: quota exhausted (try later or check billing)"]
        );
        assert!(!outcome.is_exhausted());
    }

    #[test]
    fn test_custom_classifier() {
        fn everything_is_quota(_: &GenerationFailure) -> FailureClass {
            FailureClass::QuotaExhausted
        }
        let mock = Arc::new(MockProvider::new().with_failure("A", GenerationFailure::api(500, "x")));
        let outcome = SummaryRequester::new(mock)
            .with_classifier(everything_is_quota)
            .request(&metadata(), &candidates(&["A"]));

        assert_eq!(outcome.failures[0].class, FailureClass::QuotaExhausted);
    }

    #[test]
    fn test_prompt_carries_metadata() {
        let mock = Arc::new(MockProvider::new());
        let template = PromptTemplate::new("meta={metadata}").unwrap();
        SummaryRequester::new(mock.clone())
            .with_template(template)
            .request(&metadata(), &candidates(&["A"]));

        assert_eq!(
            mock.last_prompt().as_deref(),
            Some(r#"meta={"columns":["A"],"null_counts":{"A":1},"head":{"A":[null]}}"#)
        );
    }

    #[test]
    fn test_no_candidates() {
        let outcome = SummaryRequester::new(Arc::new(MockProvider::new())).request(&metadata(), &[]);
        assert_eq!(outcome, SummaryOutcome::default());
        assert!(!outcome.is_exhausted());
    }
}
