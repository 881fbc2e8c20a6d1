//! Main Auditor struct and public API.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::audit::{fallback_summary, Finding, FixResult, NextStep, RuleAuditor};
use crate::config::Settings;
use crate::error::{DatasightError, Result};
use crate::input::{DataTable, Parser, ParserConfig, SourceMetadata};
use crate::llm::{
    classify_failure, CandidateFailure, Classifier, LlmProvider, PromptTemplate, SummaryOutcome,
    SummaryRequester, DEFAULT_MODEL,
};
use crate::metadata::Metadata;

/// Configuration for an audit.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Parser configuration.
    pub parser: ParserConfig,
    /// Model candidates, tried in order.
    pub model_candidates: Vec<String>,
    /// Audit prompt template.
    pub prompt_template: PromptTemplate,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            parser: ParserConfig::default(),
            model_candidates: vec![DEFAULT_MODEL.to_string()],
            prompt_template: PromptTemplate::default(),
        }
    }
}

impl From<&Settings> for AuditConfig {
    fn from(settings: &Settings) -> Self {
        Self {
            model_candidates: settings.model_candidates.clone(),
            prompt_template: settings.prompt_template.clone(),
            ..Default::default()
        }
    }
}

/// Where the summary of an audit came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SummarySource {
    /// A model candidate answered.
    Model { model: String },
    /// Synthesized locally from findings and failure reasons.
    Fallback,
}

/// Result of auditing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditResult {
    /// Metadata about the source file, when audited from a file.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<SourceMetadata>,
    /// Structural summary of the dataset.
    pub metadata: Metadata,
    /// Rule-based findings, in column order.
    pub findings: Vec<Finding>,
    /// Model summary, or the fallback summary.
    pub summary: String,
    /// Where `summary` came from.
    pub summary_source: SummarySource,
    /// Model candidates that failed, in the order they were tried.
    pub failures: Vec<CandidateFailure>,
    /// Fixes applied in auto-fix mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixes: Option<FixResult>,
}

impl AuditResult {
    /// Attach source file metadata.
    pub fn with_source(mut self, source: SourceMetadata) -> Self {
        self.source = Some(source);
        self
    }

    /// Failure reason lines.
    pub fn reasons(&self) -> Vec<&str> {
        self.failures.iter().map(|f| f.reason.as_str()).collect()
    }

    /// True when the summary was synthesized locally.
    pub fn used_fallback(&self) -> bool {
        self.summary_source == SummarySource::Fallback
    }

    /// Suggested follow-up for the user.
    pub fn next_step(&self) -> NextStep {
        NextStep::from_failures(&self.failures)
    }
}

/// The audit engine: rule pass, model summary, fallback merge.
pub struct Auditor {
    config: AuditConfig,
    parser: Parser,
    llm_provider: Option<Arc<dyn LlmProvider>>,
    classifier: Classifier,
}

impl Auditor {
    /// Create an auditor with default configuration and no model.
    pub fn new() -> Self {
        Self::with_config(AuditConfig::default())
    }

    /// Create an auditor with custom configuration.
    pub fn with_config(config: AuditConfig) -> Self {
        let parser = Parser::with_config(config.parser.clone());
        Self {
            config,
            parser,
            llm_provider: None,
            classifier: classify_failure,
        }
    }

    /// Ask this provider for audit summaries.
    ///
    /// Without a provider the audit is rule-only and always uses the
    /// fallback summary.
    pub fn with_llm(self, provider: impl LlmProvider + 'static) -> Self {
        self.with_shared_llm(Arc::new(provider))
    }

    /// Ask a shared provider for audit summaries.
    pub fn with_shared_llm(mut self, provider: Arc<dyn LlmProvider>) -> Self {
        self.llm_provider = Some(provider);
        self
    }

    /// Replace the model candidates.
    pub fn with_candidates(mut self, candidates: Vec<String>) -> Self {
        self.config.model_candidates = candidates;
        self
    }

    /// Replace the failure classifier.
    pub fn with_classifier(mut self, classifier: Classifier) -> Self {
        self.classifier = classifier;
        self
    }

    /// Configured model candidates.
    pub fn candidates(&self) -> &[String] {
        &self.config.model_candidates
    }

    /// Read a file for auditing, rejecting files without data rows.
    pub fn load(&self, path: impl AsRef<Path>) -> Result<(DataTable, SourceMetadata)> {
        let path = path.as_ref();
        let (table, source) = self.parser.parse_file(path)?;
        if table.is_empty() {
            return Err(DatasightError::EmptyData(format!(
                "'{}' has no data rows",
                path.display()
            )));
        }
        Ok((table, source))
    }

    /// Read and audit a file.
    pub fn audit_file(&self, path: impl AsRef<Path>) -> Result<AuditResult> {
        let (table, source) = self.load(path)?;
        Ok(self.audit(&table).with_source(source))
    }

    /// Audit a table. Model failures never surface as errors; the worst
    /// case is a fallback summary.
    pub fn audit(&self, table: &DataTable) -> AuditResult {
        let metadata = Metadata::from_table(table);
        let findings = RuleAuditor::audit(&metadata);
        debug!(
            columns = metadata.columns.len(),
            findings = findings.len(),
            "rule pass complete"
        );

        let outcome = self.request_summary(&metadata);
        let reasons = outcome.reasons();

        let (summary, summary_source) = match (outcome.summary.clone(), outcome.model.clone()) {
            (Some(summary), Some(model)) => (summary, SummarySource::Model { model }),
            _ => (
                fallback_summary(&findings, &reasons),
                SummarySource::Fallback,
            ),
        };

        AuditResult {
            source: None,
            metadata,
            findings,
            summary,
            summary_source,
            failures: outcome.failures,
            fixes: None,
        }
    }

    /// Audit a table, then apply every finding's fix to it in order.
    ///
    /// Each finding's action is pinned to a concrete fill value before any
    /// fix runs, and the pinned action replaces the finding's action in the
    /// result.
    pub fn audit_and_fix(&self, table: &mut DataTable) -> Result<AuditResult> {
        let mut result = self.audit(table);

        for finding in &mut result.findings {
            finding.fix_action = finding.fix_action.resolve(table)?;
        }

        let mut fixes = FixResult::new();
        for finding in &result.findings {
            fixes.add_change(finding.fix_action.apply(table)?);
        }
        info!(
            fixes = fixes.fixes_applied,
            cells = fixes.cells_filled,
            "auto-fix complete"
        );

        result.fixes = Some(fixes);
        Ok(result)
    }

    fn request_summary(&self, metadata: &Metadata) -> SummaryOutcome {
        match &self.llm_provider {
            Some(provider) => SummaryRequester::new(Arc::clone(provider))
                .with_template(self.config.prompt_template.clone())
                .with_classifier(self.classifier)
                .request(metadata, &self.config.model_candidates),
            None => SummaryOutcome::default(),
        }
    }
}

impl Default for Auditor {
    fn default() -> Self {
        Self::new()
    }
}
