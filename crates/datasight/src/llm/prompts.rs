//! Prompt template for audit summaries.

use crate::error::{DatasightError, Result};
use crate::metadata::Metadata;

/// Placeholder replaced by the metadata JSON.
pub const METADATA_PLACEHOLDER: &str = "{metadata}";

/// Default audit instruction.
pub const AUDIT_PROMPT: &str = "You are a Senior Data Auditor. Analyze this metadata: {metadata}. \
     Identify outliers, logic errors, and missing values.";

/// An audit instruction with a `{metadata}` placeholder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptTemplate(String);

impl PromptTemplate {
    /// Create a template. It must contain the `{metadata}` placeholder.
    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(METADATA_PLACEHOLDER) {
            return Err(DatasightError::Config(format!(
                "prompt template must contain {}",
                METADATA_PLACEHOLDER
            )));
        }
        Ok(Self(template))
    }

    /// The raw template text.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Build the prompt for a dataset.
    pub fn render(&self, metadata: &Metadata) -> String {
        self.0.replace(METADATA_PLACEHOLDER, &metadata.to_json())
    }
}

impl Default for PromptTemplate {
    fn default() -> Self {
        Self(AUDIT_PROMPT.to_string())
    }
}
