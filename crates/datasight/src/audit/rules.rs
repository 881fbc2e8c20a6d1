//! Deterministic rule pass over dataset metadata.

use serde::{Deserialize, Serialize};

use crate::metadata::Metadata;

use super::fix::FixAction;

/// One rule-detected data-quality issue with a suggested remediation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// Column the finding refers to.
    pub column: String,

    /// Number of missing values in the column.
    pub missing_count: usize,

    /// Human-readable description of the issue.
    pub description: String,

    /// Human-readable remediation.
    pub suggested_fix: String,

    /// Transformation that remedies the issue.
    pub fix_action: FixAction,
}

impl Finding {
    /// Finding for a column with missing values.
    pub fn missing_values(column: impl Into<String>, count: usize) -> Self {
        let column = column.into();
        Self {
            description: format!("Column '{}' has {} missing values.", column, count),
            suggested_fix: format!("Fill or drop missing values in '{}'", column),
            fix_action: FixAction::fill_mode(column.clone()),
            missing_count: count,
            column,
        }
    }
}

/// Rule pass producing findings from metadata.
pub struct RuleAuditor;

impl RuleAuditor {
    /// One finding per column with missing values, in column order.
    pub fn audit(metadata: &Metadata) -> Vec<Finding> {
        metadata
            .columns
            .iter()
            .filter_map(|column| {
                let count = metadata.null_count(column);
                (count > 0).then(|| Finding::missing_values(column, count))
            })
            .collect()
    }
}
