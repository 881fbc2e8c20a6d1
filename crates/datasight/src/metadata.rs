//! Structural summary of a dataset.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::input::DataTable;

/// Number of rows included in the preview.
pub const PREVIEW_ROWS: usize = 3;

/// Column names, missing-value counts and a short preview of a dataset.
///
/// `null_counts` and `head` are keyed by column name in the same order as
/// `columns`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    /// Column names in source order.
    pub columns: Vec<String>,
    /// Missing-value count per column.
    pub null_counts: IndexMap<String, usize>,
    /// First rows of each column; missing cells preview as `null`.
    pub head: IndexMap<String, Vec<Option<String>>>,
}

impl Metadata {
    /// Summarize a table. Never fails, including for tables without rows or
    /// columns.
    pub fn from_table(table: &DataTable) -> Self {
        let mut null_counts = IndexMap::with_capacity(table.column_count());
        let mut head = IndexMap::with_capacity(table.column_count());

        for (index, name) in table.headers.iter().enumerate() {
            null_counts.insert(name.clone(), table.null_count(index));
            head.insert(
                name.clone(),
                table
                    .column_values(index)
                    .take(PREVIEW_ROWS)
                    .map(|v| v.map(str::to_string))
                    .collect(),
            );
        }

        Self {
            columns: table.headers.clone(),
            null_counts,
            head,
        }
    }

    /// Missing-value count for a column (0 for unknown columns).
    pub fn null_count(&self, column: &str) -> usize {
        self.null_counts.get(column).copied().unwrap_or(0)
    }

    /// Total missing cells across all columns.
    pub fn total_nulls(&self) -> usize {
        self.null_counts.values().sum()
    }

    /// Compact JSON form, as embedded into the audit prompt.
    pub fn to_json(&self) -> String {
        // Only strings, integers and maps: serialization cannot fail.
        serde_json::to_string(self).unwrap_or_default()
    }
}
