//! Fix actions that can be applied to a table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{DatasightError, Result};
use crate::input::DataTable;

use super::report::{FixChange, RowAudit};

/// Value used when a column has no non-missing value to take a mode from.
pub const DEFAULT_FILL: &str = "0";

/// A deferred transformation of one column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum FixAction {
    /// Fill missing cells with the column's most frequent value, or
    /// `fallback` when the column has no values at all.
    FillMode { column: String, fallback: String },

    /// Fill missing cells with a fixed value.
    FillConstant { column: String, value: String },
}

impl FixAction {
    /// Mode fill with the default fallback.
    pub fn fill_mode(column: impl Into<String>) -> Self {
        FixAction::FillMode {
            column: column.into(),
            fallback: DEFAULT_FILL.to_string(),
        }
    }

    /// The column this action touches.
    pub fn column(&self) -> &str {
        match self {
            FixAction::FillMode { column, .. } | FixAction::FillConstant { column, .. } => column,
        }
    }

    /// Get a human-readable description of the action.
    pub fn description(&self) -> String {
        match self {
            FixAction::FillMode { column, fallback } => format!(
                "Fill missing values in '{}' with the most frequent value (or '{}')",
                column, fallback
            ),
            FixAction::FillConstant { column, value } => {
                format!("Fill missing values in '{}' with '{}'", column, value)
            }
        }
    }

    /// Pin the fill value against a table, turning a mode fill into a
    /// constant fill.
    pub fn resolve(&self, table: &DataTable) -> Result<FixAction> {
        let (_, value) = self.target(table)?;
        Ok(FixAction::FillConstant {
            column: self.column().to_string(),
            value,
        })
    }

    /// Column index and fill value for this action on `table`.
    fn target(&self, table: &DataTable) -> Result<(usize, String)> {
        let column = self.column();
        let index = table
            .column_index(column)
            .ok_or_else(|| DatasightError::UnknownColumn(column.to_string()))?;
        let value = match self {
            FixAction::FillMode { fallback, .. } => {
                column_mode(table.column_values(index)).unwrap_or_else(|| fallback.clone())
            }
            FixAction::FillConstant { value, .. } => value.clone(),
        };
        Ok((index, value))
    }

    /// Apply the action to a table, filling its missing cells in place.
    pub fn apply(&self, table: &mut DataTable) -> Result<FixChange> {
        let (index, value) = self.target(table)?;
        let column = self.column().to_string();

        let reason = self.description();
        let mut row_audits = Vec::new();
        for (row_idx, row) in table.rows.iter_mut().enumerate() {
            if let Some(cell) = row.get_mut(index) {
                if cell.is_none() {
                    *cell = Some(value.clone());
                    row_audits.push(RowAudit {
                        row: row_idx,
                        column: column.clone(),
                        original_value: None,
                        new_value: value.clone(),
                        reason: reason.clone(),
                    });
                }
            }
        }

        info!(
            column = %column,
            value = %value,
            filled = row_audits.len(),
            "applied fill"
        );

        Ok(FixChange {
            description: format!("Filled '{}' with '{}'", column, value),
            column,
            fill_value: value,
            values_changed: row_audits.len(),
            row_audits,
        })
    }
}

/// Most frequent non-missing value of a column.
///
/// Ties go to the smallest tied value: numeric order when every tied value
/// parses as a number, string order otherwise.
pub fn column_mode<'a>(values: impl Iterator<Item = Option<&'a str>>) -> Option<String> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for value in values.flatten() {
        *counts.entry(value).or_insert(0) += 1;
    }

    let max = counts.values().copied().max()?;
    let tied: Vec<&str> = counts
        .into_iter()
        .filter(|&(_, c)| c == max)
        .map(|(v, _)| v)
        .collect();

    let numeric: Option<Vec<(f64, &str)>> = tied
        .iter()
        .map(|v| v.trim().parse::<f64>().ok().map(|n| (n, *v)))
        .collect();

    let winner = match numeric {
        Some(nums) => nums
            .into_iter()
            .min_by(|a, b| a.0.total_cmp(&b.0).then_with(|| a.1.cmp(b.1)))
            .map(|(_, v)| v),
        None => tied.into_iter().min(),
    };

    winner.map(str::to_string)
}
