//! Records of fixes applied to a table.

use serde::{Deserialize, Serialize};

/// Result of applying a set of fixes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixResult {
    /// Number of fixes applied.
    pub fixes_applied: usize,

    /// Number of cells filled across all fixes.
    pub cells_filled: usize,

    /// Detailed changes for each fix, in application order.
    pub changes: Vec<FixChange>,
}

/// A single applied fix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FixChange {
    /// Description of the change.
    pub description: String,

    /// Column affected.
    pub column: String,

    /// Value written into missing cells.
    pub fill_value: String,

    /// Number of values changed.
    pub values_changed: usize,

    /// Per-row audit information.
    pub row_audits: Vec<RowAudit>,
}

/// Audit information for a single cell change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RowAudit {
    /// Row index (0-based).
    pub row: usize,

    /// Column that was changed.
    pub column: String,

    /// Original value before the fix (`None` for a missing cell).
    pub original_value: Option<String>,

    /// New value after the fix.
    pub new_value: String,

    /// Reason for the change.
    pub reason: String,
}

impl FixResult {
    /// Create an empty result.
    pub fn new() -> Self {
        Self {
            fixes_applied: 0,
            cells_filled: 0,
            changes: Vec::new(),
        }
    }

    /// Add a change to the result.
    pub fn add_change(&mut self, change: FixChange) {
        self.fixes_applied += 1;
        self.cells_filled += change.values_changed;
        self.changes.push(change);
    }
}

impl Default for FixResult {
    fn default() -> Self {
        Self::new()
    }
}
