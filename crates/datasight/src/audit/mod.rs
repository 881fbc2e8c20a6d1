//! Rule-based auditing, fixes and fallback summaries.

mod fallback;
mod fix;
mod report;
mod rules;

pub use fallback::{fallback_summary, NextStep};
pub use fix::{column_mode, FixAction, DEFAULT_FILL};
pub use report::{FixChange, FixResult, RowAudit};
pub use rules::{Finding, RuleAuditor};
