//! DataSight: data-quality auditing for CSV datasets.
//!
//! An audit reads a table, summarizes its structure, runs deterministic
//! rules over that summary and asks a language model for a narrative
//! review. When no model answers, a summary is built from the rule
//! findings and the reasons each model failed.
//!
//! # Core Principles
//!
//! - **Always answers**: Model failures degrade to a rule-based summary
//! - **Non-destructive by default**: Tables change only in auto-fix mode
//! - **Traceable fixes**: Every filled cell is recorded
//!
//! # Example
//!
//! ```no_run
//! use datasight::{Auditor, MockProvider};
//!
//! let auditor = Auditor::new().with_llm(MockProvider::new());
//! let result = auditor.audit_file("sales.csv").unwrap();
//!
//! for finding in &result.findings {
//!     println!("{}", finding.description);
//! }
//! println!("{}", result.summary);
//! ```

pub mod audit;
pub mod config;
pub mod error;
pub mod input;
pub mod llm;
pub mod metadata;

mod auditor;

pub use crate::auditor::{AuditConfig, AuditResult, Auditor, SummarySource};
pub use audit::{Finding, FixAction, RuleAuditor};
pub use config::Settings;
pub use error::{DatasightError, Result};
pub use input::{DataTable, Parser, SourceMetadata};
pub use llm::{GeminiProvider, MockProvider};
pub use metadata::Metadata;
