//! LLM integration for audit summaries.
//!
//! The audit only needs one capability from a model service: turn a prompt
//! into text. [`LlmProvider`] captures that, [`SummaryRequester`] walks an
//! ordered list of model candidates until one answers, and failures are
//! classified into [`FailureClass`]es instead of being raised.
//!
//! # Supported Providers
//!
//! - **Gemini** - Google Gemini models via API (requires `GEMINI_API_KEY`)
//! - **Mock** - Scripted replies for tests and offline runs
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use datasight::llm::{GeminiProvider, SummaryRequester};
//! use datasight::{DataTable, Metadata};
//!
//! let table = DataTable::new(vec!["A".into()], vec![vec![None]]);
//! let requester = SummaryRequester::new(Arc::new(GeminiProvider::from_env().unwrap()));
//! let outcome = requester.request(
//!     &Metadata::from_table(&table),
//!     &["gemini-2.0-flash".to_string()],
//! );
//! println!("{:?}", outcome.summary);
//! ```

mod classify;
mod gemini;
mod mock;
pub mod models;
mod prompts;
mod provider;
mod summary;

pub use classify::{classify_failure, Classifier, FailureClass};
pub use gemini::{GeminiProvider, API_KEY_ENV};
pub use mock::MockProvider;
pub use models::{recommend_model, DEFAULT_MODEL};
pub use prompts::{PromptTemplate, AUDIT_PROMPT, METADATA_PLACEHOLDER};
pub use provider::{FailureKind, GenerationFailure, LlmConfig, LlmProvider};
pub use summary::{CandidateFailure, SummaryOutcome, SummaryRequester};
