//! CLI command implementations.

pub mod audit;
pub mod configure;
pub mod models;

use datasight::llm::{GeminiProvider, LlmConfig};
use datasight::Settings;

/// Gemini provider built from settings; fails without an API key.
pub fn gemini_provider(settings: &Settings) -> datasight::Result<GeminiProvider> {
    let config = LlmConfig {
        timeout: settings.timeout,
        ..LlmConfig::default()
    };
    GeminiProvider::with_config(settings.require_api_key()?, config)
}
