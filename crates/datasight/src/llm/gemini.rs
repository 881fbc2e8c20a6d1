//! Google Gemini API provider implementation.

use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::Deserialize;
use serde_json::json;

use crate::error::{DatasightError, Result};

use super::provider::{FailureKind, GenerationFailure, LlmConfig, LlmProvider};

/// Gemini API base URL.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Environment variable holding the API key.
pub const API_KEY_ENV: &str = "GEMINI_API_KEY";

/// Gemini `generateContent` provider.
pub struct GeminiProvider {
    client: Client,
    headers: HeaderMap,
    base_url: String,
    config: LlmConfig,
}

impl GeminiProvider {
    /// Create a new Gemini provider with the given API key.
    pub fn new(api_key: impl Into<String>) -> Result<Self> {
        Self::with_config(api_key, LlmConfig::default())
    }

    /// Create a new Gemini provider with custom configuration.
    pub fn with_config(api_key: impl Into<String>, config: LlmConfig) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(DatasightError::MissingCredential(API_KEY_ENV.to_string()));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| DatasightError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-goog-api-key",
            HeaderValue::from_str(api_key.trim())
                .map_err(|e| DatasightError::Config(format!("Invalid API key: {}", e)))?,
        );

        Ok(Self {
            client,
            headers,
            base_url: DEFAULT_BASE_URL.to_string(),
            config,
        })
    }

    /// Create from environment variable.
    pub fn from_env() -> Result<Self> {
        let api_key = std::env::var(API_KEY_ENV)
            .map_err(|_| DatasightError::MissingCredential(API_KEY_ENV.to_string()))?;
        Self::new(api_key)
    }

    /// Point the provider at a different API root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    fn generate_url(&self, model: &str) -> String {
        let model = model.strip_prefix("models/").unwrap_or(model);
        format!("{}/models/{}:generateContent", self.base_url, model)
    }

    /// List models that support `generateContent`, without the `models/`
    /// prefix. Follows `nextPageToken` until the listing is complete.
    pub fn list_models(&self) -> Result<Vec<String>> {
        let endpoint = format!("{}/models", self.base_url);
        let mut models = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut params = vec![("pageSize", "1000")];
            if let Some(token) = page_token.as_deref() {
                params.push(("pageToken", token));
            }
            let url = reqwest::Url::parse_with_params(&endpoint, &params)
                .map_err(|e| DatasightError::Config(format!("Invalid API URL: {}", e)))?;

            let response = self
                .client
                .get(url)
                .headers(self.headers.clone())
                .send()
                .map_err(|e| DatasightError::Http(format!("Failed to list models: {}", e)))?;

            let status = response.status();
            if !status.is_success() {
                let body = response.text().unwrap_or_default();
                return Err(DatasightError::Http(api_error_message(status.as_u16(), &body)));
            }

            let page: ModelList = response
                .json()
                .map_err(|e| DatasightError::Http(format!("Failed to parse model list: {}", e)))?;

            page_token = page.next_page_token.clone().filter(|t| !t.is_empty());
            models.extend(page.generate_models());

            if page_token.is_none() {
                return Ok(models);
            }
        }
    }
}

impl LlmProvider for GeminiProvider {
    fn generate(&self, model: &str, prompt: &str) -> std::result::Result<String, GenerationFailure> {
        let body = json!({
            "contents": [
                {
                    "role": "user",
                    "parts": [{ "text": prompt }]
                }
            ],
            "generationConfig": {
                "temperature": self.config.temperature,
                "maxOutputTokens": self.config.max_tokens
            }
        });

        let response = self
            .client
            .post(self.generate_url(model))
            .headers(self.headers.clone())
            .json(&body)
            .send()
            .map_err(|e| {
                let kind = if e.is_timeout() {
                    FailureKind::Timeout
                } else {
                    FailureKind::Connection
                };
                GenerationFailure::new(kind, None, e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(GenerationFailure::api(
                status.as_u16(),
                api_error_message(status.as_u16(), &body),
            ));
        }

        let api_response: GenerateResponse = response.json().map_err(|e| {
            GenerationFailure::new(
                FailureKind::Response,
                None,
                format!("Failed to parse API response: {}", e),
            )
        })?;

        Ok(extract_text(api_response))
    }

    fn name(&self) -> &str {
        "gemini"
    }
}

/// Render an error body as `<code> <STATUS>. <message>`, falling back to the
/// raw body when it is not the usual error envelope.
fn api_error_message(code: u16, body: &str) -> String {
    match serde_json::from_str::<ApiErrorEnvelope>(body) {
        Ok(envelope) => format!(
            "{} {}. {}",
            code, envelope.error.status, envelope.error.message
        ),
        Err(_) => format!("{} {}", code, body.trim()),
    }
}

/// Concatenate the text parts of the first candidate. A response without
/// text (blocked prompt, no candidates) yields an empty string.
fn extract_text(response: GenerateResponse) -> String {
    response
        .candidates
        .into_iter()
        .next()
        .and_then(|candidate| candidate.content)
        .map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect()
        })
        .unwrap_or_default()
}

/// `generateContent` response structure.
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
}

#[derive(Debug, Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Deserialize)]
struct Part {
    #[serde(default)]
    text: Option<String>,
}

/// Error body returned with non-success statuses.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiError,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
}

/// One page of the `models.list` response.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelList {
    #[serde(default)]
    models: Vec<ModelEntry>,
    #[serde(default)]
    next_page_token: Option<String>,
}

impl ModelList {
    /// Names of the models on this page that support `generateContent`.
    fn generate_models(self) -> Vec<String> {
        self.models
            .into_iter()
            .filter(|m| {
                m.supported_generation_methods
                    .iter()
                    .any(|method| method == "generateContent")
            })
            .map(|m| m.name.strip_prefix("models/").unwrap_or(&m.name).to_string())
            .collect()
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ModelEntry {
    name: String,
    #[serde(default)]
    supported_generation_methods: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{classify_failure, FailureClass};

    #[test]
    fn test_extract_text_joins_parts() {
        let response: GenerateResponse = serde_json::from_str(
            r#"{"candidates":[{"content":{"parts":[{"text":"Hello, "},{"text":"world"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_text(response), "Hello, world");
    }

    #[test]
    fn test_extract_text_empty() {
        let response: GenerateResponse = serde_json::from_str(r#"{"candidates":[]}"#).unwrap();
        assert_eq!(extract_text(response), "");

        let response: GenerateResponse =
            serde_json::from_str(r#"{"candidates":[{"finishReason":"SAFETY"}]}"#).unwrap();
        assert_eq!(extract_text(response), "");
    }

    #[test]
    fn test_api_error_message_is_classifiable() {
        let body = r#"{"error":{"code":429,"message":"You exceeded your current quota","status":"RESOURCE_EXHAUSTED"}}"#;
        let message = api_error_message(429, body);
        assert_eq!(
            message,
            "429 RESOURCE_EXHAUSTED. You exceeded your current quota"
        );

        let failure = GenerationFailure::new(FailureKind::Api, None, message);
        assert_eq!(classify_failure(&failure), FailureClass::QuotaExhausted);
    }

    #[test]
    fn test_api_error_message_raw_body() {
        assert_eq!(api_error_message(502, " bad gateway \n"), "502 bad gateway");
    }

    #[test]
    fn test_generate_url_strips_prefix() {
        let provider = GeminiProvider::new("key").unwrap().with_base_url("http://localhost:1/");
        assert_eq!(
            provider.generate_url("models/gemini-2.0-flash"),
            "http://localhost:1/models/gemini-2.0-flash:generateContent"
        );
    }

    #[test]
    fn test_empty_key_is_missing_credential() {
        assert!(matches!(
            GeminiProvider::new("  "),
            Err(DatasightError::MissingCredential(_))
        ));
    }

    #[test]
    fn test_model_list_filter_shape() {
        let listing: ModelList = serde_json::from_str(
            r#"{"models":[
                {"name":"models/gemini-2.0-flash","supportedGenerationMethods":["generateContent","countTokens"]},
                {"name":"models/text-embedding-004","supportedGenerationMethods":["embedContent"]}
            ]}"#,
        )
        .unwrap();
        assert_eq!(listing.next_page_token, None);
        assert_eq!(listing.generate_models(), vec!["gemini-2.0-flash"]);
    }

    #[test]
    fn test_model_list_page_token() {
        let listing: ModelList = serde_json::from_str(
            r#"{"models":[{"name":"models/gemini-2.5-flash","supportedGenerationMethods":["generateContent"]}],
                "nextPageToken":"Cg5nZW1pbmktMi41LWZsYXNo"}"#,
        )
        .unwrap();
        assert_eq!(listing.next_page_token.as_deref(), Some("Cg5nZW1pbmktMi41LWZsYXNo"));
        assert_eq!(listing.generate_models(), vec!["gemini-2.5-flash"]);
    }

    #[test]
    fn test_unreachable_host_is_connection_failure() {
        // Port 9 on localhost is the discard port; nothing should be listening.
        let provider = GeminiProvider::new("key")
            .unwrap()
            .with_base_url("http://127.0.0.1:9");
        let failure = provider.generate("gemini-2.0-flash", "hi").unwrap_err();
        assert_eq!(failure.kind, FailureKind::Connection);
        assert_eq!(classify_failure(&failure), FailureClass::Unknown);
    }
}
