//! The prompt service boundary and its HTTP implementation.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use super::types::ToolKind;
use crate::error::AssistError;

/// One structured-output request to the model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PromptRequest {
    pub tool: ToolKind,
    pub prompt: String,
    /// Expected shape of the JSON answer.
    pub response_schema: Value,
}

/// Anything that can turn a prompt into a JSON answer.
///
/// Implementations make a single attempt; retries are not part of the contract.
pub trait PromptService: Send + Sync {
    fn generate(
        &self,
        request: PromptRequest,
    ) -> impl Future<Output = Result<Value, AssistError>> + Send;
}

/// Model endpoint settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssistantConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_model")]
    pub model: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Name of the environment variable holding the API key.
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".into()
}
fn default_model() -> String {
    "gemini-2.0-flash".into()
}
fn default_timeout_secs() -> u64 {
    30
}
fn default_api_key_env() -> String {
    "GEMINI_API_KEY".into()
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_secs: default_timeout_secs(),
            api_key_env: default_api_key_env(),
        }
    }
}

/// Gemini `generateContent` client in JSON response mode.
#[derive(Debug, Clone)]
pub struct HttpPromptService {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl HttpPromptService {
    /// Build from config, reading the key from `config.api_key_env`.
    pub fn from_config(config: &AssistantConfig) -> Result<Self, AssistError> {
        let api_key = std::env::var(&config.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| AssistError::MissingApiKey(config.api_key_env.clone()))?;
        Self::with_key(config, api_key)
    }

    pub fn with_key(config: &AssistantConfig, api_key: String) -> Result<Self, AssistError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        let endpoint = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        Ok(Self {
            client,
            endpoint,
            api_key,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }
}

impl PromptService for HttpPromptService {
    async fn generate(&self, request: PromptRequest) -> Result<Value, AssistError> {
        let body = json!({
            "contents": [{ "role": "user", "parts": [{ "text": request.prompt }] }],
            "generationConfig": {
                "responseMimeType": "application/json",
                "responseSchema": request.response_schema,
            },
        });

        tracing::debug!(tool = ?request.tool, endpoint = %self.endpoint, "calling model");
        let resp = self
            .client
            .post(&self.endpoint)
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(AssistError::Status {
                status: status.as_u16(),
                body,
            });
        }

        let payload: Value = resp.json().await?;
        extract_json_answer(&payload)
    }
}

/// Pull the first candidate's text part and parse it as JSON.
pub fn extract_json_answer(payload: &Value) -> Result<Value, AssistError> {
    let text = payload["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .ok_or(AssistError::EmptyResponse)?;
    serde_json::from_str(text).map_err(|e| AssistError::Malformed(e.to_string()))
}
