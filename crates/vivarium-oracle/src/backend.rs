//! Oracle backend abstraction and implementations.
//!
//! Enum dispatch rather than trait objects, because async methods are not
//! dyn-compatible. Three protocols are supported:
//!
//! - [`HttpBackend`] posts the [`DecisionRequest`] JSON to a decision
//!   service and reads `{"action": ...}` back.
//! - [`OpenAiBackend`] and [`AnthropicBackend`] render a prompt and ask a
//!   language model directly, then parse its completion leniently.

use std::time::Duration;

use vivarium_types::{BehaviorState, DecisionRequest, DecisionResponse};

use crate::config::{BackendType, OracleClientConfig};
use crate::error::OracleError;
use crate::parse::parse_decision;
use crate::prompt::{PromptEngine, RenderedPrompt};

// ---------------------------------------------------------------------------
// Unified backend enum
// ---------------------------------------------------------------------------

/// A backend that turns a decision request into a behavior.
#[derive(Debug)]
pub enum OracleBackend {
    /// Plain JSON decision service.
    Http(HttpBackend),
    /// `OpenAI`-compatible chat completions API.
    OpenAi(OpenAiBackend),
    /// Anthropic Messages API.
    Anthropic(AnthropicBackend),
}

impl OracleBackend {
    /// Ask for a behavior.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError`] on transport failure, a non-success status,
    /// or an undecodable response body.
    pub async fn decide(&self, request: &DecisionRequest) -> Result<BehaviorState, OracleError> {
        match self {
            Self::Http(backend) => backend.decide(request).await,
            Self::OpenAi(backend) => backend.decide(request).await,
            Self::Anthropic(backend) => backend.decide(request).await,
        }
    }

    /// Human-readable name for logging.
    pub const fn name(&self) -> &str {
        match self {
            Self::Http(_) => "http",
            Self::OpenAi(_) => "openai-compatible",
            Self::Anthropic(_) => "anthropic",
        }
    }
}

/// Build the HTTP client shared by every backend.
fn build_client(timeout: Duration) -> Result<reqwest::Client, OracleError> {
    reqwest::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| OracleError::Config(format!("failed to build HTTP client: {e}")))
}

/// Send a prepared request and return the JSON body of a success response.
async fn send_json(request: reqwest::RequestBuilder) -> Result<serde_json::Value, OracleError> {
    let response = request
        .send()
        .await
        .map_err(|e| OracleError::Transport(format!("request failed: {e}")))?;

    let status = response.status();
    if !status.is_success() {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "unable to read error body".to_owned());
        return Err(OracleError::Status {
            status: status.as_u16(),
            body,
        });
    }

    response
        .json()
        .await
        .map_err(|e| OracleError::Parse(format!("response body is not JSON: {e}")))
}

// ---------------------------------------------------------------------------
// Plain HTTP decision service
// ---------------------------------------------------------------------------

/// Backend for a JSON decision service.
#[derive(Debug)]
pub struct HttpBackend {
    client: reqwest::Client,
    url: String,
}

impl HttpBackend {
    /// Create a backend posting to `config.url`.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &OracleClientConfig) -> Result<Self, OracleError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            url: config.url.clone(),
        })
    }

    async fn decide(&self, request: &DecisionRequest) -> Result<BehaviorState, OracleError> {
        let json = send_json(self.client.post(&self.url).json(request)).await?;
        let response: DecisionResponse = serde_json::from_value(json)?;
        Ok(response.behavior())
    }
}

// ---------------------------------------------------------------------------
// OpenAI-compatible backend
// ---------------------------------------------------------------------------

/// Backend for `OpenAI`-compatible chat completions APIs.
///
/// Works with `OpenAI`, Groq and Ollama endpoints. Sends requests to
/// `{url}/chat/completions`.
#[derive(Debug)]
pub struct OpenAiBackend {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    prompts: PromptEngine,
}

impl OpenAiBackend {
    /// Create a new `OpenAI`-compatible backend.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &OracleClientConfig) -> Result<Self, OracleError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            url: config.url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            prompts: PromptEngine::new()?,
        })
    }

    async fn decide(&self, request: &DecisionRequest) -> Result<BehaviorState, OracleError> {
        let prompt = self.prompts.render(request)?;
        let text = self.complete(&prompt).await?;
        Ok(parse_decision(&text))
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, OracleError> {
        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": prompt.system},
                {"role": "user", "content": prompt.user}
            ],
            "temperature": 0.7,
            "max_tokens": 64
        });

        let json = send_json(
            self.client
                .post(format!("{}/chat/completions", self.url))
                .bearer_auth(&self.api_key)
                .json(&body),
        )
        .await?;

        extract_openai_content(&json)
    }
}

/// Extract the text content from an `OpenAI` chat completions response.
fn extract_openai_content(json: &serde_json::Value) -> Result<String, OracleError> {
    json.get("choices")
        .and_then(|c| c.get(0))
        .and_then(|c| c.get("message"))
        .and_then(|m| m.get("content"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| {
            OracleError::Parse("OpenAI response missing choices[0].message.content".to_owned())
        })
}

// ---------------------------------------------------------------------------
// Anthropic Messages API backend
// ---------------------------------------------------------------------------

/// Backend for the Anthropic Messages API.
///
/// Uses the `x-api-key` header, carries the system prompt as a top-level
/// field, and answers in `content[0].text`.
#[derive(Debug)]
pub struct AnthropicBackend {
    client: reqwest::Client,
    url: String,
    api_key: String,
    model: String,
    prompts: PromptEngine,
}

impl AnthropicBackend {
    /// Create a new Anthropic Messages API backend.
    ///
    /// # Errors
    ///
    /// Returns [`OracleError::Config`] if the HTTP client cannot be built.
    pub fn new(config: &OracleClientConfig) -> Result<Self, OracleError> {
        Ok(Self {
            client: build_client(config.timeout)?,
            url: config.url.clone(),
            api_key: config.api_key.clone().unwrap_or_default(),
            model: config.model.clone(),
            prompts: PromptEngine::new()?,
        })
    }

    async fn decide(&self, request: &DecisionRequest) -> Result<BehaviorState, OracleError> {
        let prompt = self.prompts.render(request)?;
        let text = self.complete(&prompt).await?;
        Ok(parse_decision(&text))
    }

    async fn complete(&self, prompt: &RenderedPrompt) -> Result<String, OracleError> {
        let body = serde_json::json!({
            "model": self.model,
            "max_tokens": 64,
            "system": prompt.system,
            "messages": [
                {"role": "user", "content": prompt.user}
            ]
        });

        let json = send_json(
            self.client
                .post(format!("{}/messages", self.url))
                .header("x-api-key", &self.api_key)
                .header("anthropic-version", "2023-06-01")
                .json(&body),
        )
        .await?;

        extract_anthropic_content(&json)
    }
}

/// Extract the text content from an Anthropic Messages API response.
fn extract_anthropic_content(json: &serde_json::Value) -> Result<String, OracleError> {
    json.get("content")
        .and_then(|c| c.get(0))
        .and_then(|b| b.get("text"))
        .and_then(serde_json::Value::as_str)
        .map(ToOwned::to_owned)
        .ok_or_else(|| OracleError::Parse("Anthropic response missing content[0].text".to_owned()))
}

// ---------------------------------------------------------------------------
// Factory
// ---------------------------------------------------------------------------

/// Create a backend from configuration.
///
/// # Errors
///
/// Returns [`OracleError`] if the HTTP client or the prompt templates
/// cannot be built.
pub fn create_backend(config: &OracleClientConfig) -> Result<OracleBackend, OracleError> {
    Ok(match config.backend {
        BackendType::Http => OracleBackend::Http(HttpBackend::new(config)?),
        BackendType::OpenAi => OracleBackend::OpenAi(OpenAiBackend::new(config)?),
        BackendType::Anthropic => OracleBackend::Anthropic(AnthropicBackend::new(config)?),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_config(backend: BackendType) -> OracleClientConfig {
        OracleClientConfig {
            backend,
            url: "http://127.0.0.1:9".to_owned(),
            api_key: Some("test".to_owned()),
            model: backend.default_model().to_owned(),
            timeout: Duration::from_millis(100),
            max_concurrent: 1,
        }
    }

    #[test]
    fn extract_openai_content_valid() {
        let json = serde_json::json!({
            "choices": [{"message": {"content": "{\"action\": \"EAT\"}"}}]
        });
        let result = extract_openai_content(&json);
        assert!(result.is_ok_and(|text| text.contains("EAT")));
    }

    #[test]
    fn extract_openai_content_missing_choices() {
        let json = serde_json::json!({"error": "rate_limit"});
        assert!(extract_openai_content(&json).is_err());
    }

    #[test]
    fn extract_anthropic_content_valid() {
        let json = serde_json::json!({
            "content": [{"type": "text", "text": "{\"action\": \"SLEEP\"}"}]
        });
        let result = extract_anthropic_content(&json);
        assert!(result.is_ok_and(|text| text.contains("SLEEP")));
    }

    #[test]
    fn extract_anthropic_content_missing() {
        let json = serde_json::json!({"content": []});
        assert!(extract_anthropic_content(&json).is_err());
    }

    #[test]
    fn create_backend_dispatches_correctly() {
        let names: Vec<String> = [BackendType::Http, BackendType::OpenAi, BackendType::Anthropic]
            .into_iter()
            .filter_map(|b| create_backend(&make_config(b)).ok())
            .map(|b| b.name().to_owned())
            .collect();
        assert_eq!(names, vec!["http", "openai-compatible", "anthropic"]);
    }
}
