//! Non-streaming completion client for external LLM providers.
//!
//! OpenAI and Groq share a wire format; Anthropic uses its own. The pipeline
//! only ever needs the full response text, so nothing here streams.

use reqwest::Client;
use serde_json::{json, Value};
use tracing::debug;

use postpool_core::{Error, Result};

use crate::config::LLMConfig;

const OPENAI_URL: &str = "https://api.openai.com/v1/chat/completions";
const GROQ_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
const ANTHROPIC_URL: &str = "https://api.anthropic.com/v1/messages";

/// LLM provider identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LLMProvider {
    OpenAI,
    Anthropic,
    Groq,
}

impl std::fmt::Display for LLMProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LLMProvider::OpenAI => write!(f, "openai"),
            LLMProvider::Anthropic => write!(f, "anthropic"),
            LLMProvider::Groq => write!(f, "groq"),
        }
    }
}

/// Anything that can turn a prompt into a single text response.
///
/// The pipeline is written against this trait so tests can substitute a
/// scripted completer for the HTTP client.
pub trait TextCompleter {
    fn complete(&self, prompt: &str) -> impl std::future::Future<Output = Result<String>> + Send;
}

/// HTTP completion client for a resolved provider.
pub struct LlmClient {
    http: Client,
    provider: LLMProvider,
    model: String,
    api_key: String,
    temperature: f64,
    max_tokens: usize,
}

impl LlmClient {
    /// Build a client from configuration. Fails when no provider has a key.
    pub fn from_config(config: &LLMConfig) -> Result<Self> {
        let (provider, model, api_key) = config.resolve_provider().ok_or_else(|| {
            Error::Config("no LLM provider configured (set GROQ_API_KEY or edit llm-config.json)".into())
        })?;
        Ok(Self {
            http: Client::new(),
            provider,
            model,
            api_key,
            temperature: 0.2,
            max_tokens: 1024,
        })
    }

    pub fn provider(&self) -> LLMProvider {
        self.provider
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn complete_openai_compat(&self, url: &str, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        debug!("Completion request to {} with model {}", url, self.model);

        let response = self
            .http
            .post(url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("API error {status}: {body}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Response read error: {e}")))?;
        parse_openai_response(&payload)
    }

    async fn complete_anthropic(&self, prompt: &str) -> Result<String> {
        let body = json!({
            "model": self.model,
            "messages": [{"role": "user", "content": prompt}],
            "temperature": self.temperature,
            "max_tokens": self.max_tokens,
        });

        debug!("Completion request to Anthropic with model {}", self.model);

        let response = self
            .http
            .post(ANTHROPIC_URL)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", "2023-06-01")
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| Error::Llm(format!("Request failed: {e}")))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(Error::Llm(format!("API error {status}: {body}")));
        }

        let payload: Value = response
            .json()
            .await
            .map_err(|e| Error::Llm(format!("Response read error: {e}")))?;
        parse_anthropic_response(&payload)
    }
}

impl TextCompleter for LlmClient {
    async fn complete(&self, prompt: &str) -> Result<String> {
        match self.provider {
            LLMProvider::OpenAI => self.complete_openai_compat(OPENAI_URL, prompt).await,
            LLMProvider::Groq => self.complete_openai_compat(GROQ_URL, prompt).await,
            LLMProvider::Anthropic => self.complete_anthropic(prompt).await,
        }
    }
}

/// Pull the message text out of an OpenAI-compatible response body.
fn parse_openai_response(payload: &Value) -> Result<String> {
    payload["choices"][0]["message"]["content"]
        .as_str()
        .map(|s| s.to_string())
        .ok_or_else(|| Error::Llm(format!("Unexpected response shape: {payload}")))
}

/// Pull the message text out of an Anthropic Messages response body.
fn parse_anthropic_response(payload: &Value) -> Result<String> {
    let blocks = payload["content"]
        .as_array()
        .ok_or_else(|| Error::Llm(format!("Unexpected response shape: {payload}")))?;
    let text: String = blocks
        .iter()
        .filter_map(|b| (b["type"] == "text").then(|| b["text"].as_str()).flatten())
        .collect();
    if text.is_empty() {
        return Err(Error::Llm(format!("Empty completion: {payload}")));
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_openai_shape() {
        let payload = json!({
            "choices": [{"message": {"role": "assistant", "content": "{\"ok\": true}"}}]
        });
        assert_eq!(parse_openai_response(&payload).unwrap(), "{\"ok\": true}");
    }

    #[test]
    fn openai_shape_error_carries_payload() {
        let err = parse_openai_response(&json!({"error": "rate limited"})).unwrap_err();
        assert!(err.to_string().contains("rate limited"));
    }

    #[test]
    fn parses_anthropic_text_blocks() {
        let payload = json!({
            "content": [
                {"type": "text", "text": "hello "},
                {"type": "text", "text": "world"}
            ]
        });
        assert_eq!(parse_anthropic_response(&payload).unwrap(), "hello world");
    }

    #[test]
    fn anthropic_empty_content_is_an_error() {
        assert!(parse_anthropic_response(&json!({"content": []})).is_err());
    }
}
