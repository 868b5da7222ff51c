use crate::clients::ai::{AiClient, GeneratedReport};
use crate::types::TokenUsage;
use crate::{AppError, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const MODEL: &str = "gpt-4o";
const TEMPERATURE: f64 = 0.7;
const MAX_TOKENS: u32 = 4000;
const TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Serialize)]
struct OpenAiRequest<'a> {
    model: &'a str,
    messages: Vec<Message<'a>>,
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct OpenAiResponse {
    #[serde(default)]
    model: Option<String>,
    choices: Vec<Choice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAiError {
    error: OpenAiErrorBody,
}

#[derive(Debug, Deserialize)]
struct OpenAiErrorBody {
    message: String,
}

pub struct OpenAiClient {
    client: Client,
    api_key: String,
    completions_url: String,
}

impl OpenAiClient {
    pub fn new(api_key: String, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key,
            completions_url: format!("{}/chat/completions", base_url.trim_end_matches('/')),
        })
    }

    async fn call_api(&self, system: &str, prompt: &str) -> Result<GeneratedReport> {
        let request = OpenAiRequest {
            model: MODEL,
            messages: vec![
                Message {
                    role: "system",
                    content: system,
                },
                Message {
                    role: "user",
                    content: prompt,
                },
            ],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };

        let response = self
            .client
            .post(&self.completions_url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&request)
            .send()
            .await
            .map_err(|e| AppError::ExternalApi(format!("OpenAI API request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            let message = serde_json::from_str::<OpenAiError>(&body)
                .map(|e| e.error.message)
                .unwrap_or(body);
            return Err(AppError::ExternalApi(format!(
                "OpenAI API returned {}: {}",
                status, message
            )));
        }

        let openai_response: OpenAiResponse = response
            .json()
            .await
            .map_err(|e| AppError::ExternalApi(format!("Failed to parse OpenAI response: {}", e)))?;

        let text = openai_response
            .choices
            .into_iter()
            .next()
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or_else(|| AppError::ExternalApi("No content in OpenAI response".to_string()))?;

        if let Some(usage) = &openai_response.usage {
            debug!(
                "OpenAI call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        Ok(GeneratedReport {
            text,
            model: openai_response.model.unwrap_or_else(|| MODEL.to_string()),
            usage: openai_response.usage,
        })
    }
}

#[async_trait]
impl AiClient for OpenAiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<GeneratedReport> {
        self.call_api(system, prompt).await
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_completions_url_joins_base() {
        let client = OpenAiClient::new("sk-test".into(), "https://example.test/v1/").unwrap();
        assert_eq!(client.completions_url, "https://example.test/v1/chat/completions");
    }

    #[test]
    fn test_request_serializes_fixed_parameters() {
        let request = OpenAiRequest {
            model: MODEL,
            messages: vec![Message {
                role: "user",
                content: "hello",
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        };
        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "gpt-4o");
        assert_eq!(value["max_tokens"], 4000);
        assert_eq!(value["messages"][0]["role"], "user");
    }

    #[test]
    fn test_response_usage_is_optional() {
        let body = r#"{"choices":[{"message":{"content":"<h2>Summary</h2>"}}]}"#;
        let parsed: OpenAiResponse = serde_json::from_str(body).unwrap();
        assert!(parsed.usage.is_none());
        assert_eq!(parsed.choices[0].message.content.as_deref(), Some("<h2>Summary</h2>"));
    }

    #[tokio::test]
    async fn test_unreachable_service_is_external_error() {
        let client = OpenAiClient::new("sk-test".into(), "http://127.0.0.1:1/v1").unwrap();
        let err = client.complete("system", "prompt").await.unwrap_err();
        match err {
            AppError::ExternalApi(message) => {
                assert!(message.starts_with("OpenAI API request failed"));
                assert!(!message.contains("sk-test"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
