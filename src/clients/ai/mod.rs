pub mod openai;
pub mod prompts;

pub use openai::OpenAiClient;

use crate::types::TokenUsage;
use crate::Result;
use async_trait::async_trait;

/// Text produced by a completion call, relayed verbatim.
#[derive(Debug, Clone)]
pub struct GeneratedReport {
    pub text: String,
    pub model: String,
    pub usage: Option<TokenUsage>,
}

#[async_trait]
pub trait AiClient: Send + Sync {
    /// One completion request for a system instruction and a user prompt.
    async fn complete(&self, system: &str, prompt: &str) -> Result<GeneratedReport>;
    fn provider_name(&self) -> &'static str;
}
