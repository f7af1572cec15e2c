//! Mistral LLM client

use crate::openai_compatible::OpenAiCompatibleClient;
use crate::{LlmRequest, LlmResponse};
use bure_core::{BureError, Runnable};
use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "https://api.mistral.ai";
pub const DEFAULT_MODEL: &str = "mistral-small-latest";

/// Mistral chat client (OpenAI-compatible API)
#[derive(Clone, Debug)]
pub struct MistralClient(OpenAiCompatibleClient);

impl MistralClient {
    /// Create a client against the public Mistral endpoint
    pub fn new(api_key: impl Into<String>) -> Result<Self, BureError> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint (proxies, test servers)
    pub fn with_base_url(api_key: impl Into<String>, base_url: &str) -> Result<Self, BureError> {
        let client = OpenAiCompatibleClient::builder()
            .base_url(base_url)?
            .api_key(api_key)
            .default_model(DEFAULT_MODEL)
            .timeout(Duration::from_secs(120))
            .build()?;
        Ok(Self(client))
    }

    /// Set the model to use
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.0.set_default_model(model);
        self
    }

    pub fn default_model(&self) -> &str {
        self.0.default_model()
    }
}

#[async_trait::async_trait]
impl Runnable<LlmRequest, LlmResponse> for MistralClient {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, BureError> {
        self.0.invoke(input).await
    }
}
