use std::sync::Arc;

use async_trait::async_trait;
use bure_core::{BureError, LlmRequest, LlmResponse, Message, Runnable};

use crate::Llm;

/// An [`Llm`] bound to a model name and sampling temperature, so it can sit
/// in a chain right after a prompt template.
#[derive(Clone)]
pub struct ChatModel {
    llm: Arc<dyn Llm>,
    model: String,
    temperature: Option<f32>,
}

impl ChatModel {
    pub fn new(llm: Arc<dyn Llm>, model: impl Into<String>) -> Self {
        Self {
            llm,
            model: model.into(),
            temperature: None,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

impl std::fmt::Debug for ChatModel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatModel")
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .finish()
    }
}

#[async_trait]
impl Runnable<Vec<Message>, LlmResponse> for ChatModel {
    async fn invoke(&self, input: Vec<Message>) -> Result<LlmResponse, BureError> {
        let request = LlmRequest {
            model: self.model.clone(),
            messages: input,
            temperature: self.temperature,
        };
        self.llm.invoke(request).await
    }
}
