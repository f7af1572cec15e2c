mod chat_model;

// OpenAI-compatible client (always available)
pub mod openai_compatible;

// Provider-specific clients (feature-gated)
pub mod providers;

pub use bure_core::{LlmRequest, LlmResponse, Message, Role};
pub use chat_model::ChatModel;

pub use openai_compatible::{
    ChatCompletionRequest, OpenAiCompatibleBuilder, OpenAiCompatibleClient,
};

#[cfg(feature = "mistral")]
pub use providers::mistral::MistralClient;

use bure_core::Runnable;

/// A generative model: one chat request in, one completion out.
pub trait Llm: Runnable<LlmRequest, LlmResponse> + Send + Sync {}

impl<T> Llm for T where T: Runnable<LlmRequest, LlmResponse> + Send + Sync {}
