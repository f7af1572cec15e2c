//! Provider-specific LLM clients

#[cfg(feature = "mistral")]
pub mod mistral;
