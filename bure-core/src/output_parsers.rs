use std::marker::PhantomData;

use async_trait::async_trait;
use schemars::JsonSchema;
use serde::de::DeserializeOwned;

use crate::{BureError, LlmResponse, Runnable};

/// Semantic checks run after a value has been deserialized from model output.
pub trait Validate {
    fn validate(&self) -> Result<(), String>;
}

/// Extracts the trimmed text content of a model response.
#[derive(Clone, Debug, Default)]
pub struct StrOutputParser;

#[async_trait]
impl Runnable<LlmResponse, String> for StrOutputParser {
    async fn invoke(&self, input: LlmResponse) -> Result<String, BureError> {
        Ok(input.content.trim().to_string())
    }
}

/// Schema-driven contract between a prompt and a typed value.
///
/// The same parser produces the format instructions embedded in the prompt
/// and strictly parses the model's answer back: the JSON (the first fenced
/// block when the answer has one) must deserialize into `T` as a whole and
/// then pass [`Validate::validate`]. Nothing is coerced.
#[derive(Clone, Debug)]
pub struct StructuredOutputParser<T> {
    format_instructions: String,
    _marker: PhantomData<fn() -> T>,
}

impl<T: JsonSchema> StructuredOutputParser<T> {
    pub fn new() -> Self {
        let schema = schemars::schema_for!(T);
        let schema = serde_json::to_string_pretty(&schema).unwrap_or_else(|_| "{}".to_string());
        let format_instructions = format!(
            "Answer with a single JSON object that conforms to the JSON schema below. \
             Every property listed in \"required\" must be present with the exact type given. \
             Do not add commentary before or after the JSON.\n\
             ```json\n{schema}\n```"
        );
        Self {
            format_instructions,
            _marker: PhantomData,
        }
    }
}

impl<T: JsonSchema> Default for StructuredOutputParser<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> StructuredOutputParser<T>
where
    T: DeserializeOwned + Validate,
{
    pub fn format_instructions(&self) -> &str {
        &self.format_instructions
    }

    pub fn parse(&self, text: &str) -> Result<T, BureError> {
        let cleaned = strip_code_fence(text);
        if cleaned.is_empty() {
            return Err(BureError::MalformedOutput {
                output: text.to_string(),
                reason: "empty output".to_string(),
            });
        }

        let value: T = serde_json::from_str(cleaned).map_err(|err| BureError::MalformedOutput {
            output: cleaned.to_string(),
            reason: err.to_string(),
        })?;
        value
            .validate()
            .map_err(|reason| BureError::MalformedOutput {
                output: cleaned.to_string(),
                reason,
            })?;
        Ok(value)
    }
}

#[async_trait]
impl<T> Runnable<LlmResponse, T> for StructuredOutputParser<T>
where
    T: DeserializeOwned + Validate + Send + 'static,
{
    async fn invoke(&self, input: LlmResponse) -> Result<T, BureError> {
        self.parse(&input.content)
    }
}

/// Contents of the first fenced block, wherever it sits in the text. Text
/// without a fence is returned trimmed.
fn strip_code_fence(text: &str) -> &str {
    let cleaned = text.trim();
    let Some(open) = cleaned.find("```") else {
        return cleaned;
    };
    let body = &cleaned[open + 3..];
    let body = body.strip_prefix("json").unwrap_or(body);
    match body.find("```") {
        Some(close) => body[..close].trim(),
        None => body.trim(),
    }
}
