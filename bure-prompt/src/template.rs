use std::collections::HashMap;

use async_trait::async_trait;
use regex::Regex;
use bure_core::{BureError, Message, Runnable, Value};

/// Text template with `{{name}}` slots.
///
/// Partial variables are bound once at construction (for example the
/// format instructions of an output contract) and merged under the
/// per-call variables when rendering. A slot left without a value is an
/// error rather than an empty string.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    template: String,
    partials: HashMap<String, Value>,
}

impl PromptTemplate {
    pub fn new(template: impl Into<String>) -> Self {
        Self {
            template: template.into(),
            partials: HashMap::new(),
        }
    }

    pub fn partial(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.partials.insert(name.to_string(), value.into());
        self
    }

    pub fn render(&self, vars: &HashMap<String, Value>) -> Result<String, BureError> {
        let pattern = Regex::new(r"\{\{\s*(\w+)\s*\}\}")
            .map_err(|e| BureError::InvalidConfig(e.to_string()))?;

        let lookup = |key: &str| vars.get(key).or_else(|| self.partials.get(key));

        if let Some(missing) = pattern
            .captures_iter(&self.template)
            .map(|caps| caps[1].to_string())
            .find(|key| lookup(key).is_none())
        {
            return Err(BureError::PromptVariable { name: missing });
        }

        let rendered = pattern.replace_all(&self.template, |caps: &regex::Captures| {
            match lookup(&caps[1]) {
                Some(value) => value
                    .as_str()
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| value.to_string()),
                None => String::new(),
            }
        });
        Ok(rendered.to_string())
    }
}

/// Rendering produces a single user message, ready for a chat model.
#[async_trait]
impl Runnable<HashMap<String, Value>, Vec<Message>> for PromptTemplate {
    async fn invoke(&self, input: HashMap<String, Value>) -> Result<Vec<Message>, BureError> {
        Ok(vec![Message::user(self.render(&input)?)])
    }
}
