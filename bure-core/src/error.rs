use thiserror::Error;

#[derive(Debug, Error)]
pub enum BureError {
    #[error("Initialization failed: {0}")]
    Initialization(String),
    #[error("LLM provider failed: {0}")]
    LlmProvider(String),
    #[error("Web search failed: {0}")]
    Search(String),
    #[error("Malformed model output '{output}': {reason}")]
    MalformedOutput { output: String, reason: String },
    #[error("Invalid route: '{0}'")]
    InvalidRoute(String),
    #[error("Prompt not found: {name}")]
    PromptNotFound { name: String },
    #[error("Prompt variable '{name}' has no value")]
    PromptVariable { name: String },
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization/deserialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl BureError {
    /// True for failures of an external model or search call.
    pub fn is_upstream(&self) -> bool {
        matches!(self, BureError::LlmProvider(_) | BureError::Search(_))
    }
}
