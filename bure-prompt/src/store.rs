use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use bure_core::BureError;

/// Resolves a logical step name to its prompt text.
pub trait PromptStore: Send + Sync {
    fn get_prompt(&self, name: &str) -> Result<String, BureError>;
}

/// Reads `<root>/<name>.txt` on every call.
#[derive(Debug, Clone)]
pub struct FilePromptStore {
    root: PathBuf,
}

impl FilePromptStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, name: &str) -> PathBuf {
        self.root
            .join(format!("{}.txt", name.trim_start_matches('_')))
    }
}

impl PromptStore for FilePromptStore {
    fn get_prompt(&self, name: &str) -> Result<String, BureError> {
        let path = self.path_for(name);
        tracing::debug!(prompt = name, path = %path.display(), "loading prompt");
        std::fs::read_to_string(&path).map_err(|err| match err.kind() {
            ErrorKind::NotFound => BureError::PromptNotFound {
                name: name.to_string(),
            },
            _ => BureError::Io(err),
        })
    }
}

#[derive(Debug, Clone, Default)]
pub struct InMemoryPromptStore {
    prompts: HashMap<String, String>,
}

impl InMemoryPromptStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_prompt(mut self, name: &str, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: &str, text: impl Into<String>) {
        self.prompts
            .insert(name.trim_start_matches('_').to_string(), text.into());
    }
}

impl PromptStore for InMemoryPromptStore {
    fn get_prompt(&self, name: &str) -> Result<String, BureError> {
        self.prompts
            .get(name.trim_start_matches('_'))
            .cloned()
            .ok_or_else(|| BureError::PromptNotFound {
                name: name.to_string(),
            })
    }
}

impl<T: PromptStore + ?Sized> PromptStore for std::sync::Arc<T> {
    fn get_prompt(&self, name: &str) -> Result<String, BureError> {
        (**self).get_prompt(name)
    }
}
