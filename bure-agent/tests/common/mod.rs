#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bure_agent::{prompts, RecipeAgent};
use bure_core::{BureError, LlmRequest, LlmResponse, Runnable};
use bure_prompt::InMemoryPromptStore;
use bure_search::{SearchRequest, SearchResponse};
use serde_json::json;

pub const CLASSIFY_MARKER: &str = "[classify]";
pub const GENERATE_MARKER: &str = "[generate]";
pub const SEARCH_MARKER: &str = "[search]";

/// Answers each step by looking for its marker in the rendered prompt.
#[derive(Default)]
pub struct ScriptedLlm {
    pub classify: Option<String>,
    pub generate: Option<String>,
    pub search: Option<String>,
    pub fail_with: Option<String>,
    pub requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedLlm {
    pub fn classify(label: &str) -> Self {
        Self {
            classify: Some(label.to_string()),
            ..Default::default()
        }
    }

    pub fn generate(mut self, reply: impl Into<String>) -> Self {
        self.generate = Some(reply.into());
        self
    }

    pub fn search(mut self, reply: impl Into<String>) -> Self {
        self.search = Some(reply.into());
        self
    }

    pub fn prompts(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .map(|request| request.messages[0].content.clone())
            .collect()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Runnable<LlmRequest, LlmResponse> for ScriptedLlm {
    async fn invoke(&self, input: LlmRequest) -> Result<LlmResponse, BureError> {
        let prompt = input.messages[0].content.clone();
        self.requests.lock().unwrap().push(input);

        if let Some(message) = &self.fail_with {
            return Err(BureError::LlmProvider(message.clone()));
        }
        let reply = if prompt.starts_with(CLASSIFY_MARKER) {
            &self.classify
        } else if prompt.starts_with(GENERATE_MARKER) {
            &self.generate
        } else if prompt.starts_with(SEARCH_MARKER) {
            &self.search
        } else {
            &None
        };
        reply
            .clone()
            .map(|content| LlmResponse { content })
            .ok_or_else(|| BureError::LlmProvider(format!("unscripted prompt: {prompt}")))
    }
}

#[derive(Default)]
pub struct StubSearch {
    pub answer: Option<String>,
    pub fail: bool,
    pub requests: Mutex<Vec<SearchRequest>>,
}

impl StubSearch {
    pub fn answering(answer: &str) -> Self {
        Self {
            answer: Some(answer.to_string()),
            ..Default::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Runnable<SearchRequest, SearchResponse> for StubSearch {
    async fn invoke(&self, input: SearchRequest) -> Result<SearchResponse, BureError> {
        let query = input.query.clone();
        self.requests.lock().unwrap().push(input);
        if self.fail {
            return Err(BureError::Search("429: rate limited".to_string()));
        }
        Ok(SearchResponse {
            query,
            answer: self.answer.clone(),
            results: Vec::new(),
        })
    }
}

pub fn marked_prompts() -> InMemoryPromptStore {
    InMemoryPromptStore::new()
        .with_prompt(prompts::CLASSIFY, format!("{CLASSIFY_MARKER} pick a tool"))
        .with_prompt(prompts::GENERATE_RECIPE, format!("{GENERATE_MARKER} cook"))
        .with_prompt(prompts::SEARCH_RECIPE, format!("{SEARCH_MARKER} look it up"))
}

pub fn build_agent(llm: Arc<ScriptedLlm>, search: Arc<StubSearch>) -> RecipeAgent {
    RecipeAgent::builder()
        .llm(llm)
        .search(search)
        .prompts(Arc::new(marked_prompts()))
        .model("stub-model")
        .build()
        .expect("agent")
}

pub fn recipe_json(name: &str) -> String {
    json!({
        "name": name,
        "description": "Простое блюдо",
        "ingredients": {"яйца": "3 шт", "молоко": "100 мл"},
        "instructions": "Взбить и обжарить.",
        "servings": 2,
        "cooking_time": 15,
        "complexity": 1
    })
    .to_string()
}
