use std::sync::Arc;

use bure_core::{BureError, StructuredOutputParser};
use bure_graph::{
    ExecutableGraph, ExecutionConfig, GraphBuilder, GraphState, Observer, TracingObserver, END,
    START,
};
use bure_llm::providers::mistral::{MistralClient, DEFAULT_MODEL};
use bure_llm::{ChatModel, Llm};
use bure_prompt::{FilePromptStore, PromptStore};
use bure_search::{TavilyClient, WebSearch};
use secrecy::ExposeSecret;
use tracing::Instrument;

use crate::config::DEFAULT_TEMPERATURE;
use crate::{
    prompts, route, AgentConfig, AgentError, Branch, ClassifyNode, GenerateRecipeNode, Recipe,
    RecipeState, SearchRecipeNode,
};

pub const CLASSIFY_NODE: &str = "classify";
pub const GENERATE_NODE: &str = "generate_recipe";
pub const SEARCH_NODE: &str = "search_recipe";

/// Turns a free-text dish request into a single [`Recipe`].
///
/// The compiled graph is shared by every call; each call owns its own
/// [`RecipeState`], so one agent can serve concurrent requests.
pub struct RecipeAgent {
    graph: ExecutableGraph<RecipeState>,
}

impl RecipeAgent {
    pub fn builder() -> RecipeAgentBuilder {
        RecipeAgentBuilder::default()
    }

    /// Wire the Mistral and Tavily clients from environment variables.
    pub fn from_env() -> Result<Self, BureError> {
        Self::from_config(AgentConfig::from_env()?)
    }

    pub fn from_config(config: AgentConfig) -> Result<Self, BureError> {
        let mistral_key = config.mistral_api_key.expose_secret().clone();
        let llm = match config.llm_base_url.as_deref() {
            Some(base_url) => MistralClient::with_base_url(mistral_key, base_url),
            None => MistralClient::new(mistral_key),
        }
        .map_err(initialization)?
        .with_model(config.model.clone());

        let mut search = TavilyClient::builder().api_key(config.tavily_api_key.expose_secret().clone());
        if let Some(base_url) = config.tavily_base_url {
            search = search.base_url(base_url);
        }
        let search = search.build().map_err(initialization)?;

        let prompts: Arc<dyn PromptStore> = match config.prompts_dir {
            Some(dir) => {
                let store = FilePromptStore::new(dir);
                tracing::debug!(dir = %store.root().display(), "loading prompts from directory");
                Arc::new(store)
            }
            None => Arc::new(prompts::builtin()),
        };

        Self::builder()
            .llm(Arc::new(llm))
            .search(Arc::new(search))
            .prompts(prompts)
            .model(config.model)
            .temperature(config.temperature)
            .build()
    }

    pub fn graph(&self) -> &ExecutableGraph<RecipeState> {
        &self.graph
    }

    /// Run the graph and return the final state.
    pub async fn run(&self, query: &str) -> Result<RecipeState, AgentError> {
        if query.trim().is_empty() {
            return Err(AgentError::EmptyQuery);
        }

        let span = tracing::info_span!("recipe_agent", query = %query);
        let state = self
            .graph
            .invoke(GraphState::new(RecipeState::new(query)))
            .instrument(span)
            .await?;
        Ok(state.into_inner())
    }

    pub async fn try_invoke(&self, query: &str) -> Result<Recipe, AgentError> {
        let state = self.run(query).await?;
        match (state.generated_recipe, state.searched_recipe) {
            (Some(generated), Some(searched)) => {
                tracing::error!(
                    generated = %generated.name,
                    searched = %searched.name,
                    "both branches produced a recipe; keeping the generated one"
                );
                Ok(generated)
            }
            (Some(recipe), None) | (None, Some(recipe)) => Ok(recipe),
            (None, None) => Err(AgentError::EmptyResult),
        }
    }

    /// Returns `None` on any failure. The cause is logged, not returned; use
    /// [`RecipeAgent::try_invoke`] to inspect it.
    pub async fn invoke(&self, query: &str) -> Option<Recipe> {
        match self.try_invoke(query).await {
            Ok(recipe) => Some(recipe),
            Err(err) => {
                tracing::error!(error = %err, kind = ?err.kind(), "recipe agent failed");
                None
            }
        }
    }
}

impl std::fmt::Debug for RecipeAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecipeAgent")
            .field("entry", &self.graph.entry())
            .finish()
    }
}

pub struct RecipeAgentBuilder {
    llm: Option<Arc<dyn Llm>>,
    search: Option<Arc<dyn WebSearch>>,
    prompts: Option<Arc<dyn PromptStore>>,
    model: Option<String>,
    temperature: f32,
    observer: Arc<dyn Observer>,
    config: ExecutionConfig,
}

impl Default for RecipeAgentBuilder {
    fn default() -> Self {
        Self {
            llm: None,
            search: None,
            prompts: None,
            model: None,
            temperature: DEFAULT_TEMPERATURE,
            observer: Arc::new(TracingObserver),
            config: ExecutionConfig::default(),
        }
    }
}

impl RecipeAgentBuilder {
    pub fn llm(mut self, llm: Arc<dyn Llm>) -> Self {
        self.llm = Some(llm);
        self
    }

    pub fn search(mut self, search: Arc<dyn WebSearch>) -> Self {
        self.search = Some(search);
        self
    }

    /// Defaults to the prompts bundled with the crate.
    pub fn prompts(mut self, prompts: Arc<dyn PromptStore>) -> Self {
        self.prompts = Some(prompts);
        self
    }

    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    pub fn observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = observer;
        self
    }

    pub fn execution_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn build(self) -> Result<RecipeAgent, BureError> {
        let llm = self
            .llm
            .ok_or_else(|| BureError::Initialization("no language model configured".to_string()))?;
        let search = self
            .search
            .ok_or_else(|| BureError::Initialization("no web search configured".to_string()))?;
        let prompts = self
            .prompts
            .unwrap_or_else(|| Arc::new(prompts::builtin()) as Arc<dyn PromptStore>);
        let model = ChatModel::new(llm, self.model.unwrap_or_else(|| DEFAULT_MODEL.to_string()))
            .with_temperature(self.temperature);
        let parser = StructuredOutputParser::<Recipe>::new();

        let graph = GraphBuilder::new()
            .add_node(CLASSIFY_NODE, ClassifyNode::new(prompts.clone(), model.clone()))
            .add_node(
                GENERATE_NODE,
                GenerateRecipeNode::new(prompts.clone(), model.clone(), parser.clone()),
            )
            .add_node(
                SEARCH_NODE,
                SearchRecipeNode::new(prompts, model, parser, search),
            )
            .add_edge(START, CLASSIFY_NODE)
            .add_conditional_edges(
                CLASSIFY_NODE,
                |state: &GraphState<RecipeState>| {
                    let branch = route(&state.data)?;
                    tracing::debug!(branch = branch.as_str(), "routing request");
                    Ok(branch)
                },
                [
                    (Branch::Generate, GENERATE_NODE),
                    (Branch::Search, SEARCH_NODE),
                ],
            )
            .add_edge(GENERATE_NODE, END)
            .add_edge(SEARCH_NODE, END)
            .with_config(self.config)
            .with_observer(self.observer)
            .compile()
            .map_err(|err| BureError::Initialization(err.to_string()))?;

        Ok(RecipeAgent { graph })
    }
}

fn initialization(err: BureError) -> BureError {
    match err {
        BureError::Initialization(_) => err,
        other => BureError::Initialization(other.to_string()),
    }
}
