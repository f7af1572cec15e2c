use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bure_core::{BureError, Message, Runnable, RunnableExt, StructuredOutputParser, Value};
use bure_graph::{GraphState, StateUpdate};
use bure_llm::ChatModel;
use bure_prompt::{PromptStore, PromptTemplate};
use bure_search::{SearchRequest, WebSearch};

use crate::prompts::SEARCH_RECIPE;
use crate::{Recipe, RecipeState, RecipeUpdate};

const PROMPT_SUFFIX: &str = "\n Запрос пользователя:\n{{query}}\n Результаты поиска:\n {{search_results}}\n Формат вывода:\n {{format_instructions}}";

/// Looks the dish up on the web and writes a recipe grounded in the answer.
pub struct SearchRecipeNode {
    prompts: Arc<dyn PromptStore>,
    model: ChatModel,
    parser: StructuredOutputParser<Recipe>,
    search: Arc<dyn WebSearch>,
}

impl SearchRecipeNode {
    pub fn new(
        prompts: Arc<dyn PromptStore>,
        model: ChatModel,
        parser: StructuredOutputParser<Recipe>,
        search: Arc<dyn WebSearch>,
    ) -> Self {
        Self {
            prompts,
            model,
            parser,
            search,
        }
    }
}

#[async_trait]
impl Runnable<GraphState<RecipeState>, StateUpdate<RecipeState>> for SearchRecipeNode {
    async fn invoke(
        &self,
        input: GraphState<RecipeState>,
    ) -> Result<StateUpdate<RecipeState>, BureError> {
        let query = input.data.user_query.as_str();
        let request = SearchRequest::new(query)
            .max_results(1)
            .include_answer(true);
        let response = self.search.invoke(request).await?;

        // A weak or missing answer still goes to the model.
        let search_results = match response.answer_text() {
            Some(answer) => Value::from(answer),
            None => {
                tracing::warn!(query, "web search returned no answer");
                Value::Null
            }
        };

        let template = self.prompts.get_prompt(SEARCH_RECIPE)?;
        let chain = PromptTemplate::new(format!("{template}{PROMPT_SUFFIX}"))
            .partial("format_instructions", self.parser.format_instructions())
            .then(self.model.clone())
            .then(self.parser.clone());

        let vars = HashMap::from([
            ("query".to_string(), Value::from(query)),
            ("search_results".to_string(), search_results),
        ]);
        let recipe: Recipe = chain.invoke(vars).await?;
        tracing::info!(
            model = self.model.model(),
            recipe = %recipe.name,
            "built recipe from web search"
        );

        Ok(StateUpdate::new(RecipeUpdate {
            messages: vec![Message::assistant("Найден рецепт в интернете")],
            searched_recipe: Some(recipe),
            ..Default::default()
        }))
    }
}
