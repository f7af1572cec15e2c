use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bure_core::{BureError, Message, Runnable, RunnableExt, StructuredOutputParser, Value};
use bure_graph::{GraphState, StateUpdate};
use bure_llm::ChatModel;
use bure_prompt::{PromptStore, PromptTemplate};

use crate::prompts::GENERATE_RECIPE;
use crate::{Recipe, RecipeState, RecipeUpdate};

const PROMPT_SUFFIX: &str =
    "\nЗапрос пользователя:\n{{query}}\nФормат вывода: {{format_instructions}}";

/// Generates a recipe from the ingredients named in the request.
pub struct GenerateRecipeNode {
    prompts: Arc<dyn PromptStore>,
    model: ChatModel,
    parser: StructuredOutputParser<Recipe>,
}

impl GenerateRecipeNode {
    pub fn new(
        prompts: Arc<dyn PromptStore>,
        model: ChatModel,
        parser: StructuredOutputParser<Recipe>,
    ) -> Self {
        Self {
            prompts,
            model,
            parser,
        }
    }
}

#[async_trait]
impl Runnable<GraphState<RecipeState>, StateUpdate<RecipeState>> for GenerateRecipeNode {
    async fn invoke(
        &self,
        input: GraphState<RecipeState>,
    ) -> Result<StateUpdate<RecipeState>, BureError> {
        let template = self.prompts.get_prompt(GENERATE_RECIPE)?;
        let chain = PromptTemplate::new(format!("{template}{PROMPT_SUFFIX}"))
            .partial("format_instructions", self.parser.format_instructions())
            .then(self.model.clone())
            .then(self.parser.clone());

        let vars = HashMap::from([(
            "query".to_string(),
            Value::from(input.data.user_query.as_str()),
        )]);
        let recipe: Recipe = chain.invoke(vars).await?;
        tracing::info!(
            model = self.model.model(),
            recipe = %recipe.name,
            "generated recipe from ingredients"
        );

        Ok(StateUpdate::new(RecipeUpdate {
            messages: vec![Message::assistant(
                "Сгенерирован рецепт из предложенного списка ингредиентов",
            )],
            generated_recipe: Some(recipe),
            ..Default::default()
        }))
    }
}
