use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use bure_core::{BureError, Runnable, RunnableExt, StrOutputParser, Value};
use bure_graph::{GraphState, StateUpdate};
use bure_llm::ChatModel;
use bure_prompt::{PromptStore, PromptTemplate};

use crate::prompts::CLASSIFY;
use crate::{RecipeState, RecipeUpdate, ToolChoice};

const QUERY_SUFFIX: &str = "\n Запрос пользователя: {{user_query}}";

/// Asks the model which branch should serve the request.
pub struct ClassifyNode {
    prompts: Arc<dyn PromptStore>,
    model: ChatModel,
}

impl ClassifyNode {
    pub fn new(prompts: Arc<dyn PromptStore>, model: ChatModel) -> Self {
        Self { prompts, model }
    }
}

#[async_trait]
impl Runnable<GraphState<RecipeState>, StateUpdate<RecipeState>> for ClassifyNode {
    async fn invoke(
        &self,
        input: GraphState<RecipeState>,
    ) -> Result<StateUpdate<RecipeState>, BureError> {
        let template = self.prompts.get_prompt(CLASSIFY)?;
        let chain = PromptTemplate::new(format!("{template}{QUERY_SUFFIX}"))
            .then(self.model.clone())
            .then(StrOutputParser);

        let vars = HashMap::from([(
            "user_query".to_string(),
            Value::from(input.data.user_query.as_str()),
        )]);
        let label: String = chain.invoke(vars).await?;
        let tool = ToolChoice::from_label(&label);
        tracing::debug!(model = self.model.model(), tool = tool.label(), "classified request");

        Ok(StateUpdate::new(RecipeUpdate {
            tool: Some(tool),
            ..Default::default()
        }))
    }
}
