use bure_core::Message;
use bure_graph::{AppendVec, Assign, StateSchema};
use serde::{Deserialize, Serialize};

use crate::Recipe;

/// The classifier's decision. Anything other than the two known labels is
/// kept verbatim so the router can reject it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolChoice {
    Generate,
    Search,
    Unknown(String),
}

impl ToolChoice {
    pub fn from_label(label: &str) -> Self {
        match label.trim() {
            "generate" => ToolChoice::Generate,
            "search" => ToolChoice::Search,
            other => ToolChoice::Unknown(other.to_string()),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            ToolChoice::Generate => "generate",
            ToolChoice::Search => "search",
            ToolChoice::Unknown(label) => label,
        }
    }
}

/// Conversation state for one agent run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeState {
    pub messages: Vec<Message>,
    pub user_query: String,
    pub generated_recipe: Option<Recipe>,
    pub searched_recipe: Option<Recipe>,
    pub tool: Option<ToolChoice>,
}

impl RecipeState {
    pub fn new(query: impl Into<String>) -> Self {
        let query = query.into();
        Self {
            messages: vec![Message::user(query.clone())],
            user_query: query,
            ..Default::default()
        }
    }

    /// Number of branches that produced a recipe. Exactly one after a
    /// successful run.
    pub fn recipe_count(&self) -> usize {
        usize::from(self.generated_recipe.is_some()) + usize::from(self.searched_recipe.is_some())
    }
}

/// Delta returned by a node. `user_query` is deliberately absent: it never
/// changes after the state is created.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct RecipeUpdate {
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(default)]
    pub generated_recipe: Option<Recipe>,
    #[serde(default)]
    pub searched_recipe: Option<Recipe>,
    #[serde(default)]
    pub tool: Option<ToolChoice>,
}

impl StateSchema for RecipeState {
    type Update = RecipeUpdate;

    fn apply(current: &Self, update: RecipeUpdate) -> Self {
        Self {
            messages: AppendVec::merge(&current.messages, update.messages),
            user_query: current.user_query.clone(),
            generated_recipe: Assign::merge(&current.generated_recipe, update.generated_recipe),
            searched_recipe: Assign::merge(&current.searched_recipe, update.searched_recipe),
            tool: Assign::merge(&current.tool, update.tool),
        }
    }
}
