//! Recipe agent: classifies a free-text dish request, then either generates a
//! recipe from the stated ingredients or grounds one in a web search, and
//! returns a single validated [`Recipe`].
//!
//! ```text
//! START -> classify -+-> generate_recipe -> END
//!                    +-> search_recipe   -> END
//! ```

mod agent;
mod config;
mod error;
mod nodes;
pub mod prompts;
mod recipe;
mod route;
mod state;

pub use agent::{RecipeAgent, RecipeAgentBuilder, CLASSIFY_NODE, GENERATE_NODE, SEARCH_NODE};
pub use config::AgentConfig;
pub use error::{AgentError, FailureKind};
pub use nodes::{ClassifyNode, GenerateRecipeNode, SearchRecipeNode};
pub use recipe::Recipe;
pub use route::{route, Branch};
pub use state::{RecipeState, RecipeUpdate, ToolChoice};
