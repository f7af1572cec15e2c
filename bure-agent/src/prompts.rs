//! Prompt names and the resources shipped with the crate.

use bure_prompt::InMemoryPromptStore;

pub const CLASSIFY: &str = "classify";
pub const GENERATE_RECIPE: &str = "generate_recipe_with_ingredients";
pub const SEARCH_RECIPE: &str = "search_for_recipe";

/// Prompts compiled into the binary, used when no prompt directory is configured.
pub fn builtin() -> InMemoryPromptStore {
    InMemoryPromptStore::new()
        .with_prompt(CLASSIFY, include_str!("../prompts/classify.txt"))
        .with_prompt(
            GENERATE_RECIPE,
            include_str!("../prompts/generate_recipe_with_ingredients.txt"),
        )
        .with_prompt(SEARCH_RECIPE, include_str!("../prompts/search_for_recipe.txt"))
}
