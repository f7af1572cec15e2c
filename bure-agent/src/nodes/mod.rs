mod classify;
mod generate;
mod search;

pub use classify::ClassifyNode;
pub use generate::GenerateRecipeNode;
pub use search::SearchRecipeNode;
