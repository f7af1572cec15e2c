mod store;
mod template;

pub use store::{FilePromptStore, InMemoryPromptStore, PromptStore};
pub use template::PromptTemplate;
