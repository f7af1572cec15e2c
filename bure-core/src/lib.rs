mod chain;
mod error;
mod llm;
mod output_parsers;
mod runnable;
mod value;

pub use chain::{Chain, RunnableExt};
pub use error::BureError;
pub use llm::{LlmRequest, LlmResponse, Message, Role};
pub use output_parsers::{StrOutputParser, StructuredOutputParser, Validate};
pub use runnable::Runnable;
pub use value::Value;
