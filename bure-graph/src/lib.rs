mod config;
mod error;
mod graph;
mod observer;
mod program;
mod reducer;
mod state;

pub use config::ExecutionConfig;
pub use error::GraphError;
pub use graph::{ExecutableGraph, GraphBuilder, END, START};
pub use observer::{Observer, TracingObserver};
pub use program::{EdgeKind, GraphProgram};
pub use reducer::{AppendVec, Assign};
pub use state::{GraphState, StateSchema, StateUpdate};
