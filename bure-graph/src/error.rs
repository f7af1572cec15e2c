use bure_core::BureError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GraphError {
    #[error("node '{node}' failed: {source}")]
    NodeFailed {
        node: String,
        #[source]
        source: BureError,
    },
    #[error("routing after '{node}' failed: {source}")]
    Routing {
        node: String,
        #[source]
        source: BureError,
    },
    #[error("missing node: {node}")]
    MissingNode { node: String },
    #[error("invalid edge to '{node}'")]
    InvalidEdge { node: String },
    #[error("node '{node}' has more than one outgoing edge")]
    DuplicateEdge { node: String },
    #[error("graph has no entry point")]
    MissingEntry,
    #[error("node '{node}' is unreachable from the entry point")]
    UnreachableNode { node: String },
    #[error("Max steps exceeded: reached {reached}, limit {max}")]
    MaxStepsExceeded { max: usize, reached: usize },
    #[error("Cycle detected: node '{node}' repeated in recent window")]
    CycleDetected { node: String, recent: Vec<String> },
}

impl GraphError {
    /// The underlying step failure, when the run failed inside a node or router.
    pub fn step_error(&self) -> Option<&BureError> {
        match self {
            GraphError::NodeFailed { source, .. } | GraphError::Routing { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
