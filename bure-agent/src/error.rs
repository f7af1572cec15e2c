use bure_core::BureError;
use bure_graph::GraphError;

/// Coarse category of an [`AgentError`], for callers that branch on the cause.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FailureKind {
    Upstream,
    MalformedOutput,
    InvalidRoute,
    Prompt,
    Graph,
    EmptyResult,
    InvalidInput,
    Internal,
}

#[derive(Debug)]
pub enum AgentError {
    Graph(GraphError),
    EmptyResult,
    EmptyQuery,
}

impl AgentError {
    pub fn kind(&self) -> FailureKind {
        match self {
            AgentError::EmptyResult => FailureKind::EmptyResult,
            AgentError::EmptyQuery => FailureKind::InvalidInput,
            AgentError::Graph(err) => match err.step_error() {
                Some(source) => classify(source),
                None => FailureKind::Graph,
            },
        }
    }
}

fn classify(error: &BureError) -> FailureKind {
    match error {
        BureError::LlmProvider(_) | BureError::Search(_) => FailureKind::Upstream,
        BureError::MalformedOutput { .. } => FailureKind::MalformedOutput,
        BureError::InvalidRoute(_) => FailureKind::InvalidRoute,
        BureError::PromptNotFound { .. } | BureError::PromptVariable { .. } | BureError::Io(_) => {
            FailureKind::Prompt
        }
        BureError::Initialization(_) | BureError::InvalidConfig(_) | BureError::Serde(_) => {
            FailureKind::Internal
        }
    }
}

impl std::fmt::Display for AgentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentError::Graph(err) => write!(f, "Agent run failed: {err}"),
            AgentError::EmptyResult => f.write_str("Agent run produced no recipe"),
            AgentError::EmptyQuery => f.write_str("Query is empty"),
        }
    }
}

impl std::error::Error for AgentError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AgentError::Graph(err) => Some(err),
            _ => None,
        }
    }
}

impl From<GraphError> for AgentError {
    fn from(err: GraphError) -> Self {
        AgentError::Graph(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node_failed(source: BureError) -> AgentError {
        AgentError::Graph(GraphError::NodeFailed {
            node: "classify".to_string(),
            source,
        })
    }

    #[test]
    fn kind_follows_the_step_error() {
        assert_eq!(
            node_failed(BureError::LlmProvider("503".into())).kind(),
            FailureKind::Upstream
        );
        assert_eq!(
            node_failed(BureError::MalformedOutput {
                output: "{}".into(),
                reason: "missing field".into()
            })
            .kind(),
            FailureKind::MalformedOutput
        );
        assert_eq!(
            node_failed(BureError::PromptNotFound {
                name: "classify".into()
            })
            .kind(),
            FailureKind::Prompt
        );
        let routing = AgentError::Graph(GraphError::Routing {
            node: "classify".into(),
            source: BureError::InvalidRoute("maybe".into()),
        });
        assert_eq!(routing.kind(), FailureKind::InvalidRoute);
    }

    #[test]
    fn non_step_errors() {
        assert_eq!(
            AgentError::Graph(GraphError::MissingEntry).kind(),
            FailureKind::Graph
        );
        assert_eq!(AgentError::EmptyResult.kind(), FailureKind::EmptyResult);
        assert_eq!(AgentError::EmptyQuery.kind(), FailureKind::InvalidInput);
    }

    #[test]
    fn display_includes_node_and_cause() {
        let rendered = node_failed(BureError::Search("timeout".into())).to_string();
        assert!(rendered.contains("classify"));
        assert!(rendered.contains("timeout"));
    }
}
