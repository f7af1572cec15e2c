use serde::{Deserialize, Serialize};
use bure_core::{BureError, Runnable};
use bure_graph::{ExecutionConfig, GraphBuilder, GraphError, GraphState, StateSchema, StateUpdate, END};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct LoopState {
    count: i32,
}

impl StateSchema for LoopState {
    type Update = Self;
    fn apply(_: &Self, update: Self) -> Self {
        update
    }
}

struct Inc;

#[async_trait::async_trait]
impl Runnable<GraphState<LoopState>, StateUpdate<LoopState>> for Inc {
    async fn invoke(
        &self,
        input: GraphState<LoopState>,
    ) -> Result<StateUpdate<LoopState>, BureError> {
        Ok(StateUpdate::new(LoopState {
            count: input.data.count + 1,
        }))
    }
}

fn looping(config: ExecutionConfig) -> bure_graph::ExecutableGraph<LoopState> {
    GraphBuilder::new()
        .add_node("inc", Inc)
        .set_entry("inc")
        .add_conditional_edges(
            "inc",
            |state: &GraphState<LoopState>| Ok(state.data.count >= 100),
            [(true, END), (false, "inc")],
        )
        .with_config(config)
        .compile()
        .expect("compile")
}

#[tokio::test]
async fn revisiting_a_node_is_detected() {
    let graph = looping(ExecutionConfig::default());
    let err = graph
        .invoke(GraphState::new(LoopState::default()))
        .await
        .unwrap_err();
    assert!(matches!(err, GraphError::CycleDetected { node, .. } if node == "inc"));
}

#[tokio::test]
async fn max_steps_bounds_loops() {
    let graph = looping(ExecutionConfig {
        max_steps: Some(5),
        cycle_detection: false,
        cycle_window: 0,
    });
    let err = graph
        .invoke(GraphState::new(LoopState::default()))
        .await
        .unwrap_err();
    assert!(matches!(
        err,
        GraphError::MaxStepsExceeded { max: 5, reached: 5 }
    ));
}

#[tokio::test]
async fn loop_within_limits_completes() {
    let graph = looping(ExecutionConfig {
        max_steps: Some(10),
        cycle_detection: false,
        cycle_window: 0,
    });
    let out = graph
        .invoke(GraphState::new(LoopState { count: 97 }))
        .await
        .unwrap();
    assert_eq!(out.data.count, 100);
    assert!(!graph.program().is_acyclic());
}
