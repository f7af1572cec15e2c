use std::sync::{Arc, Mutex};

use serde::{Deserialize, Serialize};
use bure_core::{BureError, Runnable};
use bure_graph::{GraphBuilder, GraphState, Observer, StateSchema, StateUpdate, END};

#[derive(Clone, Default, Debug, Serialize, Deserialize, PartialEq)]
struct DemoState {
    count: i32,
}

impl StateSchema for DemoState {
    type Update = Self;
    fn apply(_: &Self, update: Self) -> Self {
        update
    }
}

struct AddOne;

#[async_trait::async_trait]
impl Runnable<GraphState<DemoState>, StateUpdate<DemoState>> for AddOne {
    async fn invoke(
        &self,
        input: GraphState<DemoState>,
    ) -> Result<StateUpdate<DemoState>, BureError> {
        Ok(StateUpdate::new(DemoState {
            count: input.data.count + 1,
        }))
    }
}

struct Fail;

#[async_trait::async_trait]
impl Runnable<GraphState<DemoState>, StateUpdate<DemoState>> for Fail {
    async fn invoke(
        &self,
        _input: GraphState<DemoState>,
    ) -> Result<StateUpdate<DemoState>, BureError> {
        Err(BureError::Search("timeout".to_string()))
    }
}

#[derive(Default)]
struct CollectingObserver {
    events: Mutex<Vec<String>>,
}

impl Observer for CollectingObserver {
    fn on_node_enter(&self, node: &str) {
        self.events.lock().unwrap().push(format!("enter:{node}"));
    }

    fn on_node_exit(&self, node: &str) {
        self.events.lock().unwrap().push(format!("exit:{node}"));
    }

    fn on_route(&self, from: &str, to: &str) {
        self.events.lock().unwrap().push(format!("route:{from}->{to}"));
    }

    fn on_error(&self, node: &str, _error: &str) {
        self.events.lock().unwrap().push(format!("error:{node}"));
    }
}

#[tokio::test]
async fn observer_sees_transitions_in_order() {
    let observer = Arc::new(CollectingObserver::default());
    let graph = GraphBuilder::new()
        .add_node("a", AddOne)
        .add_node("b", AddOne)
        .set_entry("a")
        .add_edge("a", "b")
        .add_edge("b", END)
        .with_observer(observer.clone())
        .compile()
        .expect("compile");

    graph
        .invoke(GraphState::new(DemoState { count: 0 }))
        .await
        .unwrap();

    let events = observer.events.lock().unwrap().clone();
    assert_eq!(
        events,
        vec![
            "enter:a",
            "exit:a",
            "route:a->b",
            "enter:b",
            "exit:b",
            format!("route:b->{END}").as_str(),
        ]
    );
}

#[tokio::test]
async fn observer_sees_node_errors() {
    let observer = Arc::new(CollectingObserver::default());
    let graph = GraphBuilder::new()
        .add_node("fail", Fail)
        .set_entry("fail")
        .with_observer(observer.clone())
        .compile()
        .expect("compile");

    assert!(graph
        .invoke(GraphState::new(DemoState::default()))
        .await
        .is_err());
    let events = observer.events.lock().unwrap().clone();
    assert_eq!(events, vec!["enter:fail", "error:fail"]);
}
