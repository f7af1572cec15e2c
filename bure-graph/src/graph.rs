use std::collections::{HashMap, VecDeque};
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

use bure_core::{BureError, Runnable};

use crate::program::{EdgeKind, GraphProgram};
use crate::{ExecutionConfig, GraphError, GraphState, Observer, StateSchema, StateUpdate};

pub const START: &str = "__start__";
pub const END: &str = "__end__";

type Node<S> = Box<dyn Runnable<GraphState<S>, StateUpdate<S>> + Send + Sync>;
type Router<S> = Arc<dyn Fn(&GraphState<S>) -> Result<String, BureError> + Send + Sync>;

enum Edge<S: StateSchema> {
    Direct(String),
    Conditional {
        router: Router<S>,
        targets: Vec<String>,
    },
}

pub struct GraphBuilder<S: StateSchema> {
    nodes: HashMap<String, Node<S>>,
    edges: HashMap<String, Edge<S>>,
    entry: Option<String>,
    duplicates: Vec<String>,
    config: ExecutionConfig,
    observer: Option<Arc<dyn Observer>>,
}

impl<S: StateSchema> Default for GraphBuilder<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: StateSchema> GraphBuilder<S> {
    pub fn new() -> Self {
        Self {
            nodes: HashMap::new(),
            edges: HashMap::new(),
            entry: None,
            duplicates: Vec::new(),
            config: ExecutionConfig::default(),
            observer: None,
        }
    }

    pub fn add_node<R>(mut self, name: &str, node: R) -> Self
    where
        R: Runnable<GraphState<S>, StateUpdate<S>> + Send + Sync + 'static,
    {
        self.nodes.insert(name.to_string(), Box::new(node));
        self
    }

    pub fn set_entry(mut self, name: &str) -> Self {
        if self.entry.replace(name.to_string()).is_some() {
            self.duplicates.push(START.to_string());
        }
        self
    }

    /// `add_edge(START, node)` is the same as `set_entry(node)`.
    pub fn add_edge(self, from: &str, to: &str) -> Self {
        if from == START {
            return self.set_entry(to);
        }
        self.insert_edge(from, Edge::Direct(to.to_string()))
    }

    /// Route out of `from` by calling `router` on the state the node produced.
    ///
    /// The router returns a key which `path_map` translates into the next
    /// node; a key missing from the map fails the run with
    /// [`BureError::InvalidRoute`].
    pub fn add_conditional_edges<K, F, P>(self, from: &str, router: F, path_map: P) -> Self
    where
        K: Eq + Hash + Debug + Send + Sync + 'static,
        F: Fn(&GraphState<S>) -> Result<K, BureError> + Send + Sync + 'static,
        P: IntoIterator<Item = (K, &'static str)>,
    {
        let map: HashMap<K, String> = path_map
            .into_iter()
            .map(|(key, target)| (key, target.to_string()))
            .collect();
        let mut targets: Vec<String> = map.values().cloned().collect();
        targets.sort();
        targets.dedup();

        let router: Router<S> = Arc::new(move |state: &GraphState<S>| {
            let key = router(state)?;
            map.get(&key)
                .cloned()
                .ok_or_else(|| BureError::InvalidRoute(format!("{key:?}")))
        });
        self.insert_edge(from, Edge::Conditional { router, targets })
    }

    pub fn with_config(mut self, config: ExecutionConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_observer(mut self, observer: Arc<dyn Observer>) -> Self {
        self.observer = Some(observer);
        self
    }

    fn insert_edge(mut self, from: &str, edge: Edge<S>) -> Self {
        if self.edges.insert(from.to_string(), edge).is_some() {
            self.duplicates.push(from.to_string());
        }
        self
    }

    /// Validate the topology once and freeze it.
    pub fn compile(self) -> Result<ExecutableGraph<S>, GraphError> {
        if let Some(node) = self.duplicates.first() {
            return Err(GraphError::DuplicateEdge { node: node.clone() });
        }
        let entry = self.entry.ok_or(GraphError::MissingEntry)?;
        if !self.nodes.contains_key(&entry) {
            return Err(GraphError::MissingNode { node: entry });
        }

        let mut program = GraphProgram::new();
        program.add_node(START);
        program.add_node(END);
        for name in self.nodes.keys() {
            program.add_node(name);
        }
        program.add_edge(START, &entry, EdgeKind::Default);

        let known = |name: &str| name == END || self.nodes.contains_key(name);
        for (from, edge) in &self.edges {
            if !self.nodes.contains_key(from) {
                return Err(GraphError::MissingNode { node: from.clone() });
            }
            let (targets, kind) = match edge {
                Edge::Direct(to) => (std::slice::from_ref(to), EdgeKind::Default),
                Edge::Conditional { targets, .. } => (targets.as_slice(), EdgeKind::Conditional),
            };
            for to in targets {
                if !known(to) {
                    return Err(GraphError::InvalidEdge { node: to.clone() });
                }
                program.add_edge(from, to, kind);
            }
        }

        if let Some(node) = program
            .unreachable_from(START)
            .into_iter()
            .find(|name| name != END)
        {
            return Err(GraphError::UnreachableNode { node });
        }

        Ok(ExecutableGraph {
            nodes: self.nodes,
            edges: self.edges,
            entry,
            program,
            config: self.config,
            observer: self.observer,
        })
    }
}

/// A validated graph. Topology is immutable; each run owns its state.
pub struct ExecutableGraph<S: StateSchema> {
    nodes: HashMap<String, Node<S>>,
    edges: HashMap<String, Edge<S>>,
    entry: String,
    program: GraphProgram,
    config: ExecutionConfig,
    observer: Option<Arc<dyn Observer>>,
}

impl<S: StateSchema> ExecutableGraph<S> {
    pub fn program(&self) -> &GraphProgram {
        &self.program
    }

    pub fn entry(&self) -> &str {
        &self.entry
    }

    /// Run nodes one at a time from the entry until `END` or a node with no
    /// outgoing edge.
    pub async fn invoke(&self, mut state: GraphState<S>) -> Result<GraphState<S>, GraphError> {
        let mut current = self.entry.clone();
        let mut steps = 0usize;
        let mut recent: VecDeque<String> = VecDeque::new();

        while current != END {
            if let Some(max) = self.config.max_steps {
                if steps >= max {
                    return Err(GraphError::MaxStepsExceeded {
                        max,
                        reached: steps,
                    });
                }
            }
            if self.config.cycle_detection {
                if recent.contains(&current) {
                    return Err(GraphError::CycleDetected {
                        node: current,
                        recent: recent.into_iter().collect(),
                    });
                }
                recent.push_back(current.clone());
                if recent.len() > self.config.cycle_window {
                    recent.pop_front();
                }
            }
            steps += 1;

            let node = self
                .nodes
                .get(&current)
                .ok_or_else(|| GraphError::MissingNode {
                    node: current.clone(),
                })?;

            self.notify(|observer| observer.on_node_enter(&current));
            let update = match node.invoke(state.clone()).await {
                Ok(update) => update,
                Err(source) => {
                    self.notify(|observer| observer.on_error(&current, &source.to_string()));
                    return Err(GraphError::NodeFailed {
                        node: current,
                        source,
                    });
                }
            };
            state = state.apply(update);
            self.notify(|observer| observer.on_node_exit(&current));

            let next = match self.edges.get(&current) {
                None => break,
                Some(Edge::Direct(next)) => next.clone(),
                Some(Edge::Conditional { router, .. }) => match router(&state) {
                    Ok(next) => next,
                    Err(source) => {
                        self.notify(|observer| observer.on_error(&current, &source.to_string()));
                        return Err(GraphError::Routing {
                            node: current,
                            source,
                        });
                    }
                },
            };
            self.notify(|observer| observer.on_route(&current, &next));
            current = next;
        }

        Ok(state)
    }

    fn notify(&self, event: impl FnOnce(&dyn Observer)) {
        if let Some(observer) = &self.observer {
            event(observer.as_ref());
        }
    }
}
