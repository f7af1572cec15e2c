pub trait Observer: Send + Sync {
    fn on_node_enter(&self, _node: &str) {}
    fn on_node_exit(&self, _node: &str) {}
    fn on_route(&self, _from: &str, _to: &str) {}
    fn on_error(&self, _node: &str, _error: &str) {}
}

/// Logs every transition through `tracing`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingObserver;

impl Observer for TracingObserver {
    fn on_node_enter(&self, node: &str) {
        tracing::debug!(node, "entering node");
    }

    fn on_node_exit(&self, node: &str) {
        tracing::debug!(node, "node finished");
    }

    fn on_route(&self, from: &str, to: &str) {
        tracing::debug!(from, to, "routing");
    }

    fn on_error(&self, node: &str, error: &str) {
        tracing::warn!(node, error, "node failed");
    }
}
