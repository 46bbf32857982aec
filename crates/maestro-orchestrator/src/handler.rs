use async_trait::async_trait;
use maestro_core::{MaestroResult, TaskRequest, TaskResult};
use std::collections::HashMap;
use std::future::Future;
use std::sync::Arc;

/// Successful dependency results, keyed by dependency agent name.
pub type DependencyResults = HashMap<String, TaskResult>;

/// Business logic behind a named agent.
///
/// The engine never looks inside the payload or the returned value. An `Err`
/// becomes a failed [`TaskResult`] carrying the error's display text.
#[async_trait]
pub trait AgentHandler: Send + Sync {
    async fn handle(
        &self,
        task: &TaskRequest,
        dependencies: &DependencyResults,
    ) -> MaestroResult<serde_json::Value>;
}

/// Resolves an agent name to the handler that implements it.
pub trait HandlerLookup: Send + Sync {
    fn handler(&self, agent: &str) -> Option<Arc<dyn AgentHandler>>;
}

impl<F> HandlerLookup for F
where
    F: Fn(&str) -> Option<Arc<dyn AgentHandler>> + Send + Sync,
{
    fn handler(&self, agent: &str) -> Option<Arc<dyn AgentHandler>> {
        self(agent)
    }
}

/// Map-backed [`HandlerLookup`], the orchestrator's default.
#[derive(Default, Clone)]
pub struct HandlerTable {
    handlers: HashMap<String, Arc<dyn AgentHandler>>,
}

impl HandlerTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `handler` to `agent`, replacing any earlier binding.
    pub fn insert(&mut self, agent: impl Into<String>, handler: Arc<dyn AgentHandler>) {
        self.handlers.insert(agent.into(), handler);
    }

    pub fn contains(&self, agent: &str) -> bool {
        self.handlers.contains_key(agent)
    }

    pub fn len(&self) -> usize {
        self.handlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.handlers.is_empty()
    }
}

impl HandlerLookup for HandlerTable {
    fn handler(&self, agent: &str) -> Option<Arc<dyn AgentHandler>> {
        self.handlers.get(agent).cloned()
    }
}

impl std::fmt::Debug for HandlerTable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut agents: Vec<&String> = self.handlers.keys().collect();
        agents.sort();
        f.debug_struct("HandlerTable").field("agents", &agents).finish()
    }
}

/// Adapts an async closure into an [`AgentHandler`].
///
/// The closure receives owned copies of the request and dependency results.
pub struct FnHandler<F> {
    func: F,
}

impl<F, Fut> FnHandler<F>
where
    F: Fn(TaskRequest, DependencyResults) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MaestroResult<serde_json::Value>> + Send + 'static,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> AgentHandler for FnHandler<F>
where
    F: Fn(TaskRequest, DependencyResults) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MaestroResult<serde_json::Value>> + Send + 'static,
{
    async fn handle(
        &self,
        task: &TaskRequest,
        dependencies: &DependencyResults,
    ) -> MaestroResult<serde_json::Value> {
        (self.func)(task.clone(), dependencies.clone()).await
    }
}

/// Wrap an async closure as a shareable handler.
pub fn handler_fn<F, Fut>(func: F) -> Arc<dyn AgentHandler>
where
    F: Fn(TaskRequest, DependencyResults) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = MaestroResult<serde_json::Value>> + Send + 'static,
{
    Arc::new(FnHandler::new(func))
}
