use crate::dependencies::DependencyMap;
use crate::handler::{AgentHandler, HandlerTable};
use crate::ledger::{AgentStats, ExecutionLedger, GlobalStats};
use crate::registry::AgentRegistry;
use crate::types::{AgentCategory, AgentDescription, AgentDescriptor};
use crate::workflow::{WorkflowCatalog, WorkflowDefinition};
use maestro_core::{MaestroResult, TaskRequest, DEFAULT_TIMEOUT};
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// The agent orchestration engine.
///
/// Owns the agent registry, dependency map, workflow catalog, handler table
/// and execution ledger. Everything except the ledger is frozen once
/// [`OrchestratorBuilder::build`] returns, so a single instance can be shared
/// behind an `Arc` by any number of concurrent callers.
#[derive(Debug)]
pub struct Orchestrator {
    pub(crate) registry: AgentRegistry,
    pub(crate) dependencies: DependencyMap,
    pub(crate) workflows: WorkflowCatalog,
    pub(crate) handlers: HandlerTable,
    pub(crate) ledger: ExecutionLedger,
    pub(crate) default_timeout: Duration,
}

impl Orchestrator {
    pub fn builder() -> OrchestratorBuilder {
        OrchestratorBuilder::new()
    }

    pub fn registry(&self) -> &AgentRegistry {
        &self.registry
    }

    pub fn dependencies(&self) -> &DependencyMap {
        &self.dependencies
    }

    pub fn workflows(&self) -> &WorkflowCatalog {
        &self.workflows
    }

    pub fn handlers(&self) -> &HandlerTable {
        &self.handlers
    }

    pub fn ledger(&self) -> &ExecutionLedger {
        &self.ledger
    }

    pub fn default_timeout(&self) -> Duration {
        self.default_timeout
    }

    /// Build a request carrying this orchestrator's default timeout.
    pub fn request(
        &self,
        agent: impl Into<String>,
        task_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> TaskRequest {
        TaskRequest::new(agent, task_type, payload).with_timeout(self.default_timeout)
    }

    /// Descriptor, declared dependencies and dependents of an agent.
    pub fn describe(&self, agent: &str) -> MaestroResult<AgentDescription> {
        let descriptor = self.registry.lookup(agent)?.clone();
        Ok(AgentDescription {
            descriptor,
            dependencies: self.dependencies.dependencies_of(agent).to_vec(),
            dependents: self.dependencies.dependents_of(agent),
        })
    }

    pub fn list_by_category(&self, category: AgentCategory) -> Vec<String> {
        self.registry.list_by_category(category)
    }

    /// All registered descriptors, sorted by name.
    pub fn agents(&self) -> Vec<&AgentDescriptor> {
        self.registry.descriptors()
    }

    pub fn global_stats(&self) -> GlobalStats {
        self.ledger.global_stats()
    }

    pub fn stats_by_agent(&self) -> BTreeMap<String, AgentStats> {
        self.ledger.stats_by_agent()
    }

    /// Catalog sizes plus ledger statistics as JSON.
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "agents": self.registry.len(),
            "workflows": self.workflows.names(),
            "handlers": self.handlers.len(),
            "ledger": self.ledger.to_json(),
        })
    }
}

/// Assembles an [`Orchestrator`] and checks the catalog for configuration
/// errors before any task can run.
#[derive(Debug)]
pub struct OrchestratorBuilder {
    registry: AgentRegistry,
    dependencies: DependencyMap,
    workflows: WorkflowCatalog,
    handlers: HandlerTable,
    default_timeout: Duration,
    ledger_capacity: Option<usize>,
}

impl Default for OrchestratorBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl OrchestratorBuilder {
    pub fn new() -> Self {
        Self {
            registry: AgentRegistry::new(),
            dependencies: DependencyMap::new(),
            workflows: WorkflowCatalog::new(),
            handlers: HandlerTable::new(),
            default_timeout: DEFAULT_TIMEOUT,
            ledger_capacity: None,
        }
    }

    /// Register an agent together with its handler.
    pub fn agent(
        mut self,
        descriptor: AgentDescriptor,
        handler: Arc<dyn AgentHandler>,
    ) -> MaestroResult<Self> {
        let name = descriptor.name.clone();
        self.registry.register(descriptor)?;
        self.handlers.insert(name, handler);
        Ok(self)
    }

    /// Register an agent whose handler is bound later (or supplied per run).
    pub fn register_agent(mut self, descriptor: AgentDescriptor) -> MaestroResult<Self> {
        self.registry.register(descriptor)?;
        Ok(self)
    }

    /// Bind or replace the handler for `agent`.
    pub fn handler(mut self, agent: impl Into<String>, handler: Arc<dyn AgentHandler>) -> Self {
        self.handlers.insert(agent, handler);
        self
    }

    pub fn depends_on<I, S>(mut self, agent: impl Into<String>, dependencies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.dependencies.insert(agent, dependencies);
        self
    }

    pub fn workflow(mut self, definition: WorkflowDefinition) -> MaestroResult<Self> {
        self.workflows.insert(definition)?;
        Ok(self)
    }

    /// Timeout applied to requests built by the orchestrator itself.
    pub fn default_timeout(mut self, timeout: Duration) -> Self {
        self.default_timeout = timeout;
        self
    }

    /// Bound the ledger to the most recent `capacity` entries.
    pub fn ledger_capacity(mut self, capacity: usize) -> Self {
        self.ledger_capacity = Some(capacity);
        self
    }

    pub fn is_registered(&self, agent: &str) -> bool {
        self.registry.contains(agent)
    }

    /// Names of registered agents without a bound handler, sorted.
    pub fn unbound_agents(&self) -> Vec<String> {
        self.registry
            .names()
            .into_iter()
            .filter(|name| !self.handlers.contains(name))
            .collect()
    }

    /// Validate the catalog and freeze it.
    pub fn build(self) -> MaestroResult<Orchestrator> {
        self.dependencies.validate(&self.registry)?;

        for name in self.workflows.names() {
            if let Some(definition) = self.workflows.get(&name) {
                for step in &definition.steps {
                    if !self.registry.contains(&step.agent) {
                        warn!(
                            workflow = %name,
                            agent = %step.agent,
                            "Workflow step references an unregistered agent"
                        );
                    }
                }
            }
        }

        let unbound = self.unbound_agents();
        if !unbound.is_empty() {
            warn!(agents = ?unbound, "Agents registered without a handler");
        }

        let ledger = match self.ledger_capacity {
            Some(capacity) => ExecutionLedger::with_capacity(capacity),
            None => ExecutionLedger::new(),
        };

        info!(
            agents = self.registry.len(),
            dependency_entries = self.dependencies.len(),
            workflows = self.workflows.len(),
            "Orchestrator ready"
        );

        Ok(Orchestrator {
            registry: self.registry,
            dependencies: self.dependencies,
            workflows: self.workflows,
            handlers: self.handlers,
            ledger,
            default_timeout: self.default_timeout,
        })
    }
}
