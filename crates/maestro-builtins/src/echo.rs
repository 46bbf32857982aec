use async_trait::async_trait;
use maestro_core::{MaestroResult, TaskRequest};
use maestro_orchestrator::{AgentHandler, DependencyResults};
use serde_json::json;

/// Reflects the request back to the caller.
///
/// The output carries the agent name, task type, payload and the sorted
/// names of the dependencies that succeeded.
#[derive(Debug, Clone, Copy, Default)]
pub struct EchoHandler;

impl EchoHandler {
    pub fn new() -> Self {
        Self
    }

    pub(crate) fn reflect(task: &TaskRequest, dependencies: &DependencyResults) -> serde_json::Value {
        let mut keys: Vec<&str> = dependencies.keys().map(String::as_str).collect();
        keys.sort_unstable();
        json!({
            "agent": task.agent_name,
            "task_type": task.task_type,
            "payload": task.payload,
            "dependencies": keys,
        })
    }
}

#[async_trait]
impl AgentHandler for EchoHandler {
    async fn handle(
        &self,
        task: &TaskRequest,
        dependencies: &DependencyResults,
    ) -> MaestroResult<serde_json::Value> {
        Ok(Self::reflect(task, dependencies))
    }
}
