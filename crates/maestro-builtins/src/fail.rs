use async_trait::async_trait;
use maestro_core::{MaestroError, MaestroResult, TaskRequest};
use maestro_orchestrator::{AgentHandler, DependencyResults};

/// Fails every task with the same message.
#[derive(Debug, Clone)]
pub struct FailHandler {
    message: String,
}

impl FailHandler {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for FailHandler {
    fn default() -> Self {
        Self::new("simulated failure")
    }
}

#[async_trait]
impl AgentHandler for FailHandler {
    async fn handle(
        &self,
        _task: &TaskRequest,
        _dependencies: &DependencyResults,
    ) -> MaestroResult<serde_json::Value> {
        Err(MaestroError::handler(self.message.clone()))
    }
}
