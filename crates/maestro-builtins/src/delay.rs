use crate::echo::EchoHandler;
use async_trait::async_trait;
use maestro_core::{MaestroResult, TaskRequest};
use maestro_orchestrator::{AgentHandler, DependencyResults};
use std::time::Duration;
use tracing::debug;

/// Sleeps for a fixed delay, then behaves like [`EchoHandler`].
///
/// Handy for exercising timeouts and concurrent dependency fan-out.
#[derive(Debug, Clone, Copy)]
pub struct DelayHandler {
    delay: Duration,
}

impl DelayHandler {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }
}

#[async_trait]
impl AgentHandler for DelayHandler {
    async fn handle(
        &self,
        task: &TaskRequest,
        dependencies: &DependencyResults,
    ) -> MaestroResult<serde_json::Value> {
        debug!(agent = %task.agent_name, delay_ms = self.delay.as_millis() as u64, "Delaying");
        tokio::time::sleep(self.delay).await;
        let mut out = EchoHandler::reflect(task, dependencies);
        out["delay_ms"] = serde_json::json!(self.delay.as_millis() as u64);
        Ok(out)
    }
}
