//! Task execution: dependency fan-out, handler invocation, ledger recording.

use crate::engine::Orchestrator;
use crate::handler::{AgentHandler, DependencyResults, HandlerLookup};
use futures_util::future::join_all;
use maestro_core::{MaestroError, MaestroResult, TaskRequest, TaskResult};
use std::any::Any;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::task::AbortHandle;
use tracing::{debug, info, warn};

/// Error text recorded when the requested agent is not registered.
pub const AGENT_NOT_FOUND: &str = "agent not found";
/// Error text recorded when a registered agent has no handler.
pub const NO_HANDLER: &str = "no handler registered";

impl Orchestrator {
    /// Run a task using the orchestrator's own handler table.
    ///
    /// Always returns a result; see [`Orchestrator::run_with`].
    pub async fn run(&self, task: TaskRequest) -> TaskResult {
        self.run_with(task, &self.handlers).await
    }

    /// Run a task, resolving handlers through `lookup`.
    ///
    /// 1. An unregistered agent yields a failed result immediately.
    /// 2. Declared dependencies run concurrently, one level deep. Failures
    ///    are logged and left out of the map handed to the primary handler.
    /// 3. The primary handler runs under the task's timeout.
    ///
    /// Every execution, dependency or primary, is appended to the ledger, so
    /// one call adds `1 + |dependencies|` entries.
    pub async fn run_with(&self, task: TaskRequest, lookup: &dyn HandlerLookup) -> TaskResult {
        if !self.registry.contains(&task.agent_name) {
            warn!(agent = %task.agent_name, task_id = %task.id, "Task for unknown agent");
            let result = TaskResult::failure(&task, AGENT_NOT_FOUND, Duration::ZERO);
            self.ledger.record(result.clone());
            return result;
        }

        info!(
            agent = %task.agent_name,
            task_id = %task.id,
            task_type = %task.task_type,
            priority = %task.priority,
            "Running task"
        );

        let dependencies = self.resolve_dependencies(&task, lookup).await;
        self.invoke(task, dependencies, lookup).await
    }

    /// Run every declared dependency of `task` concurrently and collect the
    /// successful results. Never fails fast.
    async fn resolve_dependencies(
        &self,
        task: &TaskRequest,
        lookup: &dyn HandlerLookup,
    ) -> DependencyResults {
        let declared = self.dependencies.dependencies_of(&task.agent_name);
        if declared.is_empty() {
            return DependencyResults::new();
        }

        debug!(
            agent = %task.agent_name,
            dependencies = ?declared,
            "Resolving dependencies"
        );

        // Dependencies start at handler invocation: their own dependencies are not run.
        let runs = declared.iter().map(|dep| {
            let request = TaskRequest::dependency_of(task, dep.as_str());
            self.invoke(request, DependencyResults::new(), lookup)
        });

        let mut resolved = DependencyResults::new();
        for result in join_all(runs).await {
            if result.success {
                resolved.insert(result.agent_name.clone(), result);
            } else {
                warn!(
                    agent = %task.agent_name,
                    dependency = %result.agent_name,
                    error = result.error.as_deref().unwrap_or_default(),
                    "Dependency failed, continuing without it"
                );
            }
        }
        resolved
    }

    /// Invoke the handler for `task`, time it, record and return the result.
    async fn invoke(
        &self,
        task: TaskRequest,
        dependencies: DependencyResults,
        lookup: &dyn HandlerLookup,
    ) -> TaskResult {
        let start = Instant::now();
        let outcome = match lookup.handler(&task.agent_name) {
            Some(handler) => call_handler(handler, &task, dependencies).await,
            None => Err(MaestroError::handler(NO_HANDLER)),
        };
        let elapsed = start.elapsed();

        let result = match outcome {
            Ok(data) => {
                debug!(
                    agent = %task.agent_name,
                    task_id = %task.id,
                    duration_ms = elapsed.as_millis() as u64,
                    "Task completed"
                );
                TaskResult::success(&task, data, elapsed)
            }
            Err(e) => {
                warn!(
                    agent = %task.agent_name,
                    task_id = %task.id,
                    duration_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "Task failed"
                );
                TaskResult::failure(&task, e.to_string(), elapsed)
            }
        };

        self.ledger.record(result.clone());
        result
    }
}

/// Aborts the spawned handler when dropped, so a cancelled caller never
/// leaves a detached invocation behind.
struct AbortOnDrop(AbortHandle);

impl Drop for AbortOnDrop {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Run the handler on its own tokio task so a timeout can abort it and a
/// panic cannot unwind into the caller.
async fn call_handler(
    handler: Arc<dyn AgentHandler>,
    task: &TaskRequest,
    dependencies: DependencyResults,
) -> MaestroResult<serde_json::Value> {
    let owned = task.clone();
    let mut handle =
        tokio::spawn(async move { handler.handle(&owned, &dependencies).await });
    let _guard = AbortOnDrop(handle.abort_handle());

    match tokio::time::timeout(task.timeout, &mut handle).await {
        Ok(Ok(outcome)) => outcome,
        Ok(Err(join_err)) if join_err.is_panic() => Err(MaestroError::handler(format!(
            "handler panicked: {}",
            panic_message(join_err.into_panic())
        ))),
        Ok(Err(join_err)) => Err(MaestroError::handler(format!(
            "handler cancelled: {join_err}"
        ))),
        Err(_) => Err(MaestroError::Timeout),
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "unknown panic".to_string()
    }
}
