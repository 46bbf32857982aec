use crate::engine::Orchestrator;
use maestro_core::{MaestroError, MaestroResult, Priority, TaskResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::time::Instant;
use tracing::info;

/// One step of a workflow: the agent to run and the priority to run it at.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub agent: String,
    #[serde(default)]
    pub priority: Priority,
}

/// A named, ordered pipeline of agent invocations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowDefinition {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub steps: Vec<WorkflowStep>,
}

impl WorkflowDefinition {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: None,
            steps: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Append a step.
    pub fn step(mut self, agent: impl Into<String>, priority: Priority) -> Self {
        self.steps.push(WorkflowStep {
            agent: agent.into(),
            priority,
        });
        self
    }
}

/// Static catalog of workflow definitions.
#[derive(Debug, Default, Clone)]
pub struct WorkflowCatalog {
    workflows: HashMap<String, WorkflowDefinition>,
}

impl WorkflowCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, definition: WorkflowDefinition) -> MaestroResult<()> {
        if self.workflows.contains_key(&definition.name) {
            return Err(MaestroError::DuplicateWorkflow(definition.name));
        }
        self.workflows.insert(definition.name.clone(), definition);
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&WorkflowDefinition> {
        self.workflows.get(name)
    }

    /// All workflow names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.workflows.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn len(&self) -> usize {
        self.workflows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.workflows.is_empty()
    }
}

/// Outcome of a full workflow run. `results` follows definition order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowReport {
    pub workflow_name: String,
    pub total_steps: usize,
    pub success_count: usize,
    pub failure_count: usize,
    /// Sum of step durations.
    pub total_duration_ms: u64,
    pub results: Vec<TaskResult>,
}

/// Reporting-only cost estimate built from descriptor averages.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowEstimate {
    pub workflow_name: String,
    pub total_steps: usize,
    pub estimated_duration_ms: u64,
    /// Step agents missing from the registry; they contribute nothing.
    pub unknown_agents: Vec<String>,
}

impl Orchestrator {
    /// Run every step of a workflow strictly in order.
    ///
    /// Only an unknown workflow name is an error. A failed step is reported
    /// and the next step still runs.
    pub async fn execute_workflow(
        &self,
        name: &str,
        payload: serde_json::Value,
    ) -> MaestroResult<WorkflowReport> {
        let definition = self
            .workflows
            .get(name)
            .ok_or_else(|| MaestroError::WorkflowNotFound(name.to_string()))?;

        info!(workflow = %name, steps = definition.steps.len(), "Starting workflow");
        let start = Instant::now();

        let mut results = Vec::with_capacity(definition.steps.len());
        for step in &definition.steps {
            let task = self
                .request(step.agent.as_str(), name, payload.clone())
                .with_priority(step.priority);
            results.push(self.run(task).await);
        }

        let success_count = results.iter().filter(|r| r.success).count();
        let report = WorkflowReport {
            workflow_name: name.to_string(),
            total_steps: definition.steps.len(),
            success_count,
            failure_count: results.len() - success_count,
            total_duration_ms: results.iter().map(|r| r.duration_ms).sum(),
            results,
        };

        info!(
            workflow = %name,
            succeeded = report.success_count,
            failed = report.failure_count,
            wall_ms = start.elapsed().as_millis() as u64,
            "Workflow finished"
        );
        Ok(report)
    }

    /// Sum the declared average cost of each step.
    pub fn estimate_workflow(&self, name: &str) -> MaestroResult<WorkflowEstimate> {
        let definition = self
            .workflows
            .get(name)
            .ok_or_else(|| MaestroError::WorkflowNotFound(name.to_string()))?;

        let mut estimated_duration_ms = 0;
        let mut unknown_agents = Vec::new();
        for step in &definition.steps {
            match self.registry.get(&step.agent) {
                Some(descriptor) => estimated_duration_ms += descriptor.average_cost_ms,
                None => unknown_agents.push(step.agent.clone()),
            }
        }

        Ok(WorkflowEstimate {
            workflow_name: name.to_string(),
            total_steps: definition.steps.len(),
            estimated_duration_ms,
            unknown_agents,
        })
    }
}
