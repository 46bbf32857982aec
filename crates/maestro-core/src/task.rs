use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use uuid::Uuid;

/// Task type label given to synthetic dependency requests.
pub const DEPENDENCY_TASK_TYPE: &str = "dependency";

/// Default per-task wall-clock budget.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Ordinal importance hint. Declaration order gives `Critical > High > Medium > Low > Background`.
///
/// Priorities describe scheduling intent only; nothing is preempted.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    /// Deferred, best-effort work.
    Background,
    /// Low importance.
    Low,
    /// Normal importance.
    #[default]
    Medium,
    /// Elevated importance; dependencies always run at this level.
    High,
    /// Operationally critical work.
    Critical,
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Priority::Background => write!(f, "background"),
            Priority::Low => write!(f, "low"),
            Priority::Medium => write!(f, "medium"),
            Priority::High => write!(f, "high"),
            Priority::Critical => write!(f, "critical"),
        }
    }
}

fn default_timeout() -> Duration {
    DEFAULT_TIMEOUT
}

/// A request to run one agent. Immutable once built.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRequest {
    pub id: Uuid,
    pub agent_name: String,
    /// Free-form label, e.g. the workflow name or `"dependency"`.
    pub task_type: String,
    /// Opaque input; never inspected by the engine.
    pub payload: serde_json::Value,
    #[serde(default)]
    pub priority: Priority,
    #[serde(default = "default_timeout")]
    pub timeout: Duration,
    pub created_at: DateTime<Utc>,
}

impl TaskRequest {
    pub fn new(
        agent_name: impl Into<String>,
        task_type: impl Into<String>,
        payload: serde_json::Value,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            agent_name: agent_name.into(),
            task_type: task_type.into(),
            payload,
            priority: Priority::default(),
            timeout: DEFAULT_TIMEOUT,
            created_at: Utc::now(),
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Build the synthetic request used to run `dependency` on behalf of `parent`.
    ///
    /// Shares the parent's payload and timeout, forces `High` priority.
    pub fn dependency_of(parent: &TaskRequest, dependency: impl Into<String>) -> Self {
        Self::new(dependency, DEPENDENCY_TASK_TYPE, parent.payload.clone())
            .with_priority(Priority::High)
            .with_timeout(parent.timeout)
    }
}

/// Outcome of one task execution, as recorded in the ledger.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskResult {
    pub task_id: Uuid,
    pub agent_name: String,
    pub task_type: String,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub duration_ms: u64,
    pub timestamp: DateTime<Utc>,
}

impl TaskResult {
    pub fn success(task: &TaskRequest, data: serde_json::Value, duration: Duration) -> Self {
        Self {
            task_id: task.id,
            agent_name: task.agent_name.clone(),
            task_type: task.task_type.clone(),
            success: true,
            data: Some(data),
            error: None,
            duration_ms: duration.as_millis() as u64,
            timestamp: Utc::now(),
        }
    }

    pub fn failure(task: &TaskRequest, error: impl Into<String>, duration: Duration) -> Self {
        Self {
            task_id: task.id,
            agent_name: task.agent_name.clone(),
            task_type: task.task_type.clone(),
            success: false,
            data: None,
            error: Some(error.into()),
            duration_ms: duration.as_millis() as u64,
            timestamp: Utc::now(),
        }
    }
}
