use thiserror::Error;

/// A convenience `Result` alias using [`MaestroError`].
pub type MaestroResult<T> = Result<T, MaestroError>;

/// Top-level error type for the Maestro engine.
///
/// Configuration errors (unknown names, duplicates, bad dependency graphs)
/// are returned to the caller as `Err`. Execution-time failures (`Handler`,
/// `Timeout`) never escape a task run; they are folded into a failed
/// [`TaskResult`](crate::TaskResult) instead.
#[derive(Error, Debug)]
pub enum MaestroError {
    /// No agent is registered under this name.
    #[error("agent not found: {0}")]
    AgentNotFound(String),

    /// No workflow is defined under this name.
    #[error("workflow not found: {0}")]
    WorkflowNotFound(String),

    /// An agent with this name is already registered.
    #[error("duplicate agent: {0}")]
    DuplicateAgent(String),

    /// A workflow with this name is already defined.
    #[error("duplicate workflow: {0}")]
    DuplicateWorkflow(String),

    /// The dependency map references an agent missing from the registry.
    #[error("agent '{agent}' depends on unregistered agent '{dependency}'")]
    UnknownDependency {
        /// Agent that declares the dependency.
        agent: String,
        /// The missing dependency name.
        dependency: String,
    },

    /// The dependency map contains a cycle reachable from this agent.
    #[error("dependency cycle detected at agent '{0}'")]
    DependencyCycle(String),

    /// A handler reported a failure.
    #[error("{0}")]
    Handler(String),

    /// A handler exceeded its time budget.
    #[error("timeout")]
    Timeout,

    /// An error in configuration parsing or validation.
    #[error("Config error: {0}")]
    Config(String),

    /// A JSON serialization or deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A standard I/O error.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl MaestroError {
    /// Shorthand for a handler failure with the given message.
    pub fn handler(msg: impl Into<String>) -> Self {
        MaestroError::Handler(msg.into())
    }

    /// Whether this error describes a deployment mistake rather than a
    /// runtime condition.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            MaestroError::AgentNotFound(_)
                | MaestroError::WorkflowNotFound(_)
                | MaestroError::DuplicateAgent(_)
                | MaestroError::DuplicateWorkflow(_)
                | MaestroError::UnknownDependency { .. }
                | MaestroError::DependencyCycle(_)
                | MaestroError::Config(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_handler_error_displays_message_verbatim() {
        let err = MaestroError::handler("rate table unavailable");
        assert_eq!(err.to_string(), "rate table unavailable");
        assert!(!err.is_configuration());
    }

    #[test]
    fn test_timeout_display() {
        assert_eq!(MaestroError::Timeout.to_string(), "timeout");
    }

    #[test]
    fn test_configuration_classification() {
        assert!(MaestroError::AgentNotFound("x".into()).is_configuration());
        assert!(MaestroError::UnknownDependency {
            agent: "b".into(),
            dependency: "a".into(),
        }
        .is_configuration());
        assert!(!MaestroError::Timeout.is_configuration());
    }
}
