use maestro_core::Priority;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::time::Duration;

/// Operational category of an agent. Used for grouping queries only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentCategory {
    CustomerService,
    Revenue,
    Operations,
    Marketing,
    Security,
    Sustainability,
}

impl AgentCategory {
    /// All categories, in declaration order.
    pub const ALL: [AgentCategory; 6] = [
        AgentCategory::CustomerService,
        AgentCategory::Revenue,
        AgentCategory::Operations,
        AgentCategory::Marketing,
        AgentCategory::Security,
        AgentCategory::Sustainability,
    ];
}

impl std::fmt::Display for AgentCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AgentCategory::CustomerService => write!(f, "customer-service"),
            AgentCategory::Revenue => write!(f, "revenue"),
            AgentCategory::Operations => write!(f, "operations"),
            AgentCategory::Marketing => write!(f, "marketing"),
            AgentCategory::Security => write!(f, "security"),
            AgentCategory::Sustainability => write!(f, "sustainability"),
        }
    }
}

impl std::str::FromStr for AgentCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        AgentCategory::ALL
            .into_iter()
            .find(|c| c.to_string() == s)
            .ok_or_else(|| format!("unknown agent category '{s}'"))
    }
}

/// Static metadata for a registered agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentDescriptor {
    pub name: String,
    pub category: AgentCategory,
    /// Importance of the agent's typical work. Not an execution-order guarantee.
    #[serde(default)]
    pub priority: Priority,
    #[serde(default)]
    pub capabilities: BTreeSet<String>,
    /// Estimated run time in milliseconds. Reporting only, never enforced.
    #[serde(default)]
    pub average_cost_ms: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl AgentDescriptor {
    pub fn new(name: impl Into<String>, category: AgentCategory) -> Self {
        Self {
            name: name.into(),
            category,
            priority: Priority::default(),
            capabilities: BTreeSet::new(),
            average_cost_ms: 0,
            description: None,
        }
    }

    pub fn with_priority(mut self, priority: Priority) -> Self {
        self.priority = priority;
        self
    }

    pub fn with_capabilities<I, S>(mut self, capabilities: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.capabilities = capabilities.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_average_cost(mut self, cost: Duration) -> Self {
        self.average_cost_ms = cost.as_millis() as u64;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn average_cost(&self) -> Duration {
        Duration::from_millis(self.average_cost_ms)
    }
}

/// An agent's descriptor together with its position in the dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentDescription {
    pub descriptor: AgentDescriptor,
    /// Agents this one depends on, in declaration order.
    pub dependencies: Vec<String>,
    /// Agents that declare this one as a dependency, sorted.
    pub dependents: Vec<String>,
}
