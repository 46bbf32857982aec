use crate::engine::OrchestratorBuilder;
use crate::types::AgentDescriptor;
use crate::workflow::WorkflowDefinition;
use maestro_core::{MaestroError, MaestroResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;
use std::time::Duration;

/// Engine-wide settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_timeout_secs")]
    pub default_timeout_secs: u64,
    /// Keep at most this many ledger entries. Unbounded when absent.
    #[serde(default)]
    pub ledger_capacity: Option<usize>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            default_timeout_secs: default_timeout_secs(),
            ledger_capacity: None,
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

/// Agents, dependencies and workflows as loaded from a TOML file.
///
/// ```toml
/// [engine]
/// default_timeout_secs = 10
///
/// [[agents]]
/// name = "demand_forecast"
/// category = "revenue"
///
/// [[agents]]
/// name = "pricing_optimizer"
/// category = "revenue"
/// priority = "high"
///
/// [dependencies]
/// pricing_optimizer = ["demand_forecast"]
///
/// [[workflows]]
/// name = "nightly_pricing"
/// steps = [{ agent = "pricing_optimizer", priority = "high" }]
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogConfig {
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub agents: Vec<AgentDescriptor>,
    #[serde(default)]
    pub dependencies: BTreeMap<String, Vec<String>>,
    #[serde(default)]
    pub workflows: Vec<WorkflowDefinition>,
}

impl CatalogConfig {
    pub fn from_toml_str(source: &str) -> MaestroResult<Self> {
        toml::from_str(source).map_err(|e| MaestroError::Config(e.to_string()))
    }

    pub fn to_toml_string(&self) -> MaestroResult<String> {
        toml::to_string(self).map_err(|e| MaestroError::Config(e.to_string()))
    }

    /// Read and parse a catalog file.
    pub async fn load(path: impl AsRef<Path>) -> MaestroResult<Self> {
        let path = path.as_ref();
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            MaestroError::Config(format!(
                "Failed to read catalog file '{}': {e}",
                path.display()
            ))
        })?;
        Self::from_toml_str(&source)
    }

    /// Register everything in this catalog on a fresh builder.
    ///
    /// Handlers are not part of the catalog; bind them on the returned
    /// builder before calling `build`.
    pub fn into_builder(self) -> MaestroResult<OrchestratorBuilder> {
        let mut builder = OrchestratorBuilder::new()
            .default_timeout(Duration::from_secs(self.engine.default_timeout_secs));
        if let Some(capacity) = self.engine.ledger_capacity {
            builder = builder.ledger_capacity(capacity);
        }
        for descriptor in self.agents {
            builder = builder.register_agent(descriptor)?;
        }
        for (agent, deps) in self.dependencies {
            builder = builder.depends_on(agent, deps);
        }
        for workflow in self.workflows {
            builder = builder.workflow(workflow)?;
        }
        Ok(builder)
    }
}
