use maestro_builtins::{bind_all, BuiltinHandler};
use maestro_orchestrator::{default_catalog, CatalogConfig, Orchestrator};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;

/// Contents of `maestro.toml`: a catalog plus the builtin handler chosen
/// for each agent.
///
/// ```toml
/// [[agents]]
/// name = "demand_forecast"
/// category = "revenue"
///
/// [handlers]
/// demand_forecast = { delay = 200 }
/// ```
#[derive(Debug, Default, Deserialize)]
pub struct CliConfig {
    #[serde(flatten)]
    pub catalog: CatalogConfig,
    /// Agents missing here get the echo handler.
    #[serde(default)]
    pub handlers: BTreeMap<String, BuiltinHandler>,
}

impl CliConfig {
    /// The built-in hospitality catalog, every agent echoing.
    pub fn builtin() -> Self {
        Self {
            catalog: default_catalog(),
            handlers: BTreeMap::new(),
        }
    }

    pub async fn load(path: &Path) -> anyhow::Result<Self> {
        let source = tokio::fs::read_to_string(path).await.map_err(|e| {
            anyhow::anyhow!("Failed to read config file '{}': {}", path.display(), e)
        })?;
        Self::parse(&source)
    }

    pub fn parse(source: &str) -> anyhow::Result<Self> {
        Ok(toml::from_str(source)?)
    }

    pub fn into_orchestrator(self) -> anyhow::Result<Orchestrator> {
        let builder = self.catalog.into_builder()?;
        Ok(bind_all(builder, &self.handlers).build()?)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use maestro_core::TaskRequest;
    use serde_json::json;

    const SAMPLE: &str = r#"
[engine]
default_timeout_secs = 5

[[agents]]
name = "demand_forecast"
category = "revenue"

[[agents]]
name = "pricing_optimizer"
category = "revenue"
priority = "high"

[dependencies]
pricing_optimizer = ["demand_forecast"]

[[workflows]]
name = "nightly_pricing"
steps = [{ agent = "demand_forecast" }, { agent = "pricing_optimizer" }]

[handlers]
demand_forecast = "fail"
"#;

    #[test]
    fn test_parse_catalog_and_handlers() {
        let config = CliConfig::parse(SAMPLE).unwrap();
        assert_eq!(config.catalog.engine.default_timeout_secs, 5);
        assert_eq!(config.catalog.agents.len(), 2);
        assert_eq!(config.handlers["demand_forecast"], BuiltinHandler::Fail);
        assert!(!config.handlers.contains_key("pricing_optimizer"));
    }

    #[tokio::test]
    async fn test_into_orchestrator_binds_handlers() {
        let orch = CliConfig::parse(SAMPLE).unwrap().into_orchestrator().unwrap();
        let report = orch
            .execute_workflow("nightly_pricing", json!({}))
            .await
            .unwrap();
        // demand_forecast fails as a step and as pricing_optimizer's dependency
        assert_eq!(report.failure_count, 1);
        assert_eq!(report.success_count, 1);
        assert_eq!(orch.stats_by_agent()["demand_forecast"].failures, 2);
    }

    #[tokio::test]
    async fn test_builtin_catalog_runs() {
        let orch = CliConfig::builtin().into_orchestrator().unwrap();
        let result = orch
            .run(TaskRequest::new("fraud_detection", "screen", json!({})))
            .await;
        assert!(result.success);
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load(&dir.path().join("maestro.toml"))
            .await
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[tokio::test]
    async fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("maestro.toml");
        tokio::fs::write(&path, SAMPLE).await.unwrap();
        let config = CliConfig::load(&path).await.unwrap();
        assert_eq!(config.catalog.workflows.len(), 1);
    }

    #[test]
    fn test_invalid_handler_rejected() {
        assert!(CliConfig::parse("[handlers]\na = \"explode\"\n").is_err());
    }

    #[test]
    fn test_unknown_dependency_rejected_at_build() {
        let config = CliConfig::parse(
            "[[agents]]\nname = \"a\"\ncategory = \"security\"\n\n[dependencies]\na = [\"ghost\"]\n",
        )
        .unwrap();
        assert!(config.into_orchestrator().is_err());
    }
}
