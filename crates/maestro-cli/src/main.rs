//! `maestro` command-line interface.
//!
//! Loads a catalog (a `maestro.toml` file or the built-in hospitality
//! catalog), binds builtin handlers, and runs tasks and workflows.

mod config;

use clap::{Parser, Subcommand};
use config::CliConfig;
use maestro_orchestrator::{AgentCategory, AgentDescriptor, Orchestrator};
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "maestro", about = "Maestro: agent task orchestration engine")]
struct Cli {
    /// Path to a catalog file (built-in hospitality catalog when omitted)
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List registered agents
    Agents {
        /// Only agents of this category
        #[arg(long)]
        category: Option<AgentCategory>,
    },
    /// Show an agent's metadata, dependencies and dependents
    Describe { agent: String },
    /// Run a single task (dependencies first)
    Run {
        agent: String,
        /// JSON payload
        #[arg(long, default_value = "{}")]
        payload: String,
        /// Override the default timeout
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
    /// List workflows
    Workflows,
    /// Execute a workflow
    Workflow {
        name: String,
        /// JSON payload passed to every step
        #[arg(long, default_value = "{}")]
        payload: String,
    },
    /// Estimate a workflow's duration from declared agent costs
    Estimate { workflow: String },
}

fn parse_payload(raw: &str) -> anyhow::Result<serde_json::Value> {
    serde_json::from_str(raw).map_err(|e| anyhow::anyhow!("Invalid --payload JSON: {}", e))
}

/// Descriptors to list, sorted by name.
fn select_agents(
    orchestrator: &Orchestrator,
    category: Option<AgentCategory>,
) -> Vec<&AgentDescriptor> {
    match category {
        Some(category) => orchestrator
            .list_by_category(category)
            .iter()
            .filter_map(|name| orchestrator.registry().get(name))
            .collect(),
        None => orchestrator.agents(),
    }
}

fn print_json(value: &impl serde::Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_stats(orchestrator: &Orchestrator) -> anyhow::Result<()> {
    println!("\nStatistics:");
    print_json(&orchestrator.to_json())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => CliConfig::load(path).await?,
        None => CliConfig::builtin(),
    };
    let orchestrator = config.into_orchestrator()?;
    info!(
        agents = orchestrator.registry().len(),
        workflows = orchestrator.workflows().len(),
        "Catalog loaded"
    );

    match cli.command {
        Commands::Agents { category } => {
            let agents = select_agents(&orchestrator, category);
            if agents.is_empty() {
                println!("No agents registered.");
            } else {
                println!("Registered agents:");
                for agent in &agents {
                    println!(
                        "  {} [{}, {}] {}",
                        agent.name,
                        agent.category,
                        agent.priority,
                        agent.description.as_deref().unwrap_or("")
                    );
                }
                println!("\nTotal: {} agent(s)", agents.len());
            }
        }
        Commands::Describe { agent } => {
            print_json(&orchestrator.describe(&agent)?)?;
        }
        Commands::Run {
            agent,
            payload,
            timeout_secs,
        } => {
            let mut task = orchestrator.request(agent, "cli", parse_payload(&payload)?);
            if let Some(secs) = timeout_secs {
                task = task.with_timeout(Duration::from_secs(secs));
            }
            let result = orchestrator.run(task).await;
            print_json(&result)?;
            print_stats(&orchestrator)?;
        }
        Commands::Workflows => {
            let names = orchestrator.workflows().names();
            if names.is_empty() {
                println!("No workflows defined.");
            }
            for name in &names {
                if let Some(definition) = orchestrator.workflows().get(name) {
                    let steps: Vec<&str> =
                        definition.steps.iter().map(|s| s.agent.as_str()).collect();
                    println!("  {} ({})", name, steps.join(" -> "));
                    if let Some(description) = &definition.description {
                        println!("    {}", description);
                    }
                }
            }
        }
        Commands::Workflow { name, payload } => {
            let report = orchestrator
                .execute_workflow(&name, parse_payload(&payload)?)
                .await?;
            print_json(&report)?;
            print_stats(&orchestrator)?;
        }
        Commands::Estimate { workflow } => {
            print_json(&orchestrator.estimate_workflow(&workflow)?)?;
        }
    }

    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_select_agents_by_category() {
        let orchestrator = CliConfig::builtin().into_orchestrator().unwrap();
        let security: Vec<&str> = select_agents(&orchestrator, Some(AgentCategory::Security))
            .iter()
            .map(|a| a.name.as_str())
            .collect();
        assert_eq!(security, vec!["compliance_monitor", "fraud_detection"]);
        assert_eq!(select_agents(&orchestrator, None).len(), 15);
    }

    #[test]
    fn test_parse_payload() {
        assert_eq!(parse_payload("{\"n\": 1}").unwrap()["n"], 1);
        assert!(parse_payload("{not json").is_err());
    }
}
