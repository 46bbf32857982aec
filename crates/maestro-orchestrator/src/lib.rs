//! Agent task orchestration engine.
//!
//! Registers named agents with pluggable handlers, runs each task's declared
//! dependencies concurrently before the task itself, drives named workflows
//! step by step, and keeps an execution ledger for statistics.
//!
//! # Main types
//!
//! - [`Orchestrator`] — Top-level engine: run tasks and workflows, query the catalog.
//! - [`OrchestratorBuilder`] — Assembles and validates agents, dependencies and workflows.
//! - [`AgentRegistry`] — Catalog of [`AgentDescriptor`]s.
//! - [`DependencyMap`] — One-level dependency declarations between agents.
//! - [`AgentHandler`] — Trait implemented by an agent's business logic.
//! - [`ExecutionLedger`] — Append-only record of every [`TaskResult`](maestro_core::TaskResult).
//! - [`CatalogConfig`] — TOML-loadable catalog; see also [`default_catalog`].

/// Built-in hospitality catalog.
pub mod catalog;
/// TOML catalog configuration.
pub mod config;
/// Dependency declarations and validation.
pub mod dependencies;
/// Orchestrator and builder.
pub mod engine;
/// Task execution: dependency fan-out, handler invocation, timeouts.
pub mod executor;
/// Handler trait and lookup tables.
pub mod handler;
/// Execution ledger and statistics.
pub mod ledger;
/// Agent registry.
pub mod registry;
/// Agent descriptor types.
pub mod types;
/// Workflow definitions and the sequential runner.
pub mod workflow;

pub use catalog::default_catalog;
pub use config::{CatalogConfig, EngineConfig};
pub use dependencies::DependencyMap;
pub use engine::{Orchestrator, OrchestratorBuilder};
pub use executor::{AGENT_NOT_FOUND, NO_HANDLER};
pub use handler::{handler_fn, AgentHandler, DependencyResults, FnHandler, HandlerLookup, HandlerTable};
pub use ledger::{AgentStats, ExecutionLedger, GlobalStats};
pub use registry::AgentRegistry;
pub use types::{AgentCategory, AgentDescription, AgentDescriptor};
pub use workflow::{WorkflowCatalog, WorkflowDefinition, WorkflowEstimate, WorkflowReport, WorkflowStep};
