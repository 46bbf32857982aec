//! Core types and error definitions for the Maestro orchestration engine.
//!
//! This crate provides the foundational types shared across all Maestro crates:
//! the unified error enum and the request/result records that flow through
//! the task executor and into the execution ledger.
//!
//! # Main types
//!
//! - [`MaestroError`] — Unified error enum for all Maestro subsystems.
//! - [`MaestroResult`] — Convenience alias for `Result<T, MaestroError>`.
//! - [`Priority`] — Ordinal importance hint attached to requests and agents.
//! - [`TaskRequest`] — A single invocation of a named agent.
//! - [`TaskResult`] — The recorded outcome of one invocation.

/// Error types.
pub mod error;
/// Task request and result records.
pub mod task;

pub use error::{MaestroError, MaestroResult};
pub use task::{Priority, TaskRequest, TaskResult, DEFAULT_TIMEOUT, DEPENDENCY_TASK_TYPE};
