//! Generic reference handlers for the Maestro orchestrator.
//!
//! None of these carry business logic. They exist so a catalog can be run
//! end to end (from the CLI or in tests) before real agents are written.
//!
//! # Main entry points
//!
//! - [`EchoHandler`] — Returns the payload, task type and dependency keys.
//! - [`FailHandler`] — Always fails with a fixed message.
//! - [`DelayHandler`] — Sleeps, then echoes.
//! - [`BuiltinHandler`] — Config-friendly selector for the above.
//! - [`bind_all()`] — Bind builtins to every agent of a builder.

/// Delayed echo handler.
pub mod delay;
/// Echo handler.
pub mod echo;
/// Always-failing handler.
pub mod fail;
/// Handler selection from configuration.
pub mod selector;

pub use delay::DelayHandler;
pub use echo::EchoHandler;
pub use fail::FailHandler;
pub use selector::{bind_all, BuiltinHandler};
