use crate::{DelayHandler, EchoHandler, FailHandler};
use maestro_orchestrator::{AgentHandler, OrchestratorBuilder};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};

/// Which builtin to bind to an agent.
///
/// In TOML: `"echo"`, `"fail"` or `{ delay = 250 }` (milliseconds).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuiltinHandler {
    #[default]
    Echo,
    Fail,
    Delay(u64),
}

impl BuiltinHandler {
    pub fn into_handler(self) -> Arc<dyn AgentHandler> {
        match self {
            Self::Echo => Arc::new(EchoHandler::new()),
            Self::Fail => Arc::new(FailHandler::default()),
            Self::Delay(ms) => Arc::new(DelayHandler::from_millis(ms)),
        }
    }
}

/// Bind the selected builtins, then an [`EchoHandler`] to every agent
/// still without a handler. Entries naming an unregistered agent are
/// logged and skipped.
pub fn bind_all(
    mut builder: OrchestratorBuilder,
    handlers: &BTreeMap<String, BuiltinHandler>,
) -> OrchestratorBuilder {
    for (agent, selected) in handlers {
        if !builder.is_registered(agent) {
            warn!(
                agent = %agent,
                handler = ?selected,
                "Handler configured for an unregistered agent, skipping"
            );
            continue;
        }
        debug!(agent = %agent, handler = ?selected, "Binding builtin handler");
        builder = builder.handler(agent.clone(), selected.into_handler());
    }
    for agent in builder.unbound_agents() {
        builder = builder.handler(agent, BuiltinHandler::Echo.into_handler());
    }
    builder
}
