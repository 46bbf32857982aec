use crate::types::{AgentCategory, AgentDescriptor};
use maestro_core::{MaestroError, MaestroResult};
use std::collections::HashMap;
use tracing::info;

/// Central catalog of every agent the orchestrator knows about.
///
/// Populated while the orchestrator is being built and read-only afterwards.
#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    agents: HashMap<String, AgentDescriptor>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a descriptor. Re-registering a name is rejected.
    pub fn register(&mut self, descriptor: AgentDescriptor) -> MaestroResult<()> {
        if self.agents.contains_key(&descriptor.name) {
            return Err(MaestroError::DuplicateAgent(descriptor.name));
        }
        info!(
            agent = %descriptor.name,
            category = %descriptor.category,
            priority = %descriptor.priority,
            "Registered agent"
        );
        self.agents.insert(descriptor.name.clone(), descriptor);
        Ok(())
    }

    pub fn lookup(&self, name: &str) -> MaestroResult<&AgentDescriptor> {
        self.agents
            .get(name)
            .ok_or_else(|| MaestroError::AgentNotFound(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&AgentDescriptor> {
        self.agents.get(name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.agents.contains_key(name)
    }

    /// Names of all agents in `category`, sorted.
    pub fn list_by_category(&self, category: AgentCategory) -> Vec<String> {
        let mut names: Vec<String> = self
            .agents
            .values()
            .filter(|d| d.category == category)
            .map(|d| d.name.clone())
            .collect();
        names.sort();
        names
    }

    /// All registered names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.agents.keys().cloned().collect();
        names.sort();
        names
    }

    /// All descriptors, sorted by name.
    pub fn descriptors(&self) -> Vec<&AgentDescriptor> {
        let mut descriptors: Vec<&AgentDescriptor> = self.agents.values().collect();
        descriptors.sort_by(|a, b| a.name.cmp(&b.name));
        descriptors
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}
