use crate::registry::AgentRegistry;
use maestro_core::{MaestroError, MaestroResult};
use std::collections::HashMap;

/// Static mapping from an agent to the agents it depends on.
///
/// Only one level is ever executed: a dependency's own dependencies are not
/// run on its behalf. The map is still required to be acyclic.
#[derive(Debug, Default, Clone)]
pub struct DependencyMap {
    edges: HashMap<String, Vec<String>>,
}

impl DependencyMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the dependencies of `agent`, replacing any earlier declaration.
    /// Repeated names are collapsed, first occurrence wins.
    pub fn insert<I, S>(&mut self, agent: impl Into<String>, dependencies: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut deps: Vec<String> = Vec::new();
        for dep in dependencies {
            let dep = dep.into();
            if !deps.contains(&dep) {
                deps.push(dep);
            }
        }
        self.edges.insert(agent.into(), deps);
    }

    /// Declared dependencies of `agent`, empty if none.
    pub fn dependencies_of(&self, agent: &str) -> &[String] {
        self.edges.get(agent).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Agents whose dependency list contains `agent`, sorted.
    pub fn dependents_of(&self, agent: &str) -> Vec<String> {
        let mut dependents: Vec<String> = self
            .edges
            .iter()
            .filter(|(_, deps)| deps.iter().any(|d| d == agent))
            .map(|(name, _)| name.clone())
            .collect();
        dependents.sort();
        dependents
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Check the map against the registry: every name must be registered
    /// and the graph must be acyclic.
    pub fn validate(&self, registry: &AgentRegistry) -> MaestroResult<()> {
        let mut agents: Vec<&String> = self.edges.keys().collect();
        agents.sort();

        for agent in &agents {
            if !registry.contains(agent) {
                return Err(MaestroError::AgentNotFound((*agent).clone()));
            }
            for dep in self.dependencies_of(agent) {
                if !registry.contains(dep) {
                    return Err(MaestroError::UnknownDependency {
                        agent: (*agent).clone(),
                        dependency: dep.clone(),
                    });
                }
            }
        }

        if let Some(agent) = self.find_cycle() {
            return Err(MaestroError::DependencyCycle(agent));
        }
        Ok(())
    }

    /// Returns true if the graph contains a cycle.
    pub fn has_cycle(&self) -> bool {
        self.find_cycle().is_some()
    }

    fn find_cycle(&self) -> Option<String> {
        let mut visited = HashMap::new();
        let mut agents: Vec<&str> = self.edges.keys().map(String::as_str).collect();
        agents.sort_unstable();
        agents
            .into_iter()
            .find_map(|agent| self.dfs_cycle(agent, &mut visited))
    }

    fn dfs_cycle<'a>(&'a self, agent: &'a str, visited: &mut HashMap<&'a str, u8>) -> Option<String> {
        match visited.get(agent) {
            Some(1) => return Some(agent.to_string()), // back edge
            Some(2) => return None,
            _ => {}
        }
        visited.insert(agent, 1);
        for dep in self.dependencies_of(agent) {
            if let Some(found) = self.dfs_cycle(dep, visited) {
                return Some(found);
            }
        }
        visited.insert(agent, 2);
        None
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::types::{AgentCategory, AgentDescriptor};

    fn registry(names: &[&str]) -> AgentRegistry {
        let mut registry = AgentRegistry::new();
        for name in names {
            registry
                .register(AgentDescriptor::new(*name, AgentCategory::Operations))
                .unwrap();
        }
        registry
    }

    #[test]
    fn test_missing_entry_is_empty() {
        let map = DependencyMap::new();
        assert!(map.dependencies_of("anything").is_empty());
        assert!(map.is_empty());
    }

    #[test]
    fn test_insert_collapses_duplicates() {
        let mut map = DependencyMap::new();
        map.insert("b", ["a", "c", "a"]);
        assert_eq!(map.dependencies_of("b"), ["a".to_string(), "c".to_string()]);
    }

    #[test]
    fn test_dependents_of() {
        let mut map = DependencyMap::new();
        map.insert("pricing", ["forecast", "market"]);
        map.insert("booking", ["forecast"]);
        map.insert("campaign", ["market"]);

        assert_eq!(
            map.dependents_of("forecast"),
            vec!["booking".to_string(), "pricing".to_string()]
        );
        assert!(map.dependents_of("booking").is_empty());
    }

    #[test]
    fn test_validate_ok() {
        let mut map = DependencyMap::new();
        map.insert("b", ["a"]);
        map.insert("c", ["a", "b"]);
        assert!(map.validate(&registry(&["a", "b", "c"])).is_ok());
        assert!(!map.has_cycle());
    }

    #[test]
    fn test_validate_unknown_dependency() {
        let mut map = DependencyMap::new();
        map.insert("b", ["a", "ghost"]);
        let err = map.validate(&registry(&["a", "b"])).unwrap_err();
        match err {
            MaestroError::UnknownDependency { agent, dependency } => {
                assert_eq!(agent, "b");
                assert_eq!(dependency, "ghost");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_validate_unknown_agent_key() {
        let mut map = DependencyMap::new();
        map.insert("ghost", ["a"]);
        let err = map.validate(&registry(&["a"])).unwrap_err();
        assert!(matches!(err, MaestroError::AgentNotFound(_)));
    }

    #[test]
    fn test_cycle_detection() {
        let mut map = DependencyMap::new();
        map.insert("a", ["b"]);
        map.insert("b", ["c"]);
        map.insert("c", ["a"]);
        assert!(map.has_cycle());
        let err = map.validate(&registry(&["a", "b", "c"])).unwrap_err();
        assert!(matches!(err, MaestroError::DependencyCycle(_)));
    }

    #[test]
    fn test_self_dependency_is_a_cycle() {
        let mut map = DependencyMap::new();
        map.insert("a", ["a"]);
        assert!(map.has_cycle());
    }
}
