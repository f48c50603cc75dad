//! Agent descriptors and the registry that owns them

use std::fmt;
use std::sync::Arc;

use crate::error::{PipelineError, Result};
use crate::tools::Tool;

/// Index of an agent inside its [`AgentRegistry`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AgentId(usize);

impl AgentId {
    pub fn index(&self) -> usize {
        self.0
    }
}

/// A role in the crew
///
/// Agents carry no per-task state: the same descriptor is reused for every
/// task assigned to it, and the registry hands out only shared references.
#[derive(Clone)]
pub struct Agent {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    pub tools: Vec<Arc<dyn Tool>>,
    pub verbose: bool,
    /// Overrides the crew-wide tool-loop limit
    pub max_iterations: Option<usize>,
}

impl Agent {
    pub fn new(
        role: impl Into<String>,
        goal: impl Into<String>,
        backstory: impl Into<String>,
    ) -> Self {
        Self {
            role: role.into(),
            goal: goal.into(),
            backstory: backstory.into(),
            tools: Vec::new(),
            verbose: false,
            max_iterations: None,
        }
    }

    pub fn with_tool(mut self, tool: Arc<dyn Tool>) -> Self {
        self.tools.push(tool);
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = Some(max_iterations);
        self
    }

    pub fn tool_specs(&self) -> Vec<crew_llm::ToolSpec> {
        self.tools.iter().map(|t| t.spec()).collect()
    }

    /// Framing sent as the system message for every task this agent runs
    pub fn system_prompt(&self) -> String {
        format!(
            "You are {}. {}\nYour personal goal is: {}",
            self.role.trim(),
            self.backstory.trim(),
            self.goal.trim()
        )
    }
}

impl fmt::Debug for Agent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Agent")
            .field("role", &self.role)
            .field(
                "tools",
                &self.tools.iter().map(|t| t.name().to_string()).collect::<Vec<_>>(),
            )
            .field("verbose", &self.verbose)
            .field("max_iterations", &self.max_iterations)
            .finish()
    }
}

/// Ordered set of agents, unique by role
#[derive(Debug, Default, Clone)]
pub struct AgentRegistry {
    agents: Vec<Agent>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an agent; roles must be non-empty and unique
    pub fn register(&mut self, agent: Agent) -> Result<AgentId> {
        if agent.role.trim().is_empty() {
            return Err(PipelineError::config("agent role must not be empty"));
        }
        if self.lookup(&agent.role).is_some() {
            return Err(PipelineError::config(format!(
                "duplicate agent role `{}`",
                agent.role
            )));
        }

        self.agents.push(agent);
        Ok(AgentId(self.agents.len() - 1))
    }

    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.0)
    }

    pub fn lookup(&self, role: &str) -> Option<AgentId> {
        self.agents
            .iter()
            .position(|a| a.role == role)
            .map(AgentId)
    }

    pub fn iter(&self) -> impl Iterator<Item = (AgentId, &Agent)> {
        self.agents.iter().enumerate().map(|(i, a)| (AgentId(i), a))
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    /// Force every agent's verbose flag off
    pub(crate) fn silence(&mut self) {
        for agent in &mut self.agents {
            agent.verbose = false;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::FileReadTool;

    #[test]
    fn test_register_and_lookup() {
        let mut registry = AgentRegistry::new();
        let reader = registry
            .register(Agent::new("Reader", "read", "reads"))
            .unwrap();
        let writer = registry
            .register(Agent::new("Writer", "write", "writes"))
            .unwrap();

        assert_ne!(reader, writer);
        assert_eq!(registry.lookup("Writer"), Some(writer));
        assert_eq!(registry.get(reader).unwrap().role, "Reader");
        assert_eq!(registry.lookup("Nobody"), None);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_duplicate_role_rejected() {
        let mut registry = AgentRegistry::new();
        registry.register(Agent::new("Reader", "a", "b")).unwrap();

        let err = registry
            .register(Agent::new("Reader", "c", "d"))
            .unwrap_err();
        assert!(err.is_config());
        assert!(err.to_string().contains("duplicate agent role"));
    }

    #[test]
    fn test_empty_role_rejected() {
        let mut registry = AgentRegistry::new();
        assert!(registry.register(Agent::new("  ", "g", "b")).is_err());
    }

    #[test]
    fn test_system_prompt_contains_framing() {
        let agent = Agent::new("Structure Analyzer", "Map the classes", "You are an architect.");
        let prompt = agent.system_prompt();

        assert!(prompt.starts_with("You are Structure Analyzer."));
        assert!(prompt.contains("You are an architect."));
        assert!(prompt.ends_with("Your personal goal is: Map the classes"));
    }

    #[test]
    fn test_tool_specs_follow_bindings() {
        let agent = Agent::new("Reader", "g", "b")
            .with_tool(Arc::new(FileReadTool::new(std::env::temp_dir())));
        let specs = agent.tool_specs();

        assert_eq!(specs.len(), 1);
        assert_eq!(specs[0].name, "read_file");
        assert!(format!("{:?}", agent).contains("read_file"));
    }

    #[test]
    fn test_silence_clears_verbose() {
        let mut registry = AgentRegistry::new();
        registry
            .register(Agent::new("Reader", "g", "b").verbose(true))
            .unwrap();
        registry.silence();
        assert!(registry.iter().all(|(_, a)| !a.verbose));
    }
}
