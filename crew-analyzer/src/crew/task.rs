//! Tasks and the ordered task graph
//!
//! Tasks live in an arena ([`TaskGraph`]) and refer to their upstream context
//! by [`TaskId`]. A task may only name tasks pushed before it, so the graph is
//! acyclic by construction and graph order is a valid execution order.

use std::collections::HashSet;

use super::agent::{AgentId, AgentRegistry};
use super::output::OutputContract;
use crate::error::{PipelineError, Result};

/// Position of a task inside its [`TaskGraph`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TaskId(usize);

impl TaskId {
    /// Id for the task at `index`; only meaningful for the graph it came from
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn index(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone)]
pub struct Task {
    /// Unique name, used in logs, events and crew files
    pub name: String,
    pub description: String,
    pub expected_output: String,
    pub agent: AgentId,
    /// Upstream tasks whose results are fed into this one, in order
    pub context: Vec<TaskId>,
    pub output: OutputContract,
}

impl Task {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        expected_output: impl Into<String>,
        agent: AgentId,
    ) -> Self {
        Self {
            name: name.into(),
            description: description.into(),
            expected_output: expected_output.into(),
            agent,
            context: Vec::new(),
            output: OutputContract::Raw,
        }
    }

    pub fn with_context(mut self, context: impl IntoIterator<Item = TaskId>) -> Self {
        self.context.extend(context);
        self
    }

    pub fn with_output(mut self, output: OutputContract) -> Self {
        self.output = output;
        self
    }
}

#[derive(Debug, Default, Clone)]
pub struct TaskGraph {
    tasks: Vec<Task>,
}

impl TaskGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a task after validating it against the graph so far
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the name is empty or taken, the agent
    /// is not in `agents`, a context entry does not name an earlier task or is
    /// repeated, or the output contract carries an invalid schema.
    pub fn push(&mut self, task: Task, agents: &AgentRegistry) -> Result<TaskId> {
        if task.name.trim().is_empty() {
            return Err(PipelineError::config("task name must not be empty"));
        }
        if self.lookup(&task.name).is_some() {
            return Err(PipelineError::config(format!(
                "duplicate task name `{}`",
                task.name
            )));
        }
        if agents.get(task.agent).is_none() {
            return Err(PipelineError::config(format!(
                "task `{}` is assigned to unknown agent #{}",
                task.name,
                task.agent.index()
            )));
        }

        let mut seen = HashSet::new();
        for upstream in &task.context {
            if upstream.index() >= self.tasks.len() {
                return Err(PipelineError::config(format!(
                    "task `{}` depends on task #{} which is not defined before it",
                    task.name,
                    upstream.index()
                )));
            }
            if !seen.insert(*upstream) {
                return Err(PipelineError::config(format!(
                    "task `{}` lists `{}` in its context twice",
                    task.name, self.tasks[upstream.index()].name
                )));
            }
        }

        task.output
            .validate()
            .map_err(|e| PipelineError::config(format!("task `{}`: {}", task.name, e)))?;

        self.tasks.push(task);
        Ok(TaskId(self.tasks.len() - 1))
    }

    pub fn get(&self, id: TaskId) -> Option<&Task> {
        self.tasks.get(id.0)
    }

    pub fn lookup(&self, name: &str) -> Option<TaskId> {
        self.tasks.iter().position(|t| t.name == name).map(TaskId)
    }

    /// Tasks in execution order
    pub fn iter(&self) -> impl Iterator<Item = (TaskId, &Task)> {
        self.tasks.iter().enumerate().map(|(i, t)| (TaskId(i), t))
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
