//! Agents, tasks and the sequential executor

pub mod agent;
pub mod executor;
pub mod output;
pub mod runner;
pub mod task;

pub use agent::{Agent, AgentId, AgentRegistry};
pub use executor::{Crew, CrewBuilder, Process};
pub use output::{CrewOutput, JsonMap, OutputContract, Structured, TaskResult, TypedObject, UsageMetrics};
pub use runner::{render_context, task_prompt, RunSettings, CONTEXT_SEPARATOR, DEFAULT_MAX_ITERATIONS};
pub use task::{Task, TaskGraph, TaskId};
