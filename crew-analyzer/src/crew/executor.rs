//! Sequential crew execution
//!
//! Tasks run one at a time in graph order. Each result is recorded exactly
//! once in a table indexed by [`TaskId`] before the next task starts, and a
//! task's context is read from that table.

use crew_analyzer_sdk::{
    log_crew_complete, log_crew_start, log_stats, log_task_complete, log_task_complete_console,
    log_task_failed, log_task_start, log_task_start_console, log_warning,
};
use crew_llm::LlmProvider;
use uuid::Uuid;

use super::agent::{Agent, AgentId, AgentRegistry};
use super::output::{CrewOutput, TaskResult, UsageMetrics};
use super::runner::{execute_agent, ExecutionRequest, RunSettings};
use super::task::{Task, TaskGraph, TaskId};
use crate::error::{PipelineError, Result};

/// Process model of a crew; only sequential execution exists
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Process {
    #[default]
    Sequential,
}

/// Write-once storage for task results
#[derive(Debug)]
struct ResultsTable {
    slots: Vec<Option<TaskResult>>,
}

impl ResultsTable {
    fn new(len: usize) -> Self {
        Self {
            slots: vec![None; len],
        }
    }

    fn get(&self, id: TaskId) -> Option<&TaskResult> {
        self.slots.get(id.index()).and_then(|s| s.as_ref())
    }

    fn record(&mut self, id: TaskId, result: TaskResult) -> Result<()> {
        let slot = self.slots.get_mut(id.index()).ok_or_else(|| {
            PipelineError::config(format!("task #{} is outside the graph", id.index()))
        })?;
        if slot.is_some() {
            return Err(PipelineError::config(format!(
                "task `{}` already has a result",
                result.name
            )));
        }
        *slot = Some(result);
        Ok(())
    }

    /// All results in graph order; fails if any task never ran
    fn into_ordered(self) -> Result<Vec<TaskResult>> {
        self.slots
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                slot.ok_or_else(|| PipelineError::config(format!("task #{} produced no result", i)))
            })
            .collect()
    }
}

/// A validated set of agents and tasks, ready to run
#[derive(Debug)]
pub struct Crew {
    agents: AgentRegistry,
    tasks: TaskGraph,
    process: Process,
    settings: RunSettings,
}

impl Crew {
    pub fn builder(settings: RunSettings) -> CrewBuilder {
        CrewBuilder {
            agents: AgentRegistry::new(),
            tasks: TaskGraph::new(),
            settings,
            quiet: false,
        }
    }

    pub fn agents(&self) -> &AgentRegistry {
        &self.agents
    }

    pub fn tasks(&self) -> &TaskGraph {
        &self.tasks
    }

    pub fn process(&self) -> Process {
        self.process
    }

    pub fn settings(&self) -> &RunSettings {
        &self.settings
    }

    /// Run every task in order and aggregate the results
    ///
    /// # Errors
    ///
    /// The first failed agent invocation aborts the run with
    /// [`PipelineError::Capability`]; no partial output is returned.
    pub async fn kickoff(&self, provider: &dyn LlmProvider) -> Result<CrewOutput> {
        let run_id = Uuid::new_v4();
        let total = self.tasks.len();
        let mut results = ResultsTable::new(total);
        let mut usage = UsageMetrics::default();

        log_crew_start!(run_id, total);
        tracing::debug!(%run_id, total, process = ?self.process, "Crew kickoff");

        for (id, task) in self.tasks.iter() {
            let number = id.index() + 1;
            let agent = self.agent_for(task)?;

            log_task_start!(number, &task.name, &agent.role, total);
            if agent.verbose {
                log_task_start_console!(number, total, &agent.role);
            }

            let context = task
                .context
                .iter()
                .map(|upstream| {
                    results.get(*upstream).ok_or_else(|| {
                        PipelineError::config(format!(
                            "task `{}` needs the result of task #{} which has not run",
                            task.name,
                            upstream.index()
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            let request = ExecutionRequest {
                task,
                agent,
                context,
            };
            let output = match execute_agent(provider, &self.settings, &request).await {
                Ok(output) => output,
                Err(source) => {
                    log_task_failed!(&task.name, &source);
                    return Err(PipelineError::Capability {
                        task: task.name.clone(),
                        role: agent.role.clone(),
                        source,
                    });
                }
            };

            let structured = match task.output.structure(&output.text) {
                Ok(structured) => structured,
                Err(reason) => {
                    tracing::warn!(task = %task.name, %reason, "Structured output unavailable");
                    if agent.verbose {
                        log_warning!("Structured output missing for task {}: {}", task.name, reason);
                    }
                    None
                }
            };

            usage += output.usage;
            log_task_complete!(&task.name, &output.text);
            if agent.verbose {
                log_task_complete_console!(number);
            }

            results.record(
                id,
                TaskResult {
                    name: task.name.clone(),
                    agent: agent.role.clone(),
                    description: task.description.clone(),
                    raw: output.text,
                    structured,
                },
            )?;
        }

        let tasks_output = results.into_ordered()?;
        let crew_output = CrewOutput::from_results(run_id, tasks_output, usage)
            .ok_or_else(|| PipelineError::config("crew has no tasks"))?;

        log_crew_complete!(run_id, usage.total_tokens);
        if self.agents.iter().any(|(_, a)| a.verbose) {
            log_stats!(
                usage.successful_requests,
                usage.prompt_tokens,
                usage.completion_tokens,
                usage.total_tokens
            );
        }

        Ok(crew_output)
    }

    fn agent_for(&self, task: &Task) -> Result<&Agent> {
        self.agents.get(task.agent).ok_or_else(|| {
            PipelineError::config(format!("task `{}` has no registered agent", task.name))
        })
    }
}

/// Collects agents and tasks, validating each as it is added
#[derive(Debug)]
pub struct CrewBuilder {
    agents: AgentRegistry,
    tasks: TaskGraph,
    settings: RunSettings,
    quiet: bool,
}

impl CrewBuilder {
    pub fn agent(&mut self, agent: Agent) -> Result<AgentId> {
        self.agents.register(agent)
    }

    pub fn task(&mut self, task: Task) -> Result<TaskId> {
        self.tasks.push(task, &self.agents)
    }

    pub fn agent_id(&self, role: &str) -> Option<AgentId> {
        self.agents.lookup(role)
    }

    pub fn task_id(&self, name: &str) -> Option<TaskId> {
        self.tasks.lookup(name)
    }

    /// Turn off console output for every agent
    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn build(mut self) -> Result<Crew> {
        if self.tasks.is_empty() {
            return Err(PipelineError::config("a crew needs at least one task"));
        }
        if self.quiet {
            self.agents.silence();
        }

        Ok(Crew {
            agents: self.agents,
            tasks: self.tasks,
            process: Process::Sequential,
            settings: self.settings,
        })
    }
}
