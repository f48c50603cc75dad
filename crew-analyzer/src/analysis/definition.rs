//! YAML crew definitions
//!
//! A crew file replaces the built-in crew:
//!
//! ```yaml
//! agents:
//!   - role: Reader
//!     goal: Read {files}
//!     backstory: Careful reader.
//!     tools: [file_read]
//!     verbose: true
//! tasks:
//!   - name: read
//!     agent: Reader
//!     description: Summarize every file under {root}.
//!     expected_output: One paragraph per file.
//!   - name: report
//!     agent: Reader
//!     description: Write the final report.
//!     expected_output: Markdown.
//!     context: [read]
//!     output:
//!       type: json
//! ```

use std::path::Path;
use std::sync::Arc;

use serde::Deserialize;

use super::{interpolate, CrewOptions};
use crate::crew::{Agent, Crew, OutputContract, Task};
use crate::discovery::FileSet;
use crate::error::{PipelineError, Result};
use crate::tools::{FileReadTool, Tool};

/// Name of the file-read tool in crew files
pub const FILE_READ_TOOL: &str = "file_read";

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CrewDefinition {
    pub agents: Vec<AgentDefinition>,
    pub tasks: Vec<TaskDefinition>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AgentDefinition {
    pub role: String,
    pub goal: String,
    pub backstory: String,
    #[serde(default)]
    pub tools: Vec<String>,
    #[serde(default)]
    pub verbose: bool,
    #[serde(default)]
    pub max_iterations: Option<usize>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TaskDefinition {
    pub name: String,
    /// Role of the agent that runs this task
    pub agent: String,
    pub description: String,
    pub expected_output: String,
    /// Names of earlier tasks
    #[serde(default)]
    pub context: Vec<String>,
    #[serde(default)]
    pub output: OutputContract,
}

impl CrewDefinition {
    pub fn from_yaml(text: &str) -> Result<Self> {
        serde_yaml::from_str(text)
            .map_err(|e| PipelineError::config(format!("invalid crew definition: {}", e)))
    }

    pub async fn load(path: &Path) -> Result<Self> {
        let text = tokio::fs::read_to_string(path).await.map_err(|e| {
            PipelineError::config(format!("cannot read crew file '{}': {}", path.display(), e))
        })?;
        Self::from_yaml(&text)
    }

    /// Resolve names into a validated crew for `files`
    pub fn into_crew(self, files: &FileSet, options: &CrewOptions) -> Result<Crew> {
        let mut builder = Crew::builder(options.settings.clone()).quiet(options.quiet);

        for def in self.agents {
            let mut agent = Agent::new(
                def.role,
                interpolate(&def.goal, files),
                interpolate(&def.backstory, files),
            )
            .verbose(def.verbose);
            if let Some(max_iterations) = def.max_iterations {
                agent = agent.with_max_iterations(max_iterations);
            }
            for name in &def.tools {
                agent = agent.with_tool(resolve_tool(name, files)?);
            }
            builder.agent(agent)?;
        }

        for def in self.tasks {
            let agent = builder.agent_id(&def.agent).ok_or_else(|| {
                PipelineError::config(format!(
                    "task `{}` is assigned to unknown agent `{}`",
                    def.name, def.agent
                ))
            })?;
            let context = def
                .context
                .iter()
                .map(|name| {
                    builder.task_id(name).ok_or_else(|| {
                        PipelineError::config(format!(
                            "task `{}` depends on `{}`, which is not defined before it",
                            def.name, name
                        ))
                    })
                })
                .collect::<Result<Vec<_>>>()?;

            builder.task(
                Task::new(
                    def.name,
                    interpolate(&def.description, files),
                    interpolate(&def.expected_output, files),
                    agent,
                )
                .with_context(context)
                .with_output(def.output),
            )?;
        }

        builder.build()
    }
}

fn resolve_tool(name: &str, files: &FileSet) -> Result<Arc<dyn Tool>> {
    match name {
        FILE_READ_TOOL => Ok(Arc::new(FileReadTool::new(files.root()))),
        other => Err(PipelineError::config(format!("unknown tool `{}`", other))),
    }
}
