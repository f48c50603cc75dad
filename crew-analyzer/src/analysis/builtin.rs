//! The default three-stage crew: read → analyze structure → write report

use std::sync::Arc;

use super::prompts::{
    AgentPrompt, TaskPrompt, ANALYZE_DEPENDENCIES, ANALYZE_STRUCTURE, CODE_READER,
    DEPENDENCY_ANALYZER, READ_CODE, REPORT_WRITER, STRUCTURE_ANALYZER, WRITE_REPORT,
};
use super::{interpolate, CrewOptions};
use crate::crew::{Agent, AgentId, Crew, Task};
use crate::discovery::FileSet;
use crate::error::Result;
use crate::tools::FileReadTool;

fn agent(prompt: &AgentPrompt, files: &FileSet) -> Agent {
    Agent::new(
        prompt.role,
        interpolate(prompt.goal, files),
        interpolate(prompt.backstory, files),
    )
}

fn task(prompt: &TaskPrompt, agent: AgentId, files: &FileSet) -> Task {
    Task::new(
        prompt.name,
        interpolate(prompt.description, files),
        interpolate(prompt.expected_output, files),
        agent,
    )
}

/// Build the code analysis crew for a discovered file set
///
/// The reader is the only agent with file access, confined to the discovery
/// root, and the only verbose one.
pub fn code_analysis_crew(files: &FileSet, options: &CrewOptions) -> Result<Crew> {
    let mut builder = Crew::builder(options.settings.clone()).quiet(options.quiet);

    let reader = builder.agent(
        agent(&CODE_READER, files)
            .with_tool(Arc::new(FileReadTool::new(files.root())))
            .verbose(true),
    )?;
    let analyzer = builder.agent(agent(&STRUCTURE_ANALYZER, files))?;
    let dependencies = if options.with_dependencies {
        Some(builder.agent(agent(&DEPENDENCY_ANALYZER, files))?)
    } else {
        None
    };
    let writer = builder.agent(agent(&REPORT_WRITER, files))?;

    let read_code = builder.task(task(&READ_CODE, reader, files))?;
    let analyze_structure =
        builder.task(task(&ANALYZE_STRUCTURE, analyzer, files).with_context([read_code]))?;

    let mut report_context = vec![analyze_structure];
    if let Some(dependencies) = dependencies {
        let analyze_dependencies = builder
            .task(task(&ANALYZE_DEPENDENCIES, dependencies, files).with_context([read_code]))?;
        report_context.push(analyze_dependencies);
    }

    builder.task(task(&WRITE_REPORT, writer, files).with_context(report_context))?;
    builder.build()
}
