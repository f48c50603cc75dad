//! Agent execution: prompt assembly and the tool-call loop

use crew_analyzer_sdk::{
    log_agent_complete, log_agent_failed, log_agent_message, log_agent_start, log_tool_console,
    log_tool_use,
};
use crew_llm::{ChatMessage, CompletionRequest, LlmProvider, ToolCall};
use serde_json::Value;

use super::agent::Agent;
use super::output::{TaskResult, UsageMetrics};
use super::task::Task;
use crate::error::CapabilityError;
use crate::tools::{describe_tool_call, find_tool};

/// Separator placed between upstream outputs in the context block
pub const CONTEXT_SEPARATOR: &str = "\n\n----------\n\n";

pub const DEFAULT_MAX_ITERATIONS: usize = 20;

/// Model selection and loop limits shared by every task in a run
#[derive(Debug, Clone, PartialEq)]
pub struct RunSettings {
    /// Model name as the provider expects it (no `provider/` prefix)
    pub model: String,
    pub max_iterations: usize,
    pub temperature: Option<f32>,
}

impl Default for RunSettings {
    fn default() -> Self {
        Self {
            model: "gpt-4o-mini".to_string(),
            max_iterations: DEFAULT_MAX_ITERATIONS,
            temperature: None,
        }
    }
}

/// Everything one agent invocation needs
pub struct ExecutionRequest<'a> {
    pub task: &'a Task,
    pub agent: &'a Agent,
    /// Completed upstream results, in the task's context order
    pub context: Vec<&'a TaskResult>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AgentOutput {
    pub text: String,
    pub usage: UsageMetrics,
}

/// Merge upstream outputs into a single context block
pub fn render_context(context: &[&TaskResult]) -> String {
    context
        .iter()
        .map(|r| r.raw.trim())
        .collect::<Vec<_>>()
        .join(CONTEXT_SEPARATOR)
}

/// User message for a task: instructions, answer contract, then context
pub fn task_prompt(task: &Task, context: &[&TaskResult]) -> String {
    let mut prompt = format!(
        "{}\n\nThis is the expected criteria for your final answer: {}\n\
         You MUST return the actual complete content as the final answer, not a summary.",
        task.description.trim(),
        task.expected_output.trim()
    );

    if !context.is_empty() {
        prompt.push_str("\n\nThis is the context you're working with:\n");
        prompt.push_str(&render_context(context));
    }
    prompt
}

/// Run one agent on one task until it gives a final answer
///
/// The model is called repeatedly while it asks for tools; each tool output is
/// appended to the conversation. The first reply without tool calls is the
/// answer.
pub async fn execute_agent(
    provider: &dyn LlmProvider,
    settings: &RunSettings,
    request: &ExecutionRequest<'_>,
) -> Result<AgentOutput, CapabilityError> {
    let task = request.task;
    let agent = request.agent;

    log_agent_start!(&task.name, &agent.role, &task.description);

    match run_loop(provider, settings, request).await {
        Ok(output) => {
            log_agent_complete!(&task.name, &agent.role, summarize(&output.text));
            Ok(output)
        }
        Err(e) => {
            log_agent_failed!(&task.name, &agent.role, &e);
            Err(e)
        }
    }
}

async fn run_loop(
    provider: &dyn LlmProvider,
    settings: &RunSettings,
    request: &ExecutionRequest<'_>,
) -> Result<AgentOutput, CapabilityError> {
    let task = request.task;
    let agent = request.agent;
    let limit = agent.max_iterations.unwrap_or(settings.max_iterations).max(1);
    let tools = agent.tool_specs();

    let mut messages = vec![
        ChatMessage::system(agent.system_prompt()),
        ChatMessage::user(task_prompt(task, &request.context)),
    ];
    let mut usage = UsageMetrics::default();

    for iteration in 1..=limit {
        let mut completion_request =
            CompletionRequest::new(&settings.model, messages.clone()).with_tools(tools.clone());
        if let Some(temperature) = settings.temperature {
            completion_request = completion_request.with_temperature(temperature);
        }

        tracing::debug!(task = %task.name, iteration, "Requesting completion");
        let completion = provider.complete(completion_request).await?;
        usage.record(completion.usage);

        if !completion.wants_tools() {
            let text = completion.text().trim().to_string();
            if text.is_empty() {
                return Err(CapabilityError::MalformedResponse(
                    "model returned an empty final answer".to_string(),
                ));
            }
            if agent.verbose {
                println!("\n{}\n", text);
            }
            return Ok(AgentOutput { text, usage });
        }

        if let Some(thought) = completion.message.content.as_deref() {
            if !thought.trim().is_empty() {
                log_agent_message!(&task.name, &agent.role, thought.trim());
            }
        }

        let calls = completion.message.tool_calls.clone();
        messages.push(completion.message);
        for call in &calls {
            let output = run_tool_call(request, call).await?;
            messages.push(ChatMessage::tool_result(&call.id, output));
        }
    }

    Err(CapabilityError::IterationLimit(limit))
}

async fn run_tool_call(
    request: &ExecutionRequest<'_>,
    call: &ToolCall,
) -> Result<String, CapabilityError> {
    let name = call.function.name.as_str();
    let args = parse_arguments(&call.function.arguments).map_err(|e| {
        CapabilityError::MalformedResponse(format!("arguments for `{}` are not JSON: {}", name, e))
    })?;

    let detail = describe_tool_call(name, &args);
    log_tool_use!(&request.task.name, &request.agent.role, name, &detail);
    if request.agent.verbose {
        log_tool_console!(&detail);
    }

    let tool = find_tool(&request.agent.tools, name)
        .ok_or_else(|| crate::tools::ToolError::UnknownTool(name.to_string()))?;
    let output = tool.call(args).await?;

    tracing::debug!(tool = name, bytes = output.len(), "Tool call finished");
    Ok(output)
}

/// Models sometimes send an empty string for argument-less calls
fn parse_arguments(arguments: &str) -> serde_json::Result<Value> {
    if arguments.trim().is_empty() {
        return Ok(Value::Object(Default::default()));
    }
    serde_json::from_str(arguments)
}

fn summarize(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    if first_line.chars().count() > 120 {
        format!("{}…", first_line.chars().take(120).collect::<String>())
    } else {
        first_line.to_string()
    }
}
