use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

/// Prefix marking a structured event line on stderr
pub const EVENT_PREFIX: &str = "__CREW_EVENT__:";

static EVENTS_ENABLED: AtomicBool = AtomicBool::new(false);

/// Turn structured event emission on or off for the whole process
pub fn set_events_enabled(enabled: bool) {
    EVENTS_ENABLED.store(enabled, Ordering::Relaxed);
}

pub fn events_enabled() -> bool {
    EVENTS_ENABLED.load(Ordering::Relaxed)
}

/// Structured logging events emitted while a crew runs
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineLog {
    /// Kickoff accepted, tasks about to run
    CrewStarted {
        run_id: Uuid,
        total_tasks: usize,
    },
    /// All tasks finished
    CrewCompleted {
        run_id: Uuid,
        total_tokens: u64,
    },
    /// Task started
    TaskStarted {
        task_number: usize,
        task_id: String,
        agent_name: String,
        total_tasks: usize,
    },
    /// Task completed
    TaskCompleted {
        task_id: String,
        result: Option<String>,
    },
    /// Task failed
    TaskFailed {
        task_id: String,
        error: String,
    },
    /// Agent started working on a task
    AgentStarted {
        task_id: String,
        agent_name: String,
        description: String,
    },
    /// Agent message (final or intermediate text)
    AgentMessage {
        task_id: String,
        agent_name: String,
        message: String,
    },
    /// Agent invoked a tool
    ToolUsed {
        task_id: String,
        agent_name: String,
        tool: String,
        detail: String,
    },
    /// Agent completed
    AgentCompleted {
        task_id: String,
        agent_name: String,
        result: Option<String>,
    },
    /// Agent failed
    AgentFailed {
        task_id: String,
        agent_name: String,
        error: String,
    },
    /// Output artifact persisted
    ArtifactWritten {
        file_path: String,
        description: String,
    },
    /// Output artifact could not be persisted
    ArtifactFailed {
        file_path: String,
        error: String,
    },
}

impl PipelineLog {
    /// Render as a single prefixed line
    pub fn to_line(&self) -> Option<String> {
        serde_json::to_string(self)
            .ok()
            .map(|json| format!("{}{}", EVENT_PREFIX, json))
    }

    /// Parse a line produced by [`PipelineLog::to_line`]
    pub fn from_line(line: &str) -> Option<Self> {
        line.strip_prefix(EVENT_PREFIX)
            .and_then(|json| serde_json::from_str(json).ok())
    }

    /// Emit this event to stderr when events are enabled
    pub fn emit(&self) {
        if !events_enabled() {
            return;
        }
        if let Some(line) = self.to_line() {
            use std::io::Write;
            eprintln!("{}", line);
            let _ = std::io::stderr().flush();
        }
    }
}

/// Helper macros for pipeline events
#[macro_export]
macro_rules! log_crew_start {
    ($run_id:expr, $total:expr) => {
        $crate::PipelineLog::CrewStarted {
            run_id: $run_id,
            total_tasks: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_crew_complete {
    ($run_id:expr, $tokens:expr) => {
        $crate::PipelineLog::CrewCompleted {
            run_id: $run_id,
            total_tokens: $tokens,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_start {
    ($number:expr, $task_id:expr, $agent:expr, $total:expr) => {
        $crate::PipelineLog::TaskStarted {
            task_number: $number,
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            total_tasks: $total,
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_complete {
    ($task_id:expr) => {
        $crate::PipelineLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $result:expr) => {
        $crate::PipelineLog::TaskCompleted {
            task_id: $task_id.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_task_failed {
    ($task_id:expr, $error:expr) => {
        $crate::PipelineLog::TaskFailed {
            task_id: $task_id.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_start {
    ($task_id:expr, $agent:expr, $desc:expr) => {
        $crate::PipelineLog::AgentStarted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_message {
    ($task_id:expr, $agent:expr, $msg:expr) => {
        $crate::PipelineLog::AgentMessage {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            message: $msg.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_tool_use {
    ($task_id:expr, $agent:expr, $tool:expr, $detail:expr) => {
        $crate::PipelineLog::ToolUsed {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            tool: $tool.to_string(),
            detail: $detail.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_complete {
    ($task_id:expr, $agent:expr) => {
        $crate::PipelineLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: None,
        }
        .emit();
    };
    ($task_id:expr, $agent:expr, $result:expr) => {
        $crate::PipelineLog::AgentCompleted {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            result: Some($result.to_string()),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_agent_failed {
    ($task_id:expr, $agent:expr, $error:expr) => {
        $crate::PipelineLog::AgentFailed {
            task_id: $task_id.to_string(),
            agent_name: $agent.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_artifact {
    ($path:expr, $desc:expr) => {
        $crate::PipelineLog::ArtifactWritten {
            file_path: $path.to_string(),
            description: $desc.to_string(),
        }
        .emit();
    };
}

#[macro_export]
macro_rules! log_artifact_failed {
    ($path:expr, $error:expr) => {
        $crate::PipelineLog::ArtifactFailed {
            file_path: $path.to_string(),
            error: $error.to_string(),
        }
        .emit();
    };
}

// ============================================================================
// Console Logging Macros
// ============================================================================
// Colored, human-readable output on stdout, complementing the structured
// PipelineLog events above.

/// Logs the start of a crew task with a header and the agent running it.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_task_start_console;
/// log_task_start_console!(1, 3, "Python Code Parser");
/// ```
///
/// Outputs:
/// ```text
/// ═══ TASK 1/3: Python Code Parser ═══
/// ```
#[macro_export]
macro_rules! log_task_start_console {
    ($number:expr, $total:expr, $agent:expr) => {
        println!(
            "\x1b[1;36m═══ TASK {}/{}: {} ═══\x1b[0m",
            $number, $total, $agent
        );
    };
}

/// Logs the completion of a crew task.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_task_complete_console;
/// log_task_complete_console!(1);
/// ```
#[macro_export]
macro_rules! log_task_complete_console {
    ($number:expr) => {
        println!("\x1b[32m✓ Task {} complete\x1b[0m", $number);
    };
}

/// Logs a tool call made by an agent.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_tool_console;
/// log_tool_console!("📖 Reading: src/app.py");
/// ```
#[macro_export]
macro_rules! log_tool_console {
    ($detail:expr) => {
        println!("\x1b[2m  {}\x1b[0m", $detail);
    };
}

/// Logs token statistics.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_stats;
/// log_stats!(3, 1234, 567, 1801);
/// ```
///
/// Outputs:
/// ```text
/// Statistics: 3 requests (tokens: 1234 in / 567 out / 1801 total)
/// ```
#[macro_export]
macro_rules! log_stats {
    ($requests:expr, $prompt_tokens:expr, $completion_tokens:expr, $total_tokens:expr) => {
        println!(
            "\x1b[2mStatistics: {} requests (tokens: {} in / {} out / {} total)\x1b[0m",
            $requests, $prompt_tokens, $completion_tokens, $total_tokens
        );
    };
}

/// Logs the number of items found.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_found;
/// log_found!(14, "source files");
/// ```
#[macro_export]
macro_rules! log_found {
    ($count:expr, $item_type:expr) => {
        println!("\x1b[36mFound {} {}\x1b[0m", $count, $item_type);
    };
}

/// Logs an informational message.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_info;
/// log_info!("Using model {}", "openai/gpt-4o-mini");
/// ```
#[macro_export]
macro_rules! log_info {
    ($message:expr) => {
        println!("\x1b[36mℹ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[36mℹ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs a warning message.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_warning;
/// log_warning!("Structured output missing for task {}", "write_report");
/// ```
#[macro_export]
macro_rules! log_warning {
    ($message:expr) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        println!("\x1b[33m⚠ Warning: {}\x1b[0m", format!($fmt, $($arg)*));
    };
}

/// Logs that a file has been saved.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_file_saved;
/// log_file_saved!("./code_analysis_report.md");
/// ```
#[macro_export]
macro_rules! log_file_saved {
    ($path:expr) => {
        println!("\x1b[32m✓ Saved: {}\x1b[0m", $path);
    };
}

/// Logs a failure that does not stop the current operation.
///
/// # Example
/// ```
/// use crew_analyzer_sdk::log_error;
/// log_error!("Could not write {}", "report.json");
/// ```
#[macro_export]
macro_rules! log_error {
    ($message:expr) => {
        eprintln!("\x1b[31m✗ {}\x1b[0m", $message);
    };
    ($fmt:expr, $($arg:tt)*) => {
        eprintln!("\x1b[31m✗ {}\x1b[0m", format!($fmt, $($arg)*));
    };
}
