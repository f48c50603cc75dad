//! External capabilities an agent may be bound to
//!
//! A tool is described to the model as a function ([`crew_llm::ToolSpec`]) and
//! executed locally when the model calls it.

pub mod file_read;

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

pub use file_read::FileReadTool;

/// Failure of a tool invocation
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("could not read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid arguments for `{tool}`: {message}")]
    InvalidArguments { tool: String, message: String },

    #[error("path {0} is outside the analysis root")]
    OutsideRoot(String),

    #[error("model requested unknown tool `{0}`")]
    UnknownTool(String),
}

#[async_trait]
pub trait Tool: Send + Sync {
    /// Function name exposed to the model
    fn name(&self) -> &str;

    fn description(&self) -> &str;

    /// JSON Schema of the arguments object
    fn parameters(&self) -> Value;

    async fn call(&self, args: Value) -> Result<String, ToolError>;

    fn spec(&self) -> crew_llm::ToolSpec {
        crew_llm::ToolSpec {
            name: self.name().to_string(),
            description: self.description().to_string(),
            parameters: self.parameters(),
        }
    }
}

/// Find a bound tool by the name the model used
pub fn find_tool<'a>(tools: &'a [Arc<dyn Tool>], name: &str) -> Option<&'a Arc<dyn Tool>> {
    tools.iter().find(|t| t.name() == name)
}

/// One-line, human-readable description of a tool call for logs
pub fn describe_tool_call(tool_name: &str, input: &Value) -> String {
    match tool_name {
        file_read::TOOL_NAME => {
            if let Some(file_path) = input.get("file_path").and_then(|v| v.as_str()) {
                format!("📖 Reading: {}", file_path)
            } else {
                "📖 Reading file".to_string()
            }
        }
        _ => format!("🔧 Using tool: {}", tool_name),
    }
}
