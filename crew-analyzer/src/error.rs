//! Error taxonomy for crew runs
//!
//! Three families, matching where a run can break:
//! - [`PipelineError::Config`]: bad inputs detected before any agent runs
//! - [`PipelineError::Capability`]: a model or tool call failed mid-run (fatal)
//! - [`PipelineError::Persistence`]: an output artifact could not be written

use std::path::PathBuf;

use thiserror::Error;

use crate::tools::ToolError;

pub type Result<T> = std::result::Result<T, PipelineError>;

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("agent `{role}` failed on task `{task}`: {source}")]
    Capability {
        task: String,
        role: String,
        #[source]
        source: CapabilityError,
    },

    #[error("failed to write {}: {source}", path.display())]
    Persistence {
        path: PathBuf,
        #[source]
        source: PersistError,
    },
}

impl PipelineError {
    pub fn config(message: impl Into<String>) -> Self {
        PipelineError::Config(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, PipelineError::Config(_))
    }
}

/// Failure of an agent invocation
#[derive(Debug, Error)]
pub enum CapabilityError {
    #[error(transparent)]
    Llm(#[from] crew_llm::LlmError),

    #[error(transparent)]
    Tool(#[from] ToolError),

    #[error("malformed model response: {0}")]
    MalformedResponse(String),

    #[error("no final answer after {0} iterations")]
    IterationLimit(usize),
}

/// Failure while persisting one artifact
#[derive(Debug, Error)]
pub enum PersistError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
