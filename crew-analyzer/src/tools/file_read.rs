//! File-read capability confined to the analysis root

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::fs;

use super::{Tool, ToolError};

pub const TOOL_NAME: &str = "read_file";

#[derive(Debug, Deserialize)]
struct ReadArgs {
    file_path: String,
    #[serde(default)]
    start_line: Option<usize>,
    #[serde(default)]
    line_count: Option<usize>,
}

/// Reads text files under a root directory
///
/// Relative paths resolve against the root. Anything that canonicalizes to a
/// location outside the root is refused.
#[derive(Debug, Clone)]
pub struct FileReadTool {
    root: PathBuf,
}

impl FileReadTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    async fn resolve(&self, requested: &str) -> Result<PathBuf, ToolError> {
        let io_err = |source| ToolError::Io {
            path: requested.to_string(),
            source,
        };

        let root = fs::canonicalize(&self.root).await.map_err(io_err)?;
        let candidate = Path::new(requested);
        let joined = if candidate.is_absolute() {
            candidate.to_path_buf()
        } else {
            root.join(candidate)
        };

        let resolved = fs::canonicalize(&joined).await.map_err(io_err)?;
        if !resolved.starts_with(&root) {
            return Err(ToolError::OutsideRoot(requested.to_string()));
        }
        Ok(resolved)
    }
}

/// Keep `line_count` lines starting at 1-based `start_line`
fn slice_lines(content: &str, start_line: Option<usize>, line_count: Option<usize>) -> String {
    if start_line.is_none() && line_count.is_none() {
        return content.to_string();
    }

    let skip = start_line.unwrap_or(1).saturating_sub(1);
    let lines = content.lines().skip(skip);
    match line_count {
        Some(count) => lines.take(count).collect::<Vec<_>>().join("\n"),
        None => lines.collect::<Vec<_>>().join("\n"),
    }
}

#[async_trait]
impl Tool for FileReadTool {
    fn name(&self) -> &str {
        TOOL_NAME
    }

    fn description(&self) -> &str {
        "Read the content of a source file. Provide `file_path`; optionally \
         `start_line` (1-based) and `line_count` to read a portion."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "file_path": {
                    "type": "string",
                    "description": "Absolute path, or path relative to the analysis root"
                },
                "start_line": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "First line to read (1-based)"
                },
                "line_count": {
                    "type": "integer",
                    "minimum": 1,
                    "description": "Number of lines to read"
                }
            },
            "required": ["file_path"]
        })
    }

    async fn call(&self, args: Value) -> Result<String, ToolError> {
        let args: ReadArgs =
            serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments {
                tool: TOOL_NAME.to_string(),
                message: e.to_string(),
            })?;

        let path = self.resolve(&args.file_path).await?;
        let content = fs::read_to_string(&path)
            .await
            .map_err(|source| ToolError::Io {
                path: args.file_path.clone(),
                source,
            })?;

        Ok(slice_lines(&content, args.start_line, args.line_count))
    }
}
