//! Writes a finished crew run to disk
//!
//! Each artifact is written independently. A failed write is recorded and the
//! remaining artifacts are still attempted; nothing already written is rolled
//! back.

use std::fmt;
use std::path::{Path, PathBuf};

use chrono::Local;
use crew_analyzer_sdk::{log_artifact, log_artifact_failed, log_file_saved};
use tokio::fs;

use crate::crew::CrewOutput;
use crate::error::{PersistError, PipelineError};

pub const REPORT_FILE: &str = "code_analysis_report.md";
pub const JSON_FILE: &str = "code_analysis_report.json";
pub const TYPED_FILE: &str = "code_analysis_report_pydantic.txt";
pub const AUDIT_PREFIX: &str = "task_output_";
pub const REPORT_HEADER: &str = "# Code Analysis Report";

/// What a [`ReportWriter`] managed to persist
#[derive(Debug, Default)]
pub struct MaterializeReport {
    pub written: Vec<PathBuf>,
    pub failures: Vec<PipelineError>,
}

impl MaterializeReport {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct ReportWriter {
    output_dir: PathBuf,
    quiet: bool,
}

impl ReportWriter {
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
            quiet: false,
        }
    }

    pub fn quiet(mut self, quiet: bool) -> Self {
        self.quiet = quiet;
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Persist every artifact `output` calls for
    pub async fn write(&self, output: &CrewOutput) -> MaterializeReport {
        let timestamp = Local::now().format("%Y%m%d_%H%M%S").to_string();
        self.write_with_timestamp(output, &timestamp).await
    }

    pub async fn write_with_timestamp(
        &self,
        output: &CrewOutput,
        timestamp: &str,
    ) -> MaterializeReport {
        let mut report = MaterializeReport::default();

        if let Err(source) = fs::create_dir_all(&self.output_dir).await {
            self.record(
                &mut report,
                self.output_dir.clone(),
                "output directory",
                Err(source.into()),
            );
            return report;
        }

        let markdown = format!("{}\n\n{}", REPORT_HEADER, output.raw);
        let path = self.output_dir.join(REPORT_FILE);
        let result = write_text(&path, &markdown).await;
        self.record(&mut report, path, "Markdown report", result);

        if let Some(map) = output.json_dict() {
            let path = self.output_dir.join(JSON_FILE);
            let result = match serde_json::to_string_pretty(map) {
                Ok(json) => write_text(&path, &json).await,
                Err(e) => Err(e.into()),
            };
            self.record(&mut report, path, "JSON output", result);
        }

        if let Some(typed) = output.typed() {
            let path = self.output_dir.join(TYPED_FILE);
            let result = write_text(&path, &typed.to_string()).await;
            self.record(&mut report, path, "Typed output", result);
        }

        let path = self
            .output_dir
            .join(format!("{}{}.txt", AUDIT_PREFIX, timestamp));
        let result = write_text(&path, &audit_text(output)).await;
        self.record(&mut report, path, "Task outputs and token usage", result);

        report
    }

    fn record(
        &self,
        report: &mut MaterializeReport,
        path: PathBuf,
        description: &str,
        result: Result<(), PersistError>,
    ) {
        match result {
            Ok(()) => {
                log_artifact!(path.display(), description);
                if !self.quiet {
                    log_file_saved!(path.display());
                }
                report.written.push(path);
            }
            Err(source) => {
                log_artifact_failed!(path.display(), &source);
                tracing::warn!(path = %path.display(), error = %source, "Artifact write failed");
                report
                    .failures
                    .push(PipelineError::Persistence { path, source });
            }
        }
    }
}

async fn write_text(path: &Path, content: &str) -> Result<(), PersistError> {
    fs::write(path, content).await?;
    Ok(())
}

/// Run id, every task's output in order, then token usage
pub fn audit_text(output: &CrewOutput) -> String {
    AuditLog(output).to_string()
}

struct AuditLog<'a>(&'a CrewOutput);

impl fmt::Display for AuditLog<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Run: {}", self.0.run_id)?;
        writeln!(f)?;
        writeln!(f, "Tasks Output:")?;
        for (i, task) in self.0.tasks_output.iter().enumerate() {
            writeln!(f, "[{}] {}", i + 1, task)?;
            writeln!(f)?;
        }
        writeln!(f, "Token Usage:")?;
        write!(f, "{}", self.0.token_usage)
    }
}
