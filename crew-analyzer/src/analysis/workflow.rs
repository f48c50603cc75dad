//! Workflow orchestration for a code analysis run
//!
//! [`run_code_analysis`] resolves the model provider, then hands off to
//! [`run_with_provider`], which runs the four stages in order:
//! discovery, crew construction, kickoff and artifact writing.

use anyhow::{Context, Result};
use crew_analyzer_sdk::{log_found, log_info};
use crew_llm::{LlmProvider, OpenAiClient};

use super::{code_analysis_crew, CrewDefinition};
use crate::config::AnalyzerConfig;
use crate::crew::{Crew, CrewOutput};
use crate::discovery::FileSet;
use crate::error::PipelineError;
use crate::report::{MaterializeReport, ReportWriter};

/// Result of a completed run
#[derive(Debug)]
pub struct AnalysisOutcome {
    pub output: CrewOutput,
    pub artifacts: MaterializeReport,
}

/// Run the analysis against the provider named by `config.model`
///
/// Provider problems (unknown provider, missing API key) are configuration
/// errors and surface before discovery starts.
pub async fn run_code_analysis(config: &AnalyzerConfig) -> Result<AnalysisOutcome> {
    let client = OpenAiClient::from_env(&config.model, config.api_base.as_deref())
        .map_err(|e| PipelineError::config(format!("model `{}`: {}", config.model, e)))?;

    if !config.quiet {
        log_info!("Using model {} at {}", config.model, client.config().base_url);
    }

    run_with_provider(config, &client).await
}

/// Run the analysis with an explicit provider
pub async fn run_with_provider(
    config: &AnalyzerConfig,
    provider: &dyn LlmProvider,
) -> Result<AnalysisOutcome> {
    let files = FileSet::discover(&config.root, &config.extensions)
        .await?
        .require_non_empty(&config.extensions)?;
    if !config.quiet {
        log_found!(files.len(), "source files");
    }
    tracing::debug!(root = %files.root().display(), count = files.len(), "Discovery finished");

    let crew = build_crew(config, &files).await?;

    let output = crew
        .kickoff(provider)
        .await
        .context("Crew run failed")?;

    let artifacts = ReportWriter::new(&config.output_dir)
        .quiet(config.quiet)
        .write(&output)
        .await;

    Ok(AnalysisOutcome { output, artifacts })
}

async fn build_crew(config: &AnalyzerConfig, files: &FileSet) -> Result<Crew> {
    let options = config.crew_options();
    let crew = match &config.crew_file {
        Some(path) => CrewDefinition::load(path)
            .await?
            .into_crew(files, &options)
            .with_context(|| format!("Invalid crew file: {}", path.display()))?,
        None => code_analysis_crew(files, &options)?,
    };
    Ok(crew)
}
