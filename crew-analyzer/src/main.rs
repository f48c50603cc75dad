/*
  CODE ANALYSIS CREW

  Discover ──> read_code ──> analyze_structure ──> [analyze_dependencies] ──> write_report ──> artifacts
              (file_read)                           (--with-dependencies)

  Artifacts (in --output-dir):
    code_analysis_report.md            always
    code_analysis_report.json          when the final task produced a JSON object
    code_analysis_report_pydantic.txt  when the final task produced a typed object
    task_output_<YYYYMMDD_HHMMSS>.txt  always

EXAMPLE COMMANDS:

  # Analyze a Python project with the default model
  cargo run -- --dir ../my_project

  # Rust and Go sources, report into ./reports, with the dependency stage
  cargo run -- --dir ../service --ext rs,go --output-dir reports --with-dependencies

  # Local model through Ollama, structured events on stderr
  cargo run -- --dir . --model ollama/llama3 --events

  # Custom crew
  cargo run -- --dir . --crew-file crews/review.yaml
*/

use anyhow::bail;
use clap::Parser;
use crew_analyzer::analysis::run_code_analysis;
use crew_analyzer::cli::Args;
use crew_analyzer::config::AnalyzerConfig;
use crew_analyzer_sdk::{log_error, log_info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    crew_analyzer_sdk::set_events_enabled(args.events);

    let config = AnalyzerConfig::try_from(args)?;
    let outcome = run_code_analysis(&config).await?;

    if !config.quiet {
        log_info!("Run {} finished", outcome.output.run_id);
    }

    if !outcome.artifacts.is_complete() {
        for failure in &outcome.artifacts.failures {
            log_error!(failure);
        }
        bail!(
            "{} of the report artifacts could not be written",
            outcome.artifacts.failures.len()
        );
    }

    Ok(())
}
