//! CLI argument parsing for the analyzer

use std::path::PathBuf;

use clap::Parser;
use crew_llm::ModelId;

use crate::config::{AnalyzerConfig, DEFAULT_EXTENSION, DEFAULT_MODEL};
use crate::crew::DEFAULT_MAX_ITERATIONS;
use crate::error::PipelineError;

/// Analyze a source tree with a sequential crew of LLM agents
#[derive(Parser, Debug, Clone)]
#[command(name = "crew-analyzer", version, about)]
pub struct Args {
    /// Root directory to analyze
    #[arg(long)]
    pub dir: PathBuf,

    /// File extensions to include (repeatable or comma separated)
    #[arg(long = "ext", value_delimiter = ',', default_value = DEFAULT_EXTENSION)]
    pub extensions: Vec<String>,

    /// Model identifier, `provider/model`
    #[arg(long, env = "CREW_MODEL", default_value = DEFAULT_MODEL)]
    pub model: String,

    /// Base URL of the OpenAI-compatible endpoint
    #[arg(long, env = "CREW_API_BASE")]
    pub api_base: Option<String>,

    /// Directory the report files are written to
    #[arg(long, default_value = ".")]
    pub output_dir: PathBuf,

    /// YAML crew definition replacing the built-in crew
    #[arg(long)]
    pub crew_file: Option<PathBuf>,

    /// Add a dependency analysis stage before the report
    #[arg(long)]
    pub with_dependencies: bool,

    /// Tool-loop limit per task
    #[arg(long, default_value_t = DEFAULT_MAX_ITERATIONS)]
    pub max_iterations: usize,

    /// Emit structured __CREW_EVENT__ lines on stderr
    #[arg(long)]
    pub events: bool,

    /// Silence agent console output
    #[arg(long, short)]
    pub quiet: bool,
}

impl TryFrom<Args> for AnalyzerConfig {
    type Error = PipelineError;

    fn try_from(args: Args) -> Result<Self, Self::Error> {
        let model = args
            .model
            .parse::<ModelId>()
            .map_err(|e| PipelineError::config(format!("invalid model `{}`: {}", args.model, e)))?;
        if args.max_iterations == 0 {
            return Err(PipelineError::config("--max-iterations must be at least 1"));
        }

        Ok(AnalyzerConfig {
            root: args.dir,
            extensions: args.extensions,
            model,
            api_base: args.api_base.filter(|url| !url.trim().is_empty()),
            output_dir: args.output_dir,
            crew_file: args.crew_file,
            with_dependencies: args.with_dependencies,
            max_iterations: args.max_iterations,
            quiet: args.quiet,
        })
    }
}
