//! Runtime configuration for an analysis run

use std::path::PathBuf;

use crew_llm::ModelId;

use crate::analysis::CrewOptions;
use crate::crew::{RunSettings, DEFAULT_MAX_ITERATIONS};

pub const DEFAULT_MODEL: &str = "openai/gpt-4o-mini";
pub const DEFAULT_EXTENSION: &str = "py";

/// Resolved settings for one analysis run
#[derive(Debug, Clone)]
pub struct AnalyzerConfig {
    /// Directory to analyze
    pub root: PathBuf,
    /// Extension filter, without leading dots
    pub extensions: Vec<String>,
    pub model: ModelId,
    /// Overrides the provider's default base URL
    pub api_base: Option<String>,
    pub output_dir: PathBuf,
    /// YAML crew definition used instead of the built-in crew
    pub crew_file: Option<PathBuf>,
    pub with_dependencies: bool,
    pub max_iterations: usize,
    pub quiet: bool,
}

impl AnalyzerConfig {
    /// Defaults for everything except the root
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            extensions: vec![DEFAULT_EXTENSION.to_string()],
            model: ModelId::new(crew_llm::Provider::OpenAi, "gpt-4o-mini"),
            api_base: None,
            output_dir: PathBuf::from("."),
            crew_file: None,
            with_dependencies: false,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            quiet: false,
        }
    }

    pub fn crew_options(&self) -> CrewOptions {
        CrewOptions {
            settings: RunSettings {
                model: self.model.name().to_string(),
                max_iterations: self.max_iterations,
                temperature: None,
            },
            with_dependencies: self.with_dependencies,
            quiet: self.quiet,
        }
    }
}
