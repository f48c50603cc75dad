//! The code analysis workflow
//!
//! Crew construction (built-in or from a YAML file) and the end-to-end run:
//! discover → build crew → kickoff → write artifacts.

pub mod builtin;
pub mod definition;
pub mod prompts;
pub mod workflow;

use crate::crew::RunSettings;
use crate::discovery::FileSet;

pub use builtin::code_analysis_crew;
pub use definition::{AgentDefinition, CrewDefinition, TaskDefinition};
pub use workflow::{run_code_analysis, run_with_provider, AnalysisOutcome};

/// Knobs shared by the built-in and file-defined crews
#[derive(Debug, Clone, Default)]
pub struct CrewOptions {
    pub settings: RunSettings,
    /// Insert the dependency-analysis stage before report writing
    pub with_dependencies: bool,
    /// Force every agent's verbose flag off
    pub quiet: bool,
}

/// Fill `{files}` and `{root}`; any other braces are left as written
///
/// Substitution is a single pass, so placeholder text inside a substituted
/// value is kept verbatim.
pub fn interpolate(text: &str, files: &FileSet) -> String {
    let listing = files.to_string();
    let root = files.root().display().to_string();

    let mut out = String::with_capacity(text.len() + listing.len());
    let mut rest = text;
    while let Some(start) = rest.find('{') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        if let Some(after) = tail.strip_prefix("{files}") {
            out.push_str(&listing);
            rest = after;
        } else if let Some(after) = tail.strip_prefix("{root}") {
            out.push_str(&root);
            rest = after;
        } else {
            out.push('{');
            rest = &tail[1..];
        }
    }
    out.push_str(rest);
    out
}
