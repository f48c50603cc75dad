//! Common test utilities for pipeline tests

#![allow(dead_code)]

use std::path::{Path, PathBuf};

use crew_analyzer::crew::{Agent, Crew, RunSettings, Task, TaskId};
use tempfile::TempDir;

/// Write `files` (relative path, content) under a fresh temp directory
pub fn fixture_tree(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (relative, content) in files {
        let path = dir.path().join(relative);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).unwrap();
        }
        std::fs::write(path, content).unwrap();
    }
    dir
}

/// Canonical absolute path of `relative` under `root`
pub fn canonical(root: &Path, relative: &str) -> PathBuf {
    std::fs::canonicalize(root.join(relative)).unwrap()
}

/// A linear crew of `names.len()` tasks, each run by its own agent
pub fn linear_crew(names: &[&str]) -> Crew {
    let mut builder = Crew::builder(RunSettings::default());
    let mut previous: Option<TaskId> = None;

    for name in names {
        let agent = builder
            .agent(Agent::new(
                format!("{} agent", name),
                format!("goal of {}", name),
                format!("backstory of {}", name),
            ))
            .unwrap();
        let task = Task::new(*name, format!("do {}", name), format!("{} result", name), agent)
            .with_context(previous);
        previous = Some(builder.task(task).unwrap());
    }

    builder.build().unwrap()
}

/// Name of the one `task_output_*.txt` file in `dir`
pub fn audit_file(dir: &Path) -> PathBuf {
    let mut matches: Vec<PathBuf> = std::fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().path())
        .filter(|path| {
            path.file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("task_output_") && n.ends_with(".txt"))
                .unwrap_or(false)
        })
        .collect();
    assert_eq!(matches.len(), 1, "expected exactly one audit file");
    matches.remove(0)
}
