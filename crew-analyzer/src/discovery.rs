//! Source file discovery
//!
//! Walks a root directory recursively and collects files whose extension is
//! in the filter. Hidden entries below the root (`.venv`, `.git`, dotfiles)
//! are skipped. Symlinks are followed; two paths reaching the same file are
//! reported once, under the smaller path.

use std::collections::{BTreeSet, HashSet};
use std::fmt;
use std::path::{Path, PathBuf};

use tokio::fs;
use walkdir::{DirEntry, WalkDir};

use crate::error::{PipelineError, Result};

/// The set of files handed to the extraction task
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileSet {
    root: PathBuf,
    files: Vec<PathBuf>,
}

impl FileSet {
    /// Discover files under `root` matching any of `extensions`
    ///
    /// Extensions are compared without a leading dot and case-sensitively
    /// (`"py"` and `".py"` are equivalent). Returned paths are absolute and
    /// sorted.
    ///
    /// # Errors
    ///
    /// A missing root, or a root that is not a directory, is a configuration
    /// error. An empty result is not; see [`FileSet::require_non_empty`].
    pub async fn discover(root: impl AsRef<Path>, extensions: &[String]) -> Result<Self> {
        let root = root.as_ref();
        let root = fs::canonicalize(root).await.map_err(|e| {
            PipelineError::config(format!("invalid root directory '{}': {}", root.display(), e))
        })?;

        let metadata = fs::metadata(&root).await.map_err(|e| {
            PipelineError::config(format!("cannot inspect '{}': {}", root.display(), e))
        })?;
        if !metadata.is_dir() {
            return Err(PipelineError::config(format!(
                "root '{}' is not a directory",
                root.display()
            )));
        }

        let wanted: BTreeSet<&str> = extensions
            .iter()
            .map(|e| e.trim().trim_start_matches('.'))
            .filter(|e| !e.is_empty())
            .collect();
        if wanted.is_empty() {
            return Err(PipelineError::config("no file extensions given"));
        }

        let files = walk(&root, &wanted)?;
        Ok(Self { root, files })
    }

    /// Refuse to analyze an empty tree
    pub fn require_non_empty(self, extensions: &[String]) -> Result<Self> {
        if self.files.is_empty() {
            return Err(PipelineError::config(format!(
                "no files with extension(s) [{}] found under '{}'",
                extensions.join(", "),
                self.root.display()
            )));
        }
        Ok(self)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

fn walk(root: &Path, wanted: &BTreeSet<&str>) -> Result<Vec<PathBuf>> {
    let walker = WalkDir::new(root)
        .follow_links(true)
        .into_iter()
        .filter_entry(|e| e.depth() == 0 || !is_hidden(e));

    let mut found = Vec::new();
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) if e.depth() == 0 => {
                return Err(PipelineError::config(format!(
                    "cannot read directory '{}': {}",
                    root.display(),
                    e
                )));
            }
            Err(e) => {
                tracing::warn!(error = %e, "Skipping unreadable entry");
                continue;
            }
        };

        if entry.file_type().is_file() && has_extension(entry.path(), wanted) {
            found.push(entry.into_path());
        }
    }

    found.sort();
    let mut seen = HashSet::new();
    found.retain(|path| {
        let target = std::fs::canonicalize(path).unwrap_or_else(|_| path.clone());
        seen.insert(target)
    });
    Ok(found)
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry
        .file_name()
        .to_str()
        .map(|name| name.starts_with('.'))
        .unwrap_or(false)
}

fn has_extension(path: &Path, wanted: &BTreeSet<&str>) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| wanted.contains(e))
        .unwrap_or(false)
}

/// Renders as a bracketed list of quoted paths, the form embedded in prompts
impl fmt::Display for FileSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[")?;
        for (i, file) in self.files.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", file.display())?;
        }
        write!(f, "]")
    }
}
