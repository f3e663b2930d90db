//! Deterministic tree walk producing the list of files to analyze.

use std::collections::BTreeSet;
use std::path::Path;

use walkdir::{DirEntry, WalkDir};

use lintgate_diff::ChangeSet;

use crate::ignore::{is_ignored, IgnoreRule};
use crate::ConfigError;

/// Which lines of a selected file count toward the verdict.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineScope {
    /// Full-tree run: every line is in scope.
    All,
    /// Change-scoped run: only these 1-based lines are in scope.
    Lines(BTreeSet<u32>),
}

impl LineScope {
    pub fn contains(&self, line: u32) -> bool {
        match self {
            LineScope::All => true,
            LineScope::Lines(lines) => lines.contains(&line),
        }
    }
}

/// A selected file, ready to be handed to the linters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileTask {
    /// Repo-relative path with forward slashes.
    pub path: String,
    pub scope: LineScope,
}

#[derive(Debug, thiserror::Error)]
pub enum DiscoverError {
    #[error("failed to walk repository tree: {source}")]
    Walk {
        #[from]
        source: walkdir::Error,
    },
}

/// Parse a comma-separated extension list into a lowercase set.
///
/// Leading dots are tolerated (`.py` and `py` are the same entry); empty
/// entries are skipped. An entry with anything other than ASCII
/// alphanumerics is malformed.
pub fn parse_extensions(raw: &str) -> Result<BTreeSet<String>, ConfigError> {
    let mut out = BTreeSet::new();
    for entry in raw.split(',') {
        let ext = entry.trim().trim_start_matches('.').to_ascii_lowercase();
        if ext.is_empty() {
            continue;
        }
        if !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(ConfigError::InvalidExtension(entry.trim().to_string()));
        }
        out.insert(ext);
    }
    if out.is_empty() {
        return Err(ConfigError::EmptyExtensions);
    }
    Ok(out)
}

/// Walk `root` and produce the ordered list of files to analyze.
///
/// The walk is depth-first with lexicographic ordering inside each directory,
/// so two walks over an unchanged tree yield identical task lists. Skipped
/// subtrees: hidden directories, `__pycache__`, and nested repositories
/// (any directory below the root carrying a `.git` marker) regardless of the
/// ignore rules. With a change set, files absent from it are dropped and the
/// survivors carry their changed-line scope.
pub fn discover(
    root: &Path,
    extensions: &BTreeSet<String>,
    rules: &[IgnoreRule],
    changes: Option<&ChangeSet>,
) -> Result<Vec<FileTask>, DiscoverError> {
    let mut tasks = Vec::new();

    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|e| !is_excluded_dir(root, e));

    for entry in walker {
        let entry = entry?;
        if !entry.file_type().is_file() {
            continue;
        }

        let Some(rel) = relative_path(root, entry.path()) else {
            continue;
        };

        if !extension_matches(&rel, extensions) {
            continue;
        }
        if is_ignored(&rel, rules) {
            continue;
        }

        let scope = match changes {
            None => LineScope::All,
            Some(map) => match map.get(&rel) {
                Some(lines) => LineScope::Lines(lines.clone()),
                None => continue,
            },
        };

        tasks.push(FileTask { path: rel, scope });
    }

    Ok(tasks)
}

fn is_excluded_dir(root: &Path, entry: &DirEntry) -> bool {
    if !entry.file_type().is_dir() || entry.path() == root {
        return false;
    }

    let name = entry.file_name().to_string_lossy();
    if name.starts_with('.') || name == "__pycache__" {
        return true;
    }

    // Nested repository (submodule checkouts have a `.git` file, plain
    // clones a `.git` directory).
    entry.path().join(".git").exists()
}

fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let rel = path.strip_prefix(root).ok()?;
    let joined = rel
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");
    if joined.is_empty() {
        None
    } else {
        Some(joined)
    }
}

fn extension_matches(rel: &str, extensions: &BTreeSet<String>) -> bool {
    Path::new(rel)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| extensions.contains(&e.to_ascii_lowercase()))
        .unwrap_or(false)
}
