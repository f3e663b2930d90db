//! File selection and result aggregation.
//!
//! The selection half decides which files reach the linters: extension
//! matching, ordered ignore rules with negation overrides, and the
//! change-scope intersection. The aggregation half folds per-file verdicts
//! into a single pass/fail outcome with deterministic ordering.

use std::path::{Path, PathBuf};

pub mod aggregate;
pub mod discover;
pub mod ignore;

pub use aggregate::{aggregate, AggregateResult, AggregationError};
pub use discover::{discover, parse_extensions, DiscoverError, FileTask, LineScope};
pub use ignore::{is_ignored, parse_ignore_rules, IgnoreRule};

/// Startup validation failures. All of these are fatal before any analysis.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("repo root '{0}' does not exist")]
    RepoRootMissing(PathBuf),

    #[error("repo root '{0}' is not a directory")]
    RepoRootNotDirectory(PathBuf),

    #[error("extensions list is empty")]
    EmptyExtensions,

    #[error("invalid extension '{0}': extensions are bare names like 'py'")]
    InvalidExtension(String),

    #[error("ignore entry '!' has no path to un-ignore")]
    EmptyNegation,
}

/// Validate the repo root early so every later path is anchored to a real
/// directory.
pub fn validate_repo_root(root: &Path) -> Result<PathBuf, ConfigError> {
    if !root.exists() {
        return Err(ConfigError::RepoRootMissing(root.to_path_buf()));
    }
    if !root.is_dir() {
        return Err(ConfigError::RepoRootNotDirectory(root.to_path_buf()));
    }
    Ok(root.to_path_buf())
}
