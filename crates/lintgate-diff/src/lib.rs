//! Changed-file and changed-line resolution.
//!
//! Wraps `git diff` and turns its unified-diff output into a per-file map of
//! changed line numbers, which FileDiscovery intersects with the walked tree
//! for change-scoped runs.

mod git;
mod unified;

pub use git::resolve_changes;
pub use unified::{parse_unified_diff, ChangeSet};

/// Errors from the diff provider.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    #[error("malformed hunk header: {0}")]
    MalformedHunkHeader(String),

    /// Git is missing, the directory is not a repository, or the base ref
    /// cannot be resolved. Fatal only when a change-scoped run was requested.
    #[error("git diff unavailable: {0}")]
    GitUnavailable(String),
}
