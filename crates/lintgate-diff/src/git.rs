use std::path::Path;
use std::process::Command;

use crate::unified::{parse_unified_diff, ChangeSet};
use crate::DiffError;

/// Resolve the change set between the worktree and `base`.
///
/// Runs `git diff --unified=0` inside `repo_root`. Zero context lines keep the
/// hunks minimal; every line in the output is then an actual change.
pub fn resolve_changes(repo_root: &Path, base: &str) -> Result<ChangeSet, DiffError> {
    let output = Command::new("git")
        .current_dir(repo_root)
        .args(["diff", "--unified=0", "--no-color", base, "--"])
        .output()
        .map_err(|e| DiffError::GitUnavailable(format!("failed to run git: {e}")))?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(DiffError::GitUnavailable(stderr.trim().to_string()));
    }

    parse_unified_diff(&String::from_utf8_lossy(&output.stdout))
}
