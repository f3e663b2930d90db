//! The capability seam between the pipeline and external tools.

use std::path::Path;

use lintgate_domain::FileTask;
use lintgate_types::{Diagnostic, LinterKind};

use crate::exec::ToolError;

/// One external linter. Adapters own subprocess invocation and output
/// parsing for their tool; everything upstream sees only [`Diagnostic`]s.
///
/// `Send + Sync` because independent file tasks run on a worker pool.
pub trait LinterAdapter: Send + Sync {
    fn kind(&self) -> LinterKind;

    /// Analyze one file. A tool that reports findings via its normal failure
    /// exit code returns `Ok` with those findings; `Err` is reserved for
    /// invocation problems (missing binary, abnormal exit, timeout).
    fn run(&self, repo_root: &Path, task: &FileTask) -> Result<Vec<Diagnostic>, ToolError>;
}
