//! Bounded parallel execution of linters over independent file tasks.

use std::path::Path;

use rayon::prelude::*;
use tracing::warn;

use lintgate_domain::FileTask;
use lintgate_types::{Diagnostic, LinterKind, Severity};

use crate::adapter::LinterAdapter;
use crate::exec::ToolError;

/// Cap on the worker pool so a large runner does not stampede the
/// subprocess spawner.
pub const MAX_WORKERS: usize = 8;

/// Pool size for `jobs = auto`.
pub fn default_jobs() -> usize {
    num_cpus::get().clamp(1, MAX_WORKERS)
}

#[derive(Debug, thiserror::Error)]
pub enum RunnerError {
    #[error("failed to build worker pool: {0}")]
    Pool(#[from] rayon::ThreadPoolBuildError),
}

/// Run every adapter against every task on a bounded worker pool.
///
/// Tool invocation failures are terminal for that file/linter pair and
/// surface as blocking diagnostics; they never abort the run and are never
/// silently skipped. Result order follows task order (the aggregator
/// re-sorts anyway).
pub fn run_linters(
    repo_root: &Path,
    tasks: &[FileTask],
    adapters: &[&dyn LinterAdapter],
    jobs: usize,
) -> Result<Vec<Diagnostic>, RunnerError> {
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(jobs.max(1))
        .build()?;

    let nested: Vec<Vec<Diagnostic>> = pool.install(|| {
        tasks
            .par_iter()
            .map(|task| {
                adapters
                    .iter()
                    .flat_map(|adapter| run_one(repo_root, task, *adapter))
                    .collect()
            })
            .collect()
    });

    Ok(nested.into_iter().flatten().collect())
}

fn run_one(repo_root: &Path, task: &FileTask, adapter: &dyn LinterAdapter) -> Vec<Diagnostic> {
    match adapter.run(repo_root, task) {
        Ok(diags) => diags,
        Err(err) => {
            warn!(
                path = %task.path,
                linter = adapter.kind().as_str(),
                "linter invocation failed: {err}"
            );
            vec![failure_diagnostic(task, adapter.kind(), &err)]
        }
    }
}

/// Convert an invocation failure into the blocking diagnostic that keeps
/// the run alive. Line 0 marks a whole-file condition.
fn failure_diagnostic(task: &FileTask, kind: LinterKind, err: &ToolError) -> Diagnostic {
    let message = match err {
        ToolError::Timeout { .. } => "analysis timed out".to_string(),
        _ => err.to_string(),
    };
    Diagnostic {
        path: task.path.clone(),
        line: 0,
        column: None,
        severity: Severity::Blocking,
        message,
        code: None,
        linter: kind,
        in_scope: true,
    }
}
