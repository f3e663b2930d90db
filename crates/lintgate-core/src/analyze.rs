//! Adapter for the static analyzer (`pylint --output-format=json` shape).

use std::path::Path;
use std::time::Duration;

use serde::Deserialize;

use lintgate_domain::FileTask;
use lintgate_types::{Diagnostic, LinterKind, Severity};

use crate::adapter::LinterAdapter;
use crate::exec::{run_tool, ToolError};

/// One entry of the analyzer's JSON finding array. Unknown fields (module,
/// obj, path, ...) are ignored.
#[derive(Debug, Deserialize)]
struct AnalyzerNote {
    #[serde(rename = "type")]
    kind: String,
    line: u32,
    #[serde(default)]
    column: Option<u32>,
    #[serde(default)]
    symbol: String,
    message: String,
    #[serde(rename = "message-id", default)]
    message_id: String,
}

pub struct StaticAnalyzer {
    program: String,
    timeout: Duration,
}

impl StaticAnalyzer {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl LinterAdapter for StaticAnalyzer {
    fn kind(&self) -> LinterKind {
        LinterKind::Analyzer
    }

    fn run(&self, repo_root: &Path, task: &FileTask) -> Result<Vec<Diagnostic>, ToolError> {
        let args = vec![
            "--output-format=json".to_string(),
            "--exit-zero".to_string(),
            task.path.clone(),
        ];
        let out = run_tool(&self.program, &args, repo_root, self.timeout)?;

        // --exit-zero folds "findings present" into a clean exit; anything
        // else is the tool itself failing.
        if out.code != 0 {
            return Err(ToolError::Failed {
                program: self.program.clone(),
                detail: format!("unexpected exit code {}: {}", out.code, out.stderr.trim()),
            });
        }

        let body = out.stdout.trim();
        if body.is_empty() {
            return Ok(Vec::new());
        }

        let notes: Vec<AnalyzerNote> =
            serde_json::from_str(body).map_err(|e| ToolError::Unparseable {
                program: self.program.clone(),
                detail: e.to_string(),
            })?;

        Ok(notes
            .into_iter()
            .map(|n| {
                let severity = match n.kind.as_str() {
                    "error" | "fatal" => Severity::Blocking,
                    // convention, refactor, warning
                    _ => Severity::Advisory,
                };
                let code = if n.symbol.is_empty() {
                    None
                } else {
                    Some(format!("{} [{}]", n.symbol, n.message_id))
                };
                Diagnostic {
                    // Always the task's repo-relative path; the tool may
                    // report something resolved differently.
                    path: task.path.clone(),
                    line: n.line,
                    column: n.column,
                    severity,
                    message: n.message,
                    code,
                    linter: LinterKind::Analyzer,
                    in_scope: task.scope.contains(n.line),
                }
            })
            .collect())
    }
}
