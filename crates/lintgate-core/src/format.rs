//! Adapter for the format checker (`black --check --diff` shape).

use std::path::Path;
use std::time::Duration;

use lintgate_domain::FileTask;
use lintgate_types::{Diagnostic, LinterKind, Severity};

use crate::adapter::LinterAdapter;
use crate::exec::{run_tool, ToolError};

pub struct FormatChecker {
    program: String,
    timeout: Duration,
}

impl FormatChecker {
    pub fn new(program: impl Into<String>, timeout: Duration) -> Self {
        Self {
            program: program.into(),
            timeout,
        }
    }
}

impl LinterAdapter for FormatChecker {
    fn kind(&self) -> LinterKind {
        LinterKind::Format
    }

    fn run(&self, repo_root: &Path, task: &FileTask) -> Result<Vec<Diagnostic>, ToolError> {
        let args = vec![
            "--check".to_string(),
            "--diff".to_string(),
            task.path.clone(),
        ];
        let out = run_tool(&self.program, &args, repo_root, self.timeout)?;

        match out.code {
            0 => Ok(Vec::new()),
            1 => {
                let mut message = String::from("file needs reformatting");
                let diff = out.stdout.trim();
                if !diff.is_empty() {
                    message.push_str("\n\n");
                    message.push_str(diff);
                }
                Ok(vec![Diagnostic {
                    path: task.path.clone(),
                    line: 1,
                    column: None,
                    severity: Severity::Blocking,
                    message,
                    code: None,
                    linter: LinterKind::Format,
                    // Formatting is a whole-file property; a selected file
                    // always owns its formatting verdict.
                    in_scope: true,
                }])
            }
            code => Err(ToolError::Failed {
                program: self.program.clone(),
                detail: format!("unexpected exit code {code}: {}", out.stderr.trim()),
            }),
        }
    }
}
