//! Subprocess execution with a hard deadline.

use std::io::Read;
use std::path::Path;
use std::process::{Command, Stdio};
use std::thread;
use std::time::{Duration, Instant};

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Captured output of a finished tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolOutput {
    pub code: i32,
    pub stdout: String,
    pub stderr: String,
}

/// Invocation failures. Normal nonzero exits are NOT errors here; adapters
/// interpret exit codes themselves because "tool found problems" is a
/// result, not a failure.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("linter executable '{program}' was not found")]
    Missing { program: String },

    #[error("linter '{program}' could not be run: {source}")]
    Io {
        program: String,
        source: std::io::Error,
    },

    #[error("linter '{program}' timed out after {timeout_secs}s")]
    Timeout { program: String, timeout_secs: u64 },

    #[error("linter '{program}' exited abnormally: {detail}")]
    Failed { program: String, detail: String },

    #[error("linter '{program}' produced unparseable output: {detail}")]
    Unparseable { program: String, detail: String },
}

/// Run `program args..` in `cwd`, capturing output, killing the child once
/// `timeout` elapses.
///
/// Output is drained on dedicated threads so a chatty child can never wedge
/// against a full pipe while we poll for exit.
pub fn run_tool(
    program: &str,
    args: &[String],
    cwd: &Path,
    timeout: Duration,
) -> Result<ToolOutput, ToolError> {
    let mut child = Command::new(program)
        .args(args)
        .current_dir(cwd)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => ToolError::Missing {
                program: program.to_string(),
            },
            _ => ToolError::Io {
                program: program.to_string(),
                source: e,
            },
        })?;

    let stdout_reader = spawn_reader(child.stdout.take());
    let stderr_reader = spawn_reader(child.stderr.take());

    let deadline = Instant::now() + timeout;
    let status = loop {
        match child.try_wait() {
            Ok(Some(status)) => break status,
            Ok(None) => {
                if Instant::now() >= deadline {
                    let _ = child.kill();
                    let _ = child.wait();
                    let _ = stdout_reader.join();
                    let _ = stderr_reader.join();
                    return Err(ToolError::Timeout {
                        program: program.to_string(),
                        timeout_secs: timeout.as_secs(),
                    });
                }
                thread::sleep(POLL_INTERVAL);
            }
            Err(e) => {
                return Err(ToolError::Io {
                    program: program.to_string(),
                    source: e,
                });
            }
        }
    };

    let stdout = collect(stdout_reader);
    let stderr = collect(stderr_reader);

    match status.code() {
        Some(code) => Ok(ToolOutput {
            code,
            stdout,
            stderr,
        }),
        None => Err(ToolError::Failed {
            program: program.to_string(),
            detail: "terminated by signal".to_string(),
        }),
    }
}

fn spawn_reader<R: Read + Send + 'static>(source: Option<R>) -> thread::JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut r) = source {
            let _ = r.read_to_end(&mut buf);
        }
        buf
    })
}

fn collect(handle: thread::JoinHandle<Vec<u8>>) -> String {
    String::from_utf8_lossy(&handle.join().unwrap_or_default()).into_owned()
}
