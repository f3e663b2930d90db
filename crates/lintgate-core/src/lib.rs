//! Linter adapters, the bounded parallel runner, and report rendering.
//!
//! The two external tools are reached through one capability trait,
//! [`LinterAdapter`]; new linters plug in without touching discovery or
//! aggregation.

mod adapter;
mod analyze;
mod exec;
mod format;
mod render;
mod runner;

pub use adapter::LinterAdapter;
pub use analyze::StaticAnalyzer;
pub use exec::{run_tool, ToolError, ToolOutput};
pub use format::FormatChecker;
pub use render::{render_annotations, render_markdown};
pub use runner::{default_jobs, run_linters, RunnerError, MAX_WORKERS};
