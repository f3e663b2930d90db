//! Data types (config + run receipts) for lintgate.
//!
//! This crate is intentionally "dumb": pure DTOs with serde + schemars.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

// ── Schema Identifiers ─────────────────────────────────────────
pub const REPORT_SCHEMA_V1: &str = "lintgate.report.v1";

// ── Frozen Vocabulary ──────────────────────────────────────────
// Reason tokens (snake_case)
pub const REASON_NO_FILES: &str = "no_files";
pub const REASON_TOOL_ERROR: &str = "tool_error";
pub const REASON_GIT_UNAVAILABLE: &str = "git_unavailable";

/// Step output variable carrying the failed-check count.
pub const OUTPUT_CHECKS_FAILED: &str = "checks-failed";

/// Severity of a single diagnostic.
///
/// `Blocking` diagnostics count toward the failed-check total; `Advisory`
/// diagnostics are reported but never fail the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Advisory,
    Blocking,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Advisory => "advisory",
            Severity::Blocking => "blocking",
        }
    }
}

/// Which of the two linters produced a diagnostic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum LinterKind {
    Format,
    Analyzer,
}

impl LinterKind {
    pub fn as_str(self) -> &'static str {
        match self {
            LinterKind::Format => "format",
            LinterKind::Analyzer => "analyzer",
        }
    }
}

/// One finding reported by a linter for one file. Immutable once created.
///
/// `in_scope` is false when a change-scoped run produced the diagnostic on a
/// line outside the file's changed-line set; such diagnostics stay in the
/// report but never count toward the verdict.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Diagnostic {
    /// Repo-relative path with forward slashes.
    pub path: String,
    /// Line number (1-based; 0 for whole-file tool failures).
    pub line: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub column: Option<u32>,
    pub severity: Severity,
    pub message: String,
    /// Tool-specific code, e.g. `unused-import [W0611]`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    pub linter: LinterKind,
    pub in_scope: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct ToolMeta {
    pub name: String,
    pub version: String,
}

/// Run timing for the receipt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunMeta {
    /// ISO 8601 timestamp when the run started.
    pub started_at: String,
    /// ISO 8601 timestamp when the run ended.
    pub ended_at: String,
    pub duration_ms: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct DiagnosticCounts {
    /// In-scope advisory findings.
    pub advisory: u32,
    /// In-scope blocking findings.
    pub blocking: u32,
    /// Findings outside the change scope (any severity).
    #[serde(default, skip_serializing_if = "is_zero")]
    pub out_of_scope: u32,
}

fn is_zero(n: &u32) -> bool {
    *n == 0
}

/// The folded pass/fail outcome. `overall_pass` holds iff `checks_failed == 0`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Verdict {
    pub overall_pass: bool,
    pub checks_failed: u32,
    pub counts: DiagnosticCounts,
}

/// The JSON artifact written after every completed run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct RunReceipt {
    /// Schema identifier, always "lintgate.report.v1".
    pub schema: String,
    pub tool: ToolMeta,
    pub run: RunMeta,
    /// Number of files handed to the linters.
    pub files_examined: u32,
    /// All diagnostics, sorted by path, line, then linter identifier.
    pub diagnostics: Vec<Diagnostic>,
    pub verdict: Verdict,
    /// Stable meta tokens (e.g. "no_files", "tool_error").
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub reasons: Vec<String>,
}

/// The on-disk configuration file (`lintgate.toml`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema, Default)]
pub struct ConfigFile {
    #[serde(default)]
    pub defaults: Defaults,

    #[serde(default)]
    pub tools: ToolsConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct Defaults {
    /// Extensions to analyze, without leading dots.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extensions: Option<Vec<String>>,

    /// Pipe-delimited ignore rules; `!`-prefixed entries are negated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ignore: Option<String>,

    /// Base git ref for change-scoped runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub files_changed_only: Option<bool>,

    /// Worker pool size; 0 or absent means auto (CPU cores, capped).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<usize>,
}

impl Default for Defaults {
    fn default() -> Self {
        Self {
            extensions: Some(vec!["py".to_string(), "pyi".to_string()]),
            ignore: None,
            base: Some("origin/main".to_string()),
            files_changed_only: Some(false),
            jobs: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "kebab-case")]
pub struct ToolsConfig {
    /// Format-checker executable (path or name on PATH).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_checker: Option<String>,

    /// Static-analyzer executable (path or name on PATH).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub static_analyzer: Option<String>,

    /// Per-invocation subprocess timeout in seconds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            format_checker: Some("black".to_string()),
            static_analyzer: Some("pylint".to_string()),
            timeout_secs: Some(60),
        }
    }
}
