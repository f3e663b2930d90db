use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::{debug, info, warn};

use lintgate_core::{
    default_jobs, render_annotations, render_markdown, run_linters, FormatChecker, StaticAnalyzer,
};
use lintgate_diff::resolve_changes;
use lintgate_domain::{
    aggregate, discover, parse_extensions, parse_ignore_rules, validate_repo_root, IgnoreRule,
};
use lintgate_types::{
    ConfigFile, RunMeta, RunReceipt, ToolMeta, OUTPUT_CHECKS_FAILED, REASON_NO_FILES,
    REASON_TOOL_ERROR, REPORT_SCHEMA_V1,
};

mod comment;
mod config_loader;
mod env_expand;
mod github;

use config_loader::load_config;

/// Exit code for fatal errors (bad configuration, unavailable diff,
/// internal inconsistency). Distinct from the 0..=100 checks-failed range
/// so CI logs can tell "tool misconfigured" from "tool found problems".
const EXIT_FATAL: i32 = 101;

/// The exit code mirrors the failed-check count, saturated below the
/// fatal code.
const MAX_CHECKS_EXIT: u32 = 100;

#[derive(Parser)]
#[command(name = "lintgate")]
#[command(about = "CI gate that runs source linters and reports pass/fail", long_about = None)]
struct Cli {
    /// Enable verbose (info-level) logging to stderr.
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Enable debug-level logging to stderr.
    #[arg(long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Discover files, run both linters, and fold the results into a verdict.
    Check(Box<CheckArgs>),

    /// Validate the configuration file without running any analysis.
    Validate(ValidateArgs),
}

#[derive(Parser, Debug)]
struct CheckArgs {
    /// Comma-separated file extensions to analyze (default: py,pyi).
    #[arg(long)]
    extensions: Option<String>,

    /// Repository root to analyze.
    #[arg(long, default_value = ".")]
    repo_root: PathBuf,

    /// Pipe-delimited ignore rules; prefix an entry with '!' to un-ignore it.
    ///
    /// Entries are literal path prefixes, never globs: a '*' matches a
    /// literal '*' character.
    #[arg(long)]
    ignore: Option<String>,

    /// Restrict analysis to files (and lines) changed against --base.
    #[arg(long)]
    files_changed_only: bool,

    /// Base git ref for change-scoped runs (default: origin/main).
    #[arg(long)]
    base: Option<String>,

    /// Path to a config file. If omitted, uses ./lintgate.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Worker pool size (default: CPU cores, capped).
    #[arg(long)]
    jobs: Option<usize>,

    /// Per-invocation linter timeout in seconds.
    #[arg(long)]
    timeout_secs: Option<u64>,

    /// Format-checker executable (default: black).
    #[arg(long)]
    format_checker: Option<String>,

    /// Static-analyzer executable (default: pylint).
    #[arg(long)]
    static_analyzer: Option<String>,

    /// Where to write the JSON receipt.
    #[arg(long, default_value = "artifacts/lintgate/report.json")]
    out: PathBuf,

    /// Write a Markdown summary.
    ///
    /// If provided with no value, defaults to artifacts/lintgate/comment.md
    #[arg(
        long,
        value_name = "PATH",
        num_args = 0..=1,
        default_missing_value = "artifacts/lintgate/comment.md"
    )]
    md: Option<PathBuf>,

    /// Emit GitHub Actions annotations to stdout.
    #[arg(long)]
    github_annotations: bool,

    /// Post the markdown report as a comment on the triggering pull request.
    #[arg(long)]
    post_comment: bool,
}

#[derive(Parser, Debug)]
struct ValidateArgs {
    /// Path to a config file. If omitted, uses ./lintgate.toml if present.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output format for validation results.
    #[arg(long, value_enum, default_value_t = ValidateFormat::Text)]
    format: ValidateFormat,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ValidateFormat {
    Text,
    Json,
}

#[cfg(not(test))]
fn main() -> std::process::ExitCode {
    match run_with_args(std::env::args_os()) {
        Ok(code) => std::process::ExitCode::from(code as u8),
        Err(err) => {
            eprintln!("lintgate: {err:#}");
            std::process::ExitCode::from(EXIT_FATAL as u8)
        }
    }
}

fn run_with_args<I, T>(args: I) -> Result<i32>
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    let cli = Cli::parse_from(args);

    init_logging(cli.verbose, cli.debug);

    match cli.command {
        Commands::Check(args) => cmd_check(*args),
        Commands::Validate(args) => cmd_validate(args),
    }
}

/// Initialize tracing/logging based on CLI flags.
fn init_logging(verbose: bool, debug: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let level = if debug {
        "debug"
    } else if verbose {
        "info"
    } else {
        "warn"
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let _ = tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .try_init();
}

/// The fully-resolved run configuration: CLI flags override the config
/// file, which overrides built-in defaults.
#[derive(Debug)]
struct Settings {
    repo_root: PathBuf,
    extensions: BTreeSet<String>,
    ignore_rules: Vec<IgnoreRule>,
    files_changed_only: bool,
    base: String,
    jobs: usize,
    timeout: Duration,
    format_program: String,
    analyzer_program: String,
}

fn resolve_settings(args: &CheckArgs, cfg: &ConfigFile) -> Result<Settings> {
    let repo_root = validate_repo_root(&args.repo_root)?;

    let extensions_raw = args
        .extensions
        .clone()
        .or_else(|| cfg.defaults.extensions.as_ref().map(|e| e.join(",")))
        .unwrap_or_else(|| "py,pyi".to_string());
    let extensions = parse_extensions(&extensions_raw)?;

    let ignore_raw = args
        .ignore
        .clone()
        .or_else(|| cfg.defaults.ignore.clone())
        .unwrap_or_default();
    let ignore_rules = parse_ignore_rules(&ignore_raw)?;

    let files_changed_only =
        args.files_changed_only || cfg.defaults.files_changed_only.unwrap_or(false);

    let base = args
        .base
        .clone()
        .or_else(|| cfg.defaults.base.clone())
        .unwrap_or_else(|| "origin/main".to_string());

    let jobs = match args.jobs.or(cfg.defaults.jobs) {
        None | Some(0) => default_jobs(),
        Some(n) => n,
    };

    let timeout_secs = args
        .timeout_secs
        .or(cfg.tools.timeout_secs)
        .unwrap_or(60);
    if timeout_secs == 0 {
        bail!("timeout-secs must be greater than zero");
    }

    let format_program = args
        .format_checker
        .clone()
        .or_else(|| cfg.tools.format_checker.clone())
        .unwrap_or_else(|| "black".to_string());
    let analyzer_program = args
        .static_analyzer
        .clone()
        .or_else(|| cfg.tools.static_analyzer.clone())
        .unwrap_or_else(|| "pylint".to_string());

    Ok(Settings {
        repo_root,
        extensions,
        ignore_rules,
        files_changed_only,
        base,
        jobs,
        timeout: Duration::from_secs(timeout_secs),
        format_program,
        analyzer_program,
    })
}

fn cmd_check(args: CheckArgs) -> Result<i32> {
    let cfg = load_config(args.config.as_deref())?;
    let settings = resolve_settings(&args, &cfg)?;

    let started_at = Utc::now();
    let start = Instant::now();

    let change_scope = if settings.files_changed_only {
        let changes = resolve_changes(&settings.repo_root, &settings.base)
            .with_context(|| format!("resolve changed files against '{}'", settings.base))?;
        debug!("change scope covers {} file(s)", changes.len());
        Some(changes)
    } else {
        None
    };

    let tasks = discover(
        &settings.repo_root,
        &settings.extensions,
        &settings.ignore_rules,
        change_scope.as_ref(),
    )?;
    info!("selected {} file(s) for analysis", tasks.len());

    let mut reasons = Vec::new();
    let diagnostics = if tasks.is_empty() {
        info!("no source files need checking");
        reasons.push(REASON_NO_FILES.to_string());
        Vec::new()
    } else {
        let format = FormatChecker::new(&settings.format_program, settings.timeout);
        let analyzer = StaticAnalyzer::new(&settings.analyzer_program, settings.timeout);
        run_linters(
            &settings.repo_root,
            &tasks,
            &[&format, &analyzer],
            settings.jobs,
        )?
    };

    // Line 0 marks a recovered tool failure (missing binary, timeout).
    if diagnostics.iter().any(|d| d.line == 0) {
        reasons.push(REASON_TOOL_ERROR.to_string());
    }

    let result = aggregate(tasks.len() as u32, diagnostics)?;

    let ended_at = Utc::now();
    let receipt = RunReceipt {
        schema: REPORT_SCHEMA_V1.to_string(),
        tool: ToolMeta {
            name: "lintgate".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
        run: RunMeta {
            started_at: started_at.to_rfc3339(),
            ended_at: ended_at.to_rfc3339(),
            duration_ms: start.elapsed().as_millis() as u64,
        },
        files_examined: result.files_examined,
        diagnostics: result.diagnostics,
        verdict: result.verdict,
        reasons,
    };

    write_json(&args.out, &receipt)?;
    info!("wrote receipt to {}", args.out.display());

    let markdown = render_markdown(&receipt);
    if let Some(md_path) = &args.md {
        write_text(md_path, &markdown)?;
        info!("wrote markdown summary to {}", md_path.display());
    }

    if args.github_annotations {
        for line in render_annotations(&receipt.diagnostics) {
            println!("{line}");
        }
    }

    github::emit_step_output(OUTPUT_CHECKS_FAILED, receipt.verdict.checks_failed)
        .context("write step output")?;

    if args.post_comment {
        if let Err(err) = comment::post_pr_comment(&markdown) {
            warn!("failed to post PR comment: {err:#}");
        }
    }

    if receipt.verdict.overall_pass {
        info!("all checks passed");
    } else {
        info!("{} check(s) failed", receipt.verdict.checks_failed);
    }

    Ok(exit_code_for(receipt.verdict.checks_failed))
}

fn exit_code_for(checks_failed: u32) -> i32 {
    checks_failed.min(MAX_CHECKS_EXIT) as i32
}

fn cmd_validate(args: ValidateArgs) -> Result<i32> {
    let config_path = args.config.clone().or_else(|| {
        let p = PathBuf::from("lintgate.toml");
        p.exists().then_some(p)
    });

    let Some(path) = config_path else {
        bail!("No configuration file found. Specify --config or create lintgate.toml");
    };

    let cfg = load_config(Some(&path))?;

    let mut errors: Vec<String> = Vec::new();

    if let Some(extensions) = &cfg.defaults.extensions {
        if let Err(e) = parse_extensions(&extensions.join(",")) {
            errors.push(format!("defaults.extensions: {e}"));
        }
    }

    if let Some(ignore) = &cfg.defaults.ignore {
        if let Err(e) = parse_ignore_rules(ignore) {
            errors.push(format!("defaults.ignore: {e}"));
        }
    }

    if cfg.tools.timeout_secs == Some(0) {
        errors.push("tools.timeout-secs must be greater than zero".to_string());
    }

    for (field, value) in [
        ("tools.format-checker", &cfg.tools.format_checker),
        ("tools.static-analyzer", &cfg.tools.static_analyzer),
    ] {
        if let Some(program) = value {
            if program.trim().is_empty() {
                errors.push(format!("{field} must not be empty"));
            }
        }
    }

    match args.format {
        ValidateFormat::Json => {
            let result = serde_json::json!({
                "valid": errors.is_empty(),
                "path": path.display().to_string(),
                "errors": errors,
            });
            println!("{}", serde_json::to_string_pretty(&result)?);
        }
        ValidateFormat::Text => {
            println!("Validating {}...", path.display());
            println!();
            if errors.is_empty() {
                println!("Configuration is valid!");
            } else {
                println!("Configuration has {} error(s):", errors.len());
                println!();
                for (i, err) in errors.iter().enumerate() {
                    println!("  {}. {}", i + 1, err);
                }
            }
        }
    }

    if errors.is_empty() {
        Ok(0)
    } else {
        Ok(1)
    }
}

fn write_json<T: serde::Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).context("serialize receipt")?;
    write_text(path, &json)
}

fn write_text(path: &Path, text: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("create directory '{}'", parent.display()))?;
        }
    }
    std::fs::write(path, text).with_context(|| format!("write '{}'", path.display()))
}
