//! Markdown report and CI annotation rendering.

use lintgate_types::{Diagnostic, RunReceipt, Severity};

const RENDERABLE_META_REASONS: &[&str] = &[
    lintgate_types::REASON_NO_FILES,
    lintgate_types::REASON_TOOL_ERROR,
    lintgate_types::REASON_GIT_UNAVAILABLE,
];

/// Render the PR-comment markdown for a receipt.
///
/// In-scope findings are grouped by file under "Failing checks"; findings
/// outside the change scope land in a collapsed section so pre-existing
/// issues stay visible without failing anyone.
pub fn render_markdown(receipt: &RunReceipt) -> String {
    let status = if receipt.verdict.overall_pass {
        "PASS"
    } else {
        "FAIL"
    };

    let mut out = String::new();
    out.push_str(&format!("## lintgate — {status}\n\n"));
    out.push_str(&format!(
        "Examined **{}** file(s); **{}** blocking finding(s) in scope.\n\n",
        receipt.files_examined, receipt.verdict.checks_failed
    ));

    let meta_reasons: Vec<&String> = receipt
        .reasons
        .iter()
        .filter(|r| RENDERABLE_META_REASONS.contains(&r.as_str()))
        .collect();
    if !meta_reasons.is_empty() {
        out.push_str("**Notes:**\n");
        for r in &meta_reasons {
            out.push_str(&format!("- {r}\n"));
        }
        out.push('\n');
    }

    let (in_scope, out_of_scope): (Vec<&Diagnostic>, Vec<&Diagnostic>) =
        receipt.diagnostics.iter().partition(|d| d.in_scope);

    if in_scope.is_empty() && out_of_scope.is_empty() {
        out.push_str("No findings.\n");
        return out;
    }

    if !in_scope.is_empty() {
        out.push_str("### Findings\n\n");
        render_grouped(&mut out, &in_scope);
    }

    if !out_of_scope.is_empty() {
        out.push_str(&format!(
            "<details>\n<summary>Other findings outside the change scope ({})</summary>\n\n",
            out_of_scope.len()
        ));
        render_grouped(&mut out, &out_of_scope);
        out.push_str("</details>\n");
    }

    out
}

/// Render diagnostics grouped by file. Input must already be sorted by path.
fn render_grouped(out: &mut String, diags: &[&Diagnostic]) {
    let mut current_file: Option<&str> = None;
    for d in diags {
        if current_file != Some(d.path.as_str()) {
            current_file = Some(d.path.as_str());
            out.push_str(&format!("#### `{}`\n\n", escape_md(&d.path)));
        }
        out.push_str(&render_finding_line(d));
    }
    out.push('\n');
}

fn render_finding_line(d: &Diagnostic) -> String {
    let icon = severity_icon(d.severity);
    let first_line = d.message.lines().next().unwrap_or_default();
    let code = d
        .code
        .as_deref()
        .map(|c| format!(" `{}`", escape_md(c)))
        .unwrap_or_default();

    let mut line = format!(
        "- {icon} line {}:{} {} _({})_\n",
        d.line,
        code,
        escape_md(first_line),
        d.linter.as_str()
    );

    // Multi-line messages carry a diff body (the format checker's output);
    // show it fenced under the bullet.
    let body: Vec<&str> = d.message.lines().skip(1).skip_while(|l| l.is_empty()).collect();
    if !body.is_empty() {
        line.push_str("\n  ```diff\n");
        for b in &body {
            line.push_str(&format!("  {b}\n"));
        }
        line.push_str("  ```\n");
    }

    line
}

fn severity_icon(severity: Severity) -> &'static str {
    match severity {
        Severity::Advisory => "⚠️",
        Severity::Blocking => "❌",
    }
}

/// Render GitHub workflow-command annotations for in-scope findings.
pub fn render_annotations(diagnostics: &[Diagnostic]) -> Vec<String> {
    diagnostics
        .iter()
        .filter(|d| d.in_scope)
        .map(|d| {
            let level = match d.severity {
                Severity::Advisory => "warning",
                Severity::Blocking => "error",
            };
            let first_line = d.message.lines().next().unwrap_or_default();
            let title = d.code.as_deref().unwrap_or(d.linter.as_str());
            format!(
                "::{level} file={path},line={line}::{title}: {msg}",
                level = level,
                path = d.path,
                line = d.line,
                title = title,
                msg = first_line
            )
        })
        .collect()
}

fn escape_md(s: &str) -> String {
    s.replace('|', "\\|").replace('`', "\\`")
}
