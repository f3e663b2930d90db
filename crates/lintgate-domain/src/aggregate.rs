//! Folding per-file, per-linter diagnostics into one verdict.

use lintgate_types::{Diagnostic, DiagnosticCounts, Severity, Verdict};

/// The folded outcome of a run, ready for rendering and receipt writing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AggregateResult {
    pub files_examined: u32,
    /// Sorted by path, then line, then linter identifier.
    pub diagnostics: Vec<Diagnostic>,
    pub verdict: Verdict,
}

/// Raised only when the fold disagrees with an independent recount. This
/// indicates a defect in the result model itself, so callers must treat it
/// as fatal rather than report a possibly-wrong verdict.
#[derive(Debug, thiserror::Error)]
pub enum AggregationError {
    #[error("inconsistent verdict: counted {folded} blocking in-scope findings, recounted {recounted}")]
    CountMismatch { folded: u32, recounted: u32 },
}

/// Fold diagnostics into an [`AggregateResult`].
///
/// `checks_failed` counts blocking in-scope diagnostics only; advisory and
/// out-of-scope findings stay in the report without affecting the verdict.
pub fn aggregate(
    files_examined: u32,
    mut diagnostics: Vec<Diagnostic>,
) -> Result<AggregateResult, AggregationError> {
    diagnostics.sort_by(|a, b| {
        a.path
            .cmp(&b.path)
            .then(a.line.cmp(&b.line))
            .then(a.linter.as_str().cmp(b.linter.as_str()))
    });

    let mut counts = DiagnosticCounts::default();
    for d in &diagnostics {
        if !d.in_scope {
            counts.out_of_scope = counts.out_of_scope.saturating_add(1);
        } else {
            match d.severity {
                Severity::Advisory => counts.advisory = counts.advisory.saturating_add(1),
                Severity::Blocking => counts.blocking = counts.blocking.saturating_add(1),
            }
        }
    }

    let checks_failed = diagnostics
        .iter()
        .filter(|d| d.in_scope && d.severity == Severity::Blocking)
        .count() as u32;

    if checks_failed != counts.blocking {
        return Err(AggregationError::CountMismatch {
            folded: counts.blocking,
            recounted: checks_failed,
        });
    }

    Ok(AggregateResult {
        files_examined,
        diagnostics,
        verdict: Verdict {
            overall_pass: checks_failed == 0,
            checks_failed,
            counts,
        },
    })
}
