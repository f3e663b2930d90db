use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;

use crate::DiffError;

/// Per-file changed lines: new-side path to ascending unique 1-based line
/// numbers of added/modified lines.
pub type ChangeSet = BTreeMap<String, BTreeSet<u32>>;

/// Parse a unified diff (git-style) into a [`ChangeSet`].
///
/// Deleted files carry `+++ /dev/null` and contribute nothing; renames are
/// recorded under the new path only. Removed lines never appear in the set,
/// so a pure deletion leaves a file out of the map entirely.
pub fn parse_unified_diff(diff_text: &str) -> Result<ChangeSet, DiffError> {
    let mut changes = ChangeSet::new();
    let mut current_path: Option<String> = None;

    let mut new_line_no: u32 = 0;
    let mut in_hunk = false;

    for raw in diff_text.lines() {
        if raw.starts_with("diff --git ") {
            in_hunk = false;
            if let Some(p) = parse_diff_git_line(raw) {
                current_path = Some(p);
            }
            continue;
        }

        if let Some(rest) = raw.strip_prefix("+++ ") {
            // The +++ path is authoritative; /dev/null marks a deleted file.
            current_path = parse_new_side_path(rest);
            continue;
        }

        if raw.starts_with("@@") {
            let hdr = parse_hunk_header(raw)?;
            new_line_no = hdr.new_start;
            in_hunk = true;
            continue;
        }

        if !in_hunk {
            continue;
        }

        let Some(path) = current_path.as_deref() else {
            continue;
        };

        if raw.starts_with("---") {
            continue;
        }

        if raw.starts_with('\\') {
            // "\\ No newline at end of file"
            continue;
        }

        match raw.as_bytes().first() {
            Some(b'+') => {
                changes
                    .entry(path.to_string())
                    .or_default()
                    .insert(new_line_no);
                new_line_no = new_line_no.saturating_add(1);
            }
            Some(b' ') => {
                new_line_no = new_line_no.saturating_add(1);
            }
            // Removed lines do not advance the new side.
            _ => {}
        }
    }

    Ok(changes)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct HunkHeader {
    new_start: u32,
}

fn parse_hunk_header(line: &str) -> Result<HunkHeader, DiffError> {
    // Formats:
    // @@ -1,2 +3,4 @@
    // @@ -1 +3 @@
    let plus = line
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| DiffError::MalformedHunkHeader(line.to_string()))?;

    let plus = plus
        .strip_prefix('+')
        .ok_or_else(|| DiffError::MalformedHunkHeader(line.to_string()))?;
    let start_str = plus.split(',').next().unwrap_or(plus);
    let new_start: u32 = start_str
        .parse()
        .map_err(|_| DiffError::MalformedHunkHeader(line.to_string()))?;

    Ok(HunkHeader { new_start })
}

fn parse_diff_git_line(line: &str) -> Option<String> {
    // diff --git a/foo b/foo
    let mut it = line.split_whitespace();
    if it.next()? != "diff" {
        return None;
    }
    if it.next()? != "--git" {
        return None;
    }
    let _a = it.next()?;
    let b = it.next()?;
    strip_prefix_path(b)
}

fn parse_new_side_path(rest: &str) -> Option<String> {
    // "+++ b/foo" or "+++ /dev/null"
    let first = rest.split('\t').next().unwrap_or(rest);
    if first == "/dev/null" {
        return None;
    }
    strip_prefix_path(first)
}

fn strip_prefix_path(p: &str) -> Option<String> {
    // strips a/ or b/
    let p = p.trim();
    let p = p
        .strip_prefix("a/")
        .or_else(|| p.strip_prefix("b/"))
        .unwrap_or(p);

    // Normalize to forward slashes.
    let normalized = Path::new(p)
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/");

    if normalized.is_empty() {
        None
    } else {
        Some(normalized)
    }
}
