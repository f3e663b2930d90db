//! Ordered ignore rules with negation overrides.
//!
//! Rules are literal path prefixes, never globs: a `*` in a prefix matches a
//! literal `*` character. Later rules override earlier ones for overlapping
//! prefixes, so `src|!src/keep` ignores `src/` except `src/keep/`.

use crate::ConfigError;

/// One parsed ignore entry. An empty prefix denotes the repo root and
/// matches every path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IgnoreRule {
    pub prefix: String,
    pub negated: bool,
}

/// Parse a pipe-delimited ignore specification.
///
/// Entries are trimmed and normalized (`./` and trailing slashes stripped,
/// backslashes folded to forward slashes). A `!` prefix marks the entry as
/// negated.
pub fn parse_ignore_rules(raw: &str) -> Result<Vec<IgnoreRule>, ConfigError> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    raw.split('|')
        .map(|entry| {
            let entry = entry.trim();
            let (negated, rest) = match entry.strip_prefix('!') {
                Some(rest) => (true, rest),
                None => (false, entry),
            };
            if negated && rest.trim().is_empty() {
                return Err(ConfigError::EmptyNegation);
            }
            Ok(IgnoreRule {
                prefix: normalize(rest),
                negated,
            })
        })
        .collect()
}

/// Decide whether `path` is ignored under `rules`.
///
/// Single ordered scan with one mutable tentative answer: each matching rule
/// overwrites it, so the last matching rule wins. No rule matching means not
/// ignored.
pub fn is_ignored(path: &str, rules: &[IgnoreRule]) -> bool {
    let path = normalize(path);
    let mut ignored = false;
    for rule in rules {
        if prefix_matches(&rule.prefix, &path) {
            ignored = !rule.negated;
        }
    }
    ignored
}

/// Component-aware literal prefix match: `src` covers `src` and `src/a.py`
/// but never `srcdir/a.py`.
fn prefix_matches(prefix: &str, path: &str) -> bool {
    if prefix.is_empty() {
        return true;
    }
    match path.strip_prefix(prefix) {
        Some(rest) => rest.is_empty() || rest.starts_with('/'),
        None => false,
    }
}

fn normalize(raw: &str) -> String {
    let cleaned = raw.trim().replace('\\', "/");
    let cleaned = cleaned.strip_prefix("./").unwrap_or(&cleaned);
    cleaned.trim_matches('/').to_string()
}
