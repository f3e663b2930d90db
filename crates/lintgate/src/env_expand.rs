//! Environment variable expansion for configuration files.
//!
//! Supports `${VAR}` (errors when unset) and `${VAR:-default}` (falls back
//! when VAR is unset or empty). A bare `$` without a brace passes through.

use std::borrow::Cow;

use anyhow::{bail, Result};

pub fn expand_env_vars(text: &str) -> Result<Cow<'_, str>> {
    if !text.contains("${") {
        return Ok(Cow::Borrowed(text));
    }

    let mut out = String::with_capacity(text.len());
    let mut rest = text;
    while let Some(start) = rest.find("${") {
        out.push_str(&rest[..start]);
        let after = &rest[start + 2..];
        let Some(end) = after.find('}') else {
            let snippet: String = after.chars().take(20).collect();
            bail!("unclosed environment variable reference: ${{{snippet}");
        };
        out.push_str(&resolve(&after[..end])?);
        rest = &after[end + 1..];
    }
    out.push_str(rest);

    Ok(Cow::Owned(out))
}

fn resolve(reference: &str) -> Result<String> {
    let (name, default) = match reference.split_once(":-") {
        Some((n, d)) => (n, Some(d)),
        None => (reference, None),
    };

    let valid = !name.is_empty()
        && !name.starts_with(|c: char| c.is_ascii_digit())
        && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
    if !valid {
        bail!("invalid environment variable name '{name}'");
    }

    match (std::env::var(name), default) {
        (Ok(v), Some(d)) if v.is_empty() => Ok(d.to_string()),
        (Ok(v), _) => Ok(v),
        (Err(_), Some(d)) => Ok(d.to_string()),
        (Err(_), None) => bail!(
            "environment variable '{name}' is not set; use ${{{name}:-default}} to provide a fallback"
        ),
    }
}
