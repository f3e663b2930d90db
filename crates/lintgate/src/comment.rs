//! Posting the markdown report as a PR comment.
//!
//! The comment API is a collaborator: a failure here is logged and never
//! affects the verdict or exit code.

use std::path::Path;

use anyhow::{bail, Context, Result};
use tracing::info;

/// Post `markdown` as a comment on the triggering pull request.
///
/// Requires `GITHUB_TOKEN` and `GITHUB_REPOSITORY`; the PR number is taken
/// from the event payload named by `GITHUB_EVENT_PATH`.
pub fn post_pr_comment(markdown: &str) -> Result<()> {
    let token = std::env::var("GITHUB_TOKEN").context("GITHUB_TOKEN is not set")?;
    let repo = std::env::var("GITHUB_REPOSITORY").context("GITHUB_REPOSITORY is not set")?;
    let api_url =
        std::env::var("GITHUB_API_URL").unwrap_or_else(|_| "https://api.github.com".to_string());

    let event_path =
        std::env::var("GITHUB_EVENT_PATH").context("GITHUB_EVENT_PATH is not set")?;
    let number = pull_request_number(Path::new(&event_path))
        .context("event payload has no pull request number")?;

    let url = format!("{api_url}/repos/{repo}/issues/{number}/comments");
    let client = reqwest::blocking::Client::builder()
        .user_agent(concat!("lintgate/", env!("CARGO_PKG_VERSION")))
        .build()
        .context("build http client")?;

    let response = client
        .post(&url)
        .bearer_auth(token)
        .header(reqwest::header::ACCEPT, "application/vnd.github+json")
        .json(&serde_json::json!({ "body": markdown }))
        .send()
        .context("send comment request")?;

    if !response.status().is_success() {
        bail!("comment API returned {}", response.status());
    }

    info!("posted report comment to PR #{number}");
    Ok(())
}

/// Extract the PR number from a workflow event payload.
///
/// `pull_request` events carry a top-level `number`; other payloads nest it
/// under `pull_request.number`.
fn pull_request_number(event_path: &Path) -> Option<u64> {
    let text = std::fs::read_to_string(event_path).ok()?;
    let payload: serde_json::Value = serde_json::from_str(&text).ok()?;
    payload
        .get("number")
        .and_then(|v| v.as_u64())
        .or_else(|| payload.pointer("/pull_request/number").and_then(|v| v.as_u64()))
}
