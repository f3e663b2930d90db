//! Configuration loading (`lintgate.toml`) with env-var expansion.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::debug;

use lintgate_types::ConfigFile;

use crate::env_expand::expand_env_vars;

/// Load the config file, or built-in defaults when none exists.
///
/// With no explicit path, `./lintgate.toml` is used if present.
pub fn load_config(explicit: Option<&Path>) -> Result<ConfigFile> {
    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => {
            let p = PathBuf::from("lintgate.toml");
            p.exists().then_some(p)
        }
    };

    let Some(path) = path else {
        debug!("no config file; using built-in defaults");
        return Ok(ConfigFile::default());
    };

    debug!("loading config from '{}'", path.display());
    let text = std::fs::read_to_string(&path)
        .with_context(|| format!("read config '{}'", path.display()))?;
    let expanded = expand_env_vars(&text)?;
    toml::from_str(&expanded).with_context(|| format!("parse config '{}'", path.display()))
}
