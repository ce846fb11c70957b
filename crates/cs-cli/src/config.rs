use std::fs;
use std::path::Path;

use anyhow::Context;
use cs_diff::DiffOptions;
use cs_utf8::ValidationOptions;
use serde::Deserialize;

/// Looked up in the working directory when no `--config` is given.
pub const DEFAULT_CONFIG_FILE: &str = "cscheck.toml";

/// Option defaults loaded from a TOML file.
///
/// ```toml
/// [diff]
/// contextLines = 5
/// ignoreWhitespace = true
///
/// [utf8]
/// maxIssues = 500
/// replacementChar = "?"
/// ```
#[derive(Clone, Debug, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct Config {
    pub diff: DiffOptions,
    pub utf8: ValidationOptions,
}

impl Config {
    pub fn from_toml(text: &str) -> anyhow::Result<Self> {
        toml::from_str(text).context("invalid configuration")
    }

    /// Load `path` if given, else `cscheck.toml` if present, else defaults.
    pub fn load(path: Option<&Path>) -> anyhow::Result<Self> {
        let path = match path {
            Some(p) => p,
            None if Path::new(DEFAULT_CONFIG_FILE).is_file() => Path::new(DEFAULT_CONFIG_FILE),
            None => return Ok(Self::default()),
        };
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        tracing::debug!(?path, "loaded configuration");
        Self::from_toml(&text).with_context(|| format!("in {}", path.display()))
    }
}
