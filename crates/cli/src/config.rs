// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration parsing and validation.
//!
//! Handles `.git-ratchet.toml` parsing with version validation. Unknown keys
//! are rejected so a typo never silently disables a setting.

use std::path::Path;

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::measure::InputKind;

/// Config file name looked up by discovery.
pub const CONFIG_FILE: &str = ".git-ratchet.toml";

/// Currently supported config version.
pub const SUPPORTED_VERSION: i64 = 1;

/// Prefix used when neither the CLI nor the config names one.
pub const DEFAULT_PREFIX: &str = "master";

/// Remote excuses are pushed to by default.
pub const DEFAULT_REMOTE: &str = "origin";

/// Minimum config structure for version checking.
#[derive(Deserialize)]
struct VersionOnly {
    version: Option<i64>,
}

/// Full configuration.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Config file version (must be 1).
    pub version: i64,

    /// Default measure prefix.
    #[serde(default)]
    pub prefix: Option<String>,

    #[serde(default)]
    pub check: CheckConfig,

    #[serde(default)]
    pub excuse: ExcuseConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            version: SUPPORTED_VERSION,
            prefix: None,
            check: CheckConfig::default(),
            excuse: ExcuseConfig::default(),
        }
    }
}

impl Config {
    /// Prefix from the CLI, else the config, else [`DEFAULT_PREFIX`].
    pub fn prefix(&self, cli: Option<&str>) -> String {
        cli.or(self.prefix.as_deref())
            .unwrap_or(DEFAULT_PREFIX)
            .to_string()
    }
}

/// `[check]` settings.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CheckConfig {
    /// Slack as written on the command line: `"5"` or `"20%"`.
    #[serde(default)]
    pub slack: Option<String>,

    #[serde(default)]
    pub input: Option<InputKind>,

    #[serde(default)]
    pub zero_on_missing: bool,
}

/// `[excuse]` settings.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ExcuseConfig {
    #[serde(default = "ExcuseConfig::default_remote")]
    pub remote: String,

    /// Push the excuse ref after recording.
    #[serde(default = "ExcuseConfig::default_push")]
    pub push: bool,
}

impl Default for ExcuseConfig {
    fn default() -> Self {
        Self {
            remote: Self::default_remote(),
            push: Self::default_push(),
        }
    }
}

impl ExcuseConfig {
    fn default_remote() -> String {
        DEFAULT_REMOTE.to_string()
    }

    fn default_push() -> bool {
        true
    }
}

/// Load and validate config from a file path.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|e| Error::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    parse(&content, path)
}

/// Parse config from string content.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    // Version first, so a future config reports the version and not a bad key.
    let version_check: VersionOnly = toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })?;

    let version = version_check.version.ok_or_else(|| Error::Config {
        message: "missing required field: version".to_string(),
        path: Some(path.to_path_buf()),
    })?;

    if version != SUPPORTED_VERSION {
        return Err(Error::Config {
            message: format!(
                "unsupported config version {} (supported: {})\n  Upgrade git-ratchet to use this config.",
                version, SUPPORTED_VERSION
            ),
            path: Some(path.to_path_buf()),
        });
    }

    toml::from_str(content).map_err(|e| Error::Config {
        message: e.to_string(),
        path: Some(path.to_path_buf()),
    })
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
