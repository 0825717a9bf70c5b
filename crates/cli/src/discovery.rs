// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! `.git-ratchet.toml` may sit in the working directory or any directory
//! above it, up to the root of the repository the ledger lives in. Outside a
//! repository only the working directory is searched.

use std::path::{Path, PathBuf};

use crate::config::{self, CONFIG_FILE, Config};
use crate::error::{Error, Result};

/// Nearest config file between `cwd` and the repository `root`.
pub fn find_config(cwd: &Path, root: Option<&Path>) -> Option<PathBuf> {
    let inside_root = |dir: &Path| root.is_some_and(|root| dir.starts_with(root));

    cwd.ancestors()
        .take_while(|dir| *dir == cwd || inside_root(dir))
        .map(|dir| dir.join(CONFIG_FILE))
        .find(|path| path.is_file())
}

/// Load the config named by `explicit` (`-C` or `GIT_RATCHET_CONFIG`), else
/// the discovered one, else defaults.
pub fn load_config(explicit: Option<&Path>, cwd: &Path, root: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(path) if !path.is_file() => {
            return Err(Error::Config {
                message: format!("config file not found: {}", path.display()),
                path: Some(path.to_path_buf()),
            });
        }
        Some(path) => path.to_path_buf(),
        None => match find_config(cwd, root) {
            Some(path) => path,
            None => return Ok(Config::default()),
        },
    };

    tracing::debug!(path = %path.display(), "loading config");
    config::load(&path)
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
