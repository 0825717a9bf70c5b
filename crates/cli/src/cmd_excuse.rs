// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Excuse command implementation.

use git_ratchet::cli::{Cli, ExcuseArgs};
use git_ratchet::discovery;
use git_ratchet::error::{Error, ExitCode};
use git_ratchet::excuse::{self, ExcuseOptions};
use git_ratchet::git::GitStore;
use git_ratchet::verbose::VerboseLogger;

/// Run the excuse command.
pub fn run(cli: &Cli, args: &ExcuseArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let store = GitStore::discover(&cwd);
    let root = store.as_ref().ok().and_then(GitStore::workdir);
    let config = discovery::load_config(cli.config.as_deref(), &cwd, root)?;
    let log = VerboseLogger::new(cli.verbose);

    let remote = if args.no_push || !config.excuse.push {
        None
    } else {
        Some(config.excuse.remote.clone())
    };

    let options = ExcuseOptions {
        prefix: config.prefix(cli.prefix.as_deref()),
        names: args.name.clone(),
        excuse: args.excuse.clone(),
        remote,
    };

    let store = store.map_err(|e| Error::LedgerUnavailable(e.to_string()))?;
    let recorded = excuse::run(&store, &options, &log)?;

    if let (Some(remote), Some(err)) = (&options.remote, &recorded.push_error) {
        eprintln!(
            "git-ratchet: warning: excuse recorded locally but not pushed to {}: {}",
            remote, err
        );
    }

    Ok(ExitCode::Success)
}
