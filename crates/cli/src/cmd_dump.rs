// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dump command implementation.

use git_ratchet::cli::{Cli, DumpArgs};
use git_ratchet::discovery;
use git_ratchet::dump;
use git_ratchet::error::{Error, ExitCode};
use git_ratchet::git::GitStore;
use git_ratchet::verbose::VerboseLogger;

/// Run the dump command.
pub fn run(cli: &Cli, args: &DumpArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let store = GitStore::discover(&cwd);
    let root = store.as_ref().ok().and_then(GitStore::workdir);
    let config = discovery::load_config(cli.config.as_deref(), &cwd, root)?;
    let log = VerboseLogger::new(cli.verbose);
    let prefix = config.prefix(cli.prefix.as_deref());

    let store = store.map_err(|e| Error::LedgerUnavailable(e.to_string()))?;
    let mut stdout = std::io::stdout().lock();
    dump::run(&store, &prefix, args.output, &mut stdout, &log)?;

    Ok(ExitCode::Success)
}
