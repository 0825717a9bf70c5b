// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Excuse orchestration.
//!
//! Records a waiver for named measures at HEAD, attributed to the local git
//! identity, and optionally publishes the excuse notes ref.

use crate::error::{Error, Result};
use crate::exclusion::{self, Exclusion, Recorded};
use crate::store::NoteStore;
use crate::verbose::VerboseLogger;

/// Settings for one excuse invocation.
#[derive(Debug, Clone, Default)]
pub struct ExcuseOptions {
    pub prefix: String,
    /// Comma-separated measure names.
    pub names: String,
    pub excuse: String,
    /// Remote to push the excuse ref to; `None` skips the push.
    pub remote: Option<String>,
}

/// Record an excuse.
pub fn run(store: &dyn NoteStore, options: &ExcuseOptions, log: &VerboseLogger) -> Result<Recorded> {
    log.section("Excuse");

    let measures = Exclusion::parse_names(&options.names);
    if measures.is_empty() {
        return Err(Error::Argument("no measure names given to excuse".to_string()));
    }
    if options.excuse.trim().is_empty() {
        return Err(Error::Argument("an excuse is required".to_string()));
    }

    let committer = store
        .identity()
        .map_err(|e| Error::LedgerUnavailable(format!("cannot determine committer: {}", e)))?;
    log.log(&format!("excusing {} as {}", measures.join(", "), committer));

    let exclusion = Exclusion {
        committer,
        excuse: options.excuse.clone(),
        measures,
    };
    let recorded = exclusion::write(
        store,
        &options.prefix,
        &exclusion,
        options.remote.as_deref(),
    )?;

    log.log(&format!("recorded excuse on {}", recorded.commit));
    match (&options.remote, &recorded.push_error) {
        (Some(remote), None) => log.log(&format!("pushed excuse to {}", remote)),
        (Some(remote), Some(_)) => log.log(&format!("push to {} failed", remote)),
        (None, _) => log.log("push skipped"),
    }

    Ok(recorded)
}

#[cfg(test)]
#[path = "excuse_tests.rs"]
mod tests;
