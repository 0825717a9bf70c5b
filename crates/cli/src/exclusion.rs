// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Excuse records waiving named regressions.
//!
//! An excuse is a JSON note on the commit it was recorded at:
//!
//! ```json
//! {"Committer":"Jane","Excuse":"prod is down","Measure":["foo"]}
//! ```
//!
//! Field names are capitalized to stay readable by older ledgers.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::ledger::excuse_ref;
use crate::store::NoteStore;

/// A recorded waiver for one or more measures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Exclusion {
    #[serde(rename = "Committer")]
    pub committer: String,
    #[serde(rename = "Excuse")]
    pub excuse: String,
    #[serde(rename = "Measure")]
    pub measures: Vec<String>,
}

impl Exclusion {
    /// Split a comma-separated list of measure names, dropping blanks.
    pub fn parse_names(names: &str) -> Vec<String> {
        names
            .split(',')
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .map(str::to_string)
            .collect()
    }
}

/// Result of recording an excuse.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Recorded {
    /// Commit the excuse was attached to.
    pub commit: String,
    /// Why publishing to the remote failed, if it was attempted and failed.
    pub push_error: Option<String>,
}

/// Attach `exclusion` to HEAD and, if `remote` is given, try to publish it.
///
/// A failed push is reported in [`Recorded::push_error`], never as an error.
pub fn write(
    store: &dyn NoteStore,
    prefix: &str,
    exclusion: &Exclusion,
    remote: Option<&str>,
) -> Result<Recorded> {
    let notes_ref = excuse_ref(prefix);
    let body = serde_json::to_string(exclusion)
        .map_err(|e| Error::LedgerWrite(format!("failed to encode excuse: {}", e)))?;

    let head = store
        .head()
        .map_err(|e| Error::LedgerWrite(e.to_string()))?
        .ok_or_else(|| Error::LedgerWrite("HEAD has no commit to attach to".to_string()))?;

    store
        .set_note(&notes_ref, &head, &body)
        .map_err(|e| Error::LedgerWrite(e.to_string()))?;
    tracing::info!(commit = %head, measures = ?exclusion.measures, "wrote excuse");

    let push_error = remote.and_then(|remote| match store.push_notes(&notes_ref, remote) {
        Ok(()) => None,
        Err(e) => {
            tracing::warn!("failed to push {}: {}", notes_ref, e);
            Some(e.to_string())
        }
    });

    Ok(Recorded {
        commit: head,
        push_error,
    })
}

/// Collect measure names excused on commits after `since`, up to HEAD.
///
/// `since` itself is excluded: an excuse recorded at or before the baseline
/// commit was already available to the check that wrote that baseline. The
/// result is sorted; duplicates are kept.
pub fn read(store: &dyn NoteStore, prefix: &str, since: &str) -> Result<Vec<String>> {
    let notes_ref = excuse_ref(prefix);
    let Some(head) = store
        .head()
        .map_err(|e| Error::LedgerUnavailable(e.to_string()))?
    else {
        return Ok(Vec::new());
    };

    let commits = store
        .ancestors(&head, Some(since))
        .map_err(|e| Error::LedgerUnavailable(e.to_string()))?;

    let mut names = Vec::new();
    for commit in commits {
        let commit = commit.map_err(|e| Error::LedgerRead(e.to_string()))?;
        let note = store
            .note(&notes_ref, &commit.id)
            .map_err(|e| Error::LedgerRead(format!("excuse on {}: {}", commit.id, e)))?;

        let Some(note) = note else { continue };
        for exclusion in decode(&note, &commit.id)? {
            tracing::debug!(commit = %commit.id, committer = %exclusion.committer, "found excuse");
            names.extend(exclusion.measures);
        }
    }

    names.sort();
    Ok(names)
}

/// Decode one JSON record per non-empty line.
fn decode(note: &str, commit: &str) -> Result<Vec<Exclusion>> {
    note.lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            serde_json::from_str(line)
                .map_err(|e| Error::LedgerRead(format!("excuse on {}: {}", commit, e)))
        })
        .collect()
}

#[cfg(test)]
#[path = "exclusion_tests.rs"]
mod tests;
