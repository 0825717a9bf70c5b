// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Measure ledger stored in git notes.
//!
//! Each commit may carry one snapshot note per prefix. The ledger is never
//! loaded whole: [`Snapshots`] walks history from HEAD and decodes notes as it
//! goes, so callers that want only the latest snapshot stop after one item.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::measure::{self, MeasureSet};
use crate::store::{Commits, NoteStore};

/// Current note format version, embedded in the notes ref name.
pub const LEDGER_VERSION: u32 = 1;

/// Notes ref holding measure snapshots for `prefix`.
pub fn measure_ref(prefix: &str) -> String {
    format!("refs/notes/git-ratchet-{}-{}", LEDGER_VERSION, prefix)
}

/// Notes ref holding excuses for `prefix`.
pub fn excuse_ref(prefix: &str) -> String {
    format!("refs/notes/git-ratchet-excuse-{}-{}", LEDGER_VERSION, prefix)
}

/// A decoded snapshot note plus the commit it was attached to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Snapshot {
    pub commit: String,
    pub timestamp: DateTime<Utc>,
    pub committer: String,
    pub measures: MeasureSet,
}

/// Outcome of looking for the most recent snapshot.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Lookup {
    Found(Snapshot),
    /// History holds no snapshot for this prefix.
    NotFound,
}

/// Lazy newest-first sequence of snapshots.
///
/// Commits without a note, or with an empty one, are skipped. A note that
/// fails to decode ends the walk with [`Error::LedgerRead`].
pub struct Snapshots<'a> {
    store: &'a dyn NoteStore,
    notes_ref: String,
    commits: Option<Commits<'a>>,
}

impl<'a> Snapshots<'a> {
    /// Start walking from HEAD.
    ///
    /// Fails with [`Error::LedgerUnavailable`] if the walk cannot start. An
    /// unborn branch yields an empty sequence.
    pub fn from_head(store: &'a dyn NoteStore, prefix: &str) -> Result<Self> {
        let notes_ref = measure_ref(prefix);
        let head = store
            .head()
            .map_err(|e| Error::LedgerUnavailable(e.to_string()))?;

        let commits = match head {
            Some(head) => Some(
                store
                    .ancestors(&head, None)
                    .map_err(|e| Error::LedgerUnavailable(e.to_string()))?,
            ),
            None => {
                tracing::debug!("HEAD is unborn, ledger is empty");
                None
            }
        };

        Ok(Self {
            store,
            notes_ref,
            commits,
        })
    }
}

impl Iterator for Snapshots<'_> {
    type Item = Result<Snapshot>;

    fn next(&mut self) -> Option<Self::Item> {
        let commits = self.commits.as_mut()?;

        for commit in commits.by_ref() {
            let commit = match commit {
                Ok(commit) => commit,
                Err(e) => return Some(Err(Error::LedgerRead(e.to_string()))),
            };

            let note = match self.store.note(&self.notes_ref, &commit.id) {
                Ok(Some(note)) if !note.trim().is_empty() => note,
                Ok(_) => continue,
                Err(e) => {
                    return Some(Err(Error::LedgerRead(format!(
                        "note on {}: {}",
                        commit.id, e
                    ))));
                }
            };

            let measures = match measure::parse_note(&note) {
                Ok(measures) => measures,
                Err(e) => {
                    return Some(Err(Error::LedgerRead(format!(
                        "note on {}: {}",
                        commit.id, e
                    ))));
                }
            };

            if measures.is_empty() {
                continue;
            }

            tracing::debug!(commit = %commit.id, measures = measures.len(), "found snapshot");
            return Some(Ok(Snapshot {
                commit: commit.id,
                timestamp: commit.time,
                committer: commit.author,
                measures,
            }));
        }

        self.commits = None;
        None
    }
}

/// Find the most recent snapshot reachable from HEAD.
pub fn latest(store: &dyn NoteStore, prefix: &str) -> Result<Lookup> {
    match Snapshots::from_head(store, prefix)?.next() {
        Some(Ok(snapshot)) => Ok(Lookup::Found(snapshot)),
        Some(Err(e)) => Err(e),
        None => Ok(Lookup::NotFound),
    }
}

/// Attach `measures` as the snapshot for HEAD, replacing any existing one.
///
/// Returns the commit the snapshot was written to. Concurrent writers to the
/// same commit and prefix race; the last write wins.
pub fn write(store: &dyn NoteStore, prefix: &str, measures: &MeasureSet) -> Result<String> {
    let head = store
        .head()
        .map_err(|e| Error::LedgerWrite(e.to_string()))?
        .ok_or_else(|| Error::LedgerWrite("HEAD has no commit to attach to".to_string()))?;

    store
        .set_note(&measure_ref(prefix), &head, &measures.to_note())
        .map_err(|e| Error::LedgerWrite(e.to_string()))?;

    tracing::info!(commit = %head, prefix, measures = measures.len(), "wrote snapshot");
    Ok(head)
}

#[cfg(test)]
#[path = "ledger_tests.rs"]
mod tests;
