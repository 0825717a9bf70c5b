// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Note storage interface.
//!
//! The ledger only needs five things from version control: walk ancestors
//! newest first, read a note, overwrite a note, publish a notes ref, and name
//! the local user. `GitStore` provides them over libgit2; tests use an
//! in-memory store.

use chrono::{DateTime, Utc};

/// A commit visited while walking history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitInfo {
    /// Full commit id.
    pub id: String,
    /// Author email.
    pub author: String,
    /// Author timestamp.
    pub time: DateTime<Utc>,
}

/// Lazy newest-first commit sequence.
pub type Commits<'a> = Box<dyn Iterator<Item = Result<CommitInfo, StoreError>> + 'a>;

/// Key-value note storage keyed by `(notes ref, commit)`.
pub trait NoteStore {
    /// Current HEAD commit id, or `None` on an unborn branch.
    fn head(&self) -> Result<Option<String>, StoreError>;

    /// Walk ancestors of `start` (inclusive), newest first.
    ///
    /// When `hide` is given, that commit and its ancestors are excluded.
    fn ancestors(&self, start: &str, hide: Option<&str>) -> Result<Commits<'_>, StoreError>;

    /// Read the note attached to `commit` under `notes_ref`.
    fn note(&self, notes_ref: &str, commit: &str) -> Result<Option<String>, StoreError>;

    /// Attach a note to `commit`, replacing any existing one.
    fn set_note(&self, notes_ref: &str, commit: &str, body: &str) -> Result<(), StoreError>;

    /// Publish `notes_ref` to `remote`.
    fn push_notes(&self, notes_ref: &str, remote: &str) -> Result<(), StoreError>;

    /// Local committer name.
    fn identity(&self) -> Result<String, StoreError>;
}

/// Errors from the storage backend.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("not a git repository: {0}")]
    NotARepository(String),

    #[error(transparent)]
    Git(#[from] git2::Error),

    #[error("{0}")]
    Failed(String),
}
