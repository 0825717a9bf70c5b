// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git-backed note storage.
//!
//! Uses git2 (libgit2) for history walks and note reads/writes. Publishing
//! notes shells out to `git push` so the user's credential helpers and remote
//! configuration apply unchanged.

use std::path::Path;
use std::process::Command;

use chrono::DateTime;
use git2::{ErrorCode, Oid, Repository};

use crate::store::{CommitInfo, Commits, NoteStore, StoreError};

/// Note storage over a git repository.
pub struct GitStore {
    repo: Repository,
}

impl GitStore {
    /// Open the repository containing `root`.
    pub fn discover(root: &Path) -> Result<Self, StoreError> {
        let repo = Repository::discover(root).map_err(|e| {
            StoreError::NotARepository(format!("{}: {}", root.display(), e.message()))
        })?;
        Ok(Self { repo })
    }

    /// Working directory root, if the repository is not bare.
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }
}

fn commit_info(repo: &Repository, oid: Oid) -> Result<CommitInfo, git2::Error> {
    let commit = repo.find_commit(oid)?;
    let author = commit.author();
    Ok(CommitInfo {
        id: oid.to_string(),
        author: author.email().unwrap_or("").to_string(),
        time: DateTime::from_timestamp(author.when().seconds(), 0).unwrap_or_default(),
    })
}

impl NoteStore for GitStore {
    fn head(&self) -> Result<Option<String>, StoreError> {
        match self.repo.head() {
            Ok(head) => Ok(head.target().map(|oid| oid.to_string())),
            Err(e) if e.code() == ErrorCode::UnbornBranch || e.code() == ErrorCode::NotFound => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn ancestors(&self, start: &str, hide: Option<&str>) -> Result<Commits<'_>, StoreError> {
        let mut walk = self.repo.revwalk()?;
        walk.push(Oid::from_str(start)?)?;
        if let Some(hide) = hide {
            walk.hide(Oid::from_str(hide)?)?;
        }

        let repo = &self.repo;
        Ok(Box::new(walk.map(move |oid| {
            let oid = oid?;
            Ok(commit_info(repo, oid)?)
        })))
    }

    fn note(&self, notes_ref: &str, commit: &str) -> Result<Option<String>, StoreError> {
        let oid = Oid::from_str(commit)?;
        match self.repo.find_note(Some(notes_ref), oid) {
            Ok(note) => String::from_utf8(note.message_bytes().to_vec())
                .map(Some)
                .map_err(|_| StoreError::Failed(format!("note on {} is not valid UTF-8", commit))),
            Err(e) if e.code() == ErrorCode::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn set_note(&self, notes_ref: &str, commit: &str, body: &str) -> Result<(), StoreError> {
        let oid = Oid::from_str(commit)?;
        let sig = self.repo.signature()?;
        let note = self.repo.note(&sig, &sig, Some(notes_ref), oid, body, true)?;
        tracing::debug!(%note, notes_ref, commit, "wrote note");
        Ok(())
    }

    fn push_notes(&self, notes_ref: &str, remote: &str) -> Result<(), StoreError> {
        let dir = self
            .repo
            .workdir()
            .unwrap_or_else(|| self.repo.path())
            .to_path_buf();

        tracing::info!("git push {} {}", remote, notes_ref);
        let output = Command::new("git")
            .args(["push", remote, notes_ref])
            .current_dir(&dir)
            .output()
            .map_err(|e| StoreError::Failed(format!("failed to run git push: {}", e)))?;

        if !output.status.success() {
            return Err(StoreError::Failed(format!(
                "git push {} {} failed: {}",
                remote,
                notes_ref,
                String::from_utf8_lossy(&output.stderr).trim()
            )));
        }
        Ok(())
    }

    fn identity(&self) -> Result<String, StoreError> {
        let config = self.repo.config()?;
        match config.get_string("user.name") {
            Ok(name) => Ok(name.trim().to_string()),
            Err(e) if e.code() == ErrorCode::NotFound => {
                Err(StoreError::Failed("user.name is not configured".to_string()))
            }
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
