// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Test helpers for behavioral specifications.
//!
//! Provides a small DSL for driving the git-ratchet binary against
//! throwaway git repositories.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::{Predicate, PredicateBooleanExt};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Trait for converting into a string predicate.
/// Allows passing `&str` (as contains) or any `Predicate<str>`.
pub trait IntoStrPredicate<P: Predicate<str>> {
    fn into_predicate(self) -> P;
}

impl IntoStrPredicate<predicates::str::ContainsPredicate> for &str {
    fn into_predicate(self) -> predicates::str::ContainsPredicate {
        predicates::str::contains(self)
    }
}

impl<P: Predicate<str>> IntoStrPredicate<P> for P {
    fn into_predicate(self) -> P {
        self
    }
}

/// Exit code of a check that found a regression.
pub const REGRESSION: i32 = 50;

/// Returns a Command configured to run the git-ratchet binary
pub fn ratchet_cmd() -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("git-ratchet"));
    cmd.env_remove("GIT_RATCHET_CONFIG")
        .env_remove("GIT_RATCHET_LOG")
        .env("NO_COLOR", "1");
    cmd
}

/// Build a `check` invocation in `dir`.
pub fn check(dir: &Path) -> Run {
    Run::new(dir, "check")
}

/// Build an `excuse` invocation in `dir`.
pub fn excuse(dir: &Path) -> Run {
    Run::new(dir, "excuse")
}

/// Build a `dump` invocation in `dir`.
pub fn dump(dir: &Path) -> Run {
    Run::new(dir, "dump")
}

/// Get path to a test fixture file
pub fn fixture(name: &str) -> PathBuf {
    let manifest_dir =
        std::env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR should be set");
    PathBuf::from(manifest_dir)
        .parent()
        .expect("parent should exist")
        .parent()
        .expect("grandparent should exist")
        .join("tests")
        .join("fixtures")
        .join(name)
}

// =============================================================================
// Run
// =============================================================================

/// Fluent builder for one git-ratchet invocation.
pub struct Run {
    dir: PathBuf,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    stdin: Option<String>,
}

#[allow(dead_code)]
impl Run {
    fn new(dir: &Path, subcommand: &str) -> Self {
        Self {
            dir: dir.to_path_buf(),
            args: vec![subcommand.to_string()],
            envs: Vec::new(),
            stdin: None,
        }
    }

    /// Add CLI arguments
    pub fn args(mut self, args: &[&str]) -> Self {
        self.args.extend(args.iter().map(|s| s.to_string()));
        self
    }

    /// Feed measures on stdin
    pub fn stdin(mut self, input: &str) -> Self {
        self.stdin = Some(input.to_string());
        self
    }

    /// Set environment variable
    pub fn env(mut self, key: &str, value: &str) -> Self {
        self.envs.push((key.to_string(), value.to_string()));
        self
    }

    /// Assert exit code 0
    pub fn passes(self) -> RunAssert {
        self.exits(0)
    }

    /// Assert the regression exit code
    pub fn fails(self) -> RunAssert {
        self.exits(REGRESSION)
    }

    /// Assert a specific exit code
    pub fn exits(self, code: i32) -> RunAssert {
        let output = self.output();
        assert_eq!(
            output.status.code(),
            Some(code),
            "expected exit code {}\nstdout:\n{}\nstderr:\n{}",
            code,
            String::from_utf8_lossy(&output.stdout),
            String::from_utf8_lossy(&output.stderr)
        );
        RunAssert { output }
    }

    fn output(self) -> std::process::Output {
        let mut cmd = ratchet_cmd();
        cmd.args(&self.args).current_dir(&self.dir);
        for (key, value) in &self.envs {
            cmd.env(key, value);
        }

        let mut cmd = assert_cmd::Command::from_std(cmd);
        cmd.write_stdin(self.stdin.unwrap_or_default());
        cmd.output().unwrap()
    }
}

/// Result of a run for chaining assertions
pub struct RunAssert {
    output: std::process::Output,
}

#[allow(dead_code)]
impl RunAssert {
    /// Get stdout as string
    pub fn stdout(&self) -> String {
        String::from_utf8_lossy(&self.output.stdout).into_owned()
    }

    /// Get stderr as string
    pub fn stderr(&self) -> String {
        String::from_utf8_lossy(&self.output.stderr).into_owned()
    }

    /// Parse stdout as JSON
    pub fn json(&self) -> serde_json::Value {
        serde_json::from_slice(&self.output.stdout).expect("valid JSON")
    }

    /// Assert stdout equals expected (with diff on failure)
    pub fn stdout_eq(self, expected: &str) -> Self {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        similar_asserts::assert_eq!(stdout, expected);
        self
    }

    /// Assert stdout matches predicate.
    /// Prefer `stdout_eq` for strict matching.
    pub fn stdout_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            predicate.into_predicate().eval(&stdout),
            "stdout predicate failed:\n{}",
            stdout
        );
        self
    }

    /// Assert stdout does not match predicate.
    pub fn stdout_lacks<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stdout = String::from_utf8_lossy(&self.output.stdout);
        assert!(
            !predicate.into_predicate().eval(&stdout),
            "stdout should NOT match predicate:\n{}",
            stdout
        );
        self
    }

    /// Assert stderr matches predicate.
    pub fn stderr_has<I, P>(self, predicate: I) -> Self
    where
        I: IntoStrPredicate<P>,
        P: Predicate<str>,
    {
        let stderr = String::from_utf8_lossy(&self.output.stderr);
        assert!(
            predicate.into_predicate().eval(&stderr),
            "stderr predicate failed:\n{}",
            stderr
        );
        self
    }
}

// =============================================================================
// Repo
// =============================================================================

/// Temporary git repository with a configured identity.
///
/// ```ignore
/// let repo = Repo::with_history();
/// check(repo.path()).args(&["-w"]).stdin("foo,5").passes();
/// repo.commit("next.txt");
/// check(repo.path()).stdin("foo,6").fails();
/// ```
pub struct Repo {
    dir: tempfile::TempDir,
}

#[allow(dead_code)]
impl Repo {
    /// Initialized repository with no commits.
    pub fn empty() -> Self {
        let repo = Self {
            dir: tempfile::tempdir().unwrap(),
        };
        repo.git(&["init", "-q"]);
        repo.git(&["config", "user.email", "test@example.com"]);
        repo.git(&["config", "user.name", "Test User"]);
        repo.git(&["config", "commit.gpgsign", "false"]);
        repo
    }

    /// Repository with two commits.
    pub fn with_history() -> Self {
        let repo = Self::empty();
        repo.commit("README");
        repo.commit("test.txt");
        repo
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Commit a new file and return the commit id.
    pub fn commit(&self, file: &str) -> String {
        std::fs::write(self.path().join(file), file).unwrap();
        self.git(&["add", file]);
        self.git(&["commit", "-q", "-m", &format!("add {}", file)]);
        self.git(&["rev-parse", "HEAD"])
    }

    /// Write `.git-ratchet.toml`, prefixed with `version = 1`.
    pub fn config(&self, content: &str) {
        std::fs::write(
            self.path().join(".git-ratchet.toml"),
            format!("version = 1\n{}", content),
        )
        .unwrap();
    }

    /// Run git, panicking on failure, and return trimmed stdout.
    pub fn git(&self, args: &[&str]) -> String {
        let output = Command::new("git")
            .args(args)
            .current_dir(self.path())
            .output()
            .unwrap();
        assert!(
            output.status.success(),
            "git {:?} failed: {}",
            args,
            String::from_utf8_lossy(&output.stderr)
        );
        String::from_utf8_lossy(&output.stdout).trim().to_string()
    }
}
