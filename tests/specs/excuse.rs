// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Excuse command specs.

use crate::prelude::*;

#[test]
fn excuse_waives_one_regression() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\nbar,1\n").passes();
    repo.commit("next.txt");

    check(repo.path()).stdin("foo,6\nbar,1\n").fails();

    excuse(repo.path())
        .args(&["-n", "foo", "-e", "prod is down", "--no-push"])
        .passes();

    check(repo.path())
        .args(&["-w"])
        .stdin("foo,6\nbar,1\n")
        .passes()
        .stdout_has("foo: EXCUSED at 6");

    // The excuse was spent writing the new baseline.
    repo.commit("later.txt");
    check(repo.path()).stdin("foo,7\nbar,1\n").fails();
    check(repo.path()).stdin("foo,6\nbar,1\n").passes();
}

#[test]
fn excuse_does_not_cover_other_measures() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\nbar,1\n").passes();
    repo.commit("next.txt");

    excuse(repo.path())
        .args(&["-n", "foo", "-e", "vendored", "--no-push"])
        .passes();

    check(repo.path())
        .stdin("foo,6\nbar,2\n")
        .fails()
        .stdout_has("bar: 2 exceeds 1")
        .stdout_lacks("foo: 6 exceeds");
}

#[test]
fn excuse_is_scoped_to_prefix() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-p", "size", "-w"]).stdin("foo,5\n").passes();
    repo.commit("next.txt");

    excuse(repo.path())
        .args(&["-p", "lint", "-n", "foo", "-e", "wrong prefix", "--no-push"])
        .passes();

    check(repo.path()).args(&["-p", "size"]).stdin("foo,6\n").fails();
}

#[test]
fn excuse_note_records_identity() {
    let repo = Repo::with_history();
    excuse(repo.path())
        .args(&["-n", "foo, bar", "-e", "hotfix", "--no-push"])
        .passes();

    let note = repo.git(&["notes", "--ref", "git-ratchet-excuse-1-master", "show", "HEAD"]);
    let record: serde_json::Value = serde_json::from_str(&note).unwrap();
    assert_eq!(record["Committer"], "Test User");
    assert_eq!(record["Excuse"], "hotfix");
    assert_eq!(record["Measure"], serde_json::json!(["foo", "bar"]));
}

#[test]
fn push_failure_is_a_warning() {
    let repo = Repo::with_history();
    excuse(repo.path())
        .args(&["-n", "foo", "-e", "no remote configured"])
        .passes()
        .stderr_has("git-ratchet: warning:");
}

#[test]
fn blank_names_are_rejected() {
    let repo = Repo::with_history();
    excuse(repo.path())
        .args(&["-n", " , ", "-e", "nothing", "--no-push"])
        .exits(2);
}
