// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command specs.

use crate::prelude::*;

// =============================================================================
// BASELINE
// =============================================================================

#[test]
fn first_run_writes_baseline() {
    let repo = Repo::with_history();

    check(repo.path())
        .args(&["-w"])
        .stdin("foo,5\nbar,2\n")
        .passes()
        .stdout_has("2 measures passed");

    let note = repo.git(&["notes", "--ref", "git-ratchet-1-master", "show", "HEAD"]);
    assert_eq!(note, "bar,2,2\nfoo,5,5");
}

#[test]
fn check_without_write_stores_nothing() {
    let repo = Repo::with_history();
    check(repo.path()).stdin("foo,5\n").passes();
    check(repo.path()).stdin("foo,6\n").passes();
}

#[test]
fn regression_fails_with_exit_50() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\n").passes();
    repo.commit("next.txt");

    check(repo.path())
        .args(&["-w"])
        .stdin("foo,6\n")
        .fails()
        .stdout_eq("master: FAIL\n  foo: 6 exceeds 5 (baseline 5)\n0 measures passed, 1 failed\n");

    // A failed check does not move the baseline.
    check(repo.path()).stdin("foo,6\n").fails();
    check(repo.path()).stdin("foo,5\n").passes();
}

#[test]
fn improvement_tightens_baseline() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\n").passes();
    repo.commit("next.txt");
    check(repo.path()).args(&["-w"]).stdin("foo,3\n").passes();
    repo.commit("later.txt");

    check(repo.path()).stdin("foo,4\n").fails();
}

#[test]
fn baseline_found_further_back_in_history() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\n").passes();
    repo.commit("a.txt");
    repo.commit("b.txt");
    repo.commit("c.txt");

    check(repo.path()).stdin("foo,6\n").fails();
}

#[test]
fn missing_measure_fails() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\nbar,1\n").passes();
    repo.commit("next.txt");

    check(repo.path())
        .stdin("foo,5\n")
        .fails()
        .stdout_has("bar: missing (baseline 1)");
}

#[test]
fn zero_on_missing_records_zero() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\nbar,1\n").passes();
    repo.commit("next.txt");

    check(repo.path()).args(&["-w", "-z"]).stdin("foo,5\n").passes();

    let note = repo.git(&["notes", "--ref", "git-ratchet-1-master", "show", "HEAD"]);
    assert_eq!(note, "bar,0,0\nfoo,5,5");
}

// =============================================================================
// SLACK
// =============================================================================

#[test]
fn absolute_slack() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("js,10\n").passes();
    repo.commit("next.txt");

    check(repo.path()).args(&["-s", "5"]).stdin("js,15\n").passes();
    check(repo.path()).args(&["-s", "5"]).stdin("js,16\n").fails();
}

#[test]
fn percent_slack() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("js,100\n").passes();
    repo.commit("next.txt");

    check(repo.path()).args(&["-s", "20%"]).stdin("js,120\n").passes();
    check(repo.path()).args(&["-s", "20%"]).stdin("js,121\n").fails();
    check(repo.path())
        .args(&["-s", "20", "--use-percents"])
        .stdin("js,120\n")
        .passes();
}

// =============================================================================
// PREFIXES AND INPUT
// =============================================================================

#[test]
fn prefixes_keep_separate_ledgers() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-p", "size", "-w"]).stdin("foo,5\n").passes();
    check(repo.path()).args(&["-p", "lint", "-w"]).stdin("foo,9\n").passes();
    repo.commit("next.txt");

    check(repo.path()).args(&["-p", "size"]).stdin("foo,9\n").fails();
    check(repo.path()).args(&["-p", "lint"]).stdin("foo,9\n").passes();
    check(repo.path()).stdin("foo,100\n").passes();
}

#[test]
fn checkstyle_input_counts_errors() {
    let repo = Repo::with_history();
    let report = fixture("checkstyle/report.xml");

    check(repo.path())
        .args(&["-i", "checkstyle", "-w", "-f", report.to_str().unwrap()])
        .passes();

    let note = repo.git(&["notes", "--ref", "git-ratchet-1-master", "show", "HEAD"]);
    assert_eq!(note, "errors,3,3");
}

#[test]
fn quoted_names_round_trip_through_notes() {
    let repo = Repo::with_history();
    check(repo.path())
        .args(&["-w"])
        .stdin("\"bundle,gz\",40\n\"lint\",3\n")
        .passes();

    let note = repo.git(&["notes", "--ref", "git-ratchet-1-master", "show", "HEAD"]);
    assert_eq!(note, "\"bundle,gz\",40,40\nlint,3,3");

    repo.commit("next.txt");
    check(repo.path())
        .stdin("\"bundle,gz\",41\nlint,3\n")
        .fails()
        .stdout_has("bundle,gz: 41 exceeds 40");
}

#[test]
fn missing_input_file_is_internal_error() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-f", "nope.csv"]).exits(3);
}

// =============================================================================
// OUTPUT
// =============================================================================

#[test]
fn json_output() {
    let repo = Repo::with_history();
    check(repo.path()).args(&["-w"]).stdin("foo,5\n").passes();
    let head = repo.git(&["rev-parse", "HEAD"]);
    repo.commit("next.txt");

    let run = check(repo.path()).args(&["-o", "json"]).stdin("foo,7\n").fails();
    let json = run.json();
    assert_eq!(json["verdict"], "fail");
    assert_eq!(json["prefix"], "master");
    assert_eq!(json["baseline"]["commit"], head.as_str());
    assert_eq!(json["failures"][0]["name"], "foo");
    assert_eq!(json["failures"][0]["value"], 7);
}

#[test]
fn color_flag_overrides_no_color_env() {
    let repo = Repo::with_history();
    check(repo.path())
        .args(&["--color"])
        .stdin("foo,5\n")
        .passes()
        .stdout_has("\x1b[");
    check(repo.path())
        .stdin("foo,5\n")
        .passes()
        .stdout_lacks("\x1b[");
}

#[test]
fn verbose_narrates_to_stderr() {
    let repo = Repo::with_history();
    check(repo.path())
        .args(&["-v"])
        .stdin("foo,5\n")
        .passes()
        .stderr_has("[verbose] no stored measures found");
}
