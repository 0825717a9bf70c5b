// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check orchestration.
//!
//! Finds the latest snapshot, compares freshly parsed measures against it,
//! and writes the reconciled set back when asked to and the check passed.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::Result;
use crate::exclusion;
use crate::ledger::{self, Lookup};
use crate::measure::MeasureSet;
use crate::ratchet::{self, CompareOptions, Comparison};
use crate::store::NoteStore;
use crate::verbose::VerboseLogger;

/// Settings for one check invocation.
#[derive(Debug, Clone, Default)]
pub struct CheckOptions {
    pub prefix: String,
    pub compare: CompareOptions,
    /// Write the reconciled measures to HEAD if the check passes.
    pub write: bool,
}

/// Where the stored baseline came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BaselineRef {
    pub commit: String,
    pub timestamp: DateTime<Utc>,
    pub committer: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    Pass,
    Fail,
}

/// Outcome of a check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckReport {
    pub prefix: String,
    pub verdict: Verdict,
    /// `None` on the first run for a prefix.
    pub baseline: Option<BaselineRef>,
    #[serde(flatten)]
    pub comparison: Comparison,
    /// Commit the new snapshot was written to.
    pub written: Option<String>,
}

impl CheckReport {
    pub fn passed(&self) -> bool {
        self.verdict == Verdict::Pass
    }
}

/// Compare `computed` against `stored`, consulting excuses recorded after
/// `baseline_commit` only if something regressed.
pub fn compare_with_ledger(
    store: &dyn NoteStore,
    prefix: &str,
    baseline_commit: &str,
    stored: &MeasureSet,
    computed: MeasureSet,
    options: &CompareOptions,
) -> Result<Comparison> {
    let merged = ratchet::merge(stored, computed, options);

    let exclusions = if merged.has_candidates() {
        exclusion::read(store, prefix, baseline_commit)?
    } else {
        Vec::new()
    };

    Ok(merged.resolve(&exclusions))
}

/// Run a check.
pub fn run(
    store: &dyn NoteStore,
    computed: MeasureSet,
    options: &CheckOptions,
    log: &VerboseLogger,
) -> Result<CheckReport> {
    log.section("Check");
    log.log(&format!(
        "prefix {:?}: {} measures computed",
        options.prefix,
        computed.len()
    ));

    let (comparison, baseline) = match ledger::latest(store, &options.prefix)? {
        Lookup::NotFound => {
            log.log("no stored measures found, accepting as initial baseline");
            let comparison = ratchet::compare(&MeasureSet::new(), computed, &options.compare, &[]);
            (comparison, None)
        }
        Lookup::Found(snapshot) => {
            log.log(&format!(
                "comparing against {} measures stored on {} by {}",
                snapshot.measures.len(),
                snapshot.commit,
                snapshot.committer
            ));
            let comparison = compare_with_ledger(
                store,
                &options.prefix,
                &snapshot.commit,
                &snapshot.measures,
                computed,
                &options.compare,
            )?;
            let baseline = BaselineRef {
                commit: snapshot.commit,
                timestamp: snapshot.timestamp,
                committer: snapshot.committer,
            };
            (comparison, Some(baseline))
        }
    };

    for name in &comparison.added {
        log.log(&format!("new measure: {}", name));
    }
    for name in &comparison.excused {
        log.log(&format!("excused: {}", name));
    }
    for failure in &comparison.failures {
        log.log(&format!("failing: {}", failure.name()));
    }

    let verdict = if comparison.passed() {
        Verdict::Pass
    } else {
        Verdict::Fail
    };

    let written = if !options.write {
        None
    } else if verdict == Verdict::Fail {
        log.log("check failed, not writing measures");
        None
    } else if comparison.measures.is_empty() {
        log.log("no measures to write");
        None
    } else {
        let commit = ledger::write(store, &options.prefix, &comparison.measures)?;
        log.log(&format!("wrote {} measures to {}", comparison.measures.len(), commit));
        Some(commit)
    };

    Ok(CheckReport {
        prefix: options.prefix.clone(),
        verdict,
        baseline,
        comparison,
        written,
    })
}

#[cfg(test)]
#[path = "check_tests.rs"]
mod tests;
