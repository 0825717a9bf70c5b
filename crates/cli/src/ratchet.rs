// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ratchet enforcement and measure comparison.
//!
//! Comparison runs in two linear passes over name-sorted inputs:
//!
//! 1. [`merge`] walks the stored and computed sets side by side. Measures that
//!    vanished are failures (or zeroed), new measures are accepted, and
//!    matched measures get their baseline clamped down to the stored one and
//!    are checked against the slack ceiling.
//! 2. [`Merge::resolve`] walks the regression candidates against the sorted
//!    excuse names. An excused candidate has its baseline raised to the new
//!    value; the rest fail.
//!
//! Exclusions are only needed when pass 1 found candidates, so callers can
//! skip the excuse lookup entirely on the common clean run.

use serde::Serialize;

use crate::measure::{Measure, MeasureSet};

/// Allowed rise above a baseline before it counts as a regression.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Slack {
    /// Fixed amount added to the baseline.
    Absolute(f64),
    /// Percentage of the baseline added to it.
    Percent(f64),
}

impl Default for Slack {
    fn default() -> Self {
        Slack::Absolute(0.0)
    }
}

impl Slack {
    /// Highest passing value for `baseline`. Fractional allowances round down.
    ///
    /// A percentage is taken of the baseline's magnitude, so the ceiling
    /// never drops below a negative baseline.
    pub fn ceiling(self, baseline: i64) -> i64 {
        let allowance = match self {
            Slack::Absolute(amount) => amount,
            Slack::Percent(percent) => baseline.unsigned_abs() as f64 * percent / 100.0,
        };
        baseline.saturating_add(allowance.floor() as i64)
    }
}

/// Comparison settings.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CompareOptions {
    pub slack: Slack,
    /// Replace vanished measures with zero instead of failing.
    pub zero_on_missing: bool,
}

/// A measure that fails the ratchet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Failure {
    /// Stored measure absent from this run.
    Missing { name: String, baseline: i64 },
    /// Value rose above the allowed ceiling with no excuse.
    Regressed {
        name: String,
        value: i64,
        baseline: i64,
        ceiling: i64,
    },
}

impl Failure {
    pub fn name(&self) -> &str {
        match self {
            Failure::Missing { name, .. } | Failure::Regressed { name, .. } => name,
        }
    }
}

/// Cursor advances made by both passes.
///
/// Each input element is stepped over exactly once; there are no rescans.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct MergeStats {
    pub stored_steps: usize,
    pub computed_steps: usize,
    pub exclusion_steps: usize,
}

#[derive(Debug, Clone)]
struct Candidate {
    index: usize,
    baseline: i64,
    ceiling: i64,
}

/// Output of the first pass, awaiting exclusions.
#[derive(Debug, Clone)]
pub struct Merge {
    measures: Vec<Measure>,
    zeroed: Vec<Measure>,
    missing: Vec<Failure>,
    candidates: Vec<Candidate>,
    added: Vec<String>,
    stats: MergeStats,
}

/// Final verdict of a comparison.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Comparison {
    /// Reconciled measures. On success this is the next snapshot.
    pub measures: MeasureSet,
    /// Failures sorted by name; empty means pass.
    pub failures: Vec<Failure>,
    /// Regressions waived by an excuse.
    pub excused: Vec<String>,
    /// Measures with no stored counterpart.
    pub added: Vec<String>,
    /// Vanished measures recorded as zero.
    pub zeroed: Vec<String>,
    #[serde(skip)]
    pub stats: MergeStats,
}

impl Comparison {
    pub fn passed(&self) -> bool {
        self.failures.is_empty()
    }
}

/// First pass: merge-join `stored` against `computed`.
///
/// Both sets must be sorted by name, which [`MeasureSet`] guarantees. An
/// empty `stored` set accepts everything as new.
pub fn merge(stored: &MeasureSet, computed: MeasureSet, options: &CompareOptions) -> Merge {
    let stored = stored.as_slice();
    let mut measures = computed.into_vec();

    let mut zeroed = Vec::new();
    let mut missing = Vec::new();
    let mut candidates = Vec::new();
    let mut added = Vec::new();
    let mut stats = MergeStats::default();

    let vanished = |stored: &Measure, zeroed: &mut Vec<Measure>, missing: &mut Vec<Failure>| {
        if options.zero_on_missing {
            tracing::debug!(name = %stored.name, "missing measure set to zero");
            zeroed.push(Measure::with_baseline(stored.name.clone(), 0, 0));
        } else {
            tracing::debug!(name = %stored.name, "missing measure");
            missing.push(Failure::Missing {
                name: stored.name.clone(),
                baseline: stored.baseline,
            });
        }
    };

    let (mut i, mut j) = (0, 0);
    while i < stored.len() && j < measures.len() {
        let s = &stored[i];
        let c = &mut measures[j];

        if s.name < c.name {
            vanished(s, &mut zeroed, &mut missing);
            i += 1;
            stats.stored_steps += 1;
        } else if c.name < s.name {
            tracing::debug!(name = %c.name, "new measure");
            added.push(c.name.clone());
            j += 1;
            stats.computed_steps += 1;
        } else {
            if c.baseline > s.baseline {
                c.baseline = s.baseline;
            }

            let ceiling = options.slack.ceiling(s.baseline);
            if c.value > ceiling {
                tracing::debug!(
                    name = %c.name,
                    value = c.value,
                    baseline = s.baseline,
                    ceiling,
                    "measure rising"
                );
                candidates.push(Candidate {
                    index: j,
                    baseline: s.baseline,
                    ceiling,
                });
            }

            i += 1;
            j += 1;
            stats.stored_steps += 1;
            stats.computed_steps += 1;
        }
    }

    for s in &stored[i..] {
        vanished(s, &mut zeroed, &mut missing);
        stats.stored_steps += 1;
    }

    for c in &measures[j..] {
        tracing::debug!(name = %c.name, "new measure");
        added.push(c.name.clone());
        stats.computed_steps += 1;
    }

    Merge {
        measures,
        zeroed,
        missing,
        candidates,
        added,
        stats,
    }
}

impl Merge {
    /// Whether any matched measure rose above its ceiling.
    pub fn has_candidates(&self) -> bool {
        !self.candidates.is_empty()
    }

    /// Second pass: apply sorted excuse names to the regression candidates.
    pub fn resolve(mut self, exclusions: &[String]) -> Comparison {
        let mut failures = std::mem::take(&mut self.missing);
        let mut excused = Vec::new();

        let mut e = 0;
        for candidate in &self.candidates {
            let measure = &mut self.measures[candidate.index];

            while e < exclusions.len() && exclusions[e] < measure.name {
                e += 1;
                self.stats.exclusion_steps += 1;
            }

            if e < exclusions.len() && exclusions[e] == measure.name {
                tracing::debug!(name = %measure.name, value = measure.value, "excused regression");
                measure.baseline = measure.value;
                excused.push(measure.name.clone());
            } else {
                failures.push(Failure::Regressed {
                    name: measure.name.clone(),
                    value: measure.value,
                    baseline: candidate.baseline,
                    ceiling: candidate.ceiling,
                });
            }
        }

        failures.sort_by(|a, b| a.name().cmp(b.name()));

        let zeroed_names = self.zeroed.iter().map(|m| m.name.clone()).collect();
        let mut measures = self.measures;
        if failures.is_empty() {
            measures.extend(self.zeroed);
        }

        Comparison {
            measures: MeasureSet::from_unsorted(measures),
            failures,
            excused,
            added: self.added,
            zeroed: zeroed_names,
            stats: self.stats,
        }
    }
}

/// Compare in one call when the excuse names are already known.
pub fn compare(
    stored: &MeasureSet,
    computed: MeasureSet,
    options: &CompareOptions,
    exclusions: &[String],
) -> Comparison {
    merge(stored, computed, options).resolve(exclusions)
}

#[cfg(test)]
#[path = "ratchet_tests.rs"]
mod tests;
