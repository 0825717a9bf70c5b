// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Ratchet ledger for code-quality measures, stored in git notes.

pub mod check;
pub mod cli;
pub mod color;
pub mod config;
pub mod discovery;
pub mod dump;
pub mod error;
pub mod exclusion;
pub mod excuse;
pub mod git;
pub mod ledger;
pub mod measure;
pub mod output;
pub mod ratchet;
pub mod store;
pub mod tolerance;
pub mod verbose;

pub use check::{CheckOptions, CheckReport, Verdict};
pub use cli::{CheckArgs, Cli, Command, DumpArgs, ExcuseArgs, OutputFormat};
pub use error::{Error, ExitCode, Result};
pub use ledger::{Lookup, Snapshot, Snapshots};
pub use measure::{InputKind, Measure, MeasureSet};
pub use ratchet::{CompareOptions, Comparison, Failure, Slack};
pub use store::{CommitInfo, NoteStore, StoreError};
