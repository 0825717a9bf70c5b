// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Dump the full ledger for a prefix, newest snapshot first.
//!
//! Snapshots are written as they are decoded; the ledger is never collected.

use std::io::Write;
use std::path::PathBuf;

use chrono::SecondsFormat;

use crate::error::{Error, Result};
use crate::ledger::Snapshots;
use crate::measure::quote_field;
use crate::store::NoteStore;
use crate::verbose::VerboseLogger;

/// Dump output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum DumpFormat {
    /// `timestamp,name,value` rows.
    #[default]
    Csv,
    /// Array of snapshot objects.
    Json,
}

/// Write every snapshot for `prefix` to `out`. Returns the snapshot count.
pub fn run(
    store: &dyn NoteStore,
    prefix: &str,
    format: DumpFormat,
    out: &mut dyn Write,
    log: &VerboseLogger,
) -> Result<usize> {
    log.section("Dump");

    let mut count = 0;
    if format == DumpFormat::Json {
        out.write_all(b"[").map_err(io_error)?;
    }

    for snapshot in Snapshots::from_head(store, prefix)? {
        let snapshot = snapshot?;
        log.log(&format!(
            "{}: {} measures",
            snapshot.commit,
            snapshot.measures.len()
        ));

        match format {
            DumpFormat::Csv => {
                let timestamp = snapshot.timestamp.to_rfc3339_opts(SecondsFormat::Secs, true);
                for m in &snapshot.measures {
                    writeln!(out, "{},{},{}", timestamp, quote_field(&m.name), m.value)
                        .map_err(io_error)?;
                }
            }
            DumpFormat::Json => {
                if count > 0 {
                    out.write_all(b",").map_err(io_error)?;
                }
                serde_json::to_writer(&mut *out, &snapshot)
                    .map_err(|e| io_error(std::io::Error::other(e)))?;
            }
        }
        count += 1;
    }

    if format == DumpFormat::Json {
        out.write_all(b"]\n").map_err(io_error)?;
    }
    out.flush().map_err(io_error)?;

    log.log(&format!("dumped {} snapshots", count));
    Ok(count)
}

fn io_error(source: std::io::Error) -> Error {
    Error::Io {
        path: PathBuf::from("<output>"),
        source,
    }
}

#[cfg(test)]
#[path = "dump_tests.rs"]
mod tests;
