// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! JSON output formatter.
//!
//! JSON is buffered and written at the end (not streamed).

use std::io::Write;

use chrono::Utc;
use serde::Serialize;

use crate::check::CheckReport;

/// JSON output formatter.
pub struct JsonFormatter<W: Write> {
    writer: W,
}

/// Report stamped with the time it was produced.
#[derive(Debug, Serialize)]
struct StampedReport<'a> {
    timestamp: String,
    #[serde(flatten)]
    report: &'a CheckReport,
}

impl<W: Write> JsonFormatter<W> {
    /// Create a new JSON formatter.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Write the complete JSON output.
    pub fn write(&mut self, report: &CheckReport) -> std::io::Result<()> {
        let stamped = StampedReport {
            timestamp: Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true),
            report,
        };
        let json = serde_json::to_string_pretty(&stamped).map_err(std::io::Error::other)?;
        writeln!(self.writer, "{}", json)
    }
}

#[cfg(test)]
#[path = "json_tests.rs"]
mod tests;
