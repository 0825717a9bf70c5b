// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Text output formatter.
//!
//! ```text
//! <prefix>: FAIL
//!   <measure>: <value> exceeds <ceiling> (baseline <baseline>)
//!   <measure>: missing (baseline <baseline>)
//!   <measure>: EXCUSED at <value>
//! <n> measures passed, <m> failed
//! ```

use std::io::Write;
use termcolor::{ColorChoice, StandardStream, WriteColor};

use crate::check::CheckReport;
use crate::color::scheme;
use crate::ratchet::Failure;

/// Text output formatter with color support.
pub struct TextFormatter<W: WriteColor> {
    out: W,
}

impl TextFormatter<StandardStream> {
    /// Formatter writing to stdout.
    pub fn stdout(color_choice: ColorChoice) -> Self {
        Self::new(StandardStream::stdout(color_choice))
    }
}

impl<W: WriteColor> TextFormatter<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    /// Write a full check report.
    pub fn write_report(&mut self, report: &CheckReport) -> std::io::Result<()> {
        let comparison = &report.comparison;

        if !report.passed() {
            self.out.set_color(&scheme::prefix())?;
            write!(self.out, "{}", report.prefix)?;
            self.out.reset()?;
            write!(self.out, ": ")?;
            self.out.set_color(&scheme::fail())?;
            write!(self.out, "FAIL")?;
            self.out.reset()?;
            writeln!(self.out)?;

            for failure in &comparison.failures {
                self.write_failure(failure)?;
            }
        }

        for name in &comparison.excused {
            write!(self.out, "  ")?;
            self.out.set_color(&scheme::measure())?;
            write!(self.out, "{}", name)?;
            self.out.reset()?;
            write!(self.out, ": ")?;
            self.out.set_color(&scheme::excused())?;
            write!(self.out, "EXCUSED")?;
            self.out.reset()?;
            match comparison.measures.get(name) {
                Some(m) => writeln!(self.out, " at {}", m.value)?,
                None => writeln!(self.out)?,
            }
        }

        self.write_summary(report)
    }

    fn write_failure(&mut self, failure: &Failure) -> std::io::Result<()> {
        write!(self.out, "  ")?;
        self.out.set_color(&scheme::measure())?;
        write!(self.out, "{}", failure.name())?;
        self.out.reset()?;
        write!(self.out, ": ")?;

        self.out.set_color(&scheme::detail())?;
        match failure {
            Failure::Missing { baseline, .. } => {
                write!(self.out, "missing (baseline {})", baseline)?;
            }
            Failure::Regressed {
                value,
                baseline,
                ceiling,
                ..
            } => {
                write!(
                    self.out,
                    "{} exceeds {} (baseline {})",
                    value, ceiling, baseline
                )?;
            }
        }
        self.out.reset()?;
        writeln!(self.out)
    }

    fn write_summary(&mut self, report: &CheckReport) -> std::io::Result<()> {
        let failed = report.comparison.failures.len();
        let passed = report.comparison.measures.len().saturating_sub(
            report
                .comparison
                .failures
                .iter()
                .filter(|f| matches!(f, Failure::Regressed { .. }))
                .count(),
        );
        let plural = if passed == 1 { "" } else { "s" };

        if failed == 0 {
            write!(self.out, "{} measure{} ", passed, plural)?;
            self.out.set_color(&scheme::pass())?;
            write!(self.out, "passed")?;
            self.out.reset()?;
            writeln!(self.out)?;
        } else {
            writeln!(
                self.out,
                "{} measure{} passed, {} failed",
                passed, plural, failed
            )?;
        }

        if let Some(commit) = &report.written {
            writeln!(
                self.out,
                "wrote {} measure{} to {}",
                report.comparison.measures.len(),
                if report.comparison.measures.len() == 1 { "" } else { "s" },
                short(commit)
            )?;
        }
        Ok(())
    }
}

fn short(commit: &str) -> &str {
    commit.get(..10).unwrap_or(commit)
}

#[cfg(test)]
#[path = "text_tests.rs"]
mod tests;
