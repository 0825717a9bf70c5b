// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Verbose output logger for diagnostic information.
//!
//! Writes `[verbose]` prefixed lines to stderr when `--verbose` is given. The
//! logger is created once from the flag and handed to each command; nothing
//! reads verbosity from global state.

use std::cell::RefCell;

enum Sink {
    Stderr,
    Capture(RefCell<Vec<String>>),
}

/// Verbose output logger. All output is conditional on verbose mode being enabled.
pub struct VerboseLogger {
    enabled: bool,
    sink: Sink,
}

impl VerboseLogger {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            sink: Sink::Stderr,
        }
    }

    /// Enabled logger that records lines instead of printing them.
    pub fn capturing() -> Self {
        Self {
            enabled: true,
            sink: Sink::Capture(RefCell::new(Vec::new())),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Print a verbose line.
    pub fn log(&self, msg: &str) {
        if !self.enabled {
            return;
        }
        match &self.sink {
            Sink::Stderr => eprintln!("[verbose] {}", msg),
            Sink::Capture(lines) => lines.borrow_mut().push(msg.to_string()),
        }
    }

    /// Print a verbose section header.
    pub fn section(&self, title: &str) {
        self.log(&format!("=== {} ===", title));
    }

    /// Lines recorded by a capturing logger.
    pub fn captured(&self) -> Vec<String> {
        match &self.sink {
            Sink::Stderr => Vec::new(),
            Sink::Capture(lines) => lines.borrow().clone(),
        }
    }
}

#[cfg(test)]
#[path = "verbose_tests.rs"]
mod tests;
