// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

use std::path::PathBuf;

/// git-ratchet error types
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Measurement input could not be parsed.
    #[error("malformed input: {0}")]
    MalformedInput(String),

    /// The history walk could not start (not a repository, no identity).
    #[error("ledger unavailable: {0}")]
    LedgerUnavailable(String),

    /// A note was found but could not be decoded, or the walk broke mid-way.
    #[error("ledger read error: {0}")]
    LedgerRead(String),

    /// Attaching a note to a commit failed.
    #[error("ledger write error: {0}")]
    LedgerWrite(String),

    /// Configuration file not found or invalid
    #[error("config error: {message}")]
    Config {
        message: String,
        path: Option<PathBuf>,
    },

    /// Invalid command-line arguments
    #[error("argument error: {0}")]
    Argument(String),

    /// File I/O error
    #[error("io error: {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type using git-ratchet Error
pub type Result<T> = std::result::Result<T, Error>;

/// Process exit codes.
///
/// The numeric values are a stable contract with CI scripts written against
/// earlier releases; never renumber them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// All measures pass
    Success = 0,
    /// Configuration or argument error
    ConfigError = 2,
    /// Internal error
    InternalError = 3,
    /// Measurement input could not be parsed
    MalformedInput = 10,
    /// History could not be walked
    LedgerUnavailable = 20,
    /// Ledger note could not be written
    LedgerWrite = 30,
    /// Ledger note could not be read
    LedgerRead = 40,
    /// One or more measures regressed
    RegressionFailure = 50,
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::MalformedInput(_) => ExitCode::MalformedInput,
            Error::LedgerUnavailable(_) => ExitCode::LedgerUnavailable,
            Error::LedgerRead(_) => ExitCode::LedgerRead,
            Error::LedgerWrite(_) => ExitCode::LedgerWrite,
            Error::Config { .. } | Error::Argument(_) => ExitCode::ConfigError,
            Error::Io { .. } => ExitCode::InternalError,
        }
    }
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
