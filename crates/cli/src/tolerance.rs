// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Tolerance value parsing for ratcheting.
//!
//! Parses slack strings: `"5"` or `"2.5"` (absolute), `"20%"` (percentage of
//! the baseline).

use crate::ratchet::Slack;

/// Parse a slack string.
///
/// With `force_percent`, a bare number is read as a percentage.
pub fn parse_slack(s: &str, force_percent: bool) -> Result<Slack, ParseError> {
    let s = s.trim();

    let (num_str, percent) = match s.strip_suffix('%') {
        Some(n) => (n.trim(), true),
        None => (s, force_percent),
    };

    let amount: f64 = num_str.parse()?;
    if !amount.is_finite() || amount < 0.0 {
        return Err(ParseError::InvalidFormat(s.to_string()));
    }

    Ok(if percent {
        Slack::Percent(amount)
    } else {
        Slack::Absolute(amount)
    })
}

/// Errors that can occur during tolerance parsing.
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("invalid number: {0}")]
    InvalidNumber(#[from] std::num::ParseFloatError),

    #[error("invalid format: {0}")]
    InvalidFormat(String),
}

#[cfg(test)]
#[path = "tolerance_tests.rs"]
mod tests;
