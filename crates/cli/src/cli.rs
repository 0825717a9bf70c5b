// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::dump::DumpFormat;
use crate::measure::InputKind;

/// Ratchet code-quality measures forward, one commit at a time
#[derive(Parser)]
#[command(name = "git-ratchet")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "GIT_RATCHET_CONFIG")]
    pub config: Option<PathBuf>,

    /// Measure namespace (default: "master")
    #[arg(short, long, global = true)]
    pub prefix: Option<String>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Compare measures from stdin against the latest stored snapshot
    Check(CheckArgs),
    /// Waive regressions of named measures until the next snapshot
    Excuse(ExcuseArgs),
    /// Print every stored snapshot, newest first
    Dump(DumpArgs),
    /// Print the version
    Version,
}

#[derive(clap::Args)]
pub struct CheckArgs {
    /// Store the measures on HEAD if the check passes
    #[arg(short, long)]
    pub write: bool,

    /// Allowed rise per measure: an amount like 5, or a percentage like 20%
    #[arg(short, long, value_name = "SLACK")]
    pub slack: Option<String>,

    /// Treat a bare slack number as a percentage
    #[arg(long)]
    pub use_percents: bool,

    /// Input format
    #[arg(short, long, value_name = "KIND")]
    pub input: Option<InputKind>,

    /// Record vanished measures as zero instead of failing
    #[arg(short, long)]
    pub zero_on_missing: bool,

    /// Read measures from FILE instead of stdin
    #[arg(short, long, value_name = "FILE")]
    pub file: Option<PathBuf>,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,

    /// Force color output
    #[arg(long)]
    pub color: bool,

    /// Disable color output
    #[arg(long)]
    pub no_color: bool,
}

#[derive(clap::Args)]
pub struct ExcuseArgs {
    /// Comma-separated measure names to excuse
    #[arg(short, long, value_name = "NAMES")]
    pub name: String,

    /// Why the regression is acceptable
    #[arg(short, long, value_name = "TEXT")]
    pub excuse: String,

    /// Record the excuse locally without pushing it
    #[arg(long)]
    pub no_push: bool,
}

#[derive(clap::Args)]
pub struct DumpArgs {
    /// Output format
    #[arg(short, long, default_value = "csv")]
    pub output: DumpFormat,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
