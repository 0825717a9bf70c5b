// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Check command implementation.

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use termcolor::ColorChoice;

use git_ratchet::check::{self, CheckOptions};
use git_ratchet::cli::{CheckArgs, Cli, OutputFormat};
use git_ratchet::color::resolve_color;
use git_ratchet::discovery;
use git_ratchet::error::{Error, ExitCode};
use git_ratchet::git::GitStore;
use git_ratchet::measure::{self, InputKind, MeasureSet};
use git_ratchet::output::{JsonFormatter, TextFormatter};
use git_ratchet::ratchet::CompareOptions;
use git_ratchet::tolerance;
use git_ratchet::verbose::VerboseLogger;

/// Run the check command.
pub fn run(cli: &Cli, args: &CheckArgs) -> anyhow::Result<ExitCode> {
    let cwd = std::env::current_dir()?;
    let store = GitStore::discover(&cwd);
    let root = store.as_ref().ok().and_then(GitStore::workdir);
    let config = discovery::load_config(cli.config.as_deref(), &cwd, root)?;
    let log = VerboseLogger::new(cli.verbose);

    let slack_text = args
        .slack
        .as_deref()
        .or(config.check.slack.as_deref())
        .unwrap_or("0");
    let slack = tolerance::parse_slack(slack_text, args.use_percents)
        .map_err(|e| Error::Argument(format!("invalid slack {:?}: {}", slack_text, e)))?;

    let options = CheckOptions {
        prefix: config.prefix(cli.prefix.as_deref()),
        compare: CompareOptions {
            slack,
            zero_on_missing: args.zero_on_missing || config.check.zero_on_missing,
        },
        write: args.write,
    };
    tracing::debug!(?options, "resolved check options");

    let input = args.input.or(config.check.input).unwrap_or_default();
    let computed = read_measures(args.file.as_deref(), input)?;
    log.log(&format!("parsed {} measures from {:?} input", computed.len(), input));

    let store = store.map_err(|e| Error::LedgerUnavailable(e.to_string()))?;
    let report = check::run(&store, computed, &options, &log)?;

    match args.output {
        OutputFormat::Text => {
            let color = if args.no_color {
                ColorChoice::Never
            } else if args.color {
                ColorChoice::Always
            } else {
                resolve_color()
            };
            TextFormatter::stdout(color).write_report(&report)?;
        }
        OutputFormat::Json => {
            JsonFormatter::new(std::io::stdout().lock()).write(&report)?;
        }
    }

    Ok(if report.passed() {
        ExitCode::Success
    } else {
        ExitCode::RegressionFailure
    })
}

/// Parse measures from `file`, or stdin when no file is given.
fn read_measures(file: Option<&Path>, input: InputKind) -> Result<MeasureSet, Error> {
    match file {
        Some(path) => {
            let file = File::open(path).map_err(|e| Error::Io {
                path: path.to_path_buf(),
                source: e,
            })?;
            measure::parse(BufReader::new(file), input)
        }
        None => measure::parse(std::io::stdin().lock(), input),
    }
}
