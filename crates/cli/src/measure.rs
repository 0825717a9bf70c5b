// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Measures and the measure parser.
//!
//! A measure set is always sorted by name. Every merge in the crate walks two
//! sorted sets side by side, so the ordering is established here, once, when a
//! set is built.
//!
//! Two input kinds are understood:
//! - `csv`: one `name,value[,baseline]` record per line, baseline defaults to
//!   value. Fields may be double-quoted as in RFC 4180.
//! - `checkstyle`: an XML lint report; `<error>` elements are counted into a
//!   single `errors` measure

use std::borrow::Cow;
use std::io::{BufRead, Read};

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Name of the synthetic measure produced from a checkstyle report.
pub const CHECKSTYLE_MEASURE: &str = "errors";

/// A single named reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measure {
    pub name: String,
    pub value: i64,
    pub baseline: i64,
}

impl Measure {
    /// A fresh reading whose baseline equals its value.
    pub fn new(name: impl Into<String>, value: i64) -> Self {
        Self {
            name: name.into(),
            value,
            baseline: value,
        }
    }

    pub fn with_baseline(name: impl Into<String>, value: i64, baseline: i64) -> Self {
        Self {
            name: name.into(),
            value,
            baseline,
        }
    }
}

/// Measures sorted by name.
///
/// Duplicate names are kept; they surface downstream as merge anomalies.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MeasureSet(Vec<Measure>);

impl MeasureSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a set from measures in any order.
    pub fn from_unsorted(mut measures: Vec<Measure>) -> Self {
        measures.sort_by(|a, b| a.name.cmp(&b.name));
        Self(measures)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Measure> {
        self.0.iter()
    }

    pub fn as_slice(&self) -> &[Measure] {
        &self.0
    }

    pub fn into_vec(self) -> Vec<Measure> {
        self.0
    }

    /// Look up a measure by name.
    pub fn get(&self, name: &str) -> Option<&Measure> {
        self.0
            .binary_search_by(|m| m.name.as_str().cmp(name))
            .ok()
            .map(|i| &self.0[i])
    }

    /// Encode as note text: one `name,value,baseline` line per measure.
    pub fn to_note(&self) -> String {
        let mut out = String::new();
        for m in &self.0 {
            out.push_str(&format!("{},{},{}\n", quote_field(&m.name), m.value, m.baseline));
        }
        out
    }
}

impl<'a> IntoIterator for &'a MeasureSet {
    type Item = &'a Measure;
    type IntoIter = std::slice::Iter<'a, Measure>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Declared format of measurement input.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum InputKind {
    #[default]
    Csv,
    Checkstyle,
}

/// Parse measurement input of the given kind.
pub fn parse<R: BufRead>(input: R, kind: InputKind) -> Result<MeasureSet> {
    match kind {
        InputKind::Csv => parse_csv(input),
        InputKind::Checkstyle => parse_checkstyle(input),
    }
}

/// Parse `name,value[,baseline]` records. Blank lines are ignored.
pub fn parse_csv<R: BufRead>(mut input: R) -> Result<MeasureSet> {
    let mut text = String::new();
    input
        .read_to_string(&mut text)
        .map_err(|e| Error::MalformedInput(format!("read failed: {}", e)))?;
    parse_note(&text)
}

/// Parse measures from note text already held in memory.
pub fn parse_note(text: &str) -> Result<MeasureSet> {
    let mut measures = Vec::new();
    let mut rest = text;
    let mut line_no = 1;

    while !rest.is_empty() {
        let (fields, consumed) = read_record(rest, line_no)?;
        if let Some(measure) = measure_from_fields(&fields, line_no)? {
            measures.push(measure);
        }
        line_no += rest[..consumed].matches('\n').count();
        rest = &rest[consumed..];
    }

    Ok(MeasureSet::from_unsorted(measures))
}

/// A field as read: unquoted fields are trimmed, quoted ones kept verbatim.
struct Field {
    text: String,
    quoted: bool,
}

/// Read one record from the front of `text`. Returns its fields and the
/// number of bytes consumed, including the line terminator.
///
/// A quoted field may contain commas, line breaks, and `""` for a quote.
fn read_record(text: &str, line_no: usize) -> Result<(Vec<Field>, usize)> {
    let mut fields = Vec::new();
    let mut current = String::new();
    let mut quoted = false;
    let mut in_quotes = false;
    let mut chars = text.char_indices().peekable();

    while let Some((idx, c)) = chars.next() {
        if in_quotes {
            if c != '"' {
                current.push(c);
            } else if matches!(chars.peek(), Some((_, '"'))) {
                chars.next();
                current.push('"');
            } else {
                in_quotes = false;
            }
            continue;
        }

        match c {
            ',' | '\n' => {
                fields.push(finish_field(&mut current, quoted));
                quoted = false;
                if c == '\n' {
                    return Ok((fields, idx + 1));
                }
            }
            '"' if !quoted && current.trim().is_empty() => {
                current.clear();
                quoted = true;
                in_quotes = true;
            }
            _ if quoted && !c.is_whitespace() => {
                return Err(Error::MalformedInput(format!(
                    "line {}: unexpected {:?} after quoted field",
                    line_no, c
                )));
            }
            _ if quoted => {}
            '"' => {
                return Err(Error::MalformedInput(format!(
                    "line {}: bare \" in unquoted field",
                    line_no
                )));
            }
            _ => current.push(c),
        }
    }

    if in_quotes {
        return Err(Error::MalformedInput(format!(
            "line {}: unterminated quoted field",
            line_no
        )));
    }
    fields.push(finish_field(&mut current, quoted));
    Ok((fields, text.len()))
}

fn finish_field(current: &mut String, quoted: bool) -> Field {
    let text = std::mem::take(current);
    if quoted {
        Field { text, quoted }
    } else {
        Field {
            text: text.trim().to_string(),
            quoted,
        }
    }
}

fn measure_from_fields(fields: &[Field], line_no: usize) -> Result<Option<Measure>> {
    if matches!(fields, [Field { text, quoted: false }] if text.is_empty()) {
        return Ok(None);
    }

    if fields.len() < 2 {
        return Err(Error::MalformedInput(format!(
            "line {}: expected name,value[,baseline], got {:?}",
            line_no,
            fields.first().map(|f| f.text.as_str()).unwrap_or_default()
        )));
    }

    let value = parse_int(&fields[1].text, line_no)?;
    let baseline = match fields.get(2) {
        Some(field) => parse_int(&field.text, line_no)?,
        None => value,
    };

    Ok(Some(Measure::with_baseline(fields[0].text.as_str(), value, baseline)))
}

/// Quote a CSV field when it would not read back unchanged.
pub fn quote_field(field: &str) -> Cow<'_, str> {
    let needs_quotes = field.contains([',', '"', '\r', '\n'])
        || field.starts_with(char::is_whitespace)
        || field.ends_with(char::is_whitespace);
    if needs_quotes {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

fn parse_int(field: &str, line_no: usize) -> Result<i64> {
    field.parse().map_err(|_| {
        Error::MalformedInput(format!("line {}: invalid integer {:?}", line_no, field))
    })
}

/// Count `<error>` elements in a checkstyle report.
///
/// This is a token scan, not an XML parse: malformed documents yield a
/// best-effort count instead of an error. Comments and CDATA sections are
/// skipped.
pub fn parse_checkstyle<R: Read>(mut input: R) -> Result<MeasureSet> {
    let mut buf = Vec::new();
    input
        .read_to_end(&mut buf)
        .map_err(|e| Error::MalformedInput(format!("read failed: {}", e)))?;

    let count = count_elements(&buf, b"error");
    tracing::debug!(count, "counted checkstyle errors");

    Ok(MeasureSet::from_unsorted(vec![Measure::new(
        CHECKSTYLE_MEASURE,
        count as i64,
    )]))
}

/// Count start (or self-closing) tags whose local name is `tag`, with or
/// without a namespace prefix.
fn count_elements(doc: &[u8], tag: &[u8]) -> usize {
    let mut count = 0;
    let mut pos = 0;

    while let Some(off) = memchr::memchr(b'<', &doc[pos..]) {
        let start = pos + off;
        let rest = &doc[start + 1..];

        if rest.starts_with(b"!--") {
            pos = skip_past(doc, start, b"-->");
            continue;
        }
        if rest.starts_with(b"![CDATA[") {
            pos = skip_past(doc, start, b"]]>");
            continue;
        }

        if local_name(rest) == tag {
            count += 1;
        }
        pos = start + 1;
    }

    count
}

/// Local part of the tag name at the start of `rest`: `cs:error` gives `error`.
fn local_name(rest: &[u8]) -> &[u8] {
    let end = rest
        .iter()
        .position(|b| matches!(b, b' ' | b'\t' | b'\r' | b'\n' | b'/' | b'>' | b'<'))
        .unwrap_or(rest.len());
    let name = &rest[..end];
    match memchr::memrchr(b':', name) {
        Some(colon) => &name[colon + 1..],
        None => name,
    }
}

/// Position just after the next `terminator` following `from`, or end of input.
fn skip_past(doc: &[u8], from: usize, terminator: &[u8]) -> usize {
    match memchr::memmem::find(&doc[from..], terminator) {
        Some(off) => from + off + terminator.len(),
        None => doc.len(),
    }
}

#[cfg(test)]
#[path = "measure_tests.rs"]
mod tests;
