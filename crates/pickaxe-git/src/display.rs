// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Markup-safe view of findings
//!
//! Every string in a [`DisplayFinding`] is HTML-escaped and can be embedded
//! in a document verbatim.

use chrono::{DateTime, FixedOffset, Local, TimeZone};
use serde::Serialize;

use crate::aggregate::Finding;
use crate::evidence::EvidenceLine;

/// Format used for parsed commit dates
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S %Z";

/// Escape the five HTML-significant characters
#[must_use]
pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#x27;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// A finding with every field pre-escaped for markup
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DisplayFinding {
    /// Full commit hash
    pub hash: String,
    /// Formatted date, or the raw git date when it could not be parsed
    pub date: String,
    /// Author name
    pub author: String,
    /// Commit subject
    pub subject: String,
    /// Branch names, `N/A` when none were resolved
    pub branches: Vec<String>,
    /// `<file>: <added line>` entries
    pub evidence: Vec<String>,
}

impl DisplayFinding {
    /// Escape a finding, formatting its date in `tz`
    #[must_use]
    pub fn with_timezone<Tz>(finding: &Finding, tz: &Tz) -> Self
    where
        Tz: TimeZone,
        Tz::Offset: std::fmt::Display,
    {
        Self {
            hash: escape_html(&finding.hash),
            date: escape_html(&display_date(
                finding.timestamp.as_ref(),
                &finding.timestamp_raw,
                tz,
            )),
            author: escape_html(&finding.author),
            subject: escape_html(&finding.subject),
            branches: finding
                .branches
                .labels()
                .into_iter()
                .map(escape_html)
                .collect(),
            evidence: finding.evidence.iter().map(display_evidence).collect(),
        }
    }
}

impl From<&Finding> for DisplayFinding {
    fn from(finding: &Finding) -> Self {
        Self::with_timezone(finding, &Local)
    }
}

fn display_date<Tz>(timestamp: Option<&DateTime<FixedOffset>>, raw: &str, tz: &Tz) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    match timestamp {
        Some(ts) => ts.with_timezone(tz).format(DATE_FORMAT).to_string(),
        None => raw.to_string(),
    }
}

fn display_evidence(line: &EvidenceLine) -> String {
    format!(
        "{}: {}",
        escape_html(&line.file),
        escape_html(line.display_text())
    )
}
