// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Report rendering
//!
//! HTML reports are produced by filling two placeholders in a template;
//! JSON reports serialize the findings directly.

use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};
use pickaxe_git::{BranchSpec, DisplayFinding, Finding, escape_html};
use serde::Serialize;
use thiserror::Error;

/// Placeholder replaced with the escaped search string
pub const SEARCH_PLACEHOLDER: &str = "{{ SEARCH_STRING }}";

/// Placeholder replaced with the results table
pub const ROWS_PLACEHOLDER: &str = "{{ TABLE_ROWS }}";

/// Built-in HTML template
pub const DEFAULT_TEMPLATE: &str = include_str!("../templates/report.html");

/// Characters of the search string used in default file names
const FILE_NAME_SEARCH_CHARS: usize = 20;

/// Report errors
#[derive(Debug, Error)]
pub enum ReportError {
    /// Template could not be read
    #[error("Could not read HTML template {path}: {source}")]
    TemplateRead {
        /// Template path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// Report could not be written
    #[error("Could not write report {path}: {source}")]
    Write {
        /// Report path
        path: PathBuf,
        /// Underlying IO error
        source: std::io::Error,
    },

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// JSON report document
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// The text that was searched for
    pub search_string: &'a str,
    /// History that was searched
    pub branches: &'a BranchSpec,
    /// When the report was produced
    pub generated_at: DateTime<Local>,
    /// Findings, oldest first
    pub findings: &'a [Finding],
}

/// Load a template from disk, or the built-in one
///
/// # Errors
///
/// Returns `ReportError::TemplateRead` if the file cannot be read.
pub fn load_template(path: Option<&Path>) -> Result<String, ReportError> {
    match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ReportError::TemplateRead {
            path: path.to_path_buf(),
            source,
        }),
        None => Ok(DEFAULT_TEMPLATE.to_string()),
    }
}

/// Fill `template` with the search string and a table of findings
///
/// The search placeholder is replaced in the template text only, so values
/// inside the table are never rewritten.
#[must_use]
pub fn render_html(template: &str, search: &str, findings: &[DisplayFinding]) -> String {
    let escaped_search = escape_html(search);
    let table = render_table(findings);

    template
        .split(ROWS_PLACEHOLDER)
        .map(|segment| segment.replace(SEARCH_PLACEHOLDER, &escaped_search))
        .collect::<Vec<_>>()
        .join(&table)
}

/// Results table, or a notice when there are no findings
#[must_use]
pub fn render_table(findings: &[DisplayFinding]) -> String {
    if findings.is_empty() {
        return concat!(
            r#"<p class="alert alert-warning mt-3">"#,
            "No commits found introducing this specific string based on the diff analysis.",
            "</p>"
        )
        .to_string();
    }

    let mut html = format!(
        r#"<p class="text-muted">Found {} commit(s).</p>"#,
        findings.len()
    );
    html.push_str(concat!(
        r#"<div class="table-responsive mt-3"><table class="table table-striped table-bordered table-hover">"#,
        r#"<thead class="table-dark"><tr>"#,
        r#"<th scope="col" style="width: 15%;">Commit Date</th>"#,
        r#"<th scope="col" style="width: 25%;">Commit Hash</th>"#,
        r#"<th scope="col" style="width: 15%;">Branches</th>"#,
        r#"<th scope="col" style="width: 10%;">Author</th>"#,
        r#"<th scope="col" style="width: 15%;">Subject</th>"#,
        r#"<th scope="col" style="width: 20%;">Context (Added Lines)</th>"#,
        "</tr></thead><tbody>"
    ));

    for finding in findings {
        render_row(&mut html, finding);
    }

    html.push_str("</tbody></table></div>");
    html
}

fn render_row(html: &mut String, finding: &DisplayFinding) {
    let branches: String = finding
        .branches
        .iter()
        .map(|b| format!("<span>{b}</span>"))
        .collect();
    let context = finding
        .evidence
        .iter()
        .map(|line| format!(r#"<code class="context-code">{line}</code>"#))
        .collect::<Vec<_>>()
        .join("<br>");

    html.push_str(&format!(
        concat!(
            "\n<tr>",
            "<td>{date}</td>",
            "<td class=\"commit-hash-cell\">",
            "<span class=\"commit-hash\">{hash}</span>",
            "<button class=\"btn btn-outline-secondary btn-sm copy-btn\" data-hash=\"{hash}\" ",
            "onclick=\"copyToClipboard(this)\" title=\"Copy hash to clipboard\">Copy</button>",
            "</td>",
            "<td><span class=\"branch-list\">{branches}</span></td>",
            "<td>{author}</td>",
            "<td>{subject}</td>",
            "<td>{context}</td>",
            "</tr>"
        ),
        date = finding.date,
        hash = finding.hash,
        branches = branches,
        author = finding.author,
        subject = finding.subject,
        context = context,
    ));
}

/// Serialize findings as a pretty-printed JSON document
///
/// # Errors
///
/// Returns `ReportError::Json` if serialization fails.
pub fn render_json(
    search: &str,
    branches: &BranchSpec,
    findings: &[Finding],
    generated_at: DateTime<Local>,
) -> Result<String, ReportError> {
    let report = JsonReport {
        search_string: search,
        branches,
        generated_at,
        findings,
    };
    Ok(serde_json::to_string_pretty(&report)?)
}

/// Default report name: `git_search_<search>_<YYYYmmdd_HHMMSS>.<ext>`
///
/// Only the first 20 characters of the search string are used, with
/// anything that is not alphanumeric replaced by `_`.
#[must_use]
pub fn default_output_name(search: &str, extension: &str, now: DateTime<Local>) -> PathBuf {
    let safe: String = search
        .chars()
        .take(FILE_NAME_SEARCH_CHARS)
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    PathBuf::from(format!(
        "git_search_{safe}_{}.{extension}",
        now.format("%Y%m%d_%H%M%S")
    ))
}

/// Write report contents to `path`
///
/// # Errors
///
/// Returns `ReportError::Write` if the file cannot be written.
pub fn write_report(path: &Path, contents: &str) -> Result<(), ReportError> {
    std::fs::write(path, contents).map_err(|source| ReportError::Write {
        path: path.to_path_buf(),
        source,
    })
}
