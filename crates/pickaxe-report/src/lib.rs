// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pickaxe-report library
//!
//! Wires configuration, the pickaxe search, report rendering and the viewer
//! hook together. Exposed as a library for integration tests.

pub mod config;
pub mod open;
pub mod report;

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Local;
use pickaxe_git::{DisplayFinding, GitCli, GitRepo, find_introductions};
use tracing::{debug, info};

use crate::config::{Config, ReportFormat};
use crate::report::{default_output_name, load_template, render_html, render_json, write_report};

/// Outcome of a successful run
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    /// Where the report was written
    pub report_path: PathBuf,
    /// Number of commits found introducing the string
    pub findings: usize,
}

/// Search the repository and write the report
///
/// # Errors
///
/// Fails on invalid configuration, a missing repository or git binary, a
/// rejected log query, or when the report cannot be written. A search with
/// no results still writes a report and succeeds.
pub fn run(config: &Config) -> Result<RunSummary> {
    config.validate()?;

    let start = config
        .repo_path()
        .context("Could not determine the current directory")?;
    let repo = GitRepo::discover(&start).context("Invalid git repository path")?;
    info!(path = %repo.command_dir().display(), "Using git repository");

    let cli = GitCli::new(repo.command_dir());
    let version = cli.version().context("Git is required")?;
    debug!(version = %version, "Found git");

    let query = config.query();
    let findings = find_introductions(&cli, &repo, &query)
        .with_context(|| format!("Failed to retrieve git log for '{}'", query.branches))?;

    let now = Local::now();
    let report_path = config.output.clone().unwrap_or_else(|| {
        default_output_name(&query.search_string, config.format.extension(), now)
    });

    let contents = match config.format {
        ReportFormat::Html => {
            let template = load_template(config.template.as_deref())?;
            let display: Vec<DisplayFinding> =
                findings.iter().map(DisplayFinding::from).collect();
            render_html(&template, &query.search_string, &display)
        }
        ReportFormat::Json => {
            render_json(&query.search_string, &query.branches, &findings, now)?
        }
    };
    write_report(&report_path, &contents)?;
    info!(
        path = %report_path.display(),
        findings = findings.len(),
        "Generated report"
    );

    if config.open_report() {
        open::open_report(&report_path);
    }

    Ok(RunSummary {
        report_path,
        findings: findings.len(),
    })
}
