// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Turning commit records into evidence-backed findings
//!
//! # Example
//!
//! ```no_run
//! use pickaxe_git::{BranchSpec, GitCli, GitRepo, SearchQuery, find_introductions};
//!
//! let repo = GitRepo::discover(".").expect("open repo");
//! let cli = GitCli::new(repo.command_dir());
//! let query = SearchQuery::new("TODO", BranchSpec::All);
//!
//! for finding in find_introductions(&cli, &repo, &query).expect("search") {
//!     println!("{} {}", finding.short_hash(), finding.subject);
//! }
//! ```

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::branches::{BranchResolver, Branches};
use crate::commit::CommitRecord;
use crate::error::GitError;
use crate::evidence::{EvidenceLine, extract_evidence};
use crate::parser::{RECORD_SEPARATOR, parse_log};
use crate::source::{LogSource, SearchQuery};

/// A commit proven to have added the search string
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    /// The full commit hash
    pub hash: String,
    /// Parsed committer date, `None` when it could not be parsed
    pub timestamp: Option<DateTime<FixedOffset>>,
    /// Committer date as git printed it
    pub timestamp_raw: String,
    /// Author name
    pub author: String,
    /// First line of the commit message
    pub subject: String,
    /// Branches containing the commit
    pub branches: Branches,
    /// Added lines containing the search string, never empty
    pub evidence: Vec<EvidenceLine>,
}

impl Finding {
    /// Build a finding, or `None` when there is no evidence
    #[must_use]
    pub fn new(
        record: CommitRecord,
        evidence: Vec<EvidenceLine>,
        branches: Branches,
    ) -> Option<Self> {
        if evidence.is_empty() {
            return None;
        }
        Some(Self {
            hash: record.hash,
            timestamp: record.timestamp,
            timestamp_raw: record.timestamp_raw,
            author: record.author,
            subject: record.subject,
            branches,
            evidence,
        })
    }

    /// Get the short hash (first 7 characters)
    #[must_use]
    pub fn short_hash(&self) -> &str {
        self.hash.get(..7).unwrap_or(&self.hash)
    }
}

/// Run the pickaxe query and aggregate its output
///
/// An empty result is not an error.
///
/// # Errors
///
/// Returns whatever fatal `GitError` the log source reports. Per-commit
/// problems are logged and never surface here.
pub fn find_introductions(
    source: &impl LogSource,
    resolver: &impl BranchResolver,
    query: &SearchQuery,
) -> Result<Vec<Finding>, GitError> {
    info!(
        search = %query.search_string,
        branches = %query.branches,
        "Searching for string introduction"
    );

    let raw = source.query_log(&query.branches, &query.search_string)?;
    if raw.iter().all(u8::is_ascii_whitespace) {
        info!("No commits found changing the occurrence of the search string");
        return Ok(Vec::new());
    }

    let records = parse_log(&raw, RECORD_SEPARATOR);
    info!(candidates = records.len(), "Analyzing diffs of candidate commits");

    let findings = collect_findings(records, &query.search_string, resolver);
    info!(
        findings = findings.len(),
        "Analysis complete, found commits introducing the string"
    );
    Ok(findings)
}

/// Keep the records that added `search`, resolve their branches, sort them
#[must_use]
pub fn collect_findings(
    records: Vec<CommitRecord>,
    search: &str,
    resolver: &impl BranchResolver,
) -> Vec<Finding> {
    let mut findings = Vec::new();

    for record in records {
        let evidence = extract_evidence(&record.diff_body, search);
        if evidence.is_empty() {
            debug!(hash = %record.hash, "No added line contains the search string, skipping");
            continue;
        }

        let branches = resolver.resolve(&record.hash);
        findings.extend(Finding::new(record, evidence, branches));
    }

    sort_findings(&mut findings);
    findings
}

/// Order findings oldest first, undated findings before all dated ones
///
/// The sort is stable, so equal dates keep log order.
pub fn sort_findings(findings: &mut [Finding]) {
    findings.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
}
