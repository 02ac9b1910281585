// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! pickaxe-git: find the commits that introduced a string
//!
//! `git log -S` reports every commit where the number of occurrences of a
//! string changed. This crate parses that log, keeps only the commits whose
//! diffs actually add a line containing the string, and attaches the added
//! lines as evidence along with the branches containing each commit.

#![warn(missing_docs)]

//! # Example
//!
//! ```no_run
//! use pickaxe_git::{BranchSpec, GitCli, GitRepo, SearchQuery, find_introductions};
//!
//! let repo = GitRepo::discover(".").expect("open repo");
//! let cli = GitCli::new(repo.command_dir());
//! let query = SearchQuery::new("FIXME", BranchSpec::All);
//! let findings = find_introductions(&cli, &repo, &query).expect("search");
//!
//! for f in findings {
//!     println!("{} - {} ({} lines)", f.short_hash(), f.subject, f.evidence.len());
//! }
//! ```

pub mod aggregate;
pub mod branches;
pub mod commit;
pub mod display;
pub mod error;
pub mod evidence;
pub mod parser;
pub mod repo;
pub mod source;

pub use aggregate::{Finding, collect_findings, find_introductions, sort_findings};
pub use branches::{BranchResolver, Branches};
pub use commit::CommitRecord;
pub use display::{DisplayFinding, escape_html};
pub use error::{GitError, ParseError};
pub use evidence::{EvidenceLine, extract_evidence};
pub use parser::{RECORD_SEPARATOR, parse_log};
pub use repo::GitRepo;
pub use source::{BranchSpec, GitCli, LogSource, SearchQuery};
