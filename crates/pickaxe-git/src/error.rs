// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Error types for pickaxe-git

use thiserror::Error;

/// Errors that abort a search
#[derive(Debug, Error)]
pub enum GitError {
    /// Error from git2 library
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),

    /// IO error while running git
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The `git` executable could not be spawned
    #[error("'git' command not found. Please ensure Git is installed and in your PATH")]
    GitNotFound,

    /// Repository not found at the specified path
    #[error("Repository not found: {path}")]
    RepositoryNotFound {
        /// The path that was searched for a repository
        path: String,
    },

    /// Invalid commit reference (branch, tag, or SHA)
    #[error("Invalid commit reference: {reference}")]
    InvalidReference {
        /// The reference string that could not be resolved
        reference: String,
    },

    /// The branch or revision given to the log query does not exist
    #[error("Bad revision '{spec}' (branch not found?)\n{stderr}")]
    BadRevision {
        /// The branch specifier passed to git
        spec: String,
        /// Stderr reported by git
        stderr: String,
    },

    /// Any other non-zero git exit
    #[error("Git command failed (exit code {exit_code}): {command}\n{stderr}")]
    CommandFailed {
        /// The command line that was attempted
        command: String,
        /// Process exit code, -1 when killed by a signal
        exit_code: i32,
        /// Stderr reported by git
        stderr: String,
    },
}

/// Errors for a single malformed commit record
///
/// These never abort a search: the record is logged and skipped.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The chunk had fewer than the five expected segments
    #[error("expected 5 segments (hash, date, author, subject, diff), found {found}")]
    MissingFields {
        /// Number of segments actually present
        found: usize,
    },

    /// The hash line was blank
    #[error("commit hash is empty")]
    EmptyHash,
}
