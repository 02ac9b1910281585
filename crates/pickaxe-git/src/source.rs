// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Pickaxe log source
//!
//! `git log -S` has no libgit2 equivalent, so the log query shells out to
//! the `git` binary and captures its output.

use std::fmt;
use std::path::PathBuf;
use std::process::Command;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::GitError;
use crate::parser::LOG_FORMAT;

/// Name of the git executable
const GIT_COMMAND: &str = "git";

/// Stderr fragments git prints for a revision that does not exist
const BAD_REVISION_PATTERNS: &[&str] = &[
    "unknown revision or path not in the working tree",
    "bad revision",
    "ambiguous argument",
];

/// Which history the pickaxe query walks
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BranchSpec {
    /// Every ref (`--all`)
    #[default]
    All,
    /// A single branch or revision
    Named(String),
}

impl BranchSpec {
    /// Build from user input, where `--all` or a blank value means every ref
    #[must_use]
    pub fn parse(value: &str) -> Self {
        let value = value.trim();
        if value.is_empty() || value == "--all" {
            Self::All
        } else {
            Self::Named(value.to_string())
        }
    }

    /// The argument passed to `git log`
    #[must_use]
    pub fn as_arg(&self) -> &str {
        match self {
            Self::All => "--all",
            Self::Named(name) => name,
        }
    }
}

impl fmt::Display for BranchSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_arg())
    }
}

/// What to search for and where
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Literal text whose introduction is being traced
    pub search_string: String,
    /// History to search
    pub branches: BranchSpec,
}

impl SearchQuery {
    /// Create a query over the given branches
    #[must_use]
    pub fn new(search_string: impl Into<String>, branches: BranchSpec) -> Self {
        Self {
            search_string: search_string.into(),
            branches,
        }
    }
}

/// Produces the raw pickaxe log for a query
pub trait LogSource {
    /// Commits on `branches` where the occurrence count of `search` changed
    ///
    /// Each record is framed by [`crate::parser::RECORD_SEPARATOR`]. The log
    /// is returned undecoded; blank output means no commit matched.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` when git is unavailable,
    /// `GitError::BadRevision` for an unknown branch, and
    /// `GitError::CommandFailed` for any other failure.
    fn query_log(&self, branches: &BranchSpec, search: &str) -> Result<Vec<u8>, GitError>;
}

/// Runs git commands in a repository directory
#[derive(Debug, Clone)]
pub struct GitCli {
    repo_path: PathBuf,
}

impl GitCli {
    /// Create an executor for the repository at `repo_path`
    #[must_use]
    pub fn new(repo_path: impl Into<PathBuf>) -> Self {
        Self {
            repo_path: repo_path.into(),
        }
    }

    /// Run git with the given arguments and return stdout as text
    ///
    /// # Errors
    ///
    /// Same as [`GitCli::run_raw`].
    pub fn run(&self, args: &[&str]) -> Result<String, GitError> {
        let stdout = self.run_raw(args)?;
        Ok(String::from_utf8_lossy(&stdout).into_owned())
    }

    /// Run git with the given arguments and return stdout undecoded
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the directory is gone,
    /// `GitError::GitNotFound` if the binary is missing and
    /// `GitError::CommandFailed` on a non-zero exit.
    pub fn run_raw(&self, args: &[&str]) -> Result<Vec<u8>, GitError> {
        // spawning in a missing directory also reports NotFound
        if !self.repo_path.is_dir() {
            return Err(GitError::RepositoryNotFound {
                path: self.repo_path.display().to_string(),
            });
        }

        let output = Command::new(GIT_COMMAND)
            .args(args)
            .current_dir(&self.repo_path)
            .output()
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    GitError::GitNotFound
                } else {
                    GitError::Io(e)
                }
            })?;

        if output.status.success() {
            return Ok(output.stdout);
        }

        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        let exit_code = output.status.code().unwrap_or(-1);

        // `git log -S` may exit 1 silently when nothing matches
        if exit_code == 1
            && output.stdout.iter().all(u8::is_ascii_whitespace)
            && stderr.trim().is_empty()
        {
            return Ok(Vec::new());
        }

        Err(GitError::CommandFailed {
            command: format!("{GIT_COMMAND} {}", args.join(" ")),
            exit_code,
            stderr,
        })
    }

    /// Get the git version string, e.g. `2.43.0`
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` when git is not installed.
    pub fn version(&self) -> Result<String, GitError> {
        let output = self.run(&["--version"])?;
        let trimmed = output.trim();
        Ok(trimmed
            .strip_prefix("git version ")
            .unwrap_or(trimmed)
            .to_string())
    }

    /// Arguments for the pickaxe query
    #[must_use]
    pub fn log_args(branches: &BranchSpec, search: &str) -> Vec<String> {
        vec![
            "-c".to_string(),
            "core.quotePath=false".to_string(),
            "log".to_string(),
            branches.as_arg().to_string(),
            "--no-merges".to_string(),
            "--no-color".to_string(),
            "--no-ext-diff".to_string(),
            "--src-prefix=a/".to_string(),
            "--dst-prefix=b/".to_string(),
            format!("-S{search}"),
            "-p".to_string(),
            format!("--pretty={LOG_FORMAT}"),
            "--".to_string(),
        ]
    }
}

impl LogSource for GitCli {
    fn query_log(&self, branches: &BranchSpec, search: &str) -> Result<Vec<u8>, GitError> {
        let args = Self::log_args(branches, search);
        let args: Vec<&str> = args.iter().map(String::as_str).collect();
        debug!(branches = %branches, repo = %self.repo_path.display(), "Running pickaxe query");

        self.run_raw(&args).map_err(|e| match e {
            GitError::CommandFailed { stderr, .. }
                if BAD_REVISION_PATTERNS.iter().any(|p| stderr.contains(p)) =>
            {
                GitError::BadRevision {
                    spec: branches.to_string(),
                    stderr,
                }
            }
            other => other,
        })
    }
}

impl<F> LogSource for F
where
    F: Fn(&BranchSpec, &str) -> Result<Vec<u8>, GitError>,
{
    fn query_log(&self, branches: &BranchSpec, search: &str) -> Result<Vec<u8>, GitError> {
        self(branches, search)
    }
}
