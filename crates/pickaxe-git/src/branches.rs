// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Branch membership of commits

use serde::{Deserialize, Serialize};

use crate::error::GitError;

/// Label rendered for [`Branches::NotApplicable`]
pub const NOT_APPLICABLE: &str = "N/A";

/// Branches that contain a commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind", content = "names")]
pub enum Branches {
    /// Short names of local and remote-tracking branches, never empty
    Known(Vec<String>),
    /// Resolution was skipped, failed, or found nothing
    NotApplicable,
}

impl Branches {
    /// Wrap a list of names, mapping an empty list to [`Branches::NotApplicable`]
    #[must_use]
    pub fn from_names(names: Vec<String>) -> Self {
        if names.is_empty() {
            Self::NotApplicable
        } else {
            Self::Known(names)
        }
    }

    /// Names for display, `["N/A"]` for the sentinel
    #[must_use]
    pub fn labels(&self) -> Vec<&str> {
        match self {
            Self::Known(names) => names.iter().map(String::as_str).collect(),
            Self::NotApplicable => vec![NOT_APPLICABLE],
        }
    }
}

/// Answers which branches contain a commit
pub trait BranchResolver {
    /// Short names of every local and remote-tracking branch containing `hash`
    ///
    /// Symbolic refs such as `origin/HEAD` are not included.
    ///
    /// # Errors
    ///
    /// Returns `GitError` if the commit or the branch list cannot be read.
    fn branches_containing(&self, hash: &str) -> Result<Vec<String>, GitError>;

    /// Resolve `hash`, degrading errors and empty answers to the sentinel
    fn resolve(&self, hash: &str) -> Branches {
        match self.branches_containing(hash) {
            Ok(names) => Branches::from_names(names),
            Err(e) => {
                tracing::warn!(hash = %hash, error = %e, "Branch resolution failed");
                Branches::NotApplicable
            }
        }
    }
}

impl<F> BranchResolver for F
where
    F: Fn(&str) -> Result<Vec<String>, GitError>,
{
    fn branches_containing(&self, hash: &str) -> Result<Vec<String>, GitError> {
        self(hash)
    }
}
