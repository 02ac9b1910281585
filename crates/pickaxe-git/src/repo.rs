// Copyright (c) 2026 - present Nicholas D. Crosbie
// SPDX-License-Identifier: MIT

//! Repository access through `git2`
//!
//! Used to locate the repository and to answer branch membership by
//! ancestry, without spawning a `git branch --contains` per commit.

use std::path::Path;

use git2::{BranchType, ReferenceType, Repository};
use tracing::debug;

use crate::branches::BranchResolver;
use crate::error::GitError;

/// A git repository wrapper
pub struct GitRepo {
    repo: Repository,
}

impl GitRepo {
    /// Open a git repository at the given path
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if the path is not a git repository.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::open(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Discover and open a git repository containing the given path
    ///
    /// This walks up the directory tree to find a `.git` directory.
    ///
    /// # Errors
    ///
    /// Returns `GitError::RepositoryNotFound` if no repository is found.
    pub fn discover(path: impl AsRef<Path>) -> Result<Self, GitError> {
        let path = path.as_ref();
        let repo = Repository::discover(path).map_err(|_| GitError::RepositoryNotFound {
            path: path.display().to_string(),
        })?;
        Ok(Self { repo })
    }

    /// Check if the repository is bare
    #[must_use]
    pub fn is_bare(&self) -> bool {
        self.repo.is_bare()
    }

    /// Get the repository path (the `.git` directory)
    #[must_use]
    pub fn path(&self) -> &Path {
        self.repo.path()
    }

    /// Get the working directory path (None for bare repos)
    #[must_use]
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Directory git commands should run in
    #[must_use]
    pub fn command_dir(&self) -> &Path {
        self.workdir().unwrap_or_else(|| self.path())
    }

    /// Short names of branches of one type whose tip contains `commit`
    fn containing_of_type(
        &self,
        commit: git2::Oid,
        branch_type: BranchType,
    ) -> Result<Vec<String>, GitError> {
        let mut names = Vec::new();

        for entry in self.repo.branches(Some(branch_type))? {
            let (branch, _) = entry?;
            let reference = branch.get();

            // `origin/HEAD -> origin/main` style aliases
            if reference.kind() == Some(ReferenceType::Symbolic) {
                continue;
            }
            let Some(tip) = reference.target() else {
                continue;
            };
            if tip != commit && !self.repo.graph_descendant_of(tip, commit)? {
                continue;
            }
            if let Some(name) = branch.name()? {
                names.push(name.to_string());
            }
        }

        names.sort();
        Ok(names)
    }
}

impl BranchResolver for GitRepo {
    fn branches_containing(&self, hash: &str) -> Result<Vec<String>, GitError> {
        let commit = self
            .repo
            .revparse_single(hash)
            .and_then(|obj| obj.peel_to_commit())
            .map_err(|_| GitError::InvalidReference {
                reference: hash.to_string(),
            })?
            .id();

        let mut names = self.containing_of_type(commit, BranchType::Local)?;
        names.extend(self.containing_of_type(commit, BranchType::Remote)?);

        debug!(hash = %hash, branches = names.len(), "Resolved branch membership");
        Ok(names)
    }
}
