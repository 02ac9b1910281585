//! Configuration for pickaxe-report
//!
//! Everything the run needs is gathered here once; the search pipeline only
//! receives the resulting [`SearchQuery`] and an opened repository.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use pickaxe_git::{BranchSpec, SearchQuery};

/// Find the commits that introduced a string and render them as a report
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "pickaxe-report")]
#[command(version, about, long_about = None)]
pub struct Config {
    /// Text to search for (matched literally)
    pub search: String,

    /// Branch or revision to search
    ///
    /// Searches every ref when omitted or set to `--all`.
    #[arg(short, long, env = "PICKAXE_BRANCH", allow_hyphen_values = true)]
    pub branch: Option<String>,

    /// Path to the git repository
    ///
    /// Defaults to the repository containing the current directory.
    #[arg(short, long, env = "PICKAXE_REPO")]
    pub repo: Option<PathBuf>,

    /// Report file to write
    ///
    /// Defaults to git_search_<search>_<timestamp>.<ext> in the current directory.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Report format
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Html)]
    pub format: ReportFormat,

    /// HTML template containing {{ SEARCH_STRING }} and {{ TABLE_ROWS }}
    #[arg(long)]
    pub template: Option<PathBuf>,

    /// Do not open the report once written
    #[arg(long, default_value = "false")]
    pub no_open: bool,

    /// Enable verbose logging (debug level)
    #[arg(short, long, default_value = "false")]
    pub verbose: bool,

    /// Quiet mode - only errors and warnings are logged
    #[arg(short, long, default_value = "false")]
    pub quiet: bool,
}

/// Output format of the report
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Standalone HTML page
    #[default]
    Html,
    /// Machine-readable JSON document
    Json,
}

impl ReportFormat {
    /// File extension for this format
    #[must_use]
    pub fn extension(self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Json => "json",
        }
    }
}

impl Config {
    /// Which history to search
    #[must_use]
    pub fn branch_spec(&self) -> BranchSpec {
        self.branch
            .as_deref()
            .map(BranchSpec::parse)
            .unwrap_or_default()
    }

    /// The query handed to the search pipeline
    #[must_use]
    pub fn query(&self) -> SearchQuery {
        SearchQuery::new(self.search.clone(), self.branch_spec())
    }

    /// Directory to start repository discovery from
    ///
    /// Returns `None` if no repo is specified and the current directory
    /// cannot be determined.
    #[must_use]
    pub fn repo_path(&self) -> Option<PathBuf> {
        self.repo.clone().or_else(|| std::env::current_dir().ok())
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The search string is empty
    /// - The branch looks like an option other than `--all`
    /// - The repo path is specified but doesn't exist or isn't a directory
    /// - The template is specified but doesn't exist
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.search.is_empty() {
            return Err(ConfigError::EmptySearch);
        }

        if let BranchSpec::Named(name) = self.branch_spec()
            && name.starts_with('-')
        {
            return Err(ConfigError::InvalidBranch(name));
        }

        if let Some(repo) = &self.repo {
            if !repo.exists() {
                return Err(ConfigError::RepoNotFound(repo.clone()));
            }
            if !repo.is_dir() {
                return Err(ConfigError::RepoNotDirectory(repo.clone()));
            }
        }

        if let Some(template) = &self.template
            && !template.is_file()
        {
            return Err(ConfigError::TemplateNotFound(template.clone()));
        }

        Ok(())
    }

    /// Get the log level based on verbose/quiet flags
    #[must_use]
    pub fn log_level(&self) -> tracing::Level {
        if self.verbose {
            tracing::Level::DEBUG
        } else if self.quiet {
            tracing::Level::WARN
        } else {
            tracing::Level::INFO
        }
    }

    /// Whether to hand the finished report to a viewer
    #[must_use]
    pub fn open_report(&self) -> bool {
        !self.no_open
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Search string is empty
    #[error("Search string must not be empty")]
    EmptySearch,

    /// Branch name that git would read as an option
    #[error("Invalid branch '{0}': only --all may start with '-'")]
    InvalidBranch(String),

    /// Repository path not found
    #[error("Repository path not found: {0}")]
    RepoNotFound(PathBuf),

    /// Repository path is not a directory
    #[error("Repository path is not a directory: {0}")]
    RepoNotDirectory(PathBuf),

    /// Template file not found
    #[error("Template file not found: {0}")]
    TemplateNotFound(PathBuf),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(search: &str) -> Config {
        Config {
            search: search.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert!(config.branch.is_none());
        assert!(config.repo.is_none());
        assert!(config.output.is_none());
        assert_eq!(config.format, ReportFormat::Html);
        assert!(config.open_report());
        assert!(!config.verbose);
        assert!(!config.quiet);
    }

    #[test]
    fn test_branch_spec_default_is_all() {
        assert_eq!(config("x").branch_spec(), BranchSpec::All);
    }

    #[test]
    fn test_branch_spec_all_flag() {
        let config = Config {
            branch: Some("--all".to_string()),
            ..config("x")
        };
        assert_eq!(config.branch_spec(), BranchSpec::All);
    }

    #[test]
    fn test_query() {
        let config = Config {
            branch: Some("develop".to_string()),
            ..config("needle")
        };
        assert_eq!(
            config.query(),
            SearchQuery::new("needle", BranchSpec::Named("develop".to_string()))
        );
    }

    #[test]
    fn test_repo_path_default() {
        assert!(config("x").repo_path().is_some());
    }

    #[test]
    fn test_repo_path_custom() {
        let custom = PathBuf::from("/tmp");
        let config = Config {
            repo: Some(custom.clone()),
            ..config("x")
        };
        assert_eq!(config.repo_path(), Some(custom));
    }

    #[test]
    fn test_log_level() {
        assert_eq!(config("x").log_level(), tracing::Level::INFO);
        let verbose = Config {
            verbose: true,
            ..config("x")
        };
        assert_eq!(verbose.log_level(), tracing::Level::DEBUG);
        let quiet = Config {
            quiet: true,
            ..config("x")
        };
        assert_eq!(quiet.log_level(), tracing::Level::WARN);
    }

    #[test]
    fn test_validate_empty_search() {
        assert!(matches!(config("").validate(), Err(ConfigError::EmptySearch)));
    }

    #[test]
    fn test_validate_option_like_branch() {
        let config = Config {
            branch: Some("--exec=evil".to_string()),
            ..config("x")
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidBranch(_))
        ));
    }

    #[test]
    fn test_validate_nonexistent_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/nonexistent/path/12345")),
            ..config("x")
        };
        assert!(matches!(config.validate(), Err(ConfigError::RepoNotFound(_))));
    }

    #[test]
    fn test_validate_missing_template() {
        let config = Config {
            template: Some(PathBuf::from("/nonexistent/template.html")),
            ..config("x")
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TemplateNotFound(_))
        ));
    }

    #[test]
    fn test_validate_named_branch_and_template() {
        let template = std::env::temp_dir().join(format!(
            "pickaxe-config-template-{}.html",
            std::process::id()
        ));
        std::fs::write(&template, "{{ TABLE_ROWS }}").expect("write template");
        let config = Config {
            branch: Some("feature/x-1".to_string()),
            template: Some(template.clone()),
            ..config("x")
        };
        let result = config.validate();
        let _ = std::fs::remove_file(&template);
        assert!(result.is_ok());
    }

    #[test]
    fn test_validate_valid_repo() {
        let config = Config {
            repo: Some(PathBuf::from("/tmp")),
            ..config("x")
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_format_extension() {
        assert_eq!(ReportFormat::Html.extension(), "html");
        assert_eq!(ReportFormat::Json.extension(), "json");
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Config::command().debug_assert();
    }
}
