//! Error handling for the Stencil CLI.
//!
//! Provides structured errors with:
//! - User-friendly messages
//! - Actionable suggestions
//! - Exit code mapping

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use stencil_core::{application::ApplicationError, domain::DomainError, error::StencilError};

// Re-export so callers only need `use crate::error::*`.
pub use stencil_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

/// CLI error types.
#[derive(Debug, Error)]
pub enum CliError {
    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No template distribution directory could be found.
    #[error("No templates directory found")]
    TemplatesNotFound { searched: Vec<PathBuf> },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `stencil-core`.
    #[error("Scaffolding failed: {0}")]
    Core(#[from] StencilError),

    // ── System errors ──────────────────────────────────────────────────────
    /// An I/O operation failed.
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl From<DomainError> for CliError {
    fn from(err: DomainError) -> Self {
        CliError::Core(err.into())
    }
}

impl From<ApplicationError> for CliError {
    fn from(err: ApplicationError) -> Self {
        CliError::Core(err.into())
    }
}

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Run 'stencil config path' to see which file is read".into(),
                "Use 'stencil init --force' to write a fresh default config".into(),
            ],

            Self::TemplatesNotFound { searched } => {
                let mut suggestions = vec!["Searched:".to_owned()];
                suggestions.extend(searched.iter().map(|p| format!("  • {}", p.display())));
                suggestions.push("Pass --templates <DIR> or set STENCIL_TEMPLATES_DIR".into());
                suggestions
            }

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and logging.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::TemplatesNotFound { .. } => ErrorCategory::NotFound,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Conflict => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// A failed external unit's own status is passed through; every other
    /// failure exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::Core(core) => core
                .unit_exit_code()
                .and_then(|code| u8::try_from(code).ok())
                .filter(|code| *code != 0)
                .unwrap_or(1),
            _ => 1,
        }
    }

    /// Format the error for display with colors and suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        let mut output = String::new();

        // Error header
        output.push_str(&format!(
            "\n{} {}\n\n",
            "✗".red().bold(),
            "Error:".red().bold()
        ));

        // Main error message
        output.push_str(&format!("  {}\n", self.to_string().red()));

        // Error chain (if verbose)
        if verbose {
            let mut source = self.source();
            while let Some(err) = source {
                output.push_str(&format!(
                    "\n  {} {}\n",
                    "→".dimmed(),
                    err.to_string().dimmed()
                ));
                source = err.source();
            }
        }

        // Suggestions
        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            output.push_str(&format!("\n{}\n", "Suggestions:".yellow().bold()));
            for suggestion in suggestions {
                output.push_str(&format!("  {}\n", suggestion));
            }
        }

        // Hint to re-run with -v
        if !verbose {
            output.push('\n');
            output.push_str(&format!(
                "{} {}\n",
                "\u{2139}".blue(), // ℹ
                "Use -v / --verbose for more details.".dimmed(),
            ));
        }

        output
    }

    /// Plain-text version of [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        let mut out = String::new();
        out.push_str(&format!("\nError: {}\n", self));

        if verbose {
            let mut src = self.source();
            while let Some(err) = src {
                out.push_str(&format!("  Caused by: {err}\n"));
                src = err.source();
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str("\nSuggestions:\n");
            for s in &suggestions {
                out.push_str(&format!("  {s}\n"));
            }
        }

        if !verbose {
            out.push_str("\nUse -v / --verbose for more details.\n");
        }

        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::External => tracing::error!("Sub-unit failure: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::Internal => tracing::error!("Internal error: {}", self),
        }

        if let Some(source) = self.source() {
            tracing::debug!("Caused by: {}", source);
        }
    }
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, conflicts).
    UserError,
    /// Resource not found.
    NotFound,
    /// A chained scaffolder failed.
    External,
    /// Configuration error.
    Configuration,
    /// Internal/system error.
    Internal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use stencil_core::domain::ProjectName;

    fn core(err: ApplicationError) -> CliError {
        err.into()
    }

    // ── suggestions ───────────────────────────────────────────────────────

    #[test]
    fn templates_not_found_lists_searched_paths() {
        let err = CliError::TemplatesNotFound {
            searched: vec![PathBuf::from("templates"), PathBuf::from("/opt/t")],
        };
        let suggestions = err.suggestions();
        assert!(suggestions.iter().any(|s| s.contains("/opt/t")));
        assert!(suggestions.iter().any(|s| s.contains("STENCIL_TEMPLATES_DIR")));
    }

    #[test]
    fn invalid_name_suggestions_non_empty() {
        let err = CliError::from(ProjectName::new("Bad-Name").unwrap_err());
        assert!(!err.suggestions().is_empty());
        assert_eq!(err.category(), ErrorCategory::UserError);
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn sub_unit_status_passes_through() {
        let err = core(ApplicationError::SubUnitFailed {
            label: "infra".into(),
            code: 2,
        });
        assert_eq!(err.exit_code(), 2);
        assert_eq!(err.category(), ErrorCategory::External);
    }

    #[test]
    fn out_of_range_status_maps_to_one() {
        for code in [0, -1, 300] {
            let err = core(ApplicationError::SubUnitFailed {
                label: "api".into(),
                code,
            });
            assert_eq!(err.exit_code(), 1, "status {code}");
        }
    }

    #[test]
    fn other_failures_exit_one() {
        let conflict = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/shop"),
        });
        let missing = core(ApplicationError::MissingDependency {
            label: "infra".into(),
            path: PathBuf::from("/opt/infra"),
        });
        let config = CliError::ConfigError {
            message: "x".into(),
            source: None,
        };
        let io = CliError::IoError {
            message: "x".into(),
            source: io::Error::other("e"),
        };

        for err in [conflict, missing, config, io] {
            assert_eq!(err.exit_code(), 1, "{err}");
        }
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = core(ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        });
        let s = err.format_plain(false);
        assert!(s.contains("Error:"));
        assert!(s.contains("/tmp/x"));
        assert!(s.contains("Suggestions:"));
        assert!(s.contains("--verbose"));
    }

    #[test]
    fn format_plain_verbose_shows_cause() {
        let err = CliError::IoError {
            message: "writing config".into(),
            source: io::Error::other("disk full"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: disk full"));
        assert!(!s.contains("--verbose"));
    }
}
