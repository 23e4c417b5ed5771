//! Application layer errors.
//!
//! These errors represent failures while materializing or composing, not
//! invalid inputs. Input errors are `DomainError` from `crate::domain`.

use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// A template root is missing or not a directory.
    #[error("Template root not found: {path}")]
    TemplateRootMissing { path: PathBuf },

    /// Project already exists at target location.
    #[error("Project already exists at {path}")]
    ProjectExists { path: PathBuf },

    /// A chained scaffolder could not be found where it is expected.
    #[error("{label} not found at {path}")]
    MissingDependency { label: String, path: PathBuf },

    /// A chained scaffolder ran and reported failure.
    #[error("{label} failed (exit {code})")]
    SubUnitFailed { label: String, code: i32 },

    /// A chained scaffolder could not be started.
    #[error("Failed to run {program}: {reason}")]
    ProcessFailed { program: PathBuf, reason: String },

    /// The fixup rename found no unit output to move.
    #[error("Cannot rename {from} to {to}: source does not exist")]
    RenameSourceMissing { from: PathBuf, to: PathBuf },
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have read/write permissions".into(),
                "Partially generated files were left in place for inspection".into(),
            ],
            Self::TemplateRootMissing { path } => vec![
                format!("Expected a template directory at {}", path.display()),
                "Set STENCIL_TEMPLATES_DIR or pass --templates <DIR>".into(),
                "Run 'stencil list' to see where each unit looks for templates".into(),
            ],
            Self::ProjectExists { path } => vec![
                format!("Directory already exists: {}", path.display()),
                "Choose a different project name or destination".into(),
                "Nothing was written".into(),
            ],
            Self::MissingDependency { label, path } => vec![
                format!("Install {} so that {} exists", label, path.display()),
                "Or remove units.<unit>.command from your config to use the bundled template"
                    .into(),
            ],
            Self::SubUnitFailed { label, .. } => vec![
                format!("Check the output of {} above for details", label),
                "Later steps were skipped; the partial project was left on disk".into(),
            ],
            Self::ProcessFailed { program, .. } => vec![
                format!("Ensure {} is executable", program.display()),
            ],
            Self::RenameSourceMissing { from, .. } => vec![
                format!("Expected the API unit to create {}", from.display()),
                "The unit may have changed its output layout".into(),
            ],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::FilesystemError { .. } => ErrorCategory::Internal,
            Self::TemplateRootMissing { .. } | Self::MissingDependency { .. } => {
                ErrorCategory::NotFound
            }
            Self::ProjectExists { .. } => ErrorCategory::Conflict,
            Self::SubUnitFailed { .. } | Self::ProcessFailed { .. } => ErrorCategory::External,
            Self::RenameSourceMissing { .. } => ErrorCategory::Internal,
        }
    }
}
