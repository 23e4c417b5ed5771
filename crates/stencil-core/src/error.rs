//! Unified error handling for Stencil Core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for Stencil Core operations.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StencilError {
    /// Errors from the domain layer (invalid inputs).
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Errors from the application layer (materialization failures).
    #[error(transparent)]
    Application(#[from] ApplicationError),
}

impl StencilError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }

    /// Exit status reported by a failed external unit, if that is what failed.
    pub fn unit_exit_code(&self) -> Option<i32> {
        match self {
            Self::Application(ApplicationError::SubUnitFailed { code, .. }) => Some(*code),
            _ => None,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Conflict,
    NotFound,
    External,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type StencilResult<T> = Result<T, StencilError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn unit_exit_code_only_for_sub_unit_failures() {
        let failed: StencilError = ApplicationError::SubUnitFailed {
            label: "api".into(),
            code: 2,
        }
        .into();
        assert_eq!(failed.unit_exit_code(), Some(2));

        let exists: StencilError = ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/x"),
        }
        .into();
        assert_eq!(exists.unit_exit_code(), None);
    }

    #[test]
    fn categories_follow_layer() {
        let name = DomainError::InvalidProjectName {
            name: "X".into(),
            reason: "r".into(),
        };
        assert_eq!(
            StencilError::from(name).category(),
            ErrorCategory::Validation
        );

        let missing: StencilError = ApplicationError::MissingDependency {
            label: "infra".into(),
            path: PathBuf::from("/opt/infra"),
        }
        .into();
        assert_eq!(missing.category(), ErrorCategory::NotFound);
    }

    #[test]
    fn display_is_transparent() {
        let err: StencilError = ApplicationError::ProjectExists {
            path: PathBuf::from("/tmp/shop"),
        }
        .into();
        assert_eq!(err.to_string(), "Project already exists at /tmp/shop");
    }
}
