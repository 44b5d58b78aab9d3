//! Unified error handling for sitekit-core.
//!
//! This module provides a unified error type that wraps domain and application
//! errors, with rich context and user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;

/// Root error type for sitekit-core operations.
#[derive(Debug, Error, Clone)]
pub enum SiteKitError {
    /// Errors from the domain layer (layout or task catalogue).
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// Errors from the application layer (running a task).
    #[error("{0}")]
    Application(#[from] ApplicationError),

    /// Unexpected internal errors (bugs).
    #[error("Internal error: {message}. This is a bug, please report it.")]
    Internal { message: String },
}

impl SiteKitError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
            Self::Internal { .. } => vec![
                "This appears to be a bug in sitekit".into(),
                "Please report this issue at: https://github.com/cosecruz/sitekit/issues".into(),
            ],
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Internal => ErrorCategory::Internal,
            },
            Self::Application(e) => e.category(),
            Self::Internal { .. } => ErrorCategory::Internal,
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    NotFound,
    Configuration,
    /// An external tool ran and reported failure.
    External,
    Internal,
}

/// Convenient result type alias.
pub type SiteKitResult<T> = Result<T, SiteKitError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_validation_maps_to_validation() {
        let err: SiteKitError = DomainError::UnknownTask {
            name: "deploy".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);
        assert!(err.suggestions().iter().any(|s| s.contains("sitekit list")));
    }

    #[test]
    fn application_message_is_not_prefixed() {
        let err: SiteKitError = ApplicationError::GeneratorFailed { status: Some(1) }.into();
        assert_eq!(err.to_string(), "Site generator failed (exit status 1)");
    }

    #[test]
    fn internal_errors_point_at_the_issue_tracker() {
        let err = SiteKitError::Internal {
            message: "watch dispatched to itself".into(),
        };
        assert_eq!(err.category(), ErrorCategory::Internal);
        assert!(err.to_string().contains("This is a bug"));
    }
}
