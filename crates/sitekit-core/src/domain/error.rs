// ============================================================================
// domain/error.rs - LAYOUT / CATALOGUE ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Everything here is detected while *building* the layout or resolving a
/// task name, before any external tool runs.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Path Errors
    // ========================================================================
    #[error("Absolute paths not allowed: {path}")]
    AbsolutePathNotAllowed { path: String },

    #[error("Path escapes its root directory: {path}")]
    PathEscapesRoot { path: String },

    // ========================================================================
    // Glob Errors
    // ========================================================================
    #[error("Invalid glob '{pattern}': {reason}")]
    InvalidGlob { pattern: String, reason: String },

    #[error("Group '{group}' has no glob patterns")]
    EmptyPatternSet { group: String },

    // ========================================================================
    // Task Catalogue Errors
    // ========================================================================
    #[error("Task '{name}' is already registered")]
    DuplicateTask { name: String },

    #[error("Unknown task: {name}")]
    UnknownTask { name: String },

    #[error("Watch group '{group}' cannot trigger the '{task}' task")]
    InvalidWatchBinding { group: String, task: String },

    // ========================================================================
    // Constraint Violations
    // ========================================================================
    #[error("Required field missing: {field}")]
    MissingRequiredField { field: &'static str },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::AbsolutePathNotAllowed { path } | Self::PathEscapesRoot { path } => vec![
                format!("'{}' must be relative to the output directory", path),
                "Destinations look like 'assets/css/main.css'".into(),
            ],
            Self::InvalidGlob { pattern, .. } => vec![
                format!("Fix the glob pattern '{}'", pattern),
                "Examples: '_assets/**/*.less', 'images/**', '*.html'".into(),
            ],
            Self::EmptyPatternSet { group } => vec![format!(
                "Give group '{}' at least one pattern or remove it",
                group
            )],
            Self::UnknownTask { .. } => vec![
                "List registered tasks: sitekit list".into(),
                "Tasks: less-build, assets-copy, jekyll-build, watch".into(),
            ],
            Self::InvalidWatchBinding { group, .. } => vec![format!(
                "Bind '{}' to less-build, assets-copy or jekyll-build",
                group
            )],
            _ => vec!["Check the configuration file (sitekit config path)".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DuplicateTask { .. } => ErrorCategory::Internal,
            _ => ErrorCategory::Validation,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Internal,
}
