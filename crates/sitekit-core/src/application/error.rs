//! Application layer errors.
//!
//! These errors represent failures while running a task: a collaborator
//! exited non-zero, a file was missing, the filesystem refused a write.
//! Layout problems are `DomainError` from `crate::domain`.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

use crate::error::ErrorCategory;

/// One copy group that failed during an asset copy.
#[derive(Debug, Clone, PartialEq)]
pub struct CopyFailure {
    pub group: String,
    pub reason: String,
    /// The group's source directory was missing.
    pub source_missing: bool,
}

impl fmt::Display for CopyFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.group, self.reason)
    }
}

/// Errors that occur while running tasks.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// Strict imports: a referenced partial does not exist.
    #[error("Missing import '{import}' referenced from {}", .referenced_from.display())]
    MissingImport {
        import: String,
        referenced_from: PathBuf,
    },

    /// The style preprocessor ran and failed.
    #[error(
        "Preprocessor failed on {} ({}){}",
        .source_file.display(),
        describe_status(.status),
        diagnostics_suffix(.diagnostics)
    )]
    PreprocessorFailed {
        source_file: PathBuf,
        status: Option<i32>,
        diagnostics: String,
    },

    /// The site generator ran and failed.
    #[error("Site generator failed ({})", describe_status(.status))]
    GeneratorFailed { status: Option<i32> },

    /// An external program could not be started.
    #[error("Could not run '{tool}': {reason}")]
    ToolNotFound { tool: String, reason: String },

    /// A copy group's base directory does not exist.
    #[error("Copy source directory not found: {}", .path.display())]
    CopySourceMissing { path: PathBuf },

    /// One or more copy groups failed; the others still ran.
    #[error("{} asset group(s) failed to copy: {}", .failures.len(), join_failures(.failures))]
    AssetCopyFailed { failures: Vec<CopyFailure> },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// The file watcher stopped delivering events.
    #[error("Watch failed: {reason}")]
    WatchFailed { reason: String },

    /// Shared state lock was poisoned by a panicking thread.
    #[error("Internal lock poisoned")]
    LockPoisoned,

    /// Port/Adapter not configured.
    #[error("Required adapter not configured: {name}")]
    AdapterNotConfigured { name: &'static str },
}

fn describe_status(status: &Option<i32>) -> String {
    match status {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    }
}

fn diagnostics_suffix(diagnostics: &str) -> String {
    let trimmed = diagnostics.trim();
    if trimmed.is_empty() {
        String::new()
    } else {
        format!(":\n{trimmed}")
    }
}

fn join_failures(failures: &[CopyFailure]) -> String {
    failures
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::MissingImport {
                import,
                referenced_from,
            } => vec![
                format!(
                    "Create '{}' next to {} or in an include path",
                    import,
                    referenced_from.display()
                ),
                "Or mark the import optional: @import (optional) \"...\";".into(),
                "Or set styles.strict_imports = false".into(),
            ],
            Self::PreprocessorFailed { .. } => vec![
                "Fix the stylesheet error reported above".into(),
                "Run lessc on the file directly for the full trace".into(),
            ],
            Self::GeneratorFailed { .. } => vec![
                "Check the jekyll output above for details".into(),
                "Stylesheets and assets were not rebuilt".into(),
            ],
            Self::ToolNotFound { tool, .. } => vec![
                format!("Ensure '{}' is installed and in your PATH", tool),
                "Or point tools.preprocessor / tools.generator at it in sitekit.toml".into(),
            ],
            Self::CopySourceMissing { path } => vec![
                format!("Create {} or remove the group from the config", path.display()),
            ],
            Self::AssetCopyFailed { .. } => vec![
                "The groups not listed were copied successfully".into(),
                "Re-run with -v to see each group's progress".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
            Self::WatchFailed { .. } => vec![
                "On Linux, check fs.inotify.max_user_watches".into(),
                "Restart 'sitekit watch'".into(),
            ],
            Self::AdapterNotConfigured { name } => vec![
                format!("Required component not configured: {}", name),
                "This is likely a configuration error".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::MissingImport { .. } => ErrorCategory::Validation,
            Self::PreprocessorFailed { .. } | Self::GeneratorFailed { .. } => {
                ErrorCategory::External
            }
            Self::ToolNotFound { .. } => ErrorCategory::Configuration,
            Self::CopySourceMissing { .. } => ErrorCategory::NotFound,
            Self::AssetCopyFailed { failures } => {
                if failures.iter().all(|f| f.source_missing) {
                    ErrorCategory::NotFound
                } else {
                    ErrorCategory::Internal
                }
            }
            Self::FilesystemError { .. } | Self::WatchFailed { .. } | Self::LockPoisoned => {
                ErrorCategory::Internal
            }
            Self::AdapterNotConfigured { .. } => ErrorCategory::Configuration,
        }
    }
}
