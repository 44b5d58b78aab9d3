//! CLI errors: one enum, its exit codes and how it is printed.
//!
//! Core and adapter failures arrive as [`SiteKitError`] and keep their own
//! suggestions; the category decides the exit code.

use std::error::Error;
use std::path::PathBuf;

use owo_colors::OwoColorize;
use thiserror::Error;

use sitekit_core::{domain::DomainError, error::SiteKitError};

use sitekit_core::error::ErrorCategory as CoreCategory;

/// Result type alias for CLI operations.
pub type CliResult<T> = Result<T, CliError>;

#[derive(Debug, Error)]
pub enum CliError {
    /// Invalid user input (validation failed).
    #[error("Invalid input: {message}")]
    InvalidInput {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// `--project-dir` (or the current directory) is not usable.
    #[error("Project directory not found: {}", .path.display())]
    ProjectDirNotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // ── Config errors ──────────────────────────────────────────────────────
    /// A configuration file could not be read, parsed, or written.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    // ── Core errors ────────────────────────────────────────────────────────
    /// An error propagated from `sitekit-core` or an adapter.
    #[error("{0}")]
    Core(#[from] SiteKitError),

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

impl CliError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidInput { message, .. } => vec![
                format!("Check your input: {}", message),
                "Use --help for usage information".into(),
            ],

            Self::ProjectDirNotFound { path, .. } => vec![
                format!("'{}' does not exist or is not readable", path.display()),
                "Pass the site sources with -C / --project-dir".into(),
            ],

            Self::ConfigError { message, .. } => vec![
                format!("Configuration issue: {}", message),
                "Check sitekit.toml in the project directory".into(),
                "Use 'sitekit init' to create a default config".into(),
                "Use 'sitekit config list' to see the effective values".into(),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],
        }
    }

    /// Get the error category for styling and exit codes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidInput { .. } => ErrorCategory::UserError,
            Self::ProjectDirNotFound { .. } => ErrorCategory::NotFound,
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::NotFound => ErrorCategory::NotFound,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::External => ErrorCategory::External,
                CoreCategory::Internal => ErrorCategory::Internal,
            },
            Self::IoError { .. } => ErrorCategory::Internal,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Not found     |  3   |
    /// | Configuration |  4   |
    /// | External tool |  5   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::NotFound => 3,
            ErrorCategory::Configuration => 4,
            ErrorCategory::External => 5,
            ErrorCategory::Internal => 1,
        }
    }

    /// Format the error for a terminal: red header, dimmed cause chain.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// [`Self::format_colored`] without ANSI codes, for pipes and log files.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, colored: bool) -> String {
        let paint = |text: String, style: fn(&String) -> String| {
            if colored { style(&text) } else { text }
        };

        let mut lines = vec![String::new()];
        lines.push(paint(
            format!("\u{2717} Error: {self}"),
            |t| t.red().bold().to_string(),
        ));

        if verbose {
            let causes = std::iter::successors(self.source(), |err| (*err).source());
            for cause in causes {
                lines.push(paint(format!("  Caused by: {cause}"), |t| {
                    t.dimmed().to_string()
                }));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            lines.push(String::new());
            lines.push(paint("Suggestions:".into(), |t| t.yellow().bold().to_string()));
            lines.extend(suggestions.iter().map(|s| format!("  \u{2022} {s}")));
        }

        if !verbose {
            lines.push(String::new());
            lines.push(paint("Re-run with -v / --verbose for more details.".into(), |t| {
                t.dimmed().to_string()
            }));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// Log the error using tracing.
    pub fn log(&self) {
        match self.category() {
            ErrorCategory::UserError => tracing::warn!("User error: {}", self),
            ErrorCategory::NotFound => tracing::warn!("Not found: {}", self),
            ErrorCategory::Configuration => tracing::error!("Configuration error: {}", self),
            ErrorCategory::External => tracing::error!("Tool failed: {}", self),
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
    /// User input error (validation, invalid arguments).
    UserError,
    /// Resource not found.
    NotFound,
    /// Configuration error.
    Configuration,
    /// lessc or jekyll ran and failed.
    External,
    /// Internal/system error.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert foreign error types into [`CliError`] at
/// call-sites with a descriptive context message.
///
/// No blanket impl: it would overlap the two concrete ones.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}

impl<T> IntoCli<T> for Result<T, anyhow::Error> {
    /// Configuration loading is the only anyhow producer.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::ConfigError {
            message: format!("{}: {e:#}", f().into()),
            source: Some(e.into()),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sitekit_core::application::{ApplicationError, CopyFailure};
    use std::io;

    fn core(err: impl Into<SiteKitError>) -> CliError {
        CliError::Core(err.into())
    }

    // ── exit codes ────────────────────────────────────────────────────────

    #[test]
    fn missing_import_is_a_user_error() {
        let err = core(ApplicationError::MissingImport {
            import: "variables".into(),
            referenced_from: PathBuf::from("_assets/less/main.less"),
        });
        assert_eq!(err.exit_code(), 2);
        assert!(err.suggestions().iter().any(|s| s.contains("optional")));
    }

    #[test]
    fn unknown_task_is_a_user_error() {
        let err: CliError = DomainError::UnknownTask {
            name: "deploy".into(),
        }
        .into();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn missing_copy_source_is_not_found() {
        let err = core(ApplicationError::AssetCopyFailed {
            failures: vec![CopyFailure {
                group: "font".into(),
                reason: "Copy source directory not found: _assets/font".into(),
                source_missing: true,
            }],
        });
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn exit_code_configuration() {
        assert_eq!(
            CliError::ConfigError {
                message: "x".into(),
                source: None
            }
            .exit_code(),
            4
        );
        assert_eq!(
            core(ApplicationError::ToolNotFound {
                tool: "lessc".into(),
                reason: "No such file or directory".into(),
            })
            .exit_code(),
            4
        );
    }

    #[test]
    fn tool_failures_exit_five() {
        assert_eq!(
            core(ApplicationError::GeneratorFailed { status: Some(1) }).exit_code(),
            5
        );
        assert_eq!(
            core(ApplicationError::PreprocessorFailed {
                source_file: PathBuf::from("main.less"),
                status: Some(1),
                diagnostics: String::new(),
            })
            .exit_code(),
            5
        );
    }

    #[test]
    fn exit_code_internal() {
        assert_eq!(
            CliError::IoError {
                message: "x".into(),
                source: io::Error::other("e"),
            }
            .exit_code(),
            1
        );
    }

    // ── format ────────────────────────────────────────────────────────────

    #[test]
    fn format_plain_contains_error_header() {
        let err = core(ApplicationError::GeneratorFailed { status: Some(1) });
        let s = err.format_plain(false);
        assert!(s.contains("Error: Site generator failed (exit status 1)"));
        assert!(s.contains("--verbose"));
        assert!(!s.contains('\u{1b}'));
        assert!(s.contains("Suggestions:"));
    }

    #[test]
    fn format_plain_verbose_shows_the_chain_and_omits_hint() {
        let err = CliError::ProjectDirNotFound {
            path: PathBuf::from("/nope"),
            source: io::Error::new(io::ErrorKind::NotFound, "No such file or directory"),
        };
        let s = err.format_plain(true);
        assert!(s.contains("Caused by: No such file or directory"));
        assert!(!s.contains("--verbose"));
    }

    // ── IntoCli ───────────────────────────────────────────────────────────

    #[test]
    fn into_cli_io_error() {
        let result: Result<(), io::Error> = Err(io::Error::new(io::ErrorKind::NotFound, "missing"));
        let cli: CliResult<()> = result.with_cli_context(|| "reading config");
        assert!(matches!(cli, Err(CliError::IoError { .. })));
    }

    #[test]
    fn into_cli_config_error() {
        let result: anyhow::Result<()> = Err(anyhow::anyhow!("expected a table"));
        let cli = result.with_cli_context(|| "loading sitekit.toml").unwrap_err();
        assert_eq!(cli.exit_code(), 4);
        assert!(cli.to_string().contains("expected a table"));
    }
}
