//! `lessc` adapter.

use std::ffi::OsString;

use sitekit_core::{
    application::{
        ApplicationError,
        ports::{StyleJob, StylePreprocessor},
    },
    error::SiteKitResult,
};
use tracing::{debug, instrument};

use crate::process::ToolCommand;

/// Compiles one stylesheet per call by running
/// `lessc --include-path=<dirs> [--strict-imports] <source> <destination>`.
#[derive(Debug, Clone)]
pub struct LesscPreprocessor {
    tool: ToolCommand,
}

impl LesscPreprocessor {
    pub fn new(tool: ToolCommand) -> Self {
        Self { tool }
    }

    fn arguments(&self, job: &StyleJob) -> Result<Vec<OsString>, ApplicationError> {
        let mut args = Vec::new();
        if !job.include_paths.is_empty() {
            let joined = std::env::join_paths(&job.include_paths).map_err(|e| {
                ApplicationError::FilesystemError {
                    path: job.source.clone(),
                    reason: format!("Invalid include path: {e}"),
                }
            })?;
            let mut arg = OsString::from("--include-path=");
            arg.push(joined);
            args.push(arg);
        }
        if job.strict_imports {
            args.push("--strict-imports".into());
        }
        args.push(job.source.clone().into_os_string());
        args.push(job.destination.clone().into_os_string());
        Ok(args)
    }
}

impl Default for LesscPreprocessor {
    fn default() -> Self {
        Self::new(ToolCommand::new(["lessc"]))
    }
}

impl StylePreprocessor for LesscPreprocessor {
    #[instrument(skip_all, fields(source = %job.source.display()))]
    fn compile(&self, job: &StyleJob) -> SiteKitResult<()> {
        let args = self.arguments(job)?;
        let output = self
            .tool
            .command(&args)?
            .output()
            .map_err(|e| self.tool.spawn_error(e))?;

        if output.status.success() {
            debug!(destination = %job.destination.display(), "lessc finished");
            return Ok(());
        }

        // lessc reports parse errors on stderr, but some wrappers use stdout.
        let stderr = String::from_utf8_lossy(&output.stderr);
        let diagnostics = if stderr.trim().is_empty() {
            String::from_utf8_lossy(&output.stdout).into_owned()
        } else {
            stderr.into_owned()
        };

        Err(ApplicationError::PreprocessorFailed {
            source_file: job.source.clone(),
            status: output.status.code(),
            diagnostics,
        }
        .into())
    }
}
