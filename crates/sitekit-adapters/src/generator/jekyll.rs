//! `jekyll` adapter.

use std::ffi::OsString;
use std::process::Stdio;

use sitekit_core::{
    application::{
        ApplicationError,
        ports::{SiteGenerator, SiteJob},
    },
    error::SiteKitResult,
};
use tracing::{info, instrument};

use crate::process::ToolCommand;

/// Runs `jekyll build -d <destination>` from the site source directory.
///
/// The generator's own output goes straight to the terminal.
#[derive(Debug, Clone)]
pub struct JekyllGenerator {
    tool: ToolCommand,
}

impl JekyllGenerator {
    pub fn new(tool: ToolCommand) -> Self {
        Self { tool }
    }

    fn arguments(job: &SiteJob) -> Vec<OsString> {
        vec![
            "build".into(),
            "-d".into(),
            job.destination.clone().into_os_string(),
        ]
    }
}

impl Default for JekyllGenerator {
    fn default() -> Self {
        Self::new(ToolCommand::new(["jekyll"]))
    }
}

impl SiteGenerator for JekyllGenerator {
    #[instrument(skip_all, fields(destination = %job.destination.display()))]
    fn generate(&self, job: &SiteJob) -> SiteKitResult<()> {
        info!(tool = %self.tool.name(), "Running site generator");
        let status = self
            .tool
            .command(&Self::arguments(job))?
            .current_dir(&job.source)
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .map_err(|e| self.tool.spawn_error(e))?;

        if status.success() {
            Ok(())
        } else {
            Err(ApplicationError::GeneratorFailed {
                status: status.code(),
            }
            .into())
        }
    }
}
