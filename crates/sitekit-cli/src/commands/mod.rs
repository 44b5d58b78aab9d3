//! Command handlers. Each module owns one subcommand.

use std::path::Path;
use std::sync::Arc;

use sitekit_adapters::{JekyllGenerator, LesscPreprocessor, LocalFilesystem, ToolCommand};
use sitekit_core::prelude::Pipeline;

use crate::{config::AppConfig, error::CliResult};

pub mod completions;
pub mod config;
pub mod init;
pub mod list;
pub mod task;
pub mod watch;

/// Wire the production adapters into a pipeline for `project_root`.
pub(crate) fn build_pipeline(config: &AppConfig, project_root: &Path) -> CliResult<Pipeline> {
    let layout = config.path_config(project_root)?;
    Ok(Pipeline::new(
        layout,
        Arc::new(LocalFilesystem::new()),
        Arc::new(LesscPreprocessor::new(ToolCommand::new(
            config.tools.preprocessor.iter().cloned(),
        ))),
        Arc::new(JekyllGenerator::new(ToolCommand::new(
            config.tools.generator.iter().cloned(),
        ))),
    ))
}
