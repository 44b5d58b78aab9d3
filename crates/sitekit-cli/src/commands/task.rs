//! `sitekit less-build`, `assets-copy` and `jekyll-build`.

use std::path::Path;

use serde_json::json;
use sitekit_core::domain::TaskKind;
use tracing::{info, instrument};

use crate::{config::AppConfig, error::CliResult, output::OutputManager};

/// Run one build task to completion and report what it produced.
#[instrument(skip_all, fields(task = %kind))]
pub fn execute(
    kind: TaskKind,
    config: &AppConfig,
    project_root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let pipeline = super::build_pipeline(config, project_root)?;

    if !output.is_json() {
        output.header(&format!("Running '{kind}'"))?;
    }
    info!(root = %project_root.display(), "Task started");

    let report = pipeline.run(kind)?;

    if output.is_json() {
        output.json(&json!({
            "task": report.task,
            "artifacts": report.artifacts,
            "elapsed_ms": report.elapsed.as_millis() as u64,
            "output_dir": pipeline.config().output_dir(),
        }))?;
    } else {
        output.success(&format!(
            "{kind} finished: {} artifact(s) in {:.2?}",
            report.artifacts, report.elapsed
        ))?;
    }

    Ok(())
}
