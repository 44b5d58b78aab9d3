//! `sitekit watch`, also the default when no command is given.

use std::path::Path;
use std::time::Duration;

use chrono::Local;
use sitekit_adapters::NotifyChangeSource;
use sitekit_core::prelude::WatchEvent;
use tracing::{info, instrument, warn};

use crate::{
    cli::WatchArgs,
    config::AppConfig,
    error::{CliError, CliResult},
    output::OutputManager,
};

/// Block until the watcher stops.
///
/// A failed rebuild is reported and watching continues; only the watcher
/// itself failing ends the command.
#[instrument(skip_all)]
pub fn execute(
    args: WatchArgs,
    config: &AppConfig,
    project_root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let debounce_ms = args.debounce_ms.unwrap_or(config.watch.debounce_ms);
    if debounce_ms == 0 {
        return Err(CliError::InvalidInput {
            message: "debounce must be at least 1 ms".into(),
            source: None,
        });
    }
    let debounce = Duration::from_millis(debounce_ms);
    let source = NotifyChangeSource::new(project_root, debounce)?;
    let pipeline = super::build_pipeline(config, project_root)?.with_change_source(Box::new(source));

    info!(
        root = %project_root.display(),
        debounce_ms = debounce.as_millis() as u64,
        groups = pipeline.config().watch_groups().len(),
        "Watching"
    );

    pipeline.watch(|event| {
        if let Err(e) = report(output, &event) {
            warn!("Failed to write watch output: {e}");
        }
    })?;

    Ok(())
}

fn report(output: &OutputManager, event: &WatchEvent) -> std::io::Result<()> {
    let stamp = Local::now().format("%H:%M:%S");
    match event {
        WatchEvent::Waiting => output.info(&format!("[{stamp}] Waiting for changes...")),
        WatchEvent::Triggered { task, path } => {
            output.print(&format!("[{stamp}] {} changed, running {task}", path.display()))
        }
        WatchEvent::Completed {
            task,
            artifacts,
            elapsed,
        } => output.success(&format!(
            "[{stamp}] {task} finished: {artifacts} artifact(s) in {elapsed:.2?}"
        )),
        WatchEvent::Failed { task, error } => {
            output.error(&format!("[{stamp}] {task} failed: {error}"))
        }
    }
}
