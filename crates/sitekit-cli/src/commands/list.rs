//! Implementation of the `sitekit list` command.

use std::path::Path;

use sitekit_core::prelude::TaskInfo;

use crate::{
    cli::{ListArgs, ListFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

pub fn execute(
    args: ListArgs,
    config: &AppConfig,
    project_root: &Path,
    output: &OutputManager,
) -> CliResult<()> {
    let pipeline = super::build_pipeline(config, project_root)?;
    let tasks = pipeline.tasks();

    match args.format {
        ListFormat::Table => {
            output.header("Available Tasks:")?;
            for line in table_lines(&tasks) {
                output.print(&line)?;
            }
        }
        ListFormat::Json => output.json(&tasks)?,
        ListFormat::List => {
            for task in &tasks {
                output.print(&task.name)?;
            }
        }
    }

    Ok(())
}

fn table_lines(tasks: &[TaskInfo]) -> Vec<String> {
    let width = tasks.iter().map(|t| t.name.len()).max().unwrap_or(0);
    tasks
        .iter()
        .map(|t| {
            let mut line = format!("  {:width$}  {}", t.name, t.description);
            if t.alias {
                line.push_str(&format!(" (alias of {})", t.task));
            } else if !t.runs.is_empty() {
                let runs: Vec<_> = t.runs.iter().map(|k| k.name()).collect();
                line.push_str(&format!(" [then {}]", runs.join(", ")));
            }
            line
        })
        .collect()
}
