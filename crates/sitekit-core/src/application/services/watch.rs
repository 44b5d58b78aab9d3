//! Watch mode: map filesystem changes to the task that rebuilds them.
//!
//! Each changed path is assigned to the first watch group, in declared
//! order, whose globs match it. A batch therefore yields an ordered,
//! de-duplicated queue of tasks, which runs to completion on the calling
//! thread before the next batch is read.

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use tracing::{debug, info, instrument, trace, warn};

use crate::{
    application::ports::ChangeSource,
    domain::{PathConfig, TaskKind},
    error::{SiteKitError, SiteKitResult},
};

/// Progress reported while watching.
#[derive(Debug)]
pub enum WatchEvent {
    /// Blocked on the change source.
    Waiting,
    /// `path` (relative to the project root) triggered `task`.
    Triggered { task: TaskKind, path: PathBuf },
    Completed {
        task: TaskKind,
        artifacts: usize,
        elapsed: Duration,
    },
    /// The task failed; watching continues.
    Failed { task: TaskKind, error: SiteKitError },
}

/// One queued rebuild and the first path that asked for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Trigger {
    pub task: TaskKind,
    pub path: PathBuf,
}

pub struct WatchTask {
    config: Arc<PathConfig>,
}

impl WatchTask {
    pub fn new(config: Arc<PathConfig>) -> Self {
        Self { config }
    }

    /// Turn a batch of changed paths into the tasks to run, in order.
    pub fn plan(&self, batch: &[PathBuf]) -> Vec<Trigger> {
        let mut triggers: Vec<Trigger> = Vec::new();

        for changed in batch {
            let Some(rel) = self.relative(changed) else {
                trace!(path = %changed.display(), "Ignoring change outside the sources");
                continue;
            };

            let Some(group) = self
                .config
                .watch_groups()
                .iter()
                .find(|g| g.patterns.is_match(&rel))
            else {
                trace!(path = %rel.display(), "No watch group matches");
                continue;
            };

            if triggers.iter().all(|t| t.task != group.task) {
                debug!(path = %rel.display(), group = %group.name, task = %group.task, "Change matched");
                triggers.push(Trigger {
                    task: group.task,
                    path: rel,
                });
            }
        }

        triggers
    }

    /// Project-root-relative form of `path`, or `None` when the path lies
    /// outside the root or inside the output directory.
    fn relative(&self, path: &Path) -> Option<PathBuf> {
        let root = self.config.project_root();
        let output = self.config.output_dir();

        if path.starts_with(output) {
            return None;
        }
        let rel = if path.is_absolute() {
            path.strip_prefix(root).ok()?.to_path_buf()
        } else {
            path.to_path_buf()
        };
        if rel.as_os_str().is_empty() {
            return None;
        }
        if let Ok(output_rel) = output.strip_prefix(root) {
            if rel.starts_with(output_rel) {
                return None;
            }
        }
        Some(rel)
    }

    /// Watch until `source` closes.
    ///
    /// `dispatch` runs one task and returns its artifact count. A failing
    /// task is reported through `observer` and does not end the loop; only
    /// an error from the change source itself does. Returns the number of
    /// tasks run.
    #[instrument(skip_all, fields(groups = self.config.watch_groups().len()))]
    pub fn run<D, O>(
        &self,
        source: &mut dyn ChangeSource,
        mut dispatch: D,
        mut observer: O,
    ) -> SiteKitResult<usize>
    where
        D: FnMut(TaskKind) -> SiteKitResult<usize>,
        O: FnMut(WatchEvent),
    {
        info!("Watching for changes");
        let mut runs = 0;

        loop {
            observer(WatchEvent::Waiting);
            let Some(batch) = source.next_batch()? else {
                info!(runs, "Change source closed");
                return Ok(runs);
            };

            for trigger in self.plan(&batch) {
                observer(WatchEvent::Triggered {
                    task: trigger.task,
                    path: trigger.path,
                });

                let started = Instant::now();
                runs += 1;
                match dispatch(trigger.task) {
                    Ok(artifacts) => observer(WatchEvent::Completed {
                        task: trigger.task,
                        artifacts,
                        elapsed: started.elapsed(),
                    }),
                    Err(error) => {
                        warn!(task = %trigger.task, error = %error, "Triggered task failed");
                        observer(WatchEvent::Failed {
                            task: trigger.task,
                            error,
                        });
                    }
                }
            }
        }
    }
}
