//! Pipeline - the entry point the CLI drives.
//!
//! Wires the four tasks from one [`PathConfig`] and one set of adapters and
//! dispatches task names to them.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{info, instrument, trace};

use crate::{
    application::{
        ApplicationError,
        ports::{ChangeSource, Filesystem, SiteGenerator, StylePreprocessor},
        services::{AssetCopyTask, SiteBuildTask, StyleBuildTask, WatchEvent, WatchTask},
    },
    domain::{PathConfig, TaskKind, TaskRegistry},
    error::{SiteKitError, SiteKitResult},
};

/// Information about a registered task for display purposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskInfo {
    pub name: String,
    pub task: TaskKind,
    pub description: String,
    /// Tasks chained after this one.
    pub runs: Vec<TaskKind>,
    /// Registered under another task's name (`default`).
    pub alias: bool,
}

/// Outcome of one successful task run.
#[derive(Debug, Clone, PartialEq)]
pub struct TaskReport {
    pub task: TaskKind,
    /// Stylesheets compiled plus files copied. Always 0 for `watch`.
    pub artifacts: usize,
    pub elapsed: Duration,
}

pub struct Pipeline {
    config: Arc<PathConfig>,
    registry: TaskRegistry,
    styles: Arc<StyleBuildTask>,
    assets: Arc<AssetCopyTask>,
    site: SiteBuildTask,
    watcher: WatchTask,
    changes: Mutex<Option<Box<dyn ChangeSource>>>,
}

impl Pipeline {
    pub fn new(
        config: PathConfig,
        filesystem: Arc<dyn Filesystem>,
        preprocessor: Arc<dyn StylePreprocessor>,
        generator: Arc<dyn SiteGenerator>,
    ) -> Self {
        let config = Arc::new(config);
        let styles = Arc::new(StyleBuildTask::new(
            config.clone(),
            filesystem.clone(),
            preprocessor,
        ));
        let assets = Arc::new(AssetCopyTask::new(config.clone(), filesystem.clone()));
        let site = SiteBuildTask::new(
            config.clone(),
            filesystem,
            generator,
            styles.clone(),
            assets.clone(),
        );

        Self {
            watcher: WatchTask::new(config.clone()),
            config,
            registry: TaskRegistry::standard(),
            styles,
            assets,
            site,
            changes: Mutex::new(None),
        }
    }

    /// Change source consumed by `watch`.
    pub fn with_change_source(self, source: Box<dyn ChangeSource>) -> Self {
        Self {
            changes: Mutex::new(Some(source)),
            ..self
        }
    }

    pub fn config(&self) -> &PathConfig {
        &self.config
    }

    pub fn registry(&self) -> &TaskRegistry {
        &self.registry
    }

    /// Every registered name, in registration order.
    pub fn tasks(&self) -> Vec<TaskInfo> {
        self.registry
            .iter()
            .map(|(name, kind)| TaskInfo {
                name: name.to_string(),
                task: kind,
                description: kind.description().to_string(),
                runs: kind.depends_on().to_vec(),
                alias: name != kind.name(),
            })
            .collect()
    }

    /// Resolve `name` through the registry and run it.
    pub fn run_named(&self, name: &str) -> SiteKitResult<TaskReport> {
        let kind = self.registry.resolve(name)?;
        self.run(kind)
    }

    /// Run one task to completion.
    ///
    /// `watch` only returns once the change source closes; its events go to
    /// the log. Use [`Pipeline::watch`] to observe them.
    #[instrument(skip_all, fields(task = %kind))]
    pub fn run(&self, kind: TaskKind) -> SiteKitResult<TaskReport> {
        if kind == TaskKind::Watch {
            return self.watch(|event| trace!(?event, "Watch event"));
        }

        let started = Instant::now();
        let artifacts = self.dispatch(kind)?;
        let elapsed = started.elapsed();
        info!(artifacts, elapsed_ms = elapsed.as_millis() as u64, "Task finished");

        Ok(TaskReport {
            task: kind,
            artifacts,
            elapsed,
        })
    }

    /// Run the watch loop, reporting progress to `observer`.
    pub fn watch<O>(&self, observer: O) -> SiteKitResult<TaskReport>
    where
        O: FnMut(WatchEvent),
    {
        let started = Instant::now();
        let mut guard = self
            .changes
            .lock()
            .map_err(|_| ApplicationError::LockPoisoned)?;
        let source = guard
            .as_mut()
            .ok_or(ApplicationError::AdapterNotConfigured {
                name: "change source",
            })?;

        self.watcher
            .run(source.as_mut(), |kind| self.dispatch(kind), observer)?;

        Ok(TaskReport {
            task: TaskKind::Watch,
            artifacts: 0,
            elapsed: started.elapsed(),
        })
    }

    fn dispatch(&self, kind: TaskKind) -> SiteKitResult<usize> {
        match kind {
            TaskKind::StyleBuild => self.styles.run(),
            TaskKind::AssetCopy => self.assets.run(),
            TaskKind::SiteBuild => self.site.run(),
            TaskKind::Watch => Err(SiteKitError::Internal {
                message: "watch cannot be dispatched from inside watch".into(),
            }),
        }
    }
}
