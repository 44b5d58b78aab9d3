//! Static asset copying (`assets-copy`).

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, info, instrument, warn};

use crate::{
    application::{
        ApplicationError,
        error::CopyFailure,
        ports::Filesystem,
    },
    domain::{CopyGroup, PathConfig},
    error::{SiteKitError, SiteKitResult},
};

/// Copies every copy group's matching files into the output directory.
///
/// Groups are independent: a failing group does not stop the others, and
/// destination files that are not overwritten are left alone.
pub struct AssetCopyTask {
    config: Arc<PathConfig>,
    filesystem: Arc<dyn Filesystem>,
}

impl AssetCopyTask {
    pub fn new(config: Arc<PathConfig>, filesystem: Arc<dyn Filesystem>) -> Self {
        Self { config, filesystem }
    }

    /// Copy all groups. Returns the number of files copied.
    #[instrument(skip_all, fields(groups = self.config.copy_groups().len()))]
    pub fn run(&self) -> SiteKitResult<usize> {
        let mut copied = 0;
        let mut failures = Vec::new();

        for group in self.config.copy_groups() {
            match self.copy_group(group) {
                Ok(count) => copied += count,
                Err(e) => {
                    warn!(group = %group.name, error = %e, "Copy group failed");
                    failures.push(CopyFailure {
                        group: group.name.clone(),
                        reason: e.to_string(),
                        source_missing: matches!(
                            e,
                            SiteKitError::Application(ApplicationError::CopySourceMissing { .. })
                        ),
                    });
                }
            }
        }

        if !failures.is_empty() {
            return Err(ApplicationError::AssetCopyFailed { failures }.into());
        }

        info!(files = copied, "Assets copied");
        Ok(copied)
    }

    fn copy_group(&self, group: &CopyGroup) -> SiteKitResult<usize> {
        if !self.filesystem.is_dir(&group.cwd) {
            return Err(ApplicationError::CopySourceMissing {
                path: group.cwd.clone(),
            }
            .into());
        }

        let matches: Vec<_> = self
            .filesystem
            .walk_files(&group.cwd)?
            .into_iter()
            .filter(|rel| group.patterns.is_match(rel))
            .collect();

        if matches.is_empty() {
            warn!(
                group = %group.name,
                patterns = ?group.patterns.patterns(),
                "No files matched"
            );
            return Ok(0);
        }

        for rel in &matches {
            self.copy_one(&group.cwd, rel, &group.destination)?;
        }

        debug!(group = %group.name, files = matches.len(), "Group copied");
        Ok(matches.len())
    }

    fn copy_one(&self, cwd: &Path, rel: &Path, destination: &Path) -> SiteKitResult<()> {
        let target = destination.join(rel);
        if let Some(parent) = target.parent() {
            self.filesystem.create_dir_all(parent)?;
        }
        self.filesystem.copy_file(&cwd.join(rel), &target)
    }
}
