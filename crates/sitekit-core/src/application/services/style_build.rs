//! Stylesheet compilation (`less-build`).
//!
//! Every declared mapping is compiled by one preprocessor invocation, in
//! declared order. With strict imports on, the whole `@import` graph of a
//! stylesheet is resolved before the preprocessor runs, so a missing
//! partial fails the task with the name of the file that referenced it.

use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ApplicationError,
        ports::{Filesystem, StyleJob, StylePreprocessor},
    },
    domain::{ImportRef, PathConfig, StyleMapping, parse_imports},
    error::SiteKitResult,
};

pub struct StyleBuildTask {
    config: Arc<PathConfig>,
    filesystem: Arc<dyn Filesystem>,
    preprocessor: Arc<dyn StylePreprocessor>,
}

impl StyleBuildTask {
    pub fn new(
        config: Arc<PathConfig>,
        filesystem: Arc<dyn Filesystem>,
        preprocessor: Arc<dyn StylePreprocessor>,
    ) -> Self {
        Self {
            config,
            filesystem,
            preprocessor,
        }
    }

    /// Compile every stylesheet. Returns the number compiled.
    ///
    /// The first failure aborts the task; later mappings are not compiled.
    #[instrument(skip_all, fields(styles = self.config.styles().len()))]
    pub fn run(&self) -> SiteKitResult<usize> {
        for mapping in self.config.styles() {
            self.compile(mapping)?;
        }
        info!(count = self.config.styles().len(), "Stylesheets compiled");
        Ok(self.config.styles().len())
    }

    fn compile(&self, mapping: &StyleMapping) -> SiteKitResult<()> {
        debug!(
            source = %mapping.source.display(),
            destination = %mapping.destination.display(),
            "Compiling stylesheet"
        );

        if self.config.strict_imports() {
            self.check_imports(&mapping.source)?;
        }

        if let Some(parent) = mapping.destination.parent() {
            self.filesystem.create_dir_all(parent)?;
        }

        self.preprocessor.compile(&StyleJob {
            source: mapping.source.clone(),
            destination: mapping.destination.clone(),
            include_paths: self.config.include_paths().to_vec(),
            strict_imports: self.config.strict_imports(),
        })
    }

    /// Walk the import graph rooted at `entry`. Each file is read once.
    fn check_imports(&self, entry: &Path) -> SiteKitResult<()> {
        let mut visited = HashSet::new();
        let mut pending = vec![entry.to_path_buf()];

        while let Some(file) = pending.pop() {
            if !visited.insert(file.clone()) {
                continue;
            }
            let text = self.filesystem.read_to_string(&file)?;
            for import in parse_imports(&text).iter().filter(|i| i.is_required()) {
                let found = self.resolve(&file, import).ok_or_else(|| {
                    ApplicationError::MissingImport {
                        import: import.path.clone(),
                        referenced_from: file.clone(),
                    }
                })?;
                pending.push(found);
            }
        }

        debug!(files = visited.len(), "Imports resolved");
        Ok(())
    }

    /// Next to the importing file first, then each include path in order.
    fn resolve(&self, importer: &Path, import: &ImportRef) -> Option<PathBuf> {
        let name = import.file_name();
        let local = importer.parent().map(|dir| dir.join(&name));

        local
            .into_iter()
            .chain(self.config.include_paths().iter().map(|dir| dir.join(&name)))
            .find(|candidate| self.filesystem.exists(candidate))
    }
}
