//! Full site build (`jekyll-build`).

use std::sync::Arc;

use tracing::{debug, info, instrument};

use crate::{
    application::{
        ports::{Filesystem, SiteGenerator, SiteJob},
        services::{AssetCopyTask, StyleBuildTask},
    },
    domain::PathConfig,
    error::SiteKitResult,
};

/// Empties the output directory, generates the site into it, then chains
/// into the style and asset tasks.
///
/// The chain is all-or-nothing: the first failing step ends the build.
pub struct SiteBuildTask {
    config: Arc<PathConfig>,
    filesystem: Arc<dyn Filesystem>,
    generator: Arc<dyn SiteGenerator>,
    styles: Arc<StyleBuildTask>,
    assets: Arc<AssetCopyTask>,
}

impl SiteBuildTask {
    pub fn new(
        config: Arc<PathConfig>,
        filesystem: Arc<dyn Filesystem>,
        generator: Arc<dyn SiteGenerator>,
        styles: Arc<StyleBuildTask>,
        assets: Arc<AssetCopyTask>,
    ) -> Self {
        Self {
            config,
            filesystem,
            generator,
            styles,
            assets,
        }
    }

    /// Returns the number of artifacts produced by the chained tasks.
    #[instrument(skip_all, fields(output = %self.config.output_dir().display()))]
    pub fn run(&self) -> SiteKitResult<usize> {
        self.clear_output()?;

        self.generator.generate(&SiteJob {
            source: self.config.project_root().to_path_buf(),
            destination: self.config.output_dir().to_path_buf(),
        })?;
        info!("Site generated");

        let compiled = self.styles.run()?;
        let copied = self.assets.run()?;
        Ok(compiled + copied)
    }

    /// Remove the output directory's contents, creating it when absent.
    fn clear_output(&self) -> SiteKitResult<()> {
        let output = self.config.output_dir();
        self.filesystem.create_dir_all(output)?;

        let mut removed = 0;
        for entry in self.filesystem.read_dir(output)? {
            let hidden = entry
                .file_name()
                .and_then(|n| n.to_str())
                .is_some_and(|n| n.starts_with('.'));
            if hidden && self.config.preserve_hidden() {
                debug!(entry = %entry.display(), "Keeping hidden entry");
                continue;
            }
            self.filesystem.remove_all(&entry)?;
            removed += 1;
        }

        debug!(removed, "Output directory emptied");
        Ok(())
    }
}
