//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `sitekit-adapters` crate provides implementations.

use std::path::{Path, PathBuf};

#[cfg(test)]
use mockall::automock;

use crate::error::SiteKitResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `sitekit_adapters::filesystem::LocalFilesystem` (production)
/// - `sitekit_adapters::filesystem::MemoryFilesystem` (testing)
#[cfg_attr(test, automock)]
pub trait Filesystem: Send + Sync {
    /// Create a directory and all parent directories.
    fn create_dir_all(&self, path: &Path) -> SiteKitResult<()>;

    /// Read a whole file as UTF-8.
    fn read_to_string(&self, path: &Path) -> SiteKitResult<String>;

    /// Copy one file, overwriting `to` if it exists. The parent of `to`
    /// must already exist.
    fn copy_file(&self, from: &Path, to: &Path) -> SiteKitResult<()>;

    /// Check if path exists.
    fn exists(&self, path: &Path) -> bool;

    /// Check if path exists and is a directory.
    fn is_dir(&self, path: &Path) -> bool;

    /// Immediate children of a directory (full paths, sorted).
    fn read_dir(&self, path: &Path) -> SiteKitResult<Vec<PathBuf>>;

    /// Remove a file, or a directory and all of its contents.
    fn remove_all(&self, path: &Path) -> SiteKitResult<()>;

    /// Every file below `root`, as paths relative to `root`, sorted.
    fn walk_files(&self, root: &Path) -> SiteKitResult<Vec<PathBuf>>;
}

/// One stylesheet compilation request.
#[derive(Debug, Clone, PartialEq)]
pub struct StyleJob {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub include_paths: Vec<PathBuf>,
    pub strict_imports: bool,
}

/// Port for the CSS preprocessor.
///
/// Implemented by:
/// - `sitekit_adapters::preprocessor::LesscPreprocessor`
#[cfg_attr(test, automock)]
pub trait StylePreprocessor: Send + Sync {
    /// Compile `job.source` into `job.destination`.
    fn compile(&self, job: &StyleJob) -> SiteKitResult<()>;
}

/// One site generation request.
#[derive(Debug, Clone, PartialEq)]
pub struct SiteJob {
    /// Directory holding the generator's sources (`_config.yml`, `_posts`, ...).
    pub source: PathBuf,
    pub destination: PathBuf,
}

/// Port for the static-site generator.
///
/// Implemented by:
/// - `sitekit_adapters::generator::JekyllGenerator`
#[cfg_attr(test, automock)]
pub trait SiteGenerator: Send + Sync {
    /// Generate the site into `job.destination`.
    fn generate(&self, job: &SiteJob) -> SiteKitResult<()>;
}

/// Paths changed within one debounce window.
pub type ChangeBatch = Vec<PathBuf>;

/// Port for filesystem change notifications.
///
/// Implemented by:
/// - `sitekit_adapters::watcher::NotifyChangeSource`
#[cfg_attr(test, automock)]
pub trait ChangeSource: Send {
    /// Block until the next batch of changes.
    ///
    /// `Ok(None)` means the source is closed and no more batches will come.
    fn next_batch(&mut self) -> SiteKitResult<Option<ChangeBatch>>;
}
