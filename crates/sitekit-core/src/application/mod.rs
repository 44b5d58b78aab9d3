//! Application layer for sitekit.
//!
//! This layer contains:
//! - **Services**: the four build tasks and the [`Pipeline`] that runs them
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! Layout rules live in `crate::domain`; this layer only sequences the
//! calls to the ports.

pub mod error;
pub mod ports;
pub mod services;

// Re-export main services
pub use services::{
    AssetCopyTask, Pipeline, SiteBuildTask, StyleBuildTask, TaskInfo, TaskReport, Trigger,
    WatchEvent, WatchTask,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    ChangeBatch, ChangeSource, Filesystem, SiteGenerator, SiteJob, StyleJob, StylePreprocessor,
};

pub use error::{ApplicationError, CopyFailure};
