//! Application services - the build tasks and the pipeline that runs them.
//!
//! Each task coordinates the domain layout with the driven ports. The
//! [`Pipeline`] wires them together and is what the CLI calls.

pub mod asset_copy;
pub mod pipeline;
pub mod site_build;
pub mod style_build;
pub mod watch;

pub use asset_copy::AssetCopyTask;
pub use pipeline::{Pipeline, TaskInfo, TaskReport};
pub use site_build::SiteBuildTask;
pub use style_build::StyleBuildTask;
pub use watch::{Trigger, WatchEvent, WatchTask};
