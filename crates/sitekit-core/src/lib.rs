//! sitekit core - hexagonal architecture implementation
//!
//! This crate provides the domain and application layers for the sitekit
//! site build tool, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │           sitekit-cli (CLI)             │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Pipeline + the four tasks          │
//! │  (less-build, assets-copy,              │
//! │   jekyll-build, watch)                  │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │  Filesystem, StylePreprocessor,         │
//! │  SiteGenerator, ChangeSource            │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │    sitekit-adapters (Infrastructure)    │
//! │  LocalFilesystem, lessc, jekyll, notify │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! # use sitekit_core::application::ports::{Filesystem, SiteGenerator, StylePreprocessor};
//! use sitekit_core::prelude::*;
//!
//! # fn adapters() -> (Arc<dyn Filesystem>, Arc<dyn StylePreprocessor>, Arc<dyn SiteGenerator>) { unimplemented!() }
//! # fn main() -> SiteKitResult<()> {
//! let (filesystem, preprocessor, generator) = adapters();
//! let layout = PathConfig::builder()
//!     .output_dir("../jto.github.io")
//!     .style("_assets/less/main.less", "assets/css/main.css")
//!     .include_path("_assets/less")
//!     .strict_imports(true)
//!     .build()?;
//!
//! let pipeline = Pipeline::new(layout, filesystem, preprocessor, generator);
//! pipeline.run_named("less-build")?;
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        Pipeline, TaskInfo, TaskReport, WatchEvent,
        ports::{ChangeSource, Filesystem, SiteGenerator, StylePreprocessor},
    };
    pub use crate::domain::{PathConfig, PathConfigBuilder, TaskKind, TaskRegistry};
    pub use crate::error::{ErrorCategory, SiteKitError, SiteKitResult};
}

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
