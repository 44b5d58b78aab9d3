//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `sitekit-adapters` implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `StylePreprocessor`: LESS → CSS compilation
//!   - `SiteGenerator`: the static-site generator
//!   - `ChangeSource`: debounced filesystem change notifications
//!
//! - **Driving (Input) Ports**: Called by external world, implemented by application
//!   - (Defined in CLI layer, implemented by `Pipeline`)

pub mod output;

pub use output::{
    ChangeBatch, ChangeSource, Filesystem, SiteGenerator, SiteJob, StyleJob, StylePreprocessor,
};

#[cfg(test)]
pub use output::{MockChangeSource, MockFilesystem, MockSiteGenerator, MockStylePreprocessor};
