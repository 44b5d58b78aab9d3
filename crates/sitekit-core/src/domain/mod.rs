//! Core domain layer for sitekit.
//!
//! Pure values: the site's path layout, compiled globs, the task catalogue
//! and LESS import scanning. Nothing in here spawns a process or touches the
//! filesystem; those concerns sit behind the ports in
//! [`crate::application::ports`].

pub mod entities;
pub mod error;
pub mod glob;
pub mod imports;

// Re-exports for convenience
pub use entities::{
    CopyGroup, PathConfig, PathConfigBuilder, StyleMapping, TaskKind, TaskRegistry, WatchGroup,
    common::RelativePath,
};

pub use error::{DomainError, ErrorCategory};
pub use glob::GlobSet;
pub use imports::{ImportRef, parse_imports};
