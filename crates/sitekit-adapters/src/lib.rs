//! Infrastructure adapters for sitekit.
//!
//! This crate implements the ports defined in `sitekit-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod filesystem;
pub mod generator;
pub mod preprocessor;
mod process;
pub mod watcher;

// Re-export commonly used adapters
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
pub use generator::JekyllGenerator;
pub use preprocessor::LesscPreprocessor;
pub use process::ToolCommand;
pub use watcher::{DEFAULT_DEBOUNCE, NotifyChangeSource};
