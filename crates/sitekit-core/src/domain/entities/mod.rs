pub mod common;
pub mod layout;
pub mod task;

pub use crate::domain::DomainError;
pub use layout::{CopyGroup, PathConfig, PathConfigBuilder, StyleMapping, WatchGroup};
pub use task::{TaskKind, TaskRegistry};
