//! Change source adapters.

mod notify_source;

pub use notify_source::{DEFAULT_DEBOUNCE, NotifyChangeSource};
