//! Site generator adapters.

mod jekyll;

pub use jekyll::JekyllGenerator;
