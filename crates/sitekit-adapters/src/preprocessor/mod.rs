//! Style preprocessor adapters.

mod lessc;

pub use lessc::LesscPreprocessor;
