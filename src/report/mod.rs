//! Formatted terminal summaries for both pipelines.

pub mod format;

pub use format::*;
