//! Input/output helpers.
//!
//! - code-list catalog ingest (`catalog`)
//! - catalog and wide-table CSV sinks (`export`)

pub mod catalog;
pub mod export;

pub use catalog::*;
pub use export::*;
