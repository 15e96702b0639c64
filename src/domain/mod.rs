//! Domain types used throughout the pipelines.
//!
//! This module defines:
//!
//! - time period labels and their canonical scheme (`PeriodLabel`)
//! - parsed observations and per-unit series records (`Observation`, `SeriesRecord`)
//! - the flattened metadata catalogs (`StructureCatalog`)
//! - pivot outputs (`OutputRow`, `WideTable`)

pub mod period;
pub mod types;

pub use period::*;
pub use types::*;
