//! Period axis construction and the wide-format pivot.
//!
//! Responsibilities:
//!
//! - generate the complete period axis for a year range (`axis`)
//! - project sparse observations into dense Value/Status row pairs (`engine`)

pub mod axis;
pub mod engine;

pub use axis::*;
pub use engine::*;
