//! Error taxonomy for the extract pipelines.
//!
//! Upstream failures (fetch, parse, malformed period labels) are recovered
//! locally: the affected unit is logged and skipped, and the run continues
//! with a smaller output. Only local I/O problems abort a run.

use thiserror::Error;

/// All errors produced by the extract pipelines.
#[derive(Debug, Error)]
pub enum ExtractError {
    /// Transport failure or non-success status from the upstream service.
    #[error("fetch {unit}: {message}")]
    Fetch { unit: String, message: String },

    /// Response body did not match the expected document shape.
    #[error("parse {unit}: {message}")]
    Parse { unit: String, message: String },

    /// A time period label matching none of the recognized shapes.
    #[error("unrecognized time period label '{0}'")]
    MalformedPeriod(String),

    /// Local file I/O (catalog input, CSV sinks).
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// CSV encoding or decoding.
    #[error(transparent)]
    Csv(#[from] csv::Error),
}

impl ExtractError {
    /// Process exit code for the binary: local input/output problems exit 2,
    /// upstream data problems exit 4.
    pub fn exit_code(&self) -> u8 {
        match self {
            ExtractError::Io(_) | ExtractError::Csv(_) => 2,
            ExtractError::Fetch { .. }
            | ExtractError::Parse { .. }
            | ExtractError::MalformedPeriod(_) => 4,
        }
    }

    /// Shorthand for a fetch failure on `unit`.
    pub fn fetch(unit: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ExtractError::Fetch {
            unit: unit.into(),
            message: message.to_string(),
        }
    }

    /// Shorthand for a parse failure on `unit`.
    pub fn parse(unit: impl Into<String>, message: impl std::fmt::Display) -> Self {
        ExtractError::Parse {
            unit: unit.into(),
            message: message.to_string(),
        }
    }
}
