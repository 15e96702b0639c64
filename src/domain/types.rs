//! Shared domain types.
//!
//! These types are intentionally lightweight: they are built once per run,
//! held in memory for the duration of the batch, and consumed read-only by
//! the pivot and the CSV sinks.

use std::collections::HashMap;

use crate::domain::period::PeriodLabel;

/// One parsed observation from a CompactData series node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Observation {
    pub period: PeriodLabel,
    /// `@OBS_VALUE`, or empty when the attribute is absent.
    pub value: String,
    /// `@OBS_STATUS`, or empty when the attribute is absent.
    pub status: String,
}

/// All observations fetched for one (area, indicator-chunk) selector,
/// together with the series identity attached at fetch time.
#[derive(Debug, Clone)]
pub struct SeriesRecord {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    pub observations: Vec<Observation>,
}

/// One code-list entry from the DataStructure document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeEntry {
    pub list_id: String,
    pub list_name: String,
    pub value: String,
    pub description: String,
}

/// One concept entry from the DataStructure document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConceptEntry {
    pub id: String,
    pub name: String,
    pub description: String,
}

/// One key-family component row (a dimension, time dimension, measure or
/// attribute of a series schema).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyFamilyComponent {
    pub family_id: String,
    pub family_name: String,
    pub component_type: String,
    pub concept_ref: String,
}

/// The three flattened catalogs extracted from one DataStructure document.
#[derive(Debug, Clone, Default)]
pub struct StructureCatalog {
    pub code_lists: Vec<CodeEntry>,
    pub concepts: Vec<ConceptEntry>,
    pub key_families: Vec<KeyFamilyComponent>,
}

impl StructureCatalog {
    /// `code value → description` lookup for one code list.
    pub fn code_lookup(&self, list_id: &str) -> HashMap<String, String> {
        code_lookup(&self.code_lists, list_id)
    }

    /// All code values of one code list, in document order.
    pub fn code_values(&self, list_id: &str) -> Vec<String> {
        code_values(&self.code_lists, list_id)
    }
}

/// `code value → description` lookup for the entries of one code list.
pub fn code_lookup(entries: &[CodeEntry], list_id: &str) -> HashMap<String, String> {
    entries
        .iter()
        .filter(|e| e.list_id == list_id)
        .map(|e| (e.value.clone(), e.description.clone()))
        .collect()
}

/// All code values of one code list, in catalog order.
pub fn code_values(entries: &[CodeEntry], list_id: &str) -> Vec<String> {
    entries
        .iter()
        .filter(|e| e.list_id == list_id)
        .map(|e| e.value.clone())
        .collect()
}

/// A full run's configuration as understood by the data pipeline.
///
/// This is derived from CLI flags plus the code-list catalog; the pipeline
/// itself never touches argv or the environment.
#[derive(Debug, Clone)]
pub struct ExtractConfig {
    /// Dataset id appended to the service endpoints (e.g. `IFS`).
    pub dataset: String,
    /// Area codes to fetch, in order.
    pub areas: Vec<String>,
    /// Indicator codes to fetch, chunked per `chunk_size`.
    pub indicators: Vec<String>,
    /// Frequency selector for the series key; empty requests all frequencies.
    pub frequency: String,
    /// First year of the period axis and of the upstream request range.
    pub start_year: u16,
    /// Last year (inclusive).
    pub end_year: u16,
    /// Maximum indicators joined into one CompactData request.
    pub chunk_size: usize,
}

/// A fetch unit that was skipped after a non-fatal failure.
#[derive(Debug, Clone)]
pub struct SkippedUnit {
    pub unit: String,
    pub reason: String,
}

/// Whether a wide row carries observation values or status flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Value,
    Status,
}

impl Attribute {
    pub fn label(self) -> &'static str {
        match self {
            Attribute::Value => "Value",
            Attribute::Status => "Status",
        }
    }
}

/// One pivoted output row: series identity, attribute, one cell per axis
/// column in global axis order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputRow {
    pub country_name: String,
    pub country_code: String,
    pub indicator_name: String,
    pub indicator_code: String,
    pub attribute: Attribute,
    /// Empty string where the row's band has no observation for the column.
    pub cells: Vec<String>,
}

/// Fixed identity columns preceding the period columns.
pub const IDENTITY_HEADERS: [&str; 5] = [
    "Country Name",
    "Country Code",
    "Indicator Name",
    "Indicator Code",
    "Attribute",
];

/// The pivoted wide table: the period axis plus all emitted rows.
#[derive(Debug, Clone)]
pub struct WideTable {
    pub axis: Vec<PeriodLabel>,
    pub rows: Vec<OutputRow>,
}

impl WideTable {
    /// Column headers: the identity columns followed by the axis labels.
    pub fn header(&self) -> Vec<String> {
        IDENTITY_HEADERS
            .iter()
            .map(|h| h.to_string())
            .chain(self.axis.iter().map(PeriodLabel::canonical))
            .collect()
    }

    /// Total column count, identity columns included.
    pub fn column_count(&self) -> usize {
        IDENTITY_HEADERS.len() + self.axis.len()
    }
}
