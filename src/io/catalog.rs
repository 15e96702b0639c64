//! Code-list catalog ingest.
//!
//! The data pipeline bootstraps its area/indicator selectors and the region
//! name lookup from the `CodeLists.csv` written by the structure pipeline,
//! so a series run does not have to re-fetch the DataStructure document.

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::types::CodeEntry;
use crate::error::ExtractError;

/// Column headers shared by the `export` writer and this reader.
pub const CODE_LIST_HEADERS: [&str; 4] = [
    "CodeList ID",
    "CodeList Name",
    "Code Value",
    "Code Description",
];

/// Read a code-list catalog CSV from disk.
pub fn load_code_lists(path: &Path) -> Result<Vec<CodeEntry>, ExtractError> {
    let file = File::open(path)?;
    read_code_lists(file)
}

/// Reader-generic loader; the path-based wrapper is the normal entry point.
pub fn read_code_lists<R: Read>(reader: R) -> Result<Vec<CodeEntry>, ExtractError> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let header_map = build_header_map(&headers);
    for required in CODE_LIST_HEADERS {
        if !header_map.contains_key(required) {
            return Err(ExtractError::parse(
                "code-list catalog",
                format!("missing column `{required}`"),
            ));
        }
    }

    let mut entries = Vec::new();
    for record in reader.records() {
        let record = record?;
        entries.push(CodeEntry {
            list_id: field(&record, &header_map, "CodeList ID"),
            list_name: field(&record, &header_map, "CodeList Name"),
            value: field(&record, &header_map, "Code Value"),
            description: field(&record, &header_map, "Code Description"),
        });
    }
    Ok(entries)
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (name.trim().to_string(), idx))
        .collect()
}

fn field(record: &StringRecord, header_map: &HashMap<String, usize>, name: &str) -> String {
    header_map
        .get(name)
        .and_then(|idx| record.get(*idx))
        .unwrap_or_default()
        .to_string()
}
