//! CSV sinks for the catalogs and the pivoted wide table.
//!
//! The exports are meant to be easy to consume in spreadsheets or downstream
//! scripts; the `csv` writer takes care of quoting (several area names carry
//! commas).

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::types::{CodeEntry, ConceptEntry, KeyFamilyComponent, WideTable};
use crate::error::ExtractError;
use crate::io::catalog::CODE_LIST_HEADERS;

/// Write the code-list catalog (readable back by [`crate::io::catalog::load_code_lists`]).
pub fn write_code_lists_csv(path: &Path, entries: &[CodeEntry]) -> Result<(), ExtractError> {
    write_code_lists(File::create(path)?, entries)
}

/// Write the concept catalog.
pub fn write_concepts_csv(path: &Path, entries: &[ConceptEntry]) -> Result<(), ExtractError> {
    write_concepts(File::create(path)?, entries)
}

/// Write the key-family component catalog.
pub fn write_key_families_csv(
    path: &Path,
    entries: &[KeyFamilyComponent],
) -> Result<(), ExtractError> {
    write_key_families(File::create(path)?, entries)
}

/// Write the pivoted wide table.
pub fn write_wide_csv(path: &Path, table: &WideTable) -> Result<(), ExtractError> {
    write_wide(File::create(path)?, table)
}

fn write_code_lists<W: Write>(writer: W, entries: &[CodeEntry]) -> Result<(), ExtractError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(CODE_LIST_HEADERS)?;
    for e in entries {
        w.write_record([&e.list_id, &e.list_name, &e.value, &e.description])?;
    }
    w.flush()?;
    Ok(())
}

fn write_concepts<W: Write>(writer: W, entries: &[ConceptEntry]) -> Result<(), ExtractError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["Concept ID", "Concept Name", "Description"])?;
    for e in entries {
        w.write_record([&e.id, &e.name, &e.description])?;
    }
    w.flush()?;
    Ok(())
}

fn write_key_families<W: Write>(
    writer: W,
    entries: &[KeyFamilyComponent],
) -> Result<(), ExtractError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(["KeyFamily ID", "KeyFamily Name", "Component Type", "Concept Ref"])?;
    for e in entries {
        w.write_record([&e.family_id, &e.family_name, &e.component_type, &e.concept_ref])?;
    }
    w.flush()?;
    Ok(())
}

fn write_wide<W: Write>(writer: W, table: &WideTable) -> Result<(), ExtractError> {
    let mut w = csv::Writer::from_writer(writer);
    w.write_record(table.header())?;
    for row in &table.rows {
        let mut record = Vec::with_capacity(table.column_count());
        record.push(row.country_name.as_str());
        record.push(row.country_code.as_str());
        record.push(row.indicator_name.as_str());
        record.push(row.indicator_code.as_str());
        record.push(row.attribute.label());
        record.extend(row.cells.iter().map(String::as_str));
        w.write_record(record)?;
    }
    w.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::period::PeriodLabel;
    use crate::domain::types::{Attribute, OutputRow};
    use crate::io::catalog::read_code_lists;

    fn to_string(buf: Vec<u8>) -> String {
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn code_list_export_round_trips_through_the_catalog_reader() {
        let entries = vec![
            CodeEntry {
                list_id: "CL_AREA_IFS".to_string(),
                list_name: "Geographical Areas".to_string(),
                value: "AF".to_string(),
                description: "Afghanistan, Islamic Rep. of".to_string(),
            },
            CodeEntry {
                list_id: "CL_INDICATOR_IFS".to_string(),
                list_name: "Indicators".to_string(),
                value: "NGDP_R".to_string(),
                description: "Real GDP".to_string(),
            },
        ];

        let mut buf = Vec::new();
        write_code_lists(&mut buf, &entries).unwrap();
        let text = to_string(buf);
        // The comma-carrying description must be quoted.
        assert!(text.contains("\"Afghanistan, Islamic Rep. of\""));

        let reread = read_code_lists(text.as_bytes()).unwrap();
        assert_eq!(reread, entries);
    }

    #[test]
    fn wide_export_writes_header_then_rows_in_axis_order() {
        let table = WideTable {
            axis: vec![
                PeriodLabel::Annual { year: 2009 },
                PeriodLabel::Quarterly { year: 2009, quarter: 1 },
            ],
            rows: vec![OutputRow {
                country_name: "United States".to_string(),
                country_code: "US".to_string(),
                indicator_name: "Indicators 1-2".to_string(),
                indicator_code: "NGDP_R+PCPI_IX".to_string(),
                attribute: Attribute::Value,
                cells: vec!["101.3".to_string(), String::new()],
            }],
        };

        let mut buf = Vec::new();
        write_wide(&mut buf, &table).unwrap();
        let text = to_string(buf);
        let mut lines = text.lines();
        assert_eq!(
            lines.next().unwrap(),
            "Country Name,Country Code,Indicator Name,Indicator Code,Attribute,2009,2009Q1"
        );
        assert_eq!(
            lines.next().unwrap(),
            "United States,US,Indicators 1-2,NGDP_R+PCPI_IX,Value,101.3,"
        );
        assert!(lines.next().is_none());
    }

    #[test]
    fn concept_and_key_family_exports_use_the_catalog_headers() {
        let mut buf = Vec::new();
        write_concepts(
            &mut buf,
            &[ConceptEntry {
                id: "OBS_VALUE".to_string(),
                name: "Value".to_string(),
                description: String::new(),
            }],
        )
        .unwrap();
        assert!(to_string(buf).starts_with("Concept ID,Concept Name,Description\n"));

        let mut buf = Vec::new();
        write_key_families(
            &mut buf,
            &[KeyFamilyComponent {
                family_id: "IFS".to_string(),
                family_name: "International Financial Statistics".to_string(),
                component_type: "TimeDimension".to_string(),
                concept_ref: "TIME_PERIOD".to_string(),
            }],
        )
        .unwrap();
        assert!(to_string(buf).starts_with("KeyFamily ID,KeyFamily Name,Component Type,Concept Ref\n"));
    }
}
