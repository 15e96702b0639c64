//! Run summaries printed after each pipeline.
//!
//! We keep formatting code in one place so the fetch/pivot code stays clean
//! and testable, and output changes are localized.

use std::path::Path;

use crate::domain::types::{ExtractConfig, SkippedUnit, StructureCatalog, WideTable};

/// Summary for an `ifs structure` run.
pub fn format_structure_summary(catalog: &StructureCatalog, out_dir: &Path) -> String {
    let mut out = String::new();

    out.push_str("=== ifs - DataStructure extract ===\n");
    out.push_str(&format!(
        "Code lists : {} entries -> {}\n",
        catalog.code_lists.len(),
        out_dir.join("CodeLists.csv").display()
    ));
    out.push_str(&format!(
        "Concepts   : {} entries -> {}\n",
        catalog.concepts.len(),
        out_dir.join("Concepts.csv").display()
    ));
    out.push_str(&format!(
        "Key families: {} components -> {}\n",
        catalog.key_families.len(),
        out_dir.join("KeyFamilies.csv").display()
    ));

    out
}

/// Summary for an `ifs data` run.
///
/// Row/column counts reflect whatever succeeded; skipped units are listed so
/// a smaller-than-expected table is explainable from the terminal output.
pub fn format_data_summary(
    config: &ExtractConfig,
    table: &WideTable,
    records_fetched: usize,
    skipped: &[SkippedUnit],
    out_path: &Path,
) -> String {
    let mut out = String::new();

    out.push_str("=== ifs - CompactData extract ===\n");
    out.push_str(&format!(
        "Selectors: {} areas x {} indicators (chunk size {}) | periods {}-{}\n",
        config.areas.len(),
        config.indicators.len(),
        config.chunk_size,
        config.start_year,
        config.end_year,
    ));
    out.push_str(&format!(
        "Records fetched: {records_fetched} | units skipped: {}\n",
        skipped.len()
    ));
    out.push_str(&format!(
        "Table: {} rows x {} columns -> {}\n",
        table.rows.len(),
        table.column_count(),
        out_path.display()
    ));

    if !skipped.is_empty() {
        out.push_str("\nSkipped units:\n");
        for unit in skipped {
            out.push_str(&format!("- {}: {}\n", unit.unit, unit.reason));
        }
    }

    out
}
