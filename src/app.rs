//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - initializes logging
//! - parses CLI arguments
//! - runs the requested extract pipeline
//! - writes CSV outputs and prints the run summary

use clap::Parser;
use tracing_subscriber::EnvFilter;

use crate::cli::{Cli, Command, DataArgs, StructureArgs};
use crate::data::{DataClient, StructureClient};
use crate::domain::types::{ExtractConfig, code_lookup, code_values};
use crate::error::ExtractError;
use crate::io::catalog::load_code_lists;
use crate::io::export;

pub mod pipeline;

/// Entry point for the `ifs` binary.
pub fn run() -> Result<(), ExtractError> {
    init_logging();

    let cli = Cli::parse();
    match cli.command {
        Command::Structure(args) => handle_structure(args),
        Command::Data(args) => handle_data(args),
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn handle_structure(args: StructureArgs) -> Result<(), ExtractError> {
    let client = StructureClient::with_base_url(&args.base_url);
    let catalog = client.fetch_catalog(&args.dataset)?;

    std::fs::create_dir_all(&args.out_dir)?;
    export::write_code_lists_csv(&args.out_dir.join("CodeLists.csv"), &catalog.code_lists)?;
    export::write_concepts_csv(&args.out_dir.join("Concepts.csv"), &catalog.concepts)?;
    export::write_key_families_csv(
        &args.out_dir.join("KeyFamilies.csv"),
        &catalog.key_families,
    )?;

    println!(
        "{}",
        crate::report::format_structure_summary(&catalog, &args.out_dir)
    );
    Ok(())
}

fn handle_data(args: DataArgs) -> Result<(), ExtractError> {
    let entries = load_code_lists(&args.codelists)?;
    let area_names = code_lookup(&entries, &args.area_list);

    let areas = if args.areas.is_empty() {
        // Mirror the catalog-driven selection: every known area, capped.
        let mut derived = code_values(&entries, &args.area_list);
        derived.truncate(args.max_areas);
        derived
    } else {
        args.areas.clone()
    };
    let indicators = if args.indicators.is_empty() {
        code_values(&entries, &args.indicator_list)
    } else {
        args.indicators.clone()
    };

    let config = ExtractConfig {
        dataset: args.dataset.clone(),
        areas,
        indicators,
        frequency: args.frequency.clone(),
        start_year: args.start_year,
        end_year: args.end_year,
        chunk_size: args.chunk_size,
    };

    let client = DataClient::with_base_url(&args.base_url);
    let run = pipeline::run_data(&client, &config, &area_names);

    export::write_wide_csv(&args.out, &run.table)?;

    println!(
        "{}",
        crate::report::format_data_summary(
            &config,
            &run.table,
            run.records.len(),
            &run.skipped,
            &args.out,
        )
    );
    Ok(())
}
