//! Command-line parsing for the IFS extract tool.
//!
//! The goal of this module is to keep **argument parsing** and **command
//! dispatch** separate from the fetch and pivot code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "ifs", version, about = "IMF IFS metadata and series extractor")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Fetch the DataStructure document and write the three catalog CSVs.
    Structure(StructureArgs),
    /// Fetch CompactData series and write the pivoted wide CSV.
    Data(DataArgs),
}

/// Options for the metadata extract.
#[derive(Debug, Parser, Clone)]
pub struct StructureArgs {
    /// Dataset id on the SDMX service.
    #[arg(long, default_value = "IFS")]
    pub dataset: String,

    /// Service root URL.
    #[arg(long, default_value = crate::data::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Directory for CodeLists.csv, Concepts.csv and KeyFamilies.csv.
    #[arg(long, default_value = ".")]
    pub out_dir: PathBuf,
}

/// Options for the series extract.
#[derive(Debug, Parser, Clone)]
pub struct DataArgs {
    /// Dataset id on the SDMX service.
    #[arg(long, default_value = "IFS")]
    pub dataset: String,

    /// Service root URL.
    #[arg(long, default_value = crate::data::DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Code-list catalog CSV written by `ifs structure`.
    #[arg(long, default_value = "CodeLists.csv")]
    pub codelists: PathBuf,

    /// Area codes to fetch (default: every code of the area list, capped by
    /// --max-areas).
    #[arg(long, value_delimiter = ',')]
    pub areas: Vec<String>,

    /// Indicator codes to fetch (default: every code of the indicator list).
    #[arg(long, value_delimiter = ',')]
    pub indicators: Vec<String>,

    /// Frequency dimension for the series key (e.g. A, Q, M); empty requests
    /// all frequencies.
    #[arg(long, default_value = "")]
    pub frequency: String,

    /// Cap on the number of areas taken from the catalog.
    #[arg(long, default_value_t = 100)]
    pub max_areas: usize,

    /// Code list holding area codes and names.
    #[arg(long, default_value = "CL_AREA_IFS")]
    pub area_list: String,

    /// Code list holding indicator codes.
    #[arg(long, default_value = "CL_INDICATOR_IFS")]
    pub indicator_list: String,

    /// First year of the request range and period axis.
    #[arg(long, default_value_t = 2009)]
    pub start_year: u16,

    /// Last year of the request range and period axis (inclusive).
    #[arg(long, default_value_t = 2009)]
    pub end_year: u16,

    /// Maximum indicators joined into one request.
    #[arg(long, default_value_t = 2)]
    pub chunk_size: usize,

    /// Output CSV path.
    #[arg(long, default_value = "output_final.csv")]
    pub out: PathBuf,
}
