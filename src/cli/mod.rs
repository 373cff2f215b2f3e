//! Command-line parsing for the affordability analyzer.
//!
//! The goal of this module is to keep **argument parsing** and **command dispatch**
//! separate from the normalization and metrics code.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::domain::{DEFAULT_INCOME_MULTIPLE, RowPolicy};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "afford", version, about = "Housing affordability by postal code from listings and census income")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

/// CLI subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Run the full pipeline, print summary and tables, and optionally export.
    Run(RunArgs),
    /// Print only the postal-code table (useful for scripting).
    Zips(RunArgs),
}

/// Options shared by all commands.
#[derive(Debug, Parser, Clone)]
pub struct RunArgs {
    /// Scraped listings CSV (price, bedrooms, bathrooms, sqft, zipcode).
    #[arg(long, value_name = "CSV")]
    pub listings: PathBuf,

    /// Census median household income CSV.
    #[arg(long, value_name = "CSV")]
    pub income: PathBuf,

    /// What to do with rows that cannot be typed.
    #[arg(long, value_enum, default_value_t = RowPolicy::Abort)]
    pub bad_rows: RowPolicy,

    /// Affordable price as a multiple of median household income.
    #[arg(long, default_value_t = DEFAULT_INCOME_MULTIPLE)]
    pub income_multiple: f64,

    /// Show top-N rows in each table.
    #[arg(long, default_value_t = 20)]
    pub top: usize,

    /// Export per-listing affordability to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_listings: Option<PathBuf>,

    /// Export postal-code aggregates to CSV.
    #[arg(long, value_name = "CSV")]
    pub export_zips: Option<PathBuf>,

    /// Export the whole run (both tables + diagnostics) to JSON.
    #[arg(long, value_name = "JSON")]
    pub export_json: Option<PathBuf>,
}
