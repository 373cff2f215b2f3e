//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and initializes logging
//! - parses CLI arguments
//! - reads the raw CSV tables
//! - runs the affordability pipeline
//! - prints reports and writes optional exports

use clap::Parser;

use crate::cli::{Command, RunArgs};
use crate::domain::{AffordabilityRules, RunConfig};
use crate::error::AppError;
use crate::normalize::CurrencyText;

pub mod observer;
pub mod pipeline;

use observer::TracingObserver;
use pipeline::RunOutput;

/// Entry point for the `afford` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    crate::logging::init_logging();

    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Run(args) => handle_run(args, OutputMode::Full),
        Command::Zips(args) => handle_run(args, OutputMode::ZipsOnly),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum OutputMode {
    Full,
    ZipsOnly,
}

fn handle_run(args: RunArgs, mode: OutputMode) -> Result<(), AppError> {
    let config = run_config_from_args(&args)?;
    let run = execute(&config)?;

    match mode {
        OutputMode::Full => {
            println!("{}", crate::report::format_run_summary(&run, &config));
            println!(
                "{}",
                crate::report::format_zip_table(&run.affordability.zip_aggregates, config.top_n)
            );
            println!(
                "{}",
                crate::report::format_gap_table(&run.affordability.listings, config.top_n)
            );
        }
        OutputMode::ZipsOnly => {
            println!(
                "{}",
                crate::report::format_zip_table(&run.affordability.zip_aggregates, config.top_n)
            );
        }
    }

    write_exports(&run, &config)
}

/// Read inputs and run the pipeline for `config`.
pub fn execute(config: &RunConfig) -> Result<RunOutput, AppError> {
    let raw_listings = crate::io::load_listings(&config.listings_path)?;
    let raw_income = crate::io::load_income(&config.income_path)?;
    tracing::info!(
        listings = raw_listings.len(),
        income = raw_income.len(),
        "read raw tables"
    );

    let run = pipeline::run_pipeline(
        &raw_listings,
        &raw_income,
        &CurrencyText,
        config.row_policy,
        &config.rules,
        &TracingObserver,
    )?;

    if run.listings.records.is_empty() {
        return Err(AppError::new(3, "No valid listings remain after normalization."));
    }

    Ok(run)
}

fn write_exports(run: &RunOutput, config: &RunConfig) -> Result<(), AppError> {
    if let Some(path) = &config.export_listings {
        crate::io::export_to_path(path, "listing CSV", |file| {
            crate::io::write_listings_csv(file, &run.affordability.listings)
        })?;
    }
    if let Some(path) = &config.export_zips {
        crate::io::export_to_path(path, "postal-code CSV", |file| {
            crate::io::write_zips_csv(file, &run.affordability.zip_aggregates)
        })?;
    }
    if let Some(path) = &config.export_json {
        let doc = crate::io::RunDocument::new(run, config.rules);
        crate::io::export_to_path(path, "run JSON", |file| crate::io::write_run_json(file, &doc))?;
    }
    Ok(())
}

pub fn run_config_from_args(args: &RunArgs) -> Result<RunConfig, AppError> {
    if !(args.income_multiple.is_finite() && args.income_multiple > 0.0) {
        return Err(AppError::new(
            2,
            format!("Invalid --income-multiple {} (must be finite and > 0).", args.income_multiple),
        ));
    }

    Ok(RunConfig {
        listings_path: args.listings.clone(),
        income_path: args.income.clone(),
        row_policy: args.bad_rows,
        rules: AffordabilityRules {
            income_multiple: args.income_multiple,
        },
        top_n: args.top,
        export_listings: args.export_listings.clone(),
        export_zips: args.export_zips.clone(),
        export_json: args.export_json.clone(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;
    use crate::domain::RowPolicy;

    fn args(dir: &std::path::Path) -> RunArgs {
        RunArgs {
            listings: dir.join("listings.csv"),
            income: dir.join("income.csv"),
            bad_rows: RowPolicy::Abort,
            income_multiple: 3.0,
            top: 10,
            export_listings: Some(dir.join("out_listings.csv")),
            export_zips: Some(dir.join("out_zips.csv")),
            export_json: Some(dir.join("out.json")),
        }
    }

    fn write_inputs(dir: &std::path::Path) {
        fs::write(
            dir.join("listings.csv"),
            "Address,Price,Bedrooms,Bathrooms,SqFt,Zipcode\n\
             1 Main St,\"$900,000\",3,2,\"1,800\",98103\n\
             2 Main St,\"$100,000\",1,1,600,98103\n\
             3 Pine St,\"$300,000\",2,1,900,98122\n\
             4 Pine St,\"$500,000\",3,2,\"1,400\",98122\n",
        )
        .unwrap();
        fs::write(
            dir.join("income.csv"),
            "Geographic Area Name,Estimate!!Households!!Median income (dollars)\n\
             ZCTA5 98103,\"60,000\"\n\
             ZCTA5 98122,\"60,000\"\n\
             ZCTA5 98101,-\n",
        )
        .unwrap();
    }

    #[test]
    fn end_to_end_run_writes_exports() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        let args = args(dir.path());

        handle_run(args.clone(), OutputMode::ZipsOnly).unwrap();

        let zips = fs::read_to_string(dir.path().join("out_zips.csv")).unwrap();
        let lines: Vec<&str> = zips.lines().collect();
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with("98103,2,100000.0,900000.0,500000.0,60000.0,8.3,false"));
        assert!(lines[2].starts_with("98122,2,300000.0,500000.0,400000.0,60000.0,6.7,true"));

        let listings = fs::read_to_string(dir.path().join("out_listings.csv")).unwrap();
        assert!(listings.lines().nth(1).unwrap().ends_with(",-720000.0"));

        let json: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(dir.path().join("out.json")).unwrap()).unwrap();
        assert_eq!(json["income_rows_without_data"], 1);
        assert_eq!(json["zip_aggregates"].as_array().unwrap().len(), 2);
    }

    #[test]
    fn no_listings_is_exit_code_3() {
        let dir = tempfile::tempdir().unwrap();
        write_inputs(dir.path());
        fs::write(dir.path().join("listings.csv"), "Price,Bedrooms,Bathrooms,SqFt,Zipcode\n").unwrap();

        let config = run_config_from_args(&args(dir.path())).unwrap();
        let err = execute(&config).unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }

    #[test]
    fn rejects_non_positive_income_multiple() {
        let dir = tempfile::tempdir().unwrap();
        let mut a = args(dir.path());
        a.income_multiple = 0.0;
        assert_eq!(run_config_from_args(&a).unwrap_err().exit_code(), 2);
    }
}
