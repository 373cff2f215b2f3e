//! Export the affordability tables.
//!
//! CSV exports are meant to be easy to consume in spreadsheets; null values are
//! written as empty cells. The JSON document bundles both tables with the run's
//! diagnostics.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use chrono::Local;
use serde::Serialize;

use crate::app::pipeline::RunOutput;
use crate::domain::{AffordabilityRules, Diagnostic, ListingAffordability, ZipAggregate};
use crate::error::AppError;

#[derive(Debug, Serialize)]
struct ListingRow<'a> {
    line: usize,
    address: &'a str,
    url: &'a str,
    postal_code: u32,
    price: f64,
    bedrooms: Option<f64>,
    bathrooms: Option<f64>,
    area_sqft: f64,
    price_per_sqft: f64,
    household_median_income: Option<f64>,
    affordable_price: Option<f64>,
    affordability_gap: Option<f64>,
}

impl<'a> From<&'a ListingAffordability> for ListingRow<'a> {
    fn from(m: &'a ListingAffordability) -> Self {
        let l = &m.listing;
        ListingRow {
            line: l.line,
            address: l.address.as_deref().unwrap_or(""),
            url: l.url.as_deref().unwrap_or(""),
            postal_code: l.postal_code,
            price: l.price,
            bedrooms: l.bedrooms,
            bathrooms: l.bathrooms,
            area_sqft: l.area_sqft,
            price_per_sqft: l.price_per_sqft,
            household_median_income: m.household_median_income,
            affordable_price: m.affordable_price,
            affordability_gap: m.affordability_gap,
        }
    }
}

/// Write per-listing affordability to CSV.
pub fn write_listings_csv<W: Write>(out: W, rows: &[ListingAffordability]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer
            .serialize(ListingRow::from(row))
            .map_err(|e| AppError::new(4, format!("Failed to write listing export row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush listing export: {e}")))
}

/// Write postal-code aggregates to CSV.
pub fn write_zips_csv<W: Write>(out: W, rows: &[ZipAggregate]) -> Result<(), AppError> {
    let mut writer = csv::Writer::from_writer(out);
    for row in rows {
        writer
            .serialize(row)
            .map_err(|e| AppError::new(4, format!("Failed to write postal-code export row: {e}")))?;
    }
    writer
        .flush()
        .map_err(|e| AppError::new(4, format!("Failed to flush postal-code export: {e}")))
}

/// Full run as a single JSON document.
#[derive(Debug, Serialize)]
pub struct RunDocument<'a> {
    pub tool: &'static str,
    pub generated_at: String,
    pub rules: AffordabilityRules,
    pub listings_used: usize,
    pub income_rows_used: usize,
    pub income_rows_without_data: usize,
    pub zip_aggregates: &'a [ZipAggregate],
    pub listings: &'a [ListingAffordability],
    pub diagnostics: Vec<&'a Diagnostic>,
}

impl<'a> RunDocument<'a> {
    pub fn new(run: &'a RunOutput, rules: AffordabilityRules) -> Self {
        RunDocument {
            tool: "afford",
            generated_at: Local::now().to_rfc3339(),
            rules,
            listings_used: run.listings.records.len(),
            income_rows_used: run.income.records.len(),
            income_rows_without_data: run.income.dropped_sentinel,
            zip_aggregates: &run.affordability.zip_aggregates,
            listings: &run.affordability.listings,
            diagnostics: run.diagnostics().collect(),
        }
    }
}

pub fn write_run_json<W: Write>(out: W, doc: &RunDocument<'_>) -> Result<(), AppError> {
    serde_json::to_writer_pretty(out, doc).map_err(|e| AppError::new(4, format!("Failed to write run JSON: {e}")))
}

/// Create `path` and hand it to `write`.
pub fn export_to_path<F>(path: &Path, what: &str, write: F) -> Result<(), AppError>
where
    F: FnOnce(File) -> Result<(), AppError>,
{
    let file = File::create(path)
        .map_err(|e| AppError::new(4, format!("Failed to create {what} '{}': {e}", path.display())))?;
    write(file)?;
    tracing::info!(path = %path.display(), "wrote {what}");
    Ok(())
}
