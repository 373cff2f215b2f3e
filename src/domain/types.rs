//! Shared domain types.
//!
//! Every stage of the pipeline takes whole tables in and hands new tables out, so
//! these types are plain owned data:
//!
//! - raw rows exactly as read (`RawListing`, `RawIncome`)
//! - typed records (`Listing`, `IncomeRecord`, `JoinedListing`)
//! - metric outputs (`ListingAffordability`, `ZipAggregate`)

use std::path::PathBuf;

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

use crate::error::TableKind;

/// Default income multiple behind the "3x income" affordability rule of thumb.
pub const DEFAULT_INCOME_MULTIPLE: f64 = 3.0;

/// What to do with a row that cannot be typed (malformed postal code, area, income).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum RowPolicy {
    /// The first bad row aborts normalization of the whole table.
    #[default]
    Abort,
    /// Bad rows are dropped and reported as diagnostics.
    Skip,
}

/// One scraped listing, every cell still text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawListing {
    /// 1-based source line (for diagnostics).
    pub line: usize,
    pub address: Option<String>,
    pub url: Option<String>,
    pub price: String,
    pub bedrooms: String,
    pub bathrooms: String,
    pub sqft: String,
    pub zipcode: String,
}

/// One census income row: the geography label and the median income text.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawIncome {
    pub line: usize,
    /// e.g. `"ZCTA5 98103"`.
    pub geography: String,
    /// e.g. `"112,340"`, `"250,000+"` or the no-data marker `"-"`.
    pub median_income: String,
}

/// A typed listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Listing {
    pub line: usize,
    pub address: Option<String>,
    pub url: Option<String>,
    pub price: f64,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub area_sqft: f64,
    pub postal_code: u32,
    /// `price / area_sqft`; infinite or NaN when the area is zero.
    pub price_per_sqft: f64,
}

/// Median household income for one postal code.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct IncomeRecord {
    pub postal_code: u32,
    pub household_median_income: f64,
}

/// A listing left-joined against the income table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct JoinedListing {
    pub listing: Listing,
    /// `None` when the postal code has no income row.
    pub household_median_income: Option<f64>,
}

/// Per-listing affordability.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ListingAffordability {
    pub listing: Listing,
    pub household_median_income: Option<f64>,
    /// `income * income_multiple`.
    pub affordable_price: Option<f64>,
    /// `affordable_price - price`, reported only when negative, otherwise `0`.
    pub affordability_gap: Option<f64>,
}

/// Affordability aggregated over all listings of one postal code.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZipAggregate {
    pub postal_code: u32,
    pub listing_count: usize,
    pub min_price: f64,
    pub max_price: f64,
    pub median_price: f64,
    pub household_median_income: Option<f64>,
    /// Median price over income, rounded to one decimal. Non-finite for zero income.
    pub house_price_to_income_ratio: Option<f64>,
    /// Even the cheapest listing costs more than `income * income_multiple`.
    pub unaffordable: bool,
}

/// Knobs of the affordability formulas.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AffordabilityRules {
    pub income_multiple: f64,
}

impl Default for AffordabilityRules {
    fn default() -> Self {
        Self {
            income_multiple: DEFAULT_INCOME_MULTIPLE,
        }
    }
}

impl AffordabilityRules {
    pub fn affordable_price(&self, income: f64) -> f64 {
        income * self.income_multiple
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    /// A nullable field failed to parse and became null.
    NullableParseFailure,
    /// A row failed to parse and was skipped (`RowPolicy::Skip` only).
    SchemaParseFailure,
    /// Listings exist for a postal code with no income row.
    JoinKeyMismatch,
}

/// Something the pipeline recovered from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Diagnostic {
    pub kind: DiagnosticKind,
    pub table: TableKind,
    /// Source line, when the diagnostic is about a single row.
    pub line: Option<usize>,
    pub field: Option<&'static str>,
    pub message: String,
}

/// Output of the listing normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ListingTable {
    pub records: Vec<Listing>,
    pub diagnostics: Vec<Diagnostic>,
}

/// Output of the income normalizer.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct IncomeTable {
    pub records: Vec<IncomeRecord>,
    /// Rows dropped because their income was the no-data marker.
    pub dropped_sentinel: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Output of the affordability calculator.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Affordability {
    pub zip_aggregates: Vec<ZipAggregate>,
    pub listings: Vec<ListingAffordability>,
    pub diagnostics: Vec<Diagnostic>,
}

/// A full run's configuration as understood by the driver.
///
/// Derived from CLI flags (plus defaults).
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub listings_path: PathBuf,
    pub income_path: PathBuf,
    pub row_policy: RowPolicy,
    pub rules: AffordabilityRules,
    pub top_n: usize,
    pub export_listings: Option<PathBuf>,
    pub export_zips: Option<PathBuf>,
    pub export_json: Option<PathBuf>,
}
