//! The affordability pipeline as one call, shared by every CLI command.
//!
//! normalize listings | normalize income -> join -> per-listing + postal-code metrics
//!
//! The two normalizers do not depend on each other and run under `rayon::join`;
//! the join starts only after both have returned.

use crate::afford::compute_affordability;
use crate::app::observer::{PipelineObserver, Stage};
use crate::domain::{Affordability, AffordabilityRules, IncomeTable, ListingTable, RawIncome, RawListing, RowPolicy};
use crate::error::PipelineError;
use crate::normalize::{PriceParser, normalize_income, normalize_listings};

/// All computed outputs of a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutput {
    pub listings: ListingTable,
    pub income: IncomeTable,
    pub affordability: Affordability,
}

impl RunOutput {
    /// Every diagnostic of the run, in stage order.
    pub fn diagnostics(&self) -> impl Iterator<Item = &crate::domain::Diagnostic> {
        self.listings
            .diagnostics
            .iter()
            .chain(&self.income.diagnostics)
            .chain(&self.affordability.diagnostics)
    }
}

/// Execute the full pipeline over already-read raw tables.
pub fn run_pipeline(
    raw_listings: &[RawListing],
    raw_income: &[RawIncome],
    prices: &dyn PriceParser,
    policy: RowPolicy,
    rules: &AffordabilityRules,
    observer: &dyn PipelineObserver,
) -> Result<RunOutput, PipelineError> {
    let (listings, income) = rayon::join(
        || {
            observer.stage_started(Stage::NormalizeListings);
            let table = normalize_listings(raw_listings, prices, policy)?;
            observer.stage_finished(Stage::NormalizeListings, table.records.len());
            Ok::<_, PipelineError>(table)
        },
        || {
            observer.stage_started(Stage::NormalizeIncome);
            let table = normalize_income(raw_income, policy)?;
            observer.stage_finished(Stage::NormalizeIncome, table.records.len());
            Ok::<_, PipelineError>(table)
        },
    );
    let (listings, income) = (listings?, income?);

    observer.stage_started(Stage::Affordability);
    let affordability = compute_affordability(&listings.records, &income.records, rules);
    observer.stage_finished(Stage::Affordability, affordability.listings.len());

    let output = RunOutput {
        listings,
        income,
        affordability,
    };
    for diagnostic in output.diagnostics() {
        observer.diagnostic(diagnostic);
    }

    Ok(output)
}
