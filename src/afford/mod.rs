//! Affordability calculator.
//!
//! Listings are left-joined to income by postal code once; both metric tables are
//! derived from that joined table independently:
//!
//! - per-listing affordability (`listing`)
//! - postal-code aggregates (`zip`), which join income a second time

pub mod join;
pub mod listing;
pub mod zip;

pub use join::*;
pub use listing::*;
pub use zip::*;

use crate::domain::{Affordability, AffordabilityRules, IncomeRecord, Listing};

/// Join listings to income and compute both affordability tables.
///
/// Postal codes without income are not an error: their metrics are null and each
/// one is reported as a `JoinKeyMismatch` diagnostic.
pub fn compute_affordability(
    listings: &[Listing],
    income: &[IncomeRecord],
    rules: &AffordabilityRules,
) -> Affordability {
    let joined = join_income(listings, income);

    Affordability {
        zip_aggregates: zip_aggregates(&joined, income, rules),
        listings: listing_metrics(&joined, rules),
        diagnostics: unmatched_postal_codes(&joined),
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use crate::domain::Listing;

    pub fn listing(line: usize, postal_code: u32, price: f64) -> Listing {
        Listing {
            line,
            address: None,
            url: None,
            price,
            bedrooms: Some(3.0),
            bathrooms: Some(2.0),
            area_sqft: 1_500.0,
            postal_code,
            price_per_sqft: price / 1_500.0,
        }
    }
}
