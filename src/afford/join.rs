//! Postal-code left join of listings against income.

use std::collections::{BTreeMap, HashMap};

use crate::domain::{Diagnostic, DiagnosticKind, IncomeRecord, JoinedListing, Listing};
use crate::error::TableKind;

/// Index the income table by postal code.
pub(crate) fn income_index(income: &[IncomeRecord]) -> HashMap<u32, f64> {
    income
        .iter()
        .map(|r| (r.postal_code, r.household_median_income))
        .collect()
}

/// Left-join listings to income. Every listing is kept, in input order.
pub fn join_income(listings: &[Listing], income: &[IncomeRecord]) -> Vec<JoinedListing> {
    let index = income_index(income);
    listings
        .iter()
        .map(|listing| JoinedListing {
            listing: listing.clone(),
            household_median_income: index.get(&listing.postal_code).copied(),
        })
        .collect()
}

/// One `JoinKeyMismatch` per postal code that has listings but no income row,
/// in ascending postal-code order.
pub fn unmatched_postal_codes(joined: &[JoinedListing]) -> Vec<Diagnostic> {
    let mut missing: BTreeMap<u32, usize> = BTreeMap::new();
    for row in joined.iter().filter(|r| r.household_median_income.is_none()) {
        *missing.entry(row.listing.postal_code).or_default() += 1;
    }

    missing
        .into_iter()
        .map(|(postal_code, listings)| Diagnostic {
            kind: DiagnosticKind::JoinKeyMismatch,
            table: TableKind::Income,
            line: None,
            field: None,
            message: format!("no income for postal code {postal_code:05} ({listings} listing(s))"),
        })
        .collect()
}
