//! Postal-code aggregates.

use std::collections::BTreeMap;

use crate::afford::join::income_index;
use crate::domain::{AffordabilityRules, IncomeRecord, JoinedListing, ZipAggregate};

/// Group listings by postal code and compute price spread, house-price-to-income
/// ratio and the unaffordable flag.
///
/// Income is looked up again from `income` rather than carried through the group,
/// so each postal code gets exactly one income value. Output is ordered by postal
/// code.
pub fn zip_aggregates(
    joined: &[JoinedListing],
    income: &[IncomeRecord],
    rules: &AffordabilityRules,
) -> Vec<ZipAggregate> {
    let mut groups: BTreeMap<u32, Vec<f64>> = BTreeMap::new();
    for row in joined {
        groups
            .entry(row.listing.postal_code)
            .or_default()
            .push(row.listing.price);
    }

    let index = income_index(income);

    groups
        .into_iter()
        .filter_map(|(postal_code, mut prices)| {
            prices.sort_by(f64::total_cmp);
            let min_price = *prices.first()?;
            let max_price = *prices.last()?;
            let median_price = median_sorted(&prices)?;

            let household_median_income = index.get(&postal_code).copied();
            let house_price_to_income_ratio =
                household_median_income.map(|income| round_to_tenth(median_price / income));
            let unaffordable =
                household_median_income.is_some_and(|income| min_price > rules.affordable_price(income));

            Some(ZipAggregate {
                postal_code,
                listing_count: prices.len(),
                min_price,
                max_price,
                median_price,
                household_median_income,
                house_price_to_income_ratio,
                unaffordable,
            })
        })
        .collect()
}

/// Median of an ascending slice; even lengths average the two middle values.
pub(crate) fn median_sorted(sorted: &[f64]) -> Option<f64> {
    let n = sorted.len();
    if n == 0 {
        return None;
    }
    let mid = n / 2;
    if n % 2 == 1 {
        Some(sorted[mid])
    } else {
        Some((sorted[mid - 1] + sorted[mid]) / 2.0)
    }
}

/// Round to one decimal on the exact binary value, ties to even (`6.25` -> `6.2`).
fn round_to_tenth(x: f64) -> f64 {
    if !x.is_finite() {
        return x;
    }
    format!("{x:.1}").parse().unwrap_or(x)
}
