//! Per-listing affordability.

use crate::domain::{AffordabilityRules, JoinedListing, ListingAffordability};

/// Compute affordable price and the clamped affordability gap for each listing.
///
/// A listing priced at or below its affordable price reports a gap of `0`; only
/// shortfalls are reported. Null income gives null metrics.
pub fn listing_metrics(joined: &[JoinedListing], rules: &AffordabilityRules) -> Vec<ListingAffordability> {
    joined
        .iter()
        .map(|row| {
            let affordable_price = row.household_median_income.map(|income| rules.affordable_price(income));
            let affordability_gap = affordable_price.map(|afford| clamp_gap(afford - row.listing.price));
            ListingAffordability {
                listing: row.listing.clone(),
                household_median_income: row.household_median_income,
                affordable_price,
                affordability_gap,
            }
        })
        .collect()
}

fn clamp_gap(raw_gap: f64) -> f64 {
    if raw_gap < 0.0 { raw_gap } else { 0.0 }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::afford::test_support::listing;

    fn joined(price: f64, income: Option<f64>) -> JoinedListing {
        JoinedListing {
            listing: listing(2, 98103, price),
            household_median_income: income,
        }
    }

    #[test]
    fn expensive_listing_keeps_negative_gap() {
        let out = listing_metrics(&[joined(900_000.0, Some(60_000.0))], &AffordabilityRules::default());
        assert_eq!(out[0].affordable_price, Some(180_000.0));
        assert_eq!(out[0].affordability_gap, Some(-720_000.0));
    }

    #[test]
    fn affordable_listing_reports_zero_gap() {
        let out = listing_metrics(&[joined(100_000.0, Some(60_000.0))], &AffordabilityRules::default());
        assert_eq!(out[0].affordable_price, Some(180_000.0));
        assert_eq!(out[0].affordability_gap, Some(0.0));
    }

    #[test]
    fn missing_income_gives_null_metrics() {
        let out = listing_metrics(&[joined(100_000.0, None)], &AffordabilityRules::default());
        assert_eq!(out[0].affordable_price, None);
        assert_eq!(out[0].affordability_gap, None);
    }

    #[test]
    fn gap_is_never_positive() {
        let rows: Vec<JoinedListing> = [1.0, 50_000.0, 180_000.0, 180_001.0, 2_000_000.0]
            .into_iter()
            .map(|price| joined(price, Some(60_000.0)))
            .collect();
        for m in listing_metrics(&rows, &AffordabilityRules::default()) {
            assert!(m.affordability_gap.unwrap() <= 0.0);
        }
    }

    #[test]
    fn income_multiple_is_configurable() {
        let rules = AffordabilityRules { income_multiple: 5.0 };
        let out = listing_metrics(&[joined(400_000.0, Some(60_000.0))], &rules);
        assert_eq!(out[0].affordable_price, Some(300_000.0));
        assert_eq!(out[0].affordability_gap, Some(-100_000.0));
    }
}
