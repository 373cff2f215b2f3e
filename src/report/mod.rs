//! Reporting utilities: rankings and formatted terminal output.

pub mod format;

pub use format::*;

use crate::domain::{ListingAffordability, ZipAggregate};

/// Postal codes ordered by price-to-income ratio, highest first; null ratios last.
pub fn rank_zips_by_ratio(zips: &[ZipAggregate], top_n: usize) -> Vec<&ZipAggregate> {
    let mut sorted: Vec<&ZipAggregate> = zips.iter().collect();
    sorted.sort_by(|a, b| {
        let ra = a.house_price_to_income_ratio.unwrap_or(f64::NEG_INFINITY);
        let rb = b.house_price_to_income_ratio.unwrap_or(f64::NEG_INFINITY);
        rb.total_cmp(&ra).then(a.postal_code.cmp(&b.postal_code))
    });
    sorted.truncate(top_n);
    sorted
}

/// Listings with the largest (most negative) affordability gap.
///
/// Listings that are affordable or have no income data are left out.
pub fn rank_listing_gaps(listings: &[ListingAffordability], top_n: usize) -> Vec<&ListingAffordability> {
    let mut sorted: Vec<&ListingAffordability> = listings
        .iter()
        .filter(|m| m.affordability_gap.is_some_and(|g| g < 0.0))
        .collect();
    sorted.sort_by(|a, b| {
        let ga = a.affordability_gap.unwrap_or_default();
        let gb = b.affordability_gap.unwrap_or_default();
        ga.total_cmp(&gb).then(a.listing.line.cmp(&b.listing.line))
    });
    sorted.truncate(top_n);
    sorted
}
