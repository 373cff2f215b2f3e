//! Listing normalization.
//!
//! Turns scraped listing rows into typed [`Listing`]s and derives price per square
//! foot. Bedrooms and bathrooms are nullable; price, area and postal code are
//! required.

use crate::domain::{Diagnostic, Listing, ListingTable, RawListing, RowPolicy};
use crate::error::{PipelineError, RowFailure, TableKind};
use crate::normalize::price::PriceParser;
use crate::normalize::{nullable_f64, postal_code, reject_row, required_f64};

/// Normalize a raw listing table.
///
/// Output order follows input order. Skipped rows (under [`RowPolicy::Skip`]) are
/// reported in `diagnostics`.
pub fn normalize_listings<P>(
    raw: &[RawListing],
    prices: &P,
    policy: RowPolicy,
) -> Result<ListingTable, PipelineError>
where
    P: PriceParser + ?Sized,
{
    let mut table = ListingTable {
        records: Vec::with_capacity(raw.len()),
        diagnostics: Vec::new(),
    };

    for row in raw {
        match normalize_row(row, prices) {
            Ok((listing, diagnostics)) => {
                table.records.push(listing);
                table.diagnostics.extend(diagnostics);
            }
            Err(failure) => {
                reject_row(policy, TableKind::Listings, row.line, failure, &mut table.diagnostics)?
            }
        }
    }

    Ok(table)
}

fn normalize_row<P>(row: &RawListing, prices: &P) -> Result<(Listing, Vec<Diagnostic>), RowFailure>
where
    P: PriceParser + ?Sized,
{
    let price = prices
        .parse_price(&row.price)
        .map_err(|reason| RowFailure::new("price", &row.price, reason))?;
    let area_sqft = required_f64("sqft", &row.sqft, &[','])?;
    let postal_code = postal_code("zipcode", &row.zipcode)?;

    let mut diagnostics = Vec::new();
    let bedrooms = nullable_f64(TableKind::Listings, row.line, "bedrooms", &row.bedrooms, &mut diagnostics);
    let bathrooms = nullable_f64(TableKind::Listings, row.line, "bathrooms", &row.bathrooms, &mut diagnostics);

    let listing = Listing {
        line: row.line,
        address: row.address.clone(),
        url: row.url.clone(),
        price,
        bedrooms,
        bathrooms,
        area_sqft,
        postal_code,
        price_per_sqft: price / area_sqft,
    };

    Ok((listing, diagnostics))
}
