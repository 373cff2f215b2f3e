//! Domain types used throughout the pipeline.
//!
//! This module defines:
//!
//! - raw input rows (`RawListing`, `RawIncome`)
//! - normalized records and tables (`Listing`, `IncomeRecord`, `ListingTable`, `IncomeTable`)
//! - affordability outputs (`ListingAffordability`, `ZipAggregate`, `Affordability`)
//! - run configuration (`RowPolicy`, `AffordabilityRules`, `RunConfig`)

pub mod types;

pub use types::*;
