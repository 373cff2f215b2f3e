//! Input/output helpers.
//!
//! - CSV ingest of raw listing and income tables (`ingest`)
//! - CSV/JSON exports of the affordability tables (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
