//! Table normalizers.
//!
//! Both normalizers follow the same two-tier failure model:
//!
//! - nullable fields parse to `Option<f64>`; a failure becomes `None` plus a
//!   `NullableParseFailure` diagnostic
//! - required fields parse to `Result<_, RowFailure>`; a failure rejects the row, and
//!   [`RowPolicy`] decides whether that aborts the table or only skips the row

pub mod income;
pub mod listings;
pub mod price;

pub use income::*;
pub use listings::*;
pub use price::*;

use crate::domain::{Diagnostic, DiagnosticKind, RowPolicy};
use crate::error::{PipelineError, RowFailure, TableKind};

/// Parse a nullable numeric cell.
///
/// Blank cells are null without a diagnostic; non-blank text that is not a number
/// is null with one.
pub(crate) fn nullable_f64(
    table: TableKind,
    line: usize,
    field: &'static str,
    raw: &str,
    diagnostics: &mut Vec<Diagnostic>,
) -> Option<f64> {
    let text = raw.trim();
    if text.is_empty() {
        return None;
    }
    match text.parse::<f64>() {
        Ok(v) if !v.is_nan() => Some(v),
        _ => {
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::NullableParseFailure,
                table,
                line: Some(line),
                field: Some(field),
                message: format!("{text:?} is not numeric; stored as null"),
            });
            None
        }
    }
}

/// Remove every occurrence of `chars` from `text`.
pub(crate) fn strip_chars(text: &str, chars: &[char]) -> String {
    text.chars().filter(|c| !chars.contains(c)).collect()
}

/// Parse a required floating-point cell after removing separator characters.
pub(crate) fn required_f64(field: &'static str, raw: &str, strip: &[char]) -> Result<f64, RowFailure> {
    let cleaned = strip_chars(raw, strip);
    cleaned
        .trim()
        .parse::<f64>()
        .map_err(|_| RowFailure::new(field, raw, "not a number"))
}

/// Parse a postal code. Only plain digits are accepted.
pub(crate) fn postal_code(field: &'static str, raw: &str) -> Result<u32, RowFailure> {
    let text = raw.trim();
    if text.is_empty() || !text.chars().all(|c| c.is_ascii_digit()) {
        return Err(RowFailure::new(field, raw, "postal code must be an integer"));
    }
    text.parse::<u32>()
        .map_err(|_| RowFailure::new(field, raw, "postal code out of range"))
}

/// Apply `policy` to a rejected row.
///
/// Returns `Err` when the table must be aborted, otherwise records the skip.
pub(crate) fn reject_row(
    policy: RowPolicy,
    table: TableKind,
    line: usize,
    failure: RowFailure,
    diagnostics: &mut Vec<Diagnostic>,
) -> Result<(), PipelineError> {
    match policy {
        RowPolicy::Abort => Err(PipelineError::schema(table, line, failure)),
        RowPolicy::Skip => {
            tracing::debug!(%table, line, field = failure.field, "skipping row");
            diagnostics.push(Diagnostic {
                kind: DiagnosticKind::SchemaParseFailure,
                table,
                line: Some(line),
                field: Some(failure.field),
                message: format!("{:?}: {}; row skipped", failure.value, failure.reason),
            });
            Ok(())
        }
    }
}
