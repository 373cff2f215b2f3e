//! Census income normalization.
//!
//! Census tabulations label each row with a geography such as `"ZCTA5 98103"`
//! and report the median household income as display text. Rows whose income is
//! the no-data marker are dropped; the rest are cleaned and parsed.

use std::collections::HashMap;

use crate::domain::{IncomeRecord, IncomeTable, RawIncome, RowPolicy};
use crate::error::{PipelineError, RowFailure, TableKind};
use crate::normalize::{postal_code, reject_row, required_f64};

/// Census marker for "estimate not available".
pub const NO_DATA_MARKER: &str = "-";

/// Characters removed from income text before parsing.
///
/// `+` marks the open-ended top bucket (`"250,000+"`) and `-` shows up as a stray
/// range fragment (`"2,500-"`). Neither adjusts the value.
const INCOME_STRIP: [char; 3] = [',', '+', '-'];

/// Normalize a raw income table to one record per postal code.
pub fn normalize_income(raw: &[RawIncome], policy: RowPolicy) -> Result<IncomeTable, PipelineError> {
    let mut table = IncomeTable::default();
    let mut first_seen: HashMap<u32, usize> = HashMap::new();

    for row in raw {
        let postal = match postal_code_from_label(&row.geography) {
            Ok(code) => code,
            Err(failure) => {
                reject_row(policy, TableKind::Income, row.line, failure, &mut table.diagnostics)?;
                continue;
            }
        };

        if row.median_income.trim() == NO_DATA_MARKER {
            table.dropped_sentinel += 1;
            continue;
        }

        let income = match required_f64("median_income", &row.median_income, &INCOME_STRIP) {
            Ok(v) => v,
            Err(failure) => {
                reject_row(policy, TableKind::Income, row.line, failure, &mut table.diagnostics)?;
                continue;
            }
        };

        if let Some(&first_line) = first_seen.get(&postal) {
            match policy {
                RowPolicy::Abort => {
                    return Err(PipelineError::DuplicatePostalCode {
                        postal_code: postal,
                        line: row.line,
                        first_line,
                    });
                }
                RowPolicy::Skip => {
                    let failure = RowFailure::new(
                        "geography",
                        &row.geography,
                        format!("duplicate of line {first_line}"),
                    );
                    reject_row(policy, TableKind::Income, row.line, failure, &mut table.diagnostics)?;
                    continue;
                }
            }
        }
        first_seen.insert(postal, row.line);

        table.records.push(IncomeRecord {
            postal_code: postal,
            household_median_income: income,
        });
    }

    Ok(table)
}

/// Extract the postal code from a geography label: its last whitespace token.
pub fn postal_code_from_label(label: &str) -> Result<u32, RowFailure> {
    let token = label
        .split_whitespace()
        .last()
        .ok_or_else(|| RowFailure::new("geography", label, "empty geography label"))?;
    postal_code("geography", token)
        .map_err(|_| RowFailure::new("geography", label, "label does not end in a postal code"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::DiagnosticKind;

    fn raw(line: usize, geography: &str, income: &str) -> RawIncome {
        RawIncome {
            line,
            geography: geography.to_string(),
            median_income: income.to_string(),
        }
    }

    #[test]
    fn label_last_token_is_postal_code() {
        assert_eq!(postal_code_from_label("ZCTA5 90210").unwrap(), 90210);
        assert_eq!(postal_code_from_label("  ZCTA5   02134 ").unwrap(), 2134);
        assert!(postal_code_from_label("Seattle city, Washington").is_err());
        assert!(postal_code_from_label("").is_err());
    }

    #[test]
    fn open_bucket_is_taken_at_face_value() {
        let table = normalize_income(&[raw(3, "ZCTA5 98039", "250,000+")], RowPolicy::Abort).unwrap();
        assert_eq!(
            table.records,
            vec![IncomeRecord {
                postal_code: 98039,
                household_median_income: 250_000.0
            }]
        );
    }

    #[test]
    fn stray_dash_is_stripped() {
        let table = normalize_income(&[raw(3, "ZCTA5 98001", "2,500-")], RowPolicy::Abort).unwrap();
        assert_eq!(table.records[0].household_median_income, 2_500.0);
    }

    #[test]
    fn sentinel_rows_are_dropped_entirely() {
        let rows = vec![
            raw(3, "ZCTA5 98101", "-"),
            raw(4, "ZCTA5 98103", "112,340"),
            raw(5, "ZCTA5 98195", "-"),
        ];
        let table = normalize_income(&rows, RowPolicy::Abort).unwrap();

        assert_eq!(table.dropped_sentinel, 2);
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].postal_code, 98103);
        assert_eq!(table.records[0].household_median_income, 112_340.0);
        assert!(table.diagnostics.is_empty());
    }

    #[test]
    fn non_numeric_income_is_fatal() {
        let err = normalize_income(&[raw(3, "ZCTA5 98101", "N")], RowPolicy::Abort).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::SchemaParse { table: TableKind::Income, line: 3, field: "median_income", .. }
        ));
    }

    #[test]
    fn label_without_postal_code_is_fatal_even_for_sentinel_rows() {
        let err = normalize_income(&[raw(3, "United States", "-")], RowPolicy::Abort).unwrap_err();
        assert!(matches!(err, PipelineError::SchemaParse { field: "geography", .. }));
    }

    #[test]
    fn duplicate_postal_codes_are_rejected() {
        let rows = vec![raw(3, "ZCTA5 98103", "100,000"), raw(9, "ZCTA5 98103", "90,000")];
        let err = normalize_income(&rows, RowPolicy::Abort).unwrap_err();
        assert_eq!(
            err,
            PipelineError::DuplicatePostalCode {
                postal_code: 98103,
                line: 9,
                first_line: 3
            }
        );

        let table = normalize_income(&rows, RowPolicy::Skip).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.records[0].household_median_income, 100_000.0);
        assert_eq!(table.diagnostics[0].kind, DiagnosticKind::SchemaParseFailure);
        assert_eq!(table.diagnostics[0].line, Some(9));
    }

    #[test]
    fn skip_policy_keeps_good_rows() {
        let rows = vec![
            raw(3, "ZCTA5 98101", "N"),
            raw(4, "Washington", "70,000"),
            raw(5, "ZCTA5 98103", "112,340"),
        ];
        let table = normalize_income(&rows, RowPolicy::Skip).unwrap();
        assert_eq!(table.records.len(), 1);
        assert_eq!(table.diagnostics.len(), 2);
    }
}
