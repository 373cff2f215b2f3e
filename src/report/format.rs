//! Formatted terminal output.
//!
//! We keep formatting code in one place so:
//! - the metrics code stays clean and testable
//! - output changes are localized

use crate::app::pipeline::RunOutput;
use crate::domain::{DiagnosticKind, ListingAffordability, RunConfig, ZipAggregate};
use crate::report::{rank_listing_gaps, rank_zips_by_ratio};

/// Format the run summary (input counts, diagnostics, rules).
pub fn format_run_summary(run: &RunOutput, config: &RunConfig) -> String {
    let mut out = String::new();

    out.push_str("=== afford - Housing Affordability by Postal Code ===\n");
    out.push_str(&format!("Listings: {}\n", config.listings_path.display()));
    out.push_str(&format!("Income:   {}\n", config.income_path.display()));
    out.push_str(&format!(
        "Rule: affordable price = {:.1} x median household income\n",
        config.rules.income_multiple
    ));

    out.push_str(&format!(
        "Listings used: {} | postal codes: {}\n",
        run.listings.records.len(),
        run.affordability.zip_aggregates.len()
    ));
    out.push_str(&format!(
        "Income rows used: {} | without data: {}\n",
        run.income.records.len(),
        run.income.dropped_sentinel
    ));

    let count = |kind: DiagnosticKind| run.diagnostics().filter(|d| d.kind == kind).count();
    out.push_str(&format!(
        "Diagnostics: {} null field(s), {} skipped row(s), {} postal code(s) without income\n",
        count(DiagnosticKind::NullableParseFailure),
        count(DiagnosticKind::SchemaParseFailure),
        count(DiagnosticKind::JoinKeyMismatch),
    ));

    let unaffordable = run.affordability.zip_aggregates.iter().filter(|z| z.unaffordable).count();
    out.push_str(&format!(
        "Unaffordable postal codes (cheapest listing above threshold): {unaffordable}\n"
    ));
    out.push('\n');

    out
}

/// Format the postal-code table, highest price-to-income ratio first.
pub fn format_zip_table(zips: &[ZipAggregate], top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Postal codes by price-to-income ratio (top {top_n}):\n"));
    out.push_str(
        format!(
            "{:<7} {:>5} {:>12} {:>12} {:>12} {:>10} {:>6} {:<12}\n",
            "zip", "n", "min", "median", "max", "income", "ratio", "unaffordable"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(
        format!(
            "{:-<7} {:-<5} {:-<12} {:-<12} {:-<12} {:-<10} {:-<6} {:-<12}\n",
            "", "", "", "", "", "", "", ""
        )
        .trim_end(),
    );
    out.push('\n');

    for z in rank_zips_by_ratio(zips, top_n) {
        out.push_str(
            format!(
                "{:<7} {:>5} {:>12} {:>12} {:>12} {:>10} {:>6} {:<12}\n",
                format!("{:05}", z.postal_code),
                z.listing_count,
                fmt_money(z.min_price),
                fmt_money(z.median_price),
                fmt_money(z.max_price),
                z.household_median_income.map(fmt_money).unwrap_or_else(|| "-".to_string()),
                z.house_price_to_income_ratio
                    .map(|r| format!("{r:.1}"))
                    .unwrap_or_else(|| "-".to_string()),
                if z.unaffordable { "yes" } else { "" },
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Format the listings with the largest affordability gap.
pub fn format_gap_table(listings: &[ListingAffordability], top_n: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("Largest affordability gaps (top {top_n}):\n"));
    out.push_str(
        format!(
            "{:<32} {:<7} {:>12} {:>12} {:>12} {:>8}\n",
            "address", "zip", "price", "affordable", "gap", "$/sqft"
        )
        .trim_end(),
    );
    out.push('\n');
    out.push_str(format!("{:-<32} {:-<7} {:-<12} {:-<12} {:-<12} {:-<8}\n", "", "", "", "", "", "").trim_end());
    out.push('\n');

    for m in rank_listing_gaps(listings, top_n) {
        let l = &m.listing;
        let label = l.address.clone().unwrap_or_else(|| format!("line {}", l.line));
        out.push_str(
            format!(
                "{:<32} {:<7} {:>12} {:>12} {:>12} {:>8}\n",
                truncate(&label, 32),
                format!("{:05}", l.postal_code),
                fmt_money(l.price),
                m.affordable_price.map(fmt_money).unwrap_or_else(|| "-".to_string()),
                m.affordability_gap.map(fmt_money).unwrap_or_else(|| "-".to_string()),
                fmt_per_sqft(l.price_per_sqft),
            )
            .trim_end(),
        );
        out.push('\n');
    }

    out
}

/// Whole dollars with thousands separators (`-720,000`).
fn fmt_money(v: f64) -> String {
    if !v.is_finite() {
        return format!("{v}");
    }
    let rounded = v.round();
    let digits = format!("{:.0}", rounded.abs());
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if rounded < 0.0 { format!("-{grouped}") } else { grouped }
}

fn fmt_per_sqft(v: f64) -> String {
    if v.is_finite() { format!("{v:.0}") } else { "-".to_string() }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        return s.to_string();
    }
    let mut out = String::new();
    for (i, ch) in s.chars().enumerate() {
        if i + 1 >= max {
            break;
        }
        out.push(ch);
    }
    out.push('.');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn zip(postal_code: u32, ratio: Option<f64>, unaffordable: bool) -> ZipAggregate {
        ZipAggregate {
            postal_code,
            listing_count: 2,
            min_price: 300_000.0,
            max_price: 500_000.0,
            median_price: 400_000.0,
            household_median_income: ratio.map(|r| 400_000.0 / r),
            house_price_to_income_ratio: ratio,
            unaffordable,
        }
    }

    #[test]
    fn money_is_grouped() {
        assert_eq!(fmt_money(0.0), "0");
        assert_eq!(fmt_money(999.4), "999");
        assert_eq!(fmt_money(1_000.0), "1,000");
        assert_eq!(fmt_money(-720_000.0), "-720,000");
        assert_eq!(fmt_money(1_250_000.0), "1,250,000");
        assert_eq!(fmt_money(f64::INFINITY), "inf");
    }

    #[test]
    fn zip_table_pads_postal_codes_and_marks_unaffordable() {
        let table = format_zip_table(&[zip(2134, Some(6.7), true), zip(98103, None, false)], 10);
        let lines: Vec<&str> = table.lines().collect();

        assert_eq!(lines.len(), 5);
        assert!(lines[3].starts_with("02134"));
        assert!(lines[3].ends_with("yes"));
        assert!(lines[4].starts_with("98103"));
        assert!(lines[4].contains(" - "));
    }

    #[test]
    fn truncate_marks_cut() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("1234567890abc", 5), "1234.");
    }
}
