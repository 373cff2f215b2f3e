//! CSV ingest.
//!
//! Reads the two raw tables as text, without interpreting any value:
//! - listing exports (scraper output or Redfin-style CSV downloads)
//! - census median-income tables (label headers or variable-code headers)
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **No typing here**: every cell is handed to the normalizers as text
//! - **Tolerant headers**: case-insensitive, BOM-stripped, common aliases accepted

use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

use csv::StringRecord;

use crate::domain::{RawIncome, RawListing};
use crate::error::AppError;

const PRICE: &[&str] = &["price"];
const BEDROOMS: &[&str] = &["bedrooms", "beds"];
const BATHROOMS: &[&str] = &["bathrooms", "baths"];
const SQFT: &[&str] = &["sqft", "square feet", "area"];
const ZIPCODE: &[&str] = &["zipcode", "zip", "postal_code", "zip or postal code"];
const ADDRESS: &[&str] = &["address"];

const GEOGRAPHY: &[&str] = &["geographic area name", "name"];
const MEDIAN_INCOME: &[&str] = &["estimate!!households!!median income (dollars)", "s1901_c01_012e"];

/// Census downloads with variable-code headers repeat the labels as the first data row.
const CENSUS_LABEL_ROW: &str = "geographic area name";

/// Load a raw listing table from a CSV file.
pub fn load_listings(path: &Path) -> Result<Vec<RawListing>, AppError> {
    let file = open(path, "listings")?;
    read_listings(file)
}

/// Load a raw income table from a CSV file.
pub fn load_income(path: &Path) -> Result<Vec<RawIncome>, AppError> {
    let file = open(path, "income")?;
    read_income(file)
}

pub fn read_listings<R: Read>(input: R) -> Result<Vec<RawListing>, AppError> {
    let mut reader = csv_reader(input);
    let headers = read_headers(&mut reader, "listings")?;
    let header_map = build_header_map(&headers);

    let price = require_column(&header_map, PRICE, "listings", "price")?;
    let bedrooms = require_column(&header_map, BEDROOMS, "listings", "bedrooms")?;
    let bathrooms = require_column(&header_map, BATHROOMS, "listings", "bathrooms")?;
    let sqft = require_column(&header_map, SQFT, "listings", "sqft")?;
    let zipcode = require_column(&header_map, ZIPCODE, "listings", "zipcode")?;
    let address = find_column(&header_map, ADDRESS);
    // Redfin names the column "URL (SEE https://... FOR INFO ON PRICING)".
    let url = headers
        .iter()
        .position(|h| normalize_header_name(h).starts_with("url"));

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("listings line {line}: CSV parse error: {e}")))?;

        rows.push(RawListing {
            line,
            address: address.and_then(|i| optional_cell(&record, i)),
            url: url.and_then(|i| optional_cell(&record, i)),
            price: cell(&record, price),
            bedrooms: cell(&record, bedrooms),
            bathrooms: cell(&record, bathrooms),
            sqft: cell(&record, sqft),
            zipcode: cell(&record, zipcode),
        });
    }

    Ok(rows)
}

pub fn read_income<R: Read>(input: R) -> Result<Vec<RawIncome>, AppError> {
    let mut reader = csv_reader(input);
    let headers = read_headers(&mut reader, "income")?;
    let header_map = build_header_map(&headers);

    let geography = require_column(&header_map, GEOGRAPHY, "income", "geographic area name")?;
    let median_income = require_column(&header_map, MEDIAN_INCOME, "income", "median household income estimate")?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        let line = idx + 2;
        let record = result.map_err(|e| AppError::new(2, format!("income line {line}: CSV parse error: {e}")))?;

        let label = cell(&record, geography);
        if normalize_header_name(&label) == CENSUS_LABEL_ROW {
            continue;
        }

        rows.push(RawIncome {
            line,
            geography: label,
            median_income: cell(&record, median_income),
        });
    }

    Ok(rows)
}

fn open(path: &Path, what: &str) -> Result<File, AppError> {
    File::open(path).map_err(|e| AppError::new(2, format!("Failed to open {what} CSV '{}': {e}", path.display())))
}

fn csv_reader<R: Read>(input: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(input)
}

fn read_headers<R: Read>(reader: &mut csv::Reader<R>, what: &str) -> Result<StringRecord, AppError> {
    reader
        .headers()
        .map(Clone::clone)
        .map_err(|e| AppError::new(2, format!("Failed to read {what} CSV headers: {e}")))
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    let mut map = HashMap::new();
    for (idx, name) in headers.iter().enumerate() {
        // First occurrence wins for duplicated headers.
        map.entry(normalize_header_name(name)).or_insert(idx);
    }
    map
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header. If we don't strip it, schema validation will incorrectly
    // report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn find_column(header_map: &HashMap<String, usize>, aliases: &[&str]) -> Option<usize> {
    aliases.iter().find_map(|alias| header_map.get(*alias).copied())
}

fn require_column(
    header_map: &HashMap<String, usize>,
    aliases: &[&str],
    what: &str,
    label: &str,
) -> Result<usize, AppError> {
    find_column(header_map, aliases).ok_or_else(|| {
        AppError::new(
            2,
            format!(
                "Missing required {what} column: `{label}` (accepted names: {})",
                aliases.join(", ")
            ),
        )
    })
}

fn cell(record: &StringRecord, idx: usize) -> String {
    record.get(idx).unwrap_or_default().to_string()
}

fn optional_cell(record: &StringRecord, idx: usize) -> Option<String> {
    record.get(idx).filter(|s| !s.is_empty()).map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_scraper_listing_columns() {
        let csv = "Address,Price,Bedrooms,Bathrooms,SqFt,Zipcode\n\
                   1 Main St,\"$900,000\",3,2.5,\"1,800\",98103\n\
                   2 Main St,\"$450,000\",—,1,700,98122\n";
        let rows = read_listings(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].line, 2);
        assert_eq!(rows[0].address.as_deref(), Some("1 Main St"));
        assert_eq!(rows[0].price, "$900,000");
        assert_eq!(rows[0].sqft, "1,800");
        assert_eq!(rows[1].bedrooms, "—");
        assert_eq!(rows[1].url, None);
    }

    #[test]
    fn reads_redfin_export_headers() {
        let csv = "\u{feff}ADDRESS,ZIP OR POSTAL CODE,PRICE,BEDS,BATHS,SQUARE FEET,URL (SEE https://www.redfin.com FOR INFO ON PRICING)\n\
                   3 Pine St,98122,725000,2,2,1100,https://www.redfin.com/x\n";
        let rows = read_listings(csv.as_bytes()).unwrap();

        assert_eq!(rows[0].zipcode, "98122");
        assert_eq!(rows[0].bedrooms, "2");
        assert_eq!(rows[0].url.as_deref(), Some("https://www.redfin.com/x"));
    }

    #[test]
    fn missing_listing_column_is_input_error() {
        let csv = "Price,Bedrooms,Bathrooms,Zipcode\n1,1,1,98103\n";
        let err = read_listings(csv.as_bytes()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("sqft"));
    }

    #[test]
    fn reads_census_label_headers_and_ignores_extra_columns() {
        let csv = "Geography,Geographic Area Name,Estimate!!Households!!Median income (dollars),Margin of Error!!Households!!Median income (dollars)\n\
                   860Z200US98103,ZCTA5 98103,\"112,340\",\"6,120\"\n\
                   860Z200US98039,ZCTA5 98039,\"250,000+\",***\n";
        let rows = read_income(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].geography, "ZCTA5 98103");
        assert_eq!(rows[0].median_income, "112,340");
        assert_eq!(rows[1].median_income, "250,000+");
    }

    #[test]
    fn skips_census_label_row_under_code_headers() {
        let csv = "GEO_ID,NAME,S1901_C01_012E,S1901_C01_012M\n\
                   Geography,Geographic Area Name,Estimate!!Households!!Median income (dollars),Margin of Error\n\
                   860Z200US98101,ZCTA5 98101,-,**\n";
        let rows = read_income(csv.as_bytes()).unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].line, 3);
        assert_eq!(rows[0].median_income, "-");
    }

    #[test]
    fn load_reports_missing_file() {
        let err = load_income(Path::new("/definitely/not/here.csv")).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
