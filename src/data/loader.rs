//! CSV Data Loader Module
//! Reads waterfall and P&L tables with Polars into typed rows.

use crate::data::pnl::{column_label, PnlRow, PnlTable};
use polars::prelude::*;
use std::io::Cursor;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Missing required column '{0}'")]
    MissingColumn(String),
    #[error("No data loaded")]
    NoData,
}

/// One row of the waterfall source, in file order.
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub category: String,
    pub name: String,
    pub value: f64,
}

impl Record {
    pub fn new(category: impl Into<String>, name: impl Into<String>, value: f64) -> Self {
        Self {
            category: category.into(),
            name: name.into(),
            value,
        }
    }
}

/// Handles CSV loading with Polars.
///
/// Every column is read as text so that a stray non-numeric cell cannot change
/// a column's inferred type; numbers are parsed afterwards with [`parse_float`].
pub struct DataLoader;

impl DataLoader {
    /// Load a `category,name,value` CSV file.
    pub fn load_records(path: &Path) -> Result<Vec<Record>, LoaderError> {
        let df = Self::read_path(path)?;
        Self::records_from_frame(&df)
    }

    /// Parse `category,name,value` CSV text already in memory.
    pub fn parse_records(bytes: &[u8]) -> Result<Vec<Record>, LoaderError> {
        let df = Self::read_bytes(bytes)?;
        Self::records_from_frame(&df)
    }

    /// Load a P&L CSV file (`name` followed by numeric period columns).
    pub fn load_pnl(path: &Path) -> Result<PnlTable, LoaderError> {
        let df = Self::read_path(path)?;
        Self::pnl_from_frame(&df)
    }

    pub fn parse_pnl(bytes: &[u8]) -> Result<PnlTable, LoaderError> {
        let df = Self::read_bytes(bytes)?;
        Self::pnl_from_frame(&df)
    }

    fn read_path(path: &Path) -> Result<DataFrame, LoaderError> {
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .finish()?
            .collect()?;
        Ok(df)
    }

    fn read_bytes(bytes: &[u8]) -> Result<DataFrame, LoaderError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .into_reader_with_file_handle(Cursor::new(bytes.to_vec()))
            .finish()?;
        Ok(df)
    }

    /// Get a text column, null cells as empty strings.
    fn text_column(df: &DataFrame, name: &str) -> Result<Vec<String>, LoaderError> {
        if !df.get_column_names().iter().any(|c| c.as_str() == name) {
            return Err(LoaderError::MissingColumn(name.to_string()));
        }
        let series = df.column(name)?.as_materialized_series();
        let ca = series.str()?;
        Ok(ca
            .into_iter()
            .map(|v| v.unwrap_or_default().to_string())
            .collect())
    }

    fn records_from_frame(df: &DataFrame) -> Result<Vec<Record>, LoaderError> {
        let categories = Self::text_column(df, "category")?;
        let names = Self::text_column(df, "name")?;
        let values = Self::text_column(df, "value")?;
        if categories.is_empty() {
            return Err(LoaderError::NoData);
        }

        Ok(categories
            .into_iter()
            .zip(names)
            .zip(values)
            .map(|((category, name), value)| Record {
                category,
                name,
                value: parse_float(&value),
            })
            .collect())
    }

    fn pnl_from_frame(df: &DataFrame) -> Result<PnlTable, LoaderError> {
        let names = Self::text_column(df, "name")?;
        if names.is_empty() {
            return Err(LoaderError::NoData);
        }

        let value_columns: Vec<String> = df
            .get_column_names()
            .iter()
            .map(|c| c.to_string())
            .filter(|c| c != "name")
            .collect();

        let mut columns = Vec::with_capacity(value_columns.len());
        for col in &value_columns {
            let parsed: Vec<f64> = Self::text_column(df, col)?
                .iter()
                .map(|v| parse_float(v))
                .collect();
            columns.push(parsed);
        }

        let labels: Vec<String> = value_columns.iter().map(|c| column_label(c)).collect();
        let rows = names
            .into_iter()
            .enumerate()
            .map(|(i, name)| PnlRow {
                name,
                values: columns.iter().map(|col| col[i]).collect(),
            })
            .collect();

        Ok(PnlTable { labels, rows })
    }
}

/// Parse the longest numeric prefix of `text`, ignoring leading whitespace.
///
/// `"12abc"` is 12, `"-.5e2x"` is -50, and text with no numeric prefix
/// (including the empty string) is NaN.
pub fn parse_float(text: &str) -> f64 {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let mut end = 0;

    if matches!(bytes.first().copied(), Some(b'+') | Some(b'-')) {
        end = 1;
    }
    if s[end..].starts_with("Infinity") {
        return if s.starts_with('-') {
            f64::NEG_INFINITY
        } else {
            f64::INFINITY
        };
    }

    let digits = |from: usize| bytes[from..].iter().take_while(|b| b.is_ascii_digit()).count();

    let int_digits = digits(end);
    end += int_digits;
    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = digits(end + 1);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return f64::NAN;
    }

    if matches!(bytes.get(end).copied(), Some(b'e') | Some(b'E')) {
        let mut exp_end = end + 1;
        if matches!(bytes.get(exp_end).copied(), Some(b'+') | Some(b'-')) {
            exp_end += 1;
        }
        let exp_digits = digits(exp_end);
        if exp_digits > 0 {
            end = exp_end + exp_digits;
        }
    }

    let mut number = s[..end].to_string();
    if number.ends_with('.') {
        number.pop();
    }
    number.parse().unwrap_or(f64::NAN)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn parse_float_prefix_semantics() {
        assert_eq!(parse_float("100"), 100.0);
        assert_eq!(parse_float("  -30"), -30.0);
        assert_eq!(parse_float("12abc"), 12.0);
        assert_eq!(parse_float("3.5%"), 3.5);
        assert_eq!(parse_float(".5"), 0.5);
        assert_eq!(parse_float("5."), 5.0);
        assert_eq!(parse_float("-.5e2x"), -50.0);
        assert_eq!(parse_float("1e"), 1.0);
        assert_eq!(parse_float("-Infinity"), f64::NEG_INFINITY);
        assert!(parse_float("").is_nan());
        assert!(parse_float("abc").is_nan());
        assert!(parse_float("-").is_nan());
        assert!(parse_float(".").is_nan());
    }

    #[test]
    fn records_keep_source_order() {
        let csv = b"category,name,value\nA,Open,100\nA,Delta1,-30\nB,Start,5\nA,Close,70\n";
        let records = DataLoader::parse_records(csv).unwrap();
        let names: Vec<&str> = records.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Open", "Delta1", "Start", "Close"]);
        assert_eq!(records[1], Record::new("A", "Delta1", -30.0));
    }

    #[test]
    fn bad_numbers_become_nan() {
        let csv = b"category,name,value\nA,Open,abc\nA,Close,7\n";
        let records = DataLoader::parse_records(csv).unwrap();
        assert!(records[0].value.is_nan());
        assert_eq!(records[1].value, 7.0);
    }

    #[test]
    fn missing_column_is_reported() {
        let csv = b"category,label,value\nA,Open,1\n";
        match DataLoader::parse_records(csv) {
            Err(LoaderError::MissingColumn(col)) => assert_eq!(col, "name"),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn header_only_is_no_data() {
        let csv = b"category,name,value\n";
        assert!(matches!(
            DataLoader::parse_records(csv),
            Err(LoaderError::NoData)
        ));
    }

    #[test]
    fn loads_records_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "category,name,value").unwrap();
        writeln!(file, "Q1,Revenue,1500").unwrap();
        writeln!(file, "Q1,Net,1200").unwrap();
        file.flush().unwrap();

        let records = DataLoader::load_records(file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].category, "Q1");
        assert_eq!(records[1].value, 1200.0);
    }

    #[test]
    fn pnl_columns_are_relabelled() {
        let csv = b"name,FY18,FY19,FY20,FY21\nRevenue,1500000,1600000,x,1800000\nGross Margin,0.42,0.43,0.44,0.45\n";
        let table = DataLoader::parse_pnl(csv).unwrap();
        assert_eq!(table.labels, ["FY-18", "FY-19", "FY-20", "FY-21"]);
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].values[0], 1_500_000.0);
        assert!(table.rows[0].values[2].is_nan());
        assert_eq!(table.rows[1].name, "Gross Margin");
    }
}
