//! Profit & loss table model.

use crate::charts::format::{format_currency, format_percent};

/// Rows whose cells are ratios rather than amounts.
pub const PERCENT_ROWS: [&str; 2] = ["Gross Margin", "Op Margin"];

/// One line of the P&L statement, values in column order.
#[derive(Debug, Clone, PartialEq)]
pub struct PnlRow {
    pub name: String,
    pub values: Vec<f64>,
}

impl PnlRow {
    /// Display text for each value cell of this row.
    pub fn formatted_cells(&self) -> Vec<String> {
        self.values
            .iter()
            .map(|&v| format_pnl_cell(&self.name, v))
            .collect()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct PnlTable {
    /// Display labels of the value columns (`FY-18`, ...).
    pub labels: Vec<String>,
    pub rows: Vec<PnlRow>,
}

impl PnlTable {
    /// Header row: `name` followed by the value column labels.
    pub fn header(&self) -> Vec<String> {
        std::iter::once("name".to_string())
            .chain(self.labels.iter().cloned())
            .collect()
    }
}

/// Format one numeric cell: margins as whole percents, everything else as
/// whole dollars.
pub fn format_pnl_cell(row_name: &str, value: f64) -> String {
    if PERCENT_ROWS.contains(&row_name) {
        format_percent(value)
    } else {
        format_currency(value)
    }
}

/// Turn a source header such as `FY18` into its display label `FY-18`.
///
/// Only headers made of an alphabetic prefix followed by a digit suffix are
/// rewritten.
pub fn column_label(header: &str) -> String {
    let split = header
        .find(|c: char| c.is_ascii_digit())
        .unwrap_or(header.len());
    let (prefix, suffix) = header.split_at(split);
    let is_period = !prefix.is_empty()
        && !suffix.is_empty()
        && prefix.chars().all(|c| c.is_ascii_alphabetic())
        && suffix.chars().all(|c| c.is_ascii_digit());
    if is_period {
        format!("{prefix}-{suffix}")
    } else {
        header.to_string()
    }
}
