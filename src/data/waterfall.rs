//! Waterfall preparation: running totals and sign classification.

use crate::data::loader::Record;

/// Visual classification of a bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BarColor {
    /// Opening or closing total.
    Base,
    Positive,
    Negative,
}

impl BarColor {
    pub fn as_str(self) -> &'static str {
        match self {
            BarColor::Base => "base",
            BarColor::Positive => "positive",
            BarColor::Negative => "negative",
        }
    }
}

/// A record placed on the waterfall.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub category: String,
    pub name: String,
    pub value: f64,
    /// Baseline before this bar is applied.
    pub start: f64,
    pub end: f64,
    pub color: BarColor,
}

impl Bar {
    fn anchor(record: &Record) -> Self {
        Self {
            category: record.category.clone(),
            name: record.name.clone(),
            value: record.value,
            start: 0.0,
            end: record.value,
            color: BarColor::Base,
        }
    }

    fn delta(record: &Record, start: f64) -> Self {
        Self {
            category: record.category.clone(),
            name: record.name.clone(),
            value: record.value,
            start,
            end: start + record.value,
            color: if record.value > 0.0 {
                BarColor::Positive
            } else {
                BarColor::Negative
            },
        }
    }
}

/// Build the waterfall bars for one category's records.
///
/// The first and last records are totals drawn from zero; everything between
/// chains from the previous bar's end. A lone record becomes a single total
/// bar, and an empty slice yields no bars.
pub fn prepare(records: &[Record]) -> Vec<Bar> {
    let Some((first, rest)) = records.split_first() else {
        return Vec::new();
    };

    let mut bars = Vec::with_capacity(records.len());
    bars.push(Bar::anchor(first));

    let Some((last, interior)) = rest.split_last() else {
        return bars;
    };

    let mut running = bars[0].end;
    for record in interior {
        let bar = Bar::delta(record, running);
        running = bar.end;
        bars.push(bar);
    }
    bars.push(Bar::anchor(last));
    bars
}
