//! Data Processor Module
//! Category discovery and filtering over the loaded records.

use crate::data::loader::Record;
use std::collections::HashSet;

/// Stateless helpers over an ordered record set.
pub struct DataProcessor;

impl DataProcessor {
    /// Distinct categories in first-occurrence order.
    pub fn get_categories(records: &[Record]) -> Vec<String> {
        let mut seen = HashSet::new();
        records
            .iter()
            .filter(|r| seen.insert(r.category.as_str()))
            .map(|r| r.category.clone())
            .collect()
    }

    /// Records of one category, source order preserved.
    pub fn filter_by_category(records: &[Record], category: &str) -> Vec<Record> {
        records
            .iter()
            .filter(|r| r.category == category)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<Record> {
        vec![
            Record::new("B", "Open", 10.0),
            Record::new("A", "Open", 100.0),
            Record::new("B", "Close", 12.0),
            Record::new("A", "Delta", -30.0),
            Record::new("C", "Only", 1.0),
            Record::new("A", "Close", 70.0),
        ]
    }

    #[test]
    fn categories_in_first_occurrence_order() {
        assert_eq!(DataProcessor::get_categories(&sample()), ["B", "A", "C"]);
        assert!(DataProcessor::get_categories(&[]).is_empty());
    }

    #[test]
    fn filter_keeps_order() {
        let a = DataProcessor::filter_by_category(&sample(), "A");
        let names: Vec<&str> = a.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Open", "Delta", "Close"]);
        assert!(DataProcessor::filter_by_category(&sample(), "Z").is_empty());
    }
}
