//! Waterfall Controller
//! Owns the loaded dataset, the current category selection and the renderer.

use crate::charts::{ChartRenderer, RenderFrame};
use crate::config::ChartConfig;
use crate::data::{prepare, Bar, DataProcessor, Record};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum ControllerError {
    #[error("Dataset has no categories")]
    NoCategories,
    #[error("Unknown category '{0}'")]
    UnknownCategory(String),
}

/// The single owner of "which category is shown".
///
/// Selection only changes through [`WaterfallController::select`]; every
/// change re-filters the records, re-runs [`prepare`] and re-renders.
pub struct WaterfallController {
    records: Vec<Record>,
    categories: Vec<String>,
    selected: String,
    bars: Vec<Bar>,
    renderer: ChartRenderer,
    frame: RenderFrame,
}

impl WaterfallController {
    /// Build the controller and render the first category.
    pub fn new(records: Vec<Record>, config: ChartConfig) -> Result<Self, ControllerError> {
        let categories = DataProcessor::get_categories(&records);
        let selected = categories
            .first()
            .cloned()
            .ok_or(ControllerError::NoCategories)?;

        let mut renderer = ChartRenderer::new(config);
        let bars = Self::bars_in(&records, &selected);
        let frame = renderer.render(&bars);

        log::info!(
            "Loaded {} records in {} categories, showing '{}'",
            records.len(),
            categories.len(),
            selected
        );

        Ok(Self {
            records,
            categories,
            selected,
            bars,
            renderer,
            frame,
        })
    }

    fn bars_in(records: &[Record], category: &str) -> Vec<Bar> {
        let subset = DataProcessor::filter_by_category(records, category);
        if subset.len() < 2 {
            log::warn!(
                "Category '{}' has {} record(s), drawing it as a single total",
                category,
                subset.len()
            );
        }
        prepare(&subset)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn selected(&self) -> &str {
        &self.selected
    }

    /// Bars of the selected category.
    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    /// The most recent render result.
    pub fn frame(&self) -> &RenderFrame {
        &self.frame
    }

    pub fn config(&self) -> &ChartConfig {
        self.renderer.config()
    }

    /// Bars for any category without changing the selection.
    pub fn bars_for(&self, category: &str) -> Result<Vec<Bar>, ControllerError> {
        if !self.categories.iter().any(|c| c == category) {
            return Err(ControllerError::UnknownCategory(category.to_string()));
        }
        Ok(Self::bars_in(&self.records, category))
    }

    /// Switch to `category` and re-render. Re-selecting the current category
    /// re-renders with an empty diff.
    pub fn select(&mut self, category: &str) -> Result<&RenderFrame, ControllerError> {
        let bars = self.bars_for(category)?;
        log::info!("Selected category '{}'", category);

        self.selected = category.to_string();
        self.frame = self.renderer.render(&bars);
        self.bars = bars;
        Ok(&self.frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::BarColor;

    fn dataset() -> Vec<Record> {
        vec![
            Record::new("A", "Open", 100.0),
            Record::new("A", "Delta1", -30.0),
            Record::new("A", "Close", 70.0),
            Record::new("B", "Start", 10.0),
            Record::new("B", "Gain", 15.0),
            Record::new("B", "Loss", -5.0),
            Record::new("B", "End", 20.0),
        ]
    }

    #[test]
    fn first_category_selected_by_default() {
        let controller = WaterfallController::new(dataset(), ChartConfig::default()).unwrap();
        assert_eq!(controller.categories(), ["A", "B"]);
        assert_eq!(controller.selected(), "A");
        assert_eq!(controller.bars().len(), 3);
        assert_eq!(controller.frame().diff.entered.len(), 3);
    }

    #[test]
    fn switching_replaces_all_bars() {
        let mut controller = WaterfallController::new(dataset(), ChartConfig::default()).unwrap();
        let frame = controller.select("B").unwrap();

        assert_eq!(frame.state.bars.len(), 4);
        assert_eq!(frame.state.labels.len(), 4);
        assert_eq!(frame.diff.exited.len(), 3);
        assert!(frame
            .state
            .bars
            .iter()
            .all(|b| !["Open", "Delta1", "Close"].contains(&b.key.name.as_str())));
        assert_eq!(controller.selected(), "B");
        assert!(controller.bars().iter().all(|b| b.category == "B"));
        assert_eq!(controller.bars()[2].color, BarColor::Negative);
    }

    #[test]
    fn reselecting_is_idempotent() {
        let mut controller = WaterfallController::new(dataset(), ChartConfig::default()).unwrap();
        let before = controller.frame().state.clone();
        let frame = controller.select("A").unwrap();
        assert!(frame.diff.is_noop());
        assert_eq!(frame.state, before);
    }

    #[test]
    fn unknown_category_keeps_selection() {
        let mut controller = WaterfallController::new(dataset(), ChartConfig::default()).unwrap();
        assert_eq!(
            controller.select("Z").unwrap_err(),
            ControllerError::UnknownCategory("Z".into())
        );
        assert_eq!(controller.selected(), "A");
    }

    #[test]
    fn empty_dataset_has_no_categories() {
        assert!(matches!(
            WaterfallController::new(Vec::new(), ChartConfig::default()),
            Err(ControllerError::NoCategories)
        ));
    }
}
