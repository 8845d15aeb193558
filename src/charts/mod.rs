//! Charts module - scales, scene layout, transitions and drawing adapters

pub mod format;
mod plotter;
mod renderer;
pub mod scale;
mod static_chart;
mod transition;

pub use plotter::ChartPlotter;
pub use renderer::{ChartRenderer, RenderFrame};
pub use static_chart::StaticChartRenderer;
pub use transition::SceneAnimator;
