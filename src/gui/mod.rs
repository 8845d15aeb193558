//! GUI module - User interface components

mod app;
mod chart_viewer;
mod control_panel;
mod pnl_table;

pub use app::WaterfallApp;
pub use chart_viewer::ChartViewer;
pub use control_panel::{ControlPanel, ControlPanelAction};
pub use pnl_table::PnlTableView;
