//! Data module - CSV loading, filtering and waterfall preparation

mod loader;
pub mod pnl;
mod processor;
pub mod waterfall;

pub use loader::{DataLoader, Record};
pub use pnl::PnlTable;
pub use processor::DataProcessor;
pub use waterfall::{prepare, Bar, BarColor};
