//! Charts module - Chart description and rendering

mod chart_data;
mod plotter;
mod renderer;

pub use chart_data::{ChartData, ChartId};
pub use plotter::ChartPlotter;
pub use renderer::{ExportFormat, StaticChartRenderer};
