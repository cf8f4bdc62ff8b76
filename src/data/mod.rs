//! Data module - CSV loading, record model and alignment

mod loader;
mod model;
mod processor;

pub use loader::{load_averages, load_extremes};
pub use model::{AverageWeather, ExtremeRecord, ExtremeWeather, MonthlyRecord};
pub use processor::{AlignmentMode, DataProcessor};
