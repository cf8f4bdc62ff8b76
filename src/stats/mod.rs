//! Stats module - aggregates and console summaries

mod calculator;
mod report;

pub use calculator::{Extreme, StatsCalculator};
pub use report::{GraphSummary, WeatherReport};
