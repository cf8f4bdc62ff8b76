//! Summary Report Module
//! Builds the four per-graph summaries and formats them for the console.

use crate::data::{AverageWeather, ExtremeWeather};
use crate::stats::{Extreme, StatsCalculator};
use serde::Serialize;
use std::fmt;
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum StatsError {
    #[error("No values in {0}")]
    EmptySeries(&'static str),
    #[error("No month label for row {0}")]
    MissingLabel(usize),
    #[error("Difference overflows for {0}")]
    Overflow(&'static str),
}

/// A numeric cell as it appears in the summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Value {
    Int(i64),
    Float(f64),
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Int(v) => write!(f, "{}", v),
            Value::Float(v) => f.write_str(&format_float(*v)),
        }
    }
}

/// Shortest round-trip form, always with a fractional part (`3.0`, never `3`).
/// Magnitudes below `1e-4` or from `1e16` up switch to exponent form (`1e+16`, `1.5e-05`).
pub fn format_float(v: f64) -> String {
    if v.is_nan() {
        return "nan".to_string();
    }
    if v.is_infinite() {
        return format!("{}", v);
    }
    if v == 0.0 {
        return format!("{:.1}", v);
    }

    let sci = format!("{:e}", v);
    let Some((mantissa, exp)) = sci.split_once('e') else {
        return sci;
    };
    let exp: i32 = exp.parse().unwrap_or(0);
    if !(-4..16).contains(&exp) {
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{}{:02}", mantissa, sign, exp.abs());
    }

    if v.fract() == 0.0 {
        format!("{:.1}", v)
    } else {
        format!("{}", v)
    }
}

/// A month label paired with its value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthValue {
    pub month: String,
    pub value: Value,
}

/// Closing line of a graph summary.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Footer {
    Difference(i64),
    TotalSnowfall(f64),
    AverageRange(f64),
}

impl fmt::Display for Footer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Footer::Difference(d) => {
                write!(f, "The difference between highest and lowest is: {}", d)
            }
            Footer::TotalSnowfall(t) => {
                write!(f, "The total snowfall is: {}", format_float(*t))
            }
            Footer::AverageRange(a) => write!(f, "The average temperature range is: {:.2}", a),
        }
    }
}

/// Console summary for one chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphSummary {
    pub number: usize,
    pub highest: MonthValue,
    pub lowest: MonthValue,
    pub footer: Footer,
}

impl fmt::Display for GraphSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- GRAPH {} ---", self.number)?;
        writeln!(
            f,
            "The month with the highest value is: {} ({})",
            self.highest.month, self.highest.value
        )?;
        writeln!(
            f,
            "The month with the lowest value is: {} ({})",
            self.lowest.month, self.lowest.value
        )?;
        writeln!(f, "{}", self.footer)
    }
}

/// Summaries for the temperature, record, snowfall and range charts, in that order.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherReport {
    pub graphs: Vec<GraphSummary>,
}

impl WeatherReport {
    /// Month labels always come from the averages file.
    pub fn build(
        averages: &AverageWeather,
        extremes: &ExtremeWeather,
        ranges: &[i64],
    ) -> Result<Self, StatsError> {
        let months = &averages.months;

        let max_high = StatsCalculator::max_with_index(&averages.high_temps)
            .ok_or(StatsError::EmptySeries("average high temperatures"))?;
        let min_low = StatsCalculator::min_with_index(&averages.low_temps)
            .ok_or(StatsError::EmptySeries("average low temperatures"))?;
        let temperatures = GraphSummary {
            number: 1,
            highest: labeled(months, max_high, Value::Int)?,
            lowest: labeled(months, min_low, Value::Int)?,
            footer: Footer::Difference(
                max_high
                    .value
                    .checked_sub(min_low.value)
                    .ok_or(StatsError::Overflow("average temperatures"))?,
            ),
        };

        let max_extreme = StatsCalculator::max_with_index(&extremes.extreme_high_temps)
            .ok_or(StatsError::EmptySeries("record high temperatures"))?;
        let min_extreme = StatsCalculator::min_with_index(&extremes.extreme_low_temps)
            .ok_or(StatsError::EmptySeries("record low temperatures"))?;
        let records = GraphSummary {
            number: 2,
            highest: labeled(months, max_extreme, Value::Int)?,
            lowest: labeled(months, min_extreme, Value::Int)?,
            footer: Footer::Difference(
                max_extreme
                    .value
                    .checked_sub(min_extreme.value)
                    .ok_or(StatsError::Overflow("record temperatures"))?,
            ),
        };

        let max_snow = StatsCalculator::max_with_index(&extremes.snowfall)
            .ok_or(StatsError::EmptySeries("snowfall"))?;
        let min_snow = StatsCalculator::min_with_index(&extremes.snowfall)
            .ok_or(StatsError::EmptySeries("snowfall"))?;
        let snowfall = GraphSummary {
            number: 3,
            highest: labeled(months, max_snow, Value::Float)?,
            lowest: labeled(months, min_snow, Value::Float)?,
            footer: Footer::TotalSnowfall(StatsCalculator::total(&extremes.snowfall)),
        };

        let max_range = StatsCalculator::max_with_index(ranges)
            .ok_or(StatsError::EmptySeries("temperature ranges"))?;
        let min_range = StatsCalculator::min_with_index(ranges)
            .ok_or(StatsError::EmptySeries("temperature ranges"))?;
        let average = StatsCalculator::mean_of_integers(ranges)
            .ok_or(StatsError::EmptySeries("temperature ranges"))?;
        let spread = GraphSummary {
            number: 4,
            highest: labeled(months, max_range, Value::Int)?,
            lowest: labeled(months, min_range, Value::Int)?,
            footer: Footer::AverageRange(average),
        };

        Ok(Self {
            graphs: vec![temperatures, records, snowfall, spread],
        })
    }
}

impl fmt::Display for WeatherReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for graph in &self.graphs {
            write!(f, "{}", graph)?;
        }
        Ok(())
    }
}

fn labeled<T>(
    months: &[String],
    extreme: Extreme<T>,
    wrap: fn(T) -> Value,
) -> Result<MonthValue, StatsError> {
    let month = months
        .get(extreme.index)
        .ok_or(StatsError::MissingLabel(extreme.index))?;
    Ok(MonthValue {
        month: month.clone(),
        value: wrap(extreme.value),
    })
}
