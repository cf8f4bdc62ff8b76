//! Chart Data Module
//! Backend-independent description of the four weather charts.

use crate::data::{AverageWeather, ExtremeWeather};
use crate::stats::StatsCalculator;
use serde::Serialize;

/// Pastel palette shared by the interactive and static renderers.
pub const PALETTE: [(u8, u8, u8); 6] = [
    (0xcd, 0xb4, 0xdb), // Thistle
    (0xff, 0xc8, 0xdd), // Pink
    (0xa2, 0xd2, 0xff), // Sky
    (0xf7, 0xe1, 0xd7), // Linen
    (0xca, 0xff, 0xbf), // Mint
    (0xff, 0xd6, 0xa5), // Peach
];

/// Fixed Y ticks for the temperature line charts.
pub const TEMPERATURE_TICKS: [f64; 9] = [0.0, 10.0, 20.0, 30.0, 40.0, 50.0, 60.0, 70.0, 80.0];

pub const BAR_WIDTH: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartId {
    Temperatures,
    Records,
    Snowfall,
    Ranges,
}

impl ChartId {
    pub const ALL: [ChartId; 4] = [
        ChartId::Temperatures,
        ChartId::Records,
        ChartId::Snowfall,
        ChartId::Ranges,
    ];

    /// File stem used for static exports.
    pub fn slug(self) -> &'static str {
        match self {
            ChartId::Temperatures => "temperatures",
            ChartId::Records => "records",
            ChartId::Snowfall => "snowfall",
            ChartId::Ranges => "ranges",
        }
    }

    /// Short name for the chart selector.
    pub fn label(self) -> &'static str {
        match self {
            ChartId::Temperatures => "Average Temperatures",
            ChartId::Records => "Record Temperatures",
            ChartId::Snowfall => "Snowfall",
            ChartId::Ranges => "Temperature Ranges",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
}

/// One plotted sequence, one value per month.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    pub name: String,
    pub values: Vec<f64>,
    pub color: (u8, u8, u8),
    /// Horizontal shift from the month position, used to place bars side by side
    pub offset: f64,
}

impl Series {
    fn new(name: &str, values: Vec<f64>, color: (u8, u8, u8)) -> Self {
        Self {
            name: name.to_string(),
            values,
            color,
            offset: 0.0,
        }
    }

    fn with_offset(mut self, offset: f64) -> Self {
        self.offset = offset;
        self
    }

    /// `(x, y)` pairs with the month index as x.
    pub fn points(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.values
            .iter()
            .enumerate()
            .map(move |(i, &v)| (i as f64 + self.offset, v))
    }
}

/// Everything a renderer needs to draw one chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartData {
    pub id: ChartId,
    pub kind: ChartKind,
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub months: Vec<String>,
    pub series: Vec<Series>,
    pub y_ticks: Option<Vec<f64>>,
}

impl ChartData {
    /// Build all four charts; month labels come from the averages file.
    pub fn build_all(
        averages: &AverageWeather,
        extremes: &ExtremeWeather,
        ranges: &[i64],
    ) -> Vec<ChartData> {
        let months = averages.months.clone();
        let to_f64 = |v: &[i64]| v.iter().map(|&x| x as f64).collect::<Vec<_>>();

        let temperatures = ChartData {
            id: ChartId::Temperatures,
            kind: ChartKind::Line,
            title: "Average High and Low Temperatures by Month".to_string(),
            x_label: "Months".to_string(),
            y_label: "Temperature".to_string(),
            months: months.clone(),
            series: vec![
                Series::new("Avg High Temp", to_f64(&averages.high_temps), PALETTE[0]),
                Series::new("Avg Low Temp", to_f64(&averages.low_temps), PALETTE[2]),
            ],
            y_ticks: Some(TEMPERATURE_TICKS.to_vec()),
        };

        let records = ChartData {
            id: ChartId::Records,
            kind: ChartKind::Bar,
            title: "Record High and Low Temperatures by Month".to_string(),
            x_label: "Months".to_string(),
            y_label: "Temperature".to_string(),
            months: months.clone(),
            series: vec![
                Series::new("High", to_f64(&extremes.extreme_high_temps), PALETTE[3])
                    .with_offset(BAR_WIDTH / 2.0),
                Series::new("Low", to_f64(&extremes.extreme_low_temps), PALETTE[1])
                    .with_offset(-BAR_WIDTH / 2.0),
            ],
            y_ticks: None,
        };

        let snowfall = ChartData {
            id: ChartId::Snowfall,
            kind: ChartKind::Pie,
            title: "Snowfall Distribution by Month".to_string(),
            x_label: String::new(),
            y_label: String::new(),
            months: months.clone(),
            series: vec![Series::new("Snowfall", extremes.snowfall.clone(), PALETTE[0])],
            y_ticks: None,
        };

        let spread = ChartData {
            id: ChartId::Ranges,
            kind: ChartKind::Line,
            title: "Temperature Ranges by Month".to_string(),
            x_label: "Months".to_string(),
            y_label: "Temperature".to_string(),
            months,
            series: vec![Series::new("Ranges", to_f64(ranges), PALETTE[5])],
            y_ticks: Some(TEMPERATURE_TICKS.to_vec()),
        };

        vec![temperatures, records, snowfall, spread]
    }

    /// Month label for an x position, if it lands on a month.
    pub fn month_at(&self, x: f64) -> Option<&str> {
        let idx = x.round();
        if idx < 0.0 || (x - idx).abs() > 1e-6 {
            return None;
        }
        self.months.get(idx as usize).map(String::as_str)
    }

    /// Mean of each plotted series, skipping empty ones.
    pub fn series_means(&self) -> Vec<(&str, f64)> {
        self.series
            .iter()
            .filter_map(|s| StatsCalculator::mean(&s.values).map(|m| (s.name.as_str(), m)))
            .collect()
    }

    /// Lowest and highest plotted value across all series, widened to include the ticks.
    pub fn value_range(&self) -> (f64, f64) {
        let mut min = f64::INFINITY;
        let mut max = f64::NEG_INFINITY;
        for v in self.series.iter().flat_map(|s| s.values.iter()) {
            if v.is_finite() {
                min = min.min(*v);
                max = max.max(*v);
            }
        }
        if let Some(ticks) = &self.y_ticks {
            for t in ticks {
                min = min.min(*t);
                max = max.max(*t);
            }
        }
        if self.kind == ChartKind::Bar {
            min = min.min(0.0);
            max = max.max(0.0);
        }
        if min.is_infinite() {
            return (0.0, 1.0);
        }
        if min == max {
            return (min - 1.0, max + 1.0);
        }
        (min, max)
    }
}

/// Slice color for the i-th month, cycling the palette.
pub fn slice_color(i: usize) -> (u8, u8, u8) {
    PALETTE[i % PALETTE.len()]
}

/// Share of each slice in percent, `None` when nothing positive can be drawn.
pub fn pie_shares(values: &[f64]) -> Option<Vec<f64>> {
    let total: f64 = values.iter().filter(|v| v.is_finite() && **v > 0.0).sum();
    if total <= 0.0 {
        return None;
    }
    Some(
        values
            .iter()
            .map(|v| if v.is_finite() && *v > 0.0 { v / total * 100.0 } else { 0.0 })
            .collect(),
    )
}
