//! Data Processor Module
//! Cross-file alignment checks and derived monthly sequences.

use crate::data::{AverageWeather, ExtremeWeather};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq)]
pub enum AlignmentError {
    #[error("Row count mismatch: {averages} average rows but {extremes} extreme rows")]
    LengthMismatch { averages: usize, extremes: usize },
    #[error("Month mismatch at data row {row}: '{average}' vs '{extreme}'")]
    MonthMismatch {
        row: usize,
        average: String,
        extreme: String,
    },
}

#[derive(Error, Debug, PartialEq)]
#[error("Temperature range overflows at data row {row}: {high} minus {low}")]
pub struct RangeOverflow {
    pub row: usize,
    pub high: i64,
    pub low: i64,
}

/// How the two files are matched up month by month
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "kebab-case")]
pub enum AlignmentMode {
    /// Month labels must agree row for row
    ByMonth,
    /// Rows are paired by position only
    Positional,
}

impl Default for AlignmentMode {
    fn default() -> Self {
        AlignmentMode::ByMonth
    }
}

/// Handles derived sequences and cross-dataset validation.
pub struct DataProcessor;

impl DataProcessor {
    /// Verify the extremes file lines up with the averages file.
    pub fn check_alignment(
        averages: &AverageWeather,
        extremes: &ExtremeWeather,
        mode: AlignmentMode,
    ) -> Result<(), AlignmentError> {
        if averages.len() != extremes.len() {
            return Err(AlignmentError::LengthMismatch {
                averages: averages.len(),
                extremes: extremes.len(),
            });
        }

        if mode == AlignmentMode::Positional {
            debug!("positional alignment, month labels not compared");
            return Ok(());
        }

        for (i, (a, e)) in averages.months.iter().zip(&extremes.months).enumerate() {
            if !a.trim().eq_ignore_ascii_case(e.trim()) {
                return Err(AlignmentError::MonthMismatch {
                    row: i + 1,
                    average: a.clone(),
                    extreme: e.clone(),
                });
            }
        }

        Ok(())
    }

    /// Per-month spread between the record high and the record low.
    pub fn temperature_ranges(extremes: &ExtremeWeather) -> Result<Vec<i64>, RangeOverflow> {
        extremes
            .extreme_high_temps
            .iter()
            .zip(&extremes.extreme_low_temps)
            .enumerate()
            .map(|(i, (&high, &low))| {
                high.checked_sub(low).ok_or(RangeOverflow {
                    row: i + 1,
                    high,
                    low,
                })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{ExtremeRecord, MonthlyRecord};

    fn averages(months: &[&str]) -> AverageWeather {
        months
            .iter()
            .map(|m| MonthlyRecord {
                month: m.to_string(),
                high_temp: 50,
                low_temp: 30,
                rainfall: 1.0,
            })
            .collect()
    }

    fn extremes(rows: &[(&str, i64, i64)]) -> ExtremeWeather {
        rows.iter()
            .map(|&(m, hi, lo)| ExtremeRecord {
                month: m.to_string(),
                extreme_high: hi,
                extreme_low: lo,
                snowfall: 0.0,
            })
            .collect()
    }

    #[test]
    fn ranges_are_elementwise_differences() {
        let ext = extremes(&[("Jan", 72, -2), ("Feb", 75, 4), ("Mar", 86, 7)]);
        let ranges = DataProcessor::temperature_ranges(&ext).unwrap();
        assert_eq!(ranges, vec![74, 71, 79]);
        for (i, r) in ranges.iter().enumerate() {
            assert_eq!(*r, ext.extreme_high_temps[i] - ext.extreme_low_temps[i]);
        }
    }

    #[test]
    fn ranges_of_empty_input_are_empty() {
        assert!(DataProcessor::temperature_ranges(&ExtremeWeather::default())
            .unwrap()
            .is_empty());
    }

    #[test]
    fn range_past_i64_is_an_error() {
        let ext = extremes(&[("Jan", 72, -2), ("Feb", i64::MAX, -1)]);
        assert_eq!(
            DataProcessor::temperature_ranges(&ext),
            Err(RangeOverflow {
                row: 2,
                high: i64::MAX,
                low: -1,
            })
        );
    }

    #[test]
    fn matching_months_align() {
        let avg = averages(&["Jan", "Feb"]);
        let ext = extremes(&[("jan", 1, 0), (" Feb ", 1, 0)]);
        assert_eq!(
            DataProcessor::check_alignment(&avg, &ext, AlignmentMode::ByMonth),
            Ok(())
        );
    }

    #[test]
    fn month_mismatch_is_reported_with_row() {
        let avg = averages(&["Jan", "Feb", "Mar"]);
        let ext = extremes(&[("Jan", 1, 0), ("Mar", 1, 0), ("Feb", 1, 0)]);
        assert_eq!(
            DataProcessor::check_alignment(&avg, &ext, AlignmentMode::ByMonth),
            Err(AlignmentError::MonthMismatch {
                row: 2,
                average: "Feb".into(),
                extreme: "Mar".into(),
            })
        );
    }

    #[test]
    fn positional_mode_ignores_labels_but_not_length() {
        let avg = averages(&["Jan", "Feb"]);
        let ext = extremes(&[("1", 1, 0), ("2", 1, 0)]);
        assert!(DataProcessor::check_alignment(&avg, &ext, AlignmentMode::Positional).is_ok());

        let short = extremes(&[("1", 1, 0)]);
        assert_eq!(
            DataProcessor::check_alignment(&avg, &short, AlignmentMode::Positional),
            Err(AlignmentError::LengthMismatch {
                averages: 2,
                extremes: 1
            })
        );
    }
}
