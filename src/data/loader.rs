//! CSV Data Loader Module
//! Reads the headered weather CSV files into parallel columns using Polars.

use crate::data::{AverageWeather, ExtremeRecord, ExtremeWeather, MonthlyRecord};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Every weather file carries a label column followed by three values.
const REQUIRED_COLUMNS: usize = 4;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("File not found: {0}")]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error("Expected at least {expected} columns, found {found}")]
    MissingColumns { expected: usize, found: usize },
    #[error("Line {line}: missing value in column '{column}'")]
    MissingField { line: usize, column: String },
    #[error("Line {line}: '{value}' in column '{column}' is not an integer")]
    InvalidInteger {
        line: usize,
        column: String,
        value: String,
    },
    #[error("Line {line}: '{value}' in column '{column}' is not a number")]
    InvalidFloat {
        line: usize,
        column: String,
        value: String,
    },
}

/// Raw string cells of one CSV file, header already consumed.
struct RawTable {
    names: Vec<String>,
    rows: Vec<Vec<Option<String>>>,
}

impl RawTable {
    /// Read every column as text so conversion errors can be reported per cell.
    fn read(path: &Path) -> Result<Self, LoaderError> {
        if !path.exists() {
            return Err(LoaderError::NotFound(path.to_path_buf()));
        }

        // A zero-length inference window makes Polars keep every column as String
        let df = LazyCsvReader::new(path)
            .with_has_header(true)
            .with_infer_schema_length(Some(0))
            .with_truncate_ragged_lines(true)
            .finish()?
            .collect()?;

        let columns = df.get_columns();
        if columns.len() < REQUIRED_COLUMNS {
            return Err(LoaderError::MissingColumns {
                expected: REQUIRED_COLUMNS,
                found: columns.len(),
            });
        }

        let mut names = Vec::with_capacity(REQUIRED_COLUMNS);
        let mut cells: Vec<Vec<Option<String>>> = Vec::with_capacity(REQUIRED_COLUMNS);
        for column in &columns[..REQUIRED_COLUMNS] {
            names.push(column.name().to_string());
            let values = column
                .str()?
                .into_iter()
                .map(|v| v.map(|s| s.trim().to_string()))
                .collect();
            cells.push(values);
        }

        let rows = (0..df.height())
            .map(|i| cells.iter().map(|col| col[i].clone()).collect())
            .collect();

        Ok(Self { names, rows })
    }
}

/// One data row with its file line number, for typed field access.
struct RowCursor<'a> {
    line: usize,
    names: &'a [String],
    cells: &'a [Option<String>],
}

impl RowCursor<'_> {
    fn text(&self, idx: usize) -> Result<&str, LoaderError> {
        match self.cells[idx].as_deref() {
            Some(v) if !v.is_empty() => Ok(v),
            _ => Err(LoaderError::MissingField {
                line: self.line,
                column: self.names[idx].clone(),
            }),
        }
    }

    fn integer(&self, idx: usize) -> Result<i64, LoaderError> {
        let raw = self.text(idx)?;
        raw.parse().map_err(|_| LoaderError::InvalidInteger {
            line: self.line,
            column: self.names[idx].clone(),
            value: raw.to_string(),
        })
    }

    fn float(&self, idx: usize) -> Result<f64, LoaderError> {
        let raw = self.text(idx)?;
        raw.parse().map_err(|_| LoaderError::InvalidFloat {
            line: self.line,
            column: self.names[idx].clone(),
            value: raw.to_string(),
        })
    }
}

fn for_each_row<F>(table: &RawTable, mut f: F) -> Result<(), LoaderError>
where
    F: FnMut(&RowCursor<'_>) -> Result<(), LoaderError>,
{
    for (i, cells) in table.rows.iter().enumerate() {
        // Line 1 is the header
        let cursor = RowCursor {
            line: i + 2,
            names: &table.names,
            cells,
        };
        f(&cursor)?;
    }
    Ok(())
}

/// Load the average weather file: `month, high, low, rain`.
pub fn load_averages(path: impl AsRef<Path>) -> Result<AverageWeather, LoaderError> {
    let path = path.as_ref();
    let table = RawTable::read(path)?;
    let mut averages = AverageWeather::with_capacity(table.rows.len());

    for_each_row(&table, |row| {
        averages.push(MonthlyRecord {
            month: row.text(0)?.to_string(),
            high_temp: row.integer(1)?,
            low_temp: row.integer(2)?,
            rainfall: row.float(3)?,
        });
        Ok(())
    })?;

    if averages.is_empty() {
        warn!("{} has a header but no data rows", path.display());
    }
    info!("loaded {} average rows from {}", averages.len(), path.display());
    debug!(columns = ?table.names, "average weather header");
    Ok(averages)
}

/// Load the extremes file: `month, extreme_high, extreme_low, snow`.
pub fn load_extremes(path: impl AsRef<Path>) -> Result<ExtremeWeather, LoaderError> {
    let path = path.as_ref();
    let table = RawTable::read(path)?;
    let mut extremes = ExtremeWeather::with_capacity(table.rows.len());

    for_each_row(&table, |row| {
        extremes.push(ExtremeRecord {
            month: row.text(0)?.to_string(),
            extreme_high: row.integer(1)?,
            extreme_low: row.integer(2)?,
            snowfall: row.float(3)?,
        });
        Ok(())
    })?;

    if extremes.is_empty() {
        warn!("{} has a header but no data rows", path.display());
    }
    info!("loaded {} extreme rows from {}", extremes.len(), path.display());
    debug!(columns = ?table.names, "extreme weather header");
    Ok(extremes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn csv(contents: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn loads_rows_into_parallel_columns() {
        let file = csv("Month,High,Low,Rain\nJan,40,20,3.5\nFeb,50,25,1.0\n");
        let averages = load_averages(file.path()).unwrap();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages.months, vec!["Jan", "Feb"]);
        assert_eq!(averages.high_temps, vec![40, 50]);
        assert_eq!(averages.low_temps, vec![20, 25]);
        assert_eq!(averages.rainfall, vec![3.5, 1.0]);
    }

    #[test]
    fn column_length_matches_row_count() {
        let mut body = String::from("Month,High,Low,Snow\n");
        for i in 0..12 {
            body.push_str(&format!("M{i},{},{},{}.5\n", 60 + i, -i, i));
        }
        let extremes = load_extremes(csv(&body).path()).unwrap();

        assert_eq!(extremes.len(), 12);
        assert_eq!(extremes.extreme_high_temps.len(), 12);
        assert_eq!(extremes.extreme_low_temps.len(), 12);
        assert_eq!(extremes.snowfall.len(), 12);
        assert_eq!(extremes.extreme_low_temps[3], -3);
    }

    #[test]
    fn header_only_yields_empty_columns() {
        let averages = load_averages(csv("Month,High,Low,Rain\n").path()).unwrap();
        assert!(averages.is_empty());
    }

    #[test]
    fn fields_are_trimmed() {
        let averages = load_averages(csv("Month,High,Low,Rain\nJan, 40 ,20, 3.5\n").path()).unwrap();
        assert_eq!(averages.high_temps, vec![40]);
        assert_eq!(averages.rainfall, vec![3.5]);
    }

    #[test]
    fn extra_columns_are_ignored() {
        let averages =
            load_averages(csv("Month,High,Low,Rain,Note\nJan,40,20,3.5,wet\n").path()).unwrap();
        assert_eq!(averages.len(), 1);
    }

    #[test]
    fn trailing_fields_past_the_header_are_dropped() {
        let file = csv("Month,High,Low,Rain\nJan,40,20,3.5,\nFeb,50,25,1.0,wet,windy\n");
        let averages = load_averages(file.path()).unwrap();

        assert_eq!(averages.months, vec!["Jan", "Feb"]);
        assert_eq!(averages.high_temps, vec![40, 50]);
        assert_eq!(averages.rainfall, vec![3.5, 1.0]);
    }

    #[test]
    fn malformed_integer_reports_line_and_column() {
        let file = csv("Month,High,Low,Rain\nJan,40,20,3.5\nFeb,warm,25,1.0\n");
        match load_averages(file.path()) {
            Err(LoaderError::InvalidInteger {
                line,
                column,
                value,
            }) => {
                assert_eq!(line, 3);
                assert_eq!(column, "High");
                assert_eq!(value, "warm");
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn fractional_value_is_not_an_integer() {
        let file = csv("Month,High,Low,Rain\nJan,40.5,20,3.5\n");
        assert!(matches!(
            load_averages(file.path()),
            Err(LoaderError::InvalidInteger { line: 2, .. })
        ));
    }

    #[test]
    fn malformed_float_is_rejected() {
        let file = csv("Month,High,Low,Snow\nJan,70,-5,lots\n");
        assert!(matches!(
            load_extremes(file.path()),
            Err(LoaderError::InvalidFloat { line: 2, .. })
        ));
    }

    #[test]
    fn missing_field_is_rejected() {
        let file = csv("Month,High,Low,Rain\nJan,40,,3.5\n");
        assert!(matches!(
            load_averages(file.path()),
            Err(LoaderError::MissingField { line: 2, .. })
        ));
    }

    #[test]
    fn too_few_columns_is_rejected() {
        let file = csv("Month,High,Low\nJan,40,20\n");
        assert!(matches!(
            load_averages(file.path()),
            Err(LoaderError::MissingColumns {
                expected: 4,
                found: 3
            })
        ));
    }

    #[test]
    fn missing_file_is_reported() {
        let result = load_averages("does/not/exist.csv");
        assert!(matches!(result, Err(LoaderError::NotFound(_))));
    }
}
