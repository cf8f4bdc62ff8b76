//! Weather Data Model
//! Row records and the parallel column sets they are stored in.

use serde::Serialize;

/// One row of the average weather file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyRecord {
    pub month: String,
    pub high_temp: i64,
    pub low_temp: i64,
    pub rainfall: f64,
}

/// One row of the extremes file. The month label is kept only for alignment checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExtremeRecord {
    pub month: String,
    pub extreme_high: i64,
    pub extreme_low: i64,
    pub snowfall: f64,
}

/// Monthly mean high/low temperature and rainfall, stored column-wise in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AverageWeather {
    pub months: Vec<String>,
    pub high_temps: Vec<i64>,
    pub low_temps: Vec<i64>,
    pub rainfall: Vec<f64>,
}

impl AverageWeather {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            months: Vec::with_capacity(capacity),
            high_temps: Vec::with_capacity(capacity),
            low_temps: Vec::with_capacity(capacity),
            rainfall: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: MonthlyRecord) {
        self.months.push(record.month);
        self.high_temps.push(record.high_temp);
        self.low_temps.push(record.low_temp);
        self.rainfall.push(record.rainfall);
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    /// Iterate the columns back as row records.
    #[cfg(test)]
    pub fn records(&self) -> impl Iterator<Item = MonthlyRecord> + '_ {
        (0..self.len()).map(move |i| MonthlyRecord {
            month: self.months[i].clone(),
            high_temp: self.high_temps[i],
            low_temp: self.low_temps[i],
            rainfall: self.rainfall[i],
        })
    }
}

impl FromIterator<MonthlyRecord> for AverageWeather {
    fn from_iter<I: IntoIterator<Item = MonthlyRecord>>(iter: I) -> Self {
        let mut columns = Self::default();
        for record in iter {
            columns.push(record);
        }
        columns
    }
}

/// Monthly record high/low temperature and snowfall, stored column-wise in file order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExtremeWeather {
    pub months: Vec<String>,
    pub extreme_high_temps: Vec<i64>,
    pub extreme_low_temps: Vec<i64>,
    pub snowfall: Vec<f64>,
}

impl ExtremeWeather {
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            months: Vec::with_capacity(capacity),
            extreme_high_temps: Vec::with_capacity(capacity),
            extreme_low_temps: Vec::with_capacity(capacity),
            snowfall: Vec::with_capacity(capacity),
        }
    }

    pub fn push(&mut self, record: ExtremeRecord) {
        self.months.push(record.month);
        self.extreme_high_temps.push(record.extreme_high);
        self.extreme_low_temps.push(record.extreme_low);
        self.snowfall.push(record.snowfall);
    }

    pub fn len(&self) -> usize {
        self.months.len()
    }

    pub fn is_empty(&self) -> bool {
        self.months.is_empty()
    }

    #[cfg(test)]
    pub fn records(&self) -> impl Iterator<Item = ExtremeRecord> + '_ {
        (0..self.len()).map(move |i| ExtremeRecord {
            month: self.months[i].clone(),
            extreme_high: self.extreme_high_temps[i],
            extreme_low: self.extreme_low_temps[i],
            snowfall: self.snowfall[i],
        })
    }
}

impl FromIterator<ExtremeRecord> for ExtremeWeather {
    fn from_iter<I: IntoIterator<Item = ExtremeRecord>>(iter: I) -> Self {
        let mut columns = Self::default();
        for record in iter {
            columns.push(record);
        }
        columns
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_keeps_columns_parallel() {
        let averages: AverageWeather = vec![
            MonthlyRecord {
                month: "Jan".into(),
                high_temp: 40,
                low_temp: 20,
                rainfall: 3.5,
            },
            MonthlyRecord {
                month: "Feb".into(),
                high_temp: 50,
                low_temp: 25,
                rainfall: 1.0,
            },
        ]
        .into_iter()
        .collect();

        assert_eq!(averages.len(), 2);
        assert_eq!(averages.high_temps, vec![40, 50]);
        assert_eq!(averages.low_temps, vec![20, 25]);
        assert_eq!(averages.rainfall, vec![3.5, 1.0]);

        let back: Vec<MonthlyRecord> = averages.records().collect();
        assert_eq!(back[1].month, "Feb");
        assert_eq!(back[1].high_temp, 50);
    }

    #[test]
    fn extremes_round_trip_through_records() {
        let mut extremes = ExtremeWeather::with_capacity(1);
        extremes.push(ExtremeRecord {
            month: "Jan".into(),
            extreme_high: 72,
            extreme_low: -2,
            snowfall: 7.4,
        });
        let rebuilt: ExtremeWeather = extremes.records().collect();
        assert_eq!(rebuilt, extremes);
    }
}
