//! Statistics Calculator Module
//! Extremes with first-occurrence index, totals and averages over monthly columns.

use statrs::statistics::Statistics;

/// An extreme value and the position where it first occurs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Extreme<T> {
    pub value: T,
    pub index: usize,
}

/// Handles the aggregate calculations behind each summary.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Largest value; ties resolve to the earliest index.
    pub fn max_with_index<T: PartialOrd + Copy>(values: &[T]) -> Option<Extreme<T>> {
        Self::extreme_by(values, |candidate, best| candidate > best)
    }

    /// Smallest value; ties resolve to the earliest index.
    pub fn min_with_index<T: PartialOrd + Copy>(values: &[T]) -> Option<Extreme<T>> {
        Self::extreme_by(values, |candidate, best| candidate < best)
    }

    fn extreme_by<T, F>(values: &[T], better: F) -> Option<Extreme<T>>
    where
        T: PartialOrd + Copy,
        F: Fn(&T, &T) -> bool,
    {
        let (first, rest) = values.split_first()?;
        let mut best = Extreme {
            value: *first,
            index: 0,
        };
        for (i, v) in rest.iter().enumerate() {
            if better(v, &best.value) {
                best = Extreme {
                    value: *v,
                    index: i + 1,
                };
            }
        }
        Some(best)
    }

    /// Sum in file order.
    pub fn total(values: &[f64]) -> f64 {
        values.iter().sum()
    }

    /// Arithmetic mean, `None` for an empty slice.
    pub fn mean(values: &[f64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        Some(values.mean())
    }

    /// Mean of an integer column: exact integer sum, then a single division.
    pub fn mean_of_integers(values: &[i64]) -> Option<f64> {
        if values.is_empty() {
            return None;
        }
        let sum: i128 = values.iter().map(|&v| i128::from(v)).sum();
        Some(sum as f64 / values.len() as f64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn max_and_min_match_reference() {
        let values = [40_i64, 50, 47, 38, 61, 55];
        let max = StatsCalculator::max_with_index(&values).unwrap();
        let min = StatsCalculator::min_with_index(&values).unwrap();

        assert_eq!(max.value, *values.iter().max().unwrap());
        assert_eq!(min.value, *values.iter().min().unwrap());
        assert_eq!(max.index, 4);
        assert_eq!(min.index, 3);
    }

    #[test]
    fn ties_keep_first_occurrence() {
        let values = [3.0, 7.5, 1.0, 7.5, 1.0];
        assert_eq!(StatsCalculator::max_with_index(&values).unwrap().index, 1);
        assert_eq!(StatsCalculator::min_with_index(&values).unwrap().index, 2);
    }

    #[test]
    fn empty_input_has_no_extremes() {
        let empty: [i64; 0] = [];
        assert!(StatsCalculator::max_with_index(&empty).is_none());
        assert!(StatsCalculator::min_with_index(&empty).is_none());
        assert!(StatsCalculator::mean(&[]).is_none());
    }

    #[test]
    fn mean_and_total() {
        assert_eq!(StatsCalculator::total(&[3.5, 1.0, 0.5]), 5.0);
        let mean = StatsCalculator::mean(&[3.5, 1.0, 0.5]).unwrap();
        assert!((mean - 5.0 / 3.0).abs() < 1e-12);
        let mean = StatsCalculator::mean_of_integers(&[74, 71, 79]).unwrap();
        assert!((mean - 224.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn integer_mean_divides_the_exact_sum_once() {
        assert_eq!(StatsCalculator::mean_of_integers(&[74, 71, 79]), Some(224.0 / 3.0));
        assert_eq!(StatsCalculator::mean_of_integers(&[1, 2]), Some(1.5));
        assert_eq!(
            StatsCalculator::mean_of_integers(&[i64::MAX, i64::MAX]),
            Some(i64::MAX as f64)
        );
        assert!(StatsCalculator::mean_of_integers(&[]).is_none());
    }

    #[test]
    fn single_value_is_both_extremes() {
        let values = [12_i64];
        assert_eq!(
            StatsCalculator::max_with_index(&values),
            Some(Extreme { value: 12, index: 0 })
        );
        assert_eq!(
            StatsCalculator::min_with_index(&values),
            Some(Extreme { value: 12, index: 0 })
        );
    }
}
