use serde::{Deserialize, Serialize};

use super::time::DateKey;
use super::variable::{Unit, VariableKind};

/// A single observation for one date. `raw_value` is `None` when the source
/// has no data for that date.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sample {
    pub date_key: DateKey,
    pub raw_value: Option<f64>,
}

/// Raw values of one variable, one entry per historical date.
///
/// The series is never cleaned: its length always matches the number of dates
/// that were requested, in chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariableSeries {
    pub variable: VariableKind,
    pub unit: Unit,
    pub values: Vec<Option<f64>>,
}

impl VariableSeries {
    /// Build a series in the variable's base unit by looking up every date key.
    pub fn from_lookup<F>(variable: VariableKind, dates: &[DateKey], mut lookup: F) -> Self
    where
        F: FnMut(&DateKey) -> Option<f64>,
    {
        Self {
            variable,
            unit: variable.base_unit(),
            values: dates.iter().map(|d| lookup(d)).collect(),
        }
    }

    /// A series with no data for any of the requested dates.
    pub fn missing(variable: VariableKind, len: usize) -> Self {
        Self {
            variable,
            unit: variable.base_unit(),
            values: vec![None; len],
        }
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Pair every value with the date it belongs to.
    pub fn samples(&self, dates: &[DateKey]) -> Vec<Sample> {
        dates
            .iter()
            .zip(self.values.iter())
            .map(|(date_key, raw_value)| Sample {
                date_key: *date_key,
                raw_value: *raw_value,
            })
            .collect()
    }

    /// Number of dates that actually carry a usable value.
    pub fn present_count(&self) -> usize {
        self.values
            .iter()
            .filter(|v| matches!(v, Some(x) if !x.is_nan()))
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dates() -> Vec<DateKey> {
        (2020..2024).map(|y| DateKey::new(y, 2, 29)).collect()
    }

    #[test]
    fn test_from_lookup_keeps_alignment() {
        let dates = dates();
        let series = VariableSeries::from_lookup(VariableKind::Rainfall, &dates, |d| {
            d.to_naive_date().map(|_| 4.0)
        });
        assert_eq!(series.len(), dates.len());
        assert_eq!(series.values, vec![Some(4.0), None, None, None]);
        assert_eq!(series.unit, Unit::Millimeters);
        assert_eq!(series.present_count(), 1);
    }

    #[test]
    fn test_missing_series() {
        let series = VariableSeries::missing(VariableKind::Humidity, 3);
        assert_eq!(series.values, vec![None, None, None]);
        assert_eq!(series.present_count(), 0);
    }

    #[test]
    fn test_samples_pair_dates() {
        let dates = dates();
        let series = VariableSeries {
            variable: VariableKind::Temperature,
            unit: Unit::Celsius,
            values: vec![Some(1.0), Some(f64::NAN), None, Some(3.0)],
        };
        let samples = series.samples(&dates);
        assert_eq!(samples.len(), 4);
        assert_eq!(samples[3].date_key, DateKey::new(2023, 2, 29));
        assert_eq!(samples[3].raw_value, Some(3.0));
        assert_eq!(series.present_count(), 2);
    }
}
