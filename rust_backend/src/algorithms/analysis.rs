use serde::{Deserialize, Serialize};

use super::histogram::compute_histogram;
use super::probability::compute_probability_result;
use crate::models::{HistogramBucket, ProbabilityResult, Threshold, Unit, VariableSeries};
use crate::units::{convert, convert_series};

/// Descriptive statistics over a cleaned sample set.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeriesStats {
    pub count: usize,
    pub mean: f64,
    pub median: f64,
    pub std_dev: f64,
    pub min: f64,
    pub max: f64,
}

/// Everything the dashboard shows for one variable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariableReport {
    /// Engine output in the variable's base unit.
    pub result: ProbabilityResult,
    /// The threshold as the user entered it.
    pub threshold: Threshold,
    pub display_unit: Unit,
    /// Average converted to `display_unit`.
    pub display_average: Option<f64>,
    /// Cleaned samples converted to `display_unit`.
    pub display_values: Vec<f64>,
    /// Histogram over `display_values`.
    pub histogram: Vec<HistogramBucket>,
    /// Statistics over `display_values`; `None` without samples.
    pub stats: Option<SeriesStats>,
}

impl VariableReport {
    pub fn probability(&self) -> f64 {
        self.result.probability
    }

    pub fn has_data(&self) -> bool {
        self.result.count > 0
    }
}

/// Mean, median, standard deviation and range of `values`.
///
/// # Returns
/// `None` for an empty slice.
pub fn compute_stats(values: &[f64]) -> Option<SeriesStats> {
    if values.is_empty() {
        return None;
    }

    let count = values.len();
    let mean = values.iter().sum::<f64>() / count as f64;

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));
    let median = if count % 2 == 0 {
        (sorted[count / 2 - 1] + sorted[count / 2]) / 2.0
    } else {
        sorted[count / 2]
    };

    let variance = values
        .iter()
        .map(|v| {
            let diff = v - mean;
            diff * diff
        })
        .sum::<f64>()
        / count as f64;

    Some(SeriesStats {
        count,
        mean,
        median,
        std_dev: variance.sqrt(),
        min: sorted[0],
        max: sorted[count - 1],
    })
}

/// Run the probability engine over one series.
///
/// # Arguments
/// * `series` - Raw values in the variable's base unit
/// * `threshold` - User threshold, in any supported unit
/// * `display_unit` - Unit for averages, values and histogram
/// * `bucket_count` - Number of histogram buckets
///
/// # Returns
/// A [`VariableReport`] whose probability was computed in base units.
pub fn analyze_series(
    series: &VariableSeries,
    threshold: &Threshold,
    display_unit: Unit,
    bucket_count: usize,
) -> VariableReport {
    let variable = series.variable;
    let base_threshold = threshold.to_base(variable);
    let result = compute_probability_result(
        variable,
        variable.base_unit(),
        &series.values,
        &base_threshold,
    );

    let display_values: Vec<f64> = result
        .values
        .iter()
        .filter_map(|v| convert(variable, Some(*v), display_unit))
        .collect();
    let display_average = convert(variable, result.average, display_unit);
    let histogram = compute_histogram(&display_values, bucket_count);
    let stats = compute_stats(&display_values);

    VariableReport {
        result,
        threshold: *threshold,
        display_unit,
        display_average,
        display_values,
        histogram,
        stats,
    }
}

/// Convert a whole raw series for display, keeping missing entries.
pub fn display_series(series: &VariableSeries, display_unit: Unit) -> Vec<Option<f64>> {
    convert_series(series.variable, &series.values, display_unit)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::VariableKind;

    fn series(variable: VariableKind, values: &[Option<f64>]) -> VariableSeries {
        VariableSeries {
            variable,
            unit: variable.base_unit(),
            values: values.to_vec(),
        }
    }

    #[test]
    fn test_compute_stats() {
        assert!(compute_stats(&[]).is_none());

        let stats = compute_stats(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert_eq!(stats.count, 4);
        assert_eq!(stats.mean, 2.5);
        assert_eq!(stats.median, 2.5);
        assert_eq!(stats.min, 1.0);
        assert_eq!(stats.max, 4.0);
        assert!((stats.std_dev - 1.25f64.sqrt()).abs() < 1e-12);
    }

    #[test]
    fn test_fahrenheit_threshold_normalized() {
        let s = series(
            VariableKind::Temperature,
            &[Some(28.0), Some(32.0), Some(35.0), Some(29.0), Some(31.0)],
        );
        // 86°F == 30°C
        let threshold = Threshold::absolute(86.0, Unit::Fahrenheit);
        let report = analyze_series(&s, &threshold, Unit::Fahrenheit, 5);

        assert!((report.probability() - 60.0).abs() < 1e-9);
        assert_eq!(report.result.unit, Unit::Celsius);
        assert_eq!(report.display_unit, Unit::Fahrenheit);
        assert!((report.display_average.unwrap() - 87.8).abs() < 1e-9);
        assert_eq!(report.threshold, threshold);
    }

    #[test]
    fn test_cloud_cover_displayed_as_percent() {
        let s = series(VariableKind::CloudCover, &[Some(0.2), None, Some(0.6)]);
        let report = analyze_series(
            &s,
            &Threshold::absolute(50.0, Unit::Percent),
            Unit::Percent,
            4,
        );

        assert_eq!(report.result.count, 2);
        assert!((report.probability() - 50.0).abs() < 1e-9);
        assert!((report.display_values[0] - 20.0).abs() < 1e-9);
        assert!((report.display_values[1] - 60.0).abs() < 1e-9);
        let total: usize = report.histogram.iter().map(|b| b.count).sum();
        assert_eq!(total, 2);
    }

    #[test]
    fn test_empty_series() {
        let s = VariableSeries::missing(VariableKind::Rainfall, 20);
        let threshold = Threshold::default_for(VariableKind::Rainfall);
        let report = analyze_series(&s, &threshold, Unit::Inches, 10);

        assert!(!report.has_data());
        assert_eq!(report.probability(), 0.0);
        assert_eq!(report.display_average, None);
        assert!(report.histogram.is_empty());
        assert!(report.stats.is_none());
    }

    #[test]
    fn test_display_series_keeps_gaps() {
        let s = series(VariableKind::Rainfall, &[Some(25.4), None]);
        let shown = display_series(&s, Unit::Inches);
        assert_eq!(shown.len(), 2);
        assert!((shown[0].unwrap() - 1.0).abs() < 1e-9);
        assert_eq!(shown[1], None);
    }
}
