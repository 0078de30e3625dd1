//! Exceedance probability and averages over historical samples.

use crate::models::{ProbabilityResult, Threshold, ThresholdKind, Unit, VariableKind};

/// Drop missing and NaN samples, keeping order.
pub fn clean_samples(values: &[Option<f64>]) -> Vec<f64> {
    values
        .iter()
        .filter_map(|v| v.filter(|x| !x.is_nan()))
        .collect()
}

/// Value at `floor(percentile / 100 * len)` of the sorted samples, with the
/// index clamped to the valid range. `None` when `values` is empty.
pub fn percentile_cutoff(values: &[f64], percentile: f64) -> Option<f64> {
    if values.is_empty() {
        return None;
    }

    let mut sorted = values.to_vec();
    sorted.sort_by(|a, b| a.total_cmp(b));

    let len = sorted.len();
    let raw_index = (percentile / 100.0 * len as f64).floor();
    let index = if raw_index.is_nan() || raw_index < 0.0 {
        0
    } else {
        (raw_index as usize).min(len - 1)
    };
    Some(sorted[index])
}

/// Percentage of samples strictly above `cutoff`. Zero for an empty slice.
pub fn exceedance_percentage(values: &[f64], cutoff: f64) -> f64 {
    if values.is_empty() {
        return 0.0;
    }
    let exceed = values.iter().filter(|v| **v > cutoff).count();
    exceed as f64 / values.len() as f64 * 100.0
}

/// Probability (0–100) that a sample exceeds the threshold.
///
/// Absolute thresholds must already be in the same unit as `values`.
/// Percentile thresholds take their cutoff from the samples themselves.
pub fn compute_probability(values: &[Option<f64>], threshold: &Threshold) -> f64 {
    let clean = clean_samples(values);
    if clean.is_empty() {
        return 0.0;
    }

    let cutoff = match threshold.kind {
        ThresholdKind::Absolute => threshold.value,
        ThresholdKind::Percentile => match percentile_cutoff(&clean, threshold.value) {
            Some(cutoff) => cutoff,
            None => return 0.0,
        },
    };

    exceedance_percentage(&clean, cutoff)
}

/// Mean of the usable samples, `None` if there are none.
pub fn compute_average(values: &[Option<f64>]) -> Option<f64> {
    let clean = clean_samples(values);
    if clean.is_empty() {
        return None;
    }
    Some(clean.iter().sum::<f64>() / clean.len() as f64)
}

/// Run cleaning, probability and average for one variable's series.
pub fn compute_probability_result(
    variable: VariableKind,
    unit: Unit,
    values: &[Option<f64>],
    threshold: &Threshold,
) -> ProbabilityResult {
    let clean = clean_samples(values);
    let probability = compute_probability(values, threshold);
    let average = compute_average(values);

    ProbabilityResult {
        variable,
        unit,
        probability,
        average,
        count: clean.len(),
        values: clean,
    }
}
