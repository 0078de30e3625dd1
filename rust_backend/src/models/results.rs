use serde::{Deserialize, Serialize};

use super::variable::{Unit, VariableKind};

/// Outcome of the probability computation for one variable.
///
/// `values` and `average` are in `unit`, the variable's base unit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProbabilityResult {
    pub variable: VariableKind,
    pub unit: Unit,
    /// Exceedance probability in percent, `0..=100`.
    pub probability: f64,
    /// Mean of the cleaned samples; `None` when there are none.
    pub average: Option<f64>,
    /// Number of samples actually used.
    pub count: usize,
    /// Cleaned samples (missing and NaN values removed), in series order.
    pub values: Vec<f64>,
}

/// One histogram bucket, `[range_start, range_end)`; the last bucket of a
/// histogram is closed at its end.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistogramBucket {
    pub range_start: f64,
    pub range_end: f64,
    pub count: usize,
}

impl HistogramBucket {
    pub fn midpoint(&self) -> f64 {
        (self.range_start + self.range_end) / 2.0
    }
}
