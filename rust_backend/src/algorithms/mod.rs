//! Probability engine and per-variable analysis.
//!
//! # Components
//!
//! - [`probability`]: sample cleaning, exceedance probability and averages
//! - [`histogram`]: equal-width histograms
//! - [`analysis`]: runs the engine over a series and converts for display
//!
//! # Example
//!
//! ```
//! use climatescope::algorithms::compute_probability;
//! use climatescope::models::{Threshold, Unit};
//!
//! let values = [Some(28.0), Some(32.0), Some(35.0), Some(29.0), Some(30.0)];
//! let p = compute_probability(&values, &Threshold::absolute(30.0, Unit::Celsius));
//! assert_eq!(p, 40.0);
//! ```

pub mod analysis;
pub mod histogram;
pub mod probability;


pub use analysis::{analyze_series, compute_stats, display_series, SeriesStats, VariableReport};
pub use histogram::compute_histogram;
pub use probability::{
    clean_samples, compute_average, compute_probability, compute_probability_result,
    exceedance_percentage, percentile_cutoff,
};
