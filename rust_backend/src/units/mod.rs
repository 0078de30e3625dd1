//! Unit conversion between base units and user display units.
//!
//! - [`converter`]: per-variable conversion in both directions

pub mod converter;

#[cfg(test)]
mod converter_tests;

pub use converter::{convert, convert_series, series_to_base, to_base};
