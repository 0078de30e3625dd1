//! Per-variable unit conversion.
//!
//! Values travel in each variable's base unit (°C, mm, m/s, %, fraction, AOD)
//! and are converted to the user's display unit at the edges. Length and speed
//! conversions go through `qtty` quantities; temperature is affine and is
//! converted by hand.
//!
//! Missing (`None`) and NaN inputs yield `None`. A unit that does not belong
//! to the variable is treated as the base unit.

use qtty::length::{Inch, Kilometer, Meter, Mile, Millimeter};
use qtty::time::{Hour, Second};
use qtty::velocity::Velocity;
use qtty::{Per, Quantity};

use crate::models::{Unit, VariableKind};

type MetersPerSecond = Velocity<Meter, Second>;

/// Convert a base-unit value into `unit` for display.
pub fn convert(variable: VariableKind, raw: Option<f64>, unit: Unit) -> Option<f64> {
    let value = raw.filter(|v| !v.is_nan())?;
    if unit == variable.base_unit() || !variable.supports(unit) {
        return Some(value);
    }

    let converted = match (variable, unit) {
        (VariableKind::Temperature, Unit::Fahrenheit) => value * 9.0 / 5.0 + 32.0,
        (VariableKind::Rainfall | VariableKind::Snowfall, Unit::Inches) => {
            Quantity::<Millimeter>::new(value).to::<Inch>().value()
        }
        (VariableKind::WindSpeed, Unit::KilometersPerHour) => MetersPerSecond::new(value)
            .to::<Per<Kilometer, Hour>>()
            .value(),
        (VariableKind::WindSpeed, Unit::MilesPerHour) => {
            MetersPerSecond::new(value).to::<Per<Mile, Hour>>().value()
        }
        (VariableKind::CloudCover, Unit::Percent) => value * 100.0,
        _ => value,
    };
    Some(converted)
}

/// Convert a value expressed in `unit` back into the variable's base unit.
pub fn to_base(variable: VariableKind, value: Option<f64>, unit: Unit) -> Option<f64> {
    let value = value.filter(|v| !v.is_nan())?;
    if unit == variable.base_unit() || !variable.supports(unit) {
        return Some(value);
    }

    let base = match (variable, unit) {
        (VariableKind::Temperature, Unit::Fahrenheit) => (value - 32.0) * 5.0 / 9.0,
        (VariableKind::Rainfall | VariableKind::Snowfall, Unit::Inches) => {
            Quantity::<Inch>::new(value).to::<Millimeter>().value()
        }
        (VariableKind::WindSpeed, Unit::KilometersPerHour) => {
            Velocity::<Kilometer, Hour>::new(value)
                .to::<Per<Meter, Second>>()
                .value()
        }
        (VariableKind::WindSpeed, Unit::MilesPerHour) => Velocity::<Mile, Hour>::new(value)
            .to::<Per<Meter, Second>>()
            .value(),
        (VariableKind::CloudCover, Unit::Percent) => value / 100.0,
        _ => value,
    };
    Some(base)
}

/// [`convert`] applied element-wise; the output keeps the input's length.
pub fn convert_series(variable: VariableKind, values: &[Option<f64>], unit: Unit) -> Vec<Option<f64>> {
    values.iter().map(|v| convert(variable, *v, unit)).collect()
}

/// [`to_base`] applied element-wise; the output keeps the input's length.
pub fn series_to_base(variable: VariableKind, values: &[Option<f64>], unit: Unit) -> Vec<Option<f64>> {
    values.iter().map(|v| to_base(variable, *v, unit)).collect()
}
