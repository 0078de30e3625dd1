use serde::{Deserialize, Serialize};

use super::variable::{Unit, VariableKind};
use crate::units::converter::to_base;

/// How a threshold value is interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThresholdKind {
    /// Compare samples directly against `value` (after unit normalization).
    Absolute,
    /// `value` in 0–100 picks a cutoff from the sample's own distribution.
    Percentile,
}

/// User supplied threshold for a variable.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Threshold {
    pub kind: ThresholdKind,
    pub value: f64,
    pub unit: Unit,
}

impl Threshold {
    pub fn absolute(value: f64, unit: Unit) -> Self {
        Self {
            kind: ThresholdKind::Absolute,
            value: sanitize(value),
            unit,
        }
    }

    /// Percentile thresholds carry no unit of their own; `unit` is kept only
    /// so the threshold can be displayed next to the variable.
    pub fn percentile(percentile: f64, unit: Unit) -> Self {
        Self {
            kind: ThresholdKind::Percentile,
            value: sanitize(percentile),
            unit,
        }
    }

    /// Build a threshold from raw form input. Unparseable input becomes `0`.
    pub fn from_input(kind: ThresholdKind, input: &str, unit: Unit) -> Self {
        let value = Self::parse_value(input);
        match kind {
            ThresholdKind::Absolute => Self::absolute(value, unit),
            ThresholdKind::Percentile => Self::percentile(value, unit),
        }
    }

    /// Parse a threshold value the way the input form does: anything that is
    /// not a finite number is `0`.
    pub fn parse_value(input: &str) -> f64 {
        input.trim().parse::<f64>().map(sanitize).unwrap_or(0.0)
    }

    /// Default threshold shown for a variable before the user edits it.
    pub fn default_for(variable: VariableKind) -> Self {
        let (value, unit) = match variable {
            VariableKind::Temperature => (30.0, Unit::Celsius),
            VariableKind::Rainfall => (10.0, Unit::Millimeters),
            VariableKind::Snowfall => (5.0, Unit::Millimeters),
            VariableKind::WindSpeed => (5.0, Unit::MetersPerSecond),
            VariableKind::Humidity => (70.0, Unit::Percent),
            VariableKind::CloudCover => (50.0, Unit::Percent),
            VariableKind::DustConcentration => (0.3, Unit::Aod),
        };
        Self::absolute(value, unit)
    }

    /// Express this threshold in the variable's base unit.
    ///
    /// Percentile thresholds are returned unchanged.
    pub fn to_base(&self, variable: VariableKind) -> Self {
        match self.kind {
            ThresholdKind::Percentile => *self,
            ThresholdKind::Absolute => {
                let value = to_base(variable, Some(self.value), self.unit).unwrap_or(0.0);
                Self::absolute(value, variable.base_unit())
            }
        }
    }

    /// Short description used in summaries, e.g. `30°C` or `the 90th percentile`.
    pub fn describe(&self) -> String {
        match self.kind {
            ThresholdKind::Absolute => format!("{}{}", self.value, self.unit),
            ThresholdKind::Percentile => {
                format!("the {} percentile", ordinal(self.value.round() as i64))
            }
        }
    }
}

fn sanitize(value: f64) -> f64 {
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

fn ordinal(n: i64) -> String {
    let suffix = match (n % 10, n % 100) {
        (_, 11..=13) => "th",
        (1, _) => "st",
        (2, _) => "nd",
        (3, _) => "rd",
        _ => "th",
    };
    format!("{}{}", n, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_value_sanitizes() {
        assert_eq!(Threshold::parse_value("32.5"), 32.5);
        assert_eq!(Threshold::parse_value("  7 "), 7.0);
        assert_eq!(Threshold::parse_value("abc"), 0.0);
        assert_eq!(Threshold::parse_value(""), 0.0);
        assert_eq!(Threshold::parse_value("NaN"), 0.0);
        assert_eq!(Threshold::parse_value("inf"), 0.0);
    }

    #[test]
    fn test_from_input() {
        let t = Threshold::from_input(ThresholdKind::Absolute, "oops", Unit::Celsius);
        assert_eq!(t.value, 0.0);
        assert_eq!(t.kind, ThresholdKind::Absolute);

        let p = Threshold::from_input(ThresholdKind::Percentile, "90", Unit::Millimeters);
        assert_eq!(p.kind, ThresholdKind::Percentile);
        assert_eq!(p.value, 90.0);
    }

    #[test]
    fn test_to_base_fahrenheit() {
        let t = Threshold::absolute(86.0, Unit::Fahrenheit).to_base(VariableKind::Temperature);
        assert!((t.value - 30.0).abs() < 1e-9);
        assert_eq!(t.unit, Unit::Celsius);
    }

    #[test]
    fn test_to_base_keeps_percentile() {
        let p = Threshold::percentile(75.0, Unit::KilometersPerHour);
        assert_eq!(p.to_base(VariableKind::WindSpeed), p);
    }

    #[test]
    fn test_describe() {
        assert_eq!(Threshold::absolute(30.0, Unit::Celsius).describe(), "30°C");
        assert_eq!(Threshold::absolute(0.3, Unit::Aod).describe(), "0.3AOD");
        assert_eq!(
            Threshold::percentile(90.0, Unit::Millimeters).describe(),
            "the 90th percentile"
        );
        assert_eq!(
            Threshold::percentile(1.0, Unit::Millimeters).describe(),
            "the 1st percentile"
        );
        assert_eq!(
            Threshold::percentile(12.0, Unit::Millimeters).describe(),
            "the 12th percentile"
        );
    }

    #[test]
    fn test_describe_large_whole_values() {
        assert_eq!(
            Threshold::absolute(1e19, Unit::Millimeters).describe(),
            "10000000000000000000mm"
        );
        assert_eq!(Threshold::absolute(-40.0, Unit::Celsius).describe(), "-40°C");
    }

    #[test]
    fn test_defaults_use_supported_units() {
        for variable in VariableKind::ALL {
            let threshold = Threshold::default_for(variable);
            assert!(variable.supports(threshold.unit));
        }
    }

    #[test]
    fn test_serde_shape() {
        let json = serde_json::to_value(Threshold::absolute(30.0, Unit::Celsius)).unwrap();
        assert_eq!(json["kind"], "absolute");
        assert_eq!(json["unit"], "°C");
    }
}
