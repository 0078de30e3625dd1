//! Weather variables and measurement units.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A weather variable that can be queried and analysed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VariableKind {
    Temperature,
    Rainfall,
    Snowfall,
    WindSpeed,
    Humidity,
    CloudCover,
    DustConcentration,
}

impl VariableKind {
    /// Every variable, in dashboard order.
    pub const ALL: [VariableKind; 7] = [
        VariableKind::Temperature,
        VariableKind::Rainfall,
        VariableKind::Snowfall,
        VariableKind::WindSpeed,
        VariableKind::Humidity,
        VariableKind::CloudCover,
        VariableKind::DustConcentration,
    ];

    /// Human readable name, as shown on the dashboard.
    pub fn display_name(&self) -> &'static str {
        match self {
            VariableKind::Temperature => "Temperature",
            VariableKind::Rainfall => "Rainfall",
            VariableKind::Snowfall => "Snowfall",
            VariableKind::WindSpeed => "Wind Speed",
            VariableKind::Humidity => "Humidity",
            VariableKind::CloudCover => "Cloud Cover",
            VariableKind::DustConcentration => "Dust Concentration",
        }
    }

    /// Canonical unit the gateway delivers and the engine computes in.
    pub fn base_unit(&self) -> Unit {
        match self {
            VariableKind::Temperature => Unit::Celsius,
            VariableKind::Rainfall | VariableKind::Snowfall => Unit::Millimeters,
            VariableKind::WindSpeed => Unit::MetersPerSecond,
            VariableKind::Humidity => Unit::Percent,
            VariableKind::CloudCover => Unit::Fraction,
            VariableKind::DustConcentration => Unit::Aod,
        }
    }

    /// Units a user may pick for thresholds and display.
    pub fn supported_units(&self) -> &'static [Unit] {
        match self {
            VariableKind::Temperature => &[Unit::Celsius, Unit::Fahrenheit],
            VariableKind::Rainfall | VariableKind::Snowfall => &[Unit::Millimeters, Unit::Inches],
            VariableKind::WindSpeed => &[
                Unit::MetersPerSecond,
                Unit::KilometersPerHour,
                Unit::MilesPerHour,
            ],
            VariableKind::Humidity => &[Unit::Percent],
            VariableKind::CloudCover => &[Unit::Fraction, Unit::Percent],
            VariableKind::DustConcentration => &[Unit::Aod],
        }
    }

    /// Whether `unit` is a valid choice for this variable.
    pub fn supports(&self, unit: Unit) -> bool {
        self.supported_units().contains(&unit)
    }

    /// Unit used for display when the user has not picked one.
    pub fn default_display_unit(&self) -> Unit {
        match self {
            VariableKind::CloudCover => Unit::Percent,
            other => other.base_unit(),
        }
    }

    /// NASA POWER parameter codes for this variable.
    ///
    /// Dust has several candidate codes; the first one present in a response
    /// is used.
    pub fn power_parameters(&self) -> &'static [&'static str] {
        match self {
            VariableKind::Temperature => &["T2M"],
            VariableKind::Rainfall => &["PRECTOTCORR"],
            VariableKind::Snowfall => &["PRECSNOLAND"],
            VariableKind::WindSpeed => &["WS10M"],
            VariableKind::Humidity => &["RH2M"],
            VariableKind::CloudCover => &["CLOUD_AMT"],
            VariableKind::DustConcentration => &["AODVIS", "AOD550", "AOD"],
        }
    }
}

impl fmt::Display for VariableKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl FromStr for VariableKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '_' | '-'))
            .flat_map(|c| c.to_lowercase())
            .collect();

        match normalized.as_str() {
            "temperature" | "temp" | "t2m" => Ok(VariableKind::Temperature),
            "rainfall" | "rain" | "precipitation" => Ok(VariableKind::Rainfall),
            "snowfall" | "snow" => Ok(VariableKind::Snowfall),
            "windspeed" | "wind" => Ok(VariableKind::WindSpeed),
            "humidity" => Ok(VariableKind::Humidity),
            "cloudcover" | "clouds" => Ok(VariableKind::CloudCover),
            "dustconcentration" | "dust" | "aod" => Ok(VariableKind::DustConcentration),
            _ => Err(format!("Unknown variable: {}", s)),
        }
    }
}

/// Measurement unit for a variable value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Unit {
    #[serde(rename = "°C", alias = "C")]
    Celsius,
    #[serde(rename = "°F", alias = "F")]
    Fahrenheit,
    #[serde(rename = "mm")]
    Millimeters,
    #[serde(rename = "in")]
    Inches,
    #[serde(rename = "m/s")]
    MetersPerSecond,
    #[serde(rename = "km/h", alias = "kmh")]
    KilometersPerHour,
    #[serde(rename = "mph")]
    MilesPerHour,
    #[serde(rename = "%")]
    Percent,
    #[serde(rename = "fraction")]
    Fraction,
    #[serde(rename = "AOD")]
    Aod,
}

impl Unit {
    pub fn symbol(&self) -> &'static str {
        match self {
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Millimeters => "mm",
            Unit::Inches => "in",
            Unit::MetersPerSecond => "m/s",
            Unit::KilometersPerHour => "km/h",
            Unit::MilesPerHour => "mph",
            Unit::Percent => "%",
            Unit::Fraction => "fraction",
            Unit::Aod => "AOD",
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Unit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "°C" | "C" | "c" | "celsius" => Ok(Unit::Celsius),
            "°F" | "F" | "f" | "fahrenheit" => Ok(Unit::Fahrenheit),
            "mm" => Ok(Unit::Millimeters),
            "in" | "inch" | "inches" => Ok(Unit::Inches),
            "m/s" | "mps" => Ok(Unit::MetersPerSecond),
            "km/h" | "kmh" | "kph" => Ok(Unit::KilometersPerHour),
            "mph" => Ok(Unit::MilesPerHour),
            "%" | "percent" => Ok(Unit::Percent),
            "fraction" => Ok(Unit::Fraction),
            "AOD" | "aod" => Ok(Unit::Aod),
            other => Err(format!("Unknown unit: {}", other)),
        }
    }
}
