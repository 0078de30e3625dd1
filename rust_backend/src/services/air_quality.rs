//! Air quality estimation from aerosol optical depth.
//!
//! PM concentrations are rough empirical estimates: PM2.5 ≈ 40 × AOD µg/m³
//! and PM10 ≈ 1.7 × PM2.5. The AQI follows the EPA 24-hour PM2.5 breakpoints.

use chrono::{DateTime, NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{ClimateError, ClimateResult};
use crate::gateway::AodSource;
use crate::models::Location;

/// Source label attached to reports built from Giovanni data.
pub const GIOVANNI_SOURCE: &str = "NASA Giovanni (MERRA-2)";

const PM25_PER_AOD: f64 = 40.0;
const PM10_PER_PM25: f64 = 1.7;
const OZONE_PER_AOD: f64 = 20.0;

/// (pm_low, pm_high, aqi_low, aqi_high)
const PM25_BREAKPOINTS: [(f64, f64, f64, f64); 6] = [
    (0.0, 12.0, 0.0, 50.0),
    (12.1, 35.4, 51.0, 100.0),
    (35.5, 55.4, 101.0, 150.0),
    (55.5, 150.4, 151.0, 200.0),
    (150.5, 250.4, 201.0, 300.0),
    (250.5, 500.4, 301.0, 500.0),
];

const AQI_CEILING: u32 = 500;

fn usable(aod: f64) -> Option<f64> {
    (aod.is_finite() && aod > 0.0).then_some(aod)
}

/// Estimated PM2.5 in µg/m³.
pub fn aod_to_pm25(aod: f64) -> Option<f64> {
    usable(aod).map(|a| a * PM25_PER_AOD)
}

/// Estimated PM10 in µg/m³.
pub fn aod_to_pm10(aod: f64) -> Option<f64> {
    aod_to_pm25(aod).map(|pm25| pm25 * PM10_PER_PM25)
}

/// Placeholder ozone estimate in ppb.
pub fn estimate_ozone(aod: f64) -> Option<f64> {
    usable(aod).map(|a| a * OZONE_PER_AOD)
}

/// EPA AQI for a PM2.5 concentration.
///
/// Concentrations falling between two breakpoint ranges (e.g. 12.05) map to
/// `0`; anything above the last range is capped at 500. Non-positive or NaN
/// input gives `None`.
pub fn calculate_aqi(pm25: f64) -> Option<u32> {
    if !(pm25.is_finite() && pm25 > 0.0) {
        return None;
    }

    for (low, high, aqi_low, aqi_high) in PM25_BREAKPOINTS {
        if pm25 >= low && pm25 <= high {
            let aqi = (aqi_high - aqi_low) / (high - low) * (pm25 - low) + aqi_low;
            return Some(aqi.round() as u32);
        }
    }

    if pm25 > 500.4 {
        Some(AQI_CEILING)
    } else {
        Some(0)
    }
}

/// EPA AQI category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AqiCategory {
    Good,
    Moderate,
    UnhealthyForSensitiveGroups,
    Unhealthy,
    VeryUnhealthy,
    Hazardous,
}

impl AqiCategory {
    pub fn from_aqi(aqi: u32) -> Self {
        match aqi {
            0..=50 => AqiCategory::Good,
            51..=100 => AqiCategory::Moderate,
            101..=150 => AqiCategory::UnhealthyForSensitiveGroups,
            151..=200 => AqiCategory::Unhealthy,
            201..=300 => AqiCategory::VeryUnhealthy,
            _ => AqiCategory::Hazardous,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            AqiCategory::Good => "Good",
            AqiCategory::Moderate => "Moderate",
            AqiCategory::UnhealthyForSensitiveGroups => "Unhealthy for Sensitive Groups",
            AqiCategory::Unhealthy => "Unhealthy",
            AqiCategory::VeryUnhealthy => "Very Unhealthy",
            AqiCategory::Hazardous => "Hazardous",
        }
    }

    /// EPA reporting color.
    pub fn color(&self) -> &'static str {
        match self {
            AqiCategory::Good => "#00E400",
            AqiCategory::Moderate => "#FFFF00",
            AqiCategory::UnhealthyForSensitiveGroups => "#FF7E00",
            AqiCategory::Unhealthy => "#FF0000",
            AqiCategory::VeryUnhealthy => "#8F3F97",
            AqiCategory::Hazardous => "#7E0023",
        }
    }

    /// Text color readable on top of [`AqiCategory::color`].
    pub fn text_color(&self) -> &'static str {
        match self {
            AqiCategory::Good | AqiCategory::Moderate => "#000000",
            _ => "#FFFFFF",
        }
    }

    /// Inclusive AQI range of the category.
    pub fn range(&self) -> (u32, u32) {
        match self {
            AqiCategory::Good => (0, 50),
            AqiCategory::Moderate => (51, 100),
            AqiCategory::UnhealthyForSensitiveGroups => (101, 150),
            AqiCategory::Unhealthy => (151, 200),
            AqiCategory::VeryUnhealthy => (201, 300),
            AqiCategory::Hazardous => (301, 500),
        }
    }
}

impl fmt::Display for AqiCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Air quality estimate for one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirQualityReport {
    pub aqi: u32,
    pub category: AqiCategory,
    pub pm25: f64,
    pub pm10: f64,
    pub ozone: f64,
    pub aod: f64,
    pub timestamp: DateTime<Utc>,
    pub source: String,
    pub location: Location,
}

impl AirQualityReport {
    /// Build a report from a single AOD reading.
    ///
    /// # Errors
    /// `ClimateError::Validation` when `aod` is not a positive number.
    pub fn from_aod(aod: f64, location: Location, timestamp: DateTime<Utc>) -> ClimateResult<Self> {
        let invalid = || ClimateError::Validation(format!("Invalid AOD value: {}", aod));
        let pm25 = aod_to_pm25(aod).ok_or_else(invalid)?;
        let pm10 = aod_to_pm10(aod).ok_or_else(invalid)?;
        let ozone = estimate_ozone(aod).ok_or_else(invalid)?;
        let aqi = calculate_aqi(pm25).unwrap_or(0);

        Ok(Self {
            aqi,
            category: AqiCategory::from_aqi(aqi),
            pm25,
            pm10,
            ozone,
            aod,
            timestamp,
            source: GIOVANNI_SOURCE.to_string(),
            location,
        })
    }
}

/// Fetch the latest AOD near `location` and turn it into a report.
pub async fn fetch_air_quality(
    source: &dyn AodSource,
    location: Location,
    today: NaiveDate,
    timestamp: DateTime<Utc>,
) -> ClimateResult<AirQualityReport> {
    let aod = source
        .fetch_latest_aod(location.latitude, location.longitude, today)
        .await?;
    let report = AirQualityReport::from_aod(aod, location, timestamp)?;
    info!(
        "Air quality at {}: AQI {} ({})",
        report.location.label(),
        report.aqi,
        report.category
    );
    Ok(report)
}
