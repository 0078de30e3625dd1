//! NASA Giovanni client for MERRA-2 aerosol optical depth.

use async_trait::async_trait;
use chrono::{Duration as DateDuration, NaiveDate};
use log::{debug, info};
use serde::Deserialize;
use std::time::Duration;

use super::AodSource;
use crate::config::{ClimateConfig, GiovanniSettings};
use crate::error::{ClimateError, ClimateResult};

/// Days of data requested before `today`.
pub const LOOKBACK_DAYS: i64 = 7;

const AOD_DATASET: &str = "MERRA2_AOD_M";

#[derive(Debug, Deserialize)]
struct GiovanniResponse {
    #[serde(default)]
    data: Vec<GiovanniRecord>,
}

#[derive(Debug, Deserialize)]
struct GiovanniRecord {
    #[serde(rename = "AOD", default)]
    aod: Option<f64>,
}

/// Client for the Giovanni time-averaged map service.
#[derive(Debug, Clone)]
pub struct GiovanniGateway {
    client: reqwest::Client,
    settings: GiovanniSettings,
}

impl GiovanniGateway {
    pub fn new(settings: GiovanniSettings, user_agent: &str) -> ClimateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(user_agent.to_string())
            .build()
            .map_err(|e| {
                ClimateError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, settings })
    }

    pub fn from_config(config: &ClimateConfig) -> ClimateResult<Self> {
        Self::new(config.giovanni.clone(), &config.power.user_agent)
    }

    /// Request URL covering the last week around the point.
    pub fn build_url(&self, latitude: f64, longitude: f64, today: NaiveDate) -> String {
        let start = today - DateDuration::days(LOOKBACK_DAYS);
        let half = self.settings.bbox_half_width_deg;
        let bbox = format!(
            "{},{},{},{}",
            longitude - half,
            latitude - half,
            longitude + half,
            latitude + half
        );

        format!(
            "{}?service=TmAvMp&starttime={}&endtime={}&bbox={}&data={}&format=json",
            self.settings.base_url,
            start.format("%Y-%m-%d"),
            today.format("%Y-%m-%d"),
            bbox,
            AOD_DATASET
        )
    }
}

#[async_trait]
impl AodSource for GiovanniGateway {
    async fn fetch_latest_aod(
        &self,
        latitude: f64,
        longitude: f64,
        today: NaiveDate,
    ) -> ClimateResult<f64> {
        let url = self.build_url(latitude, longitude, today);
        info!("Fetching AOD from Giovanni for ({}, {})", latitude, longitude);
        debug!("Giovanni request: {}", url);

        let response = self.client.get(&url).send().await.map_err(|e| {
            ClimateError::Transport(format!(
                "Unable to connect to air quality data service: {}",
                e
            ))
        })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| {
            ClimateError::Transport(format!("Failed to read Giovanni response: {}", e))
        })?;

        if !status.is_success() {
            return Err(ClimateError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        parse_latest_aod(&body)
    }
}

/// AOD of the most recent record in a Giovanni JSON body.
///
/// # Errors
/// `ClimateError::Decode` when the body is malformed, has no records, or the
/// latest record carries no positive AOD.
pub fn parse_latest_aod(body: &str) -> ClimateResult<f64> {
    let de = &mut serde_json::Deserializer::from_str(body);
    let response: GiovanniResponse = serde_path_to_error::deserialize(de).map_err(|e| {
        ClimateError::Decode(format!(
            "Invalid Giovanni response at '{}': {}",
            e.path(),
            e.inner()
        ))
    })?;

    let latest = response.data.last().ok_or_else(|| {
        ClimateError::Decode("No air quality data available for this location".to_string())
    })?;

    match latest.aod {
        Some(aod) if aod.is_finite() && aod > 0.0 => Ok(aod),
        _ => Err(ClimateError::Decode(
            "Invalid air quality data received".to_string(),
        )),
    }
}
