//! NASA POWER daily point API client.

use async_trait::async_trait;
use log::{debug, info, warn};
use serde::Deserialize;
use std::collections::{HashMap, HashSet};
use std::time::Duration;

use super::{FetchRequest, SeriesMap, WeatherDataGateway};
use crate::config::{ClimateConfig, PowerSettings};
use crate::error::{ClimateError, ClimateResult};
use crate::models::{DateKey, VariableKind, VariableSeries};
use crate::time::date_range;

/// Value POWER reports for dates without data.
pub const FILL_VALUE: f64 = -999.0;

#[derive(Debug, Deserialize)]
struct PowerResponse {
    properties: PowerProperties,
}

#[derive(Debug, Deserialize)]
struct PowerProperties {
    #[serde(default)]
    parameter: HashMap<String, HashMap<String, Option<f64>>>,
}

/// Gateway backed by the POWER daily point endpoint.
#[derive(Debug, Clone)]
pub struct PowerGateway {
    client: reqwest::Client,
    settings: PowerSettings,
}

impl PowerGateway {
    /// Build a gateway with its own HTTP client.
    ///
    /// # Errors
    /// Returns `ClimateError::Configuration` if the HTTP client cannot be built.
    pub fn new(settings: PowerSettings) -> ClimateResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| {
                ClimateError::Configuration(format!("Failed to build HTTP client: {}", e))
            })?;
        Ok(Self { client, settings })
    }

    pub fn from_config(config: &ClimateConfig) -> ClimateResult<Self> {
        Self::new(config.power.clone())
    }

    pub fn settings(&self) -> &PowerSettings {
        &self.settings
    }

    /// Request URL for `request`, or `None` when there is nothing to ask for.
    ///
    /// The range endpoints are moved back to a real calendar day, so a
    /// February 29 query still spans every year it covers.
    pub fn build_url(&self, request: &FetchRequest, dates: &[DateKey]) -> Option<String> {
        let (start, end) = date_range(dates)?;
        let (start, end) = (calendar_day(start), calendar_day(end));
        let parameters = parameter_list(&request.variables);
        if parameters.is_empty() {
            return None;
        }

        Some(format!(
            "{}?parameters={}&community={}&longitude={}&latitude={}&start={}&end={}&format=JSON",
            self.settings.base_url,
            parameters.join(","),
            self.settings.community,
            request.longitude,
            request.latitude,
            start,
            end
        ))
    }

    /// Like [`WeatherDataGateway::fetch`], but reports why a fetch failed.
    pub async fn try_fetch(&self, request: &FetchRequest) -> ClimateResult<SeriesMap> {
        let dates = request.date_keys();
        let url = match self.build_url(request, &dates) {
            Some(url) => url,
            None => {
                debug!("Nothing to fetch from POWER");
                return Ok(SeriesMap::new());
            }
        };

        info!(
            "Fetching {} variable(s) from POWER for ({}, {}), {} years",
            request.variables.len(),
            request.latitude,
            request.longitude,
            dates.len()
        );
        debug!("POWER request: {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| ClimateError::Transport(format!("POWER request failed: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ClimateError::Transport(format!("Failed to read POWER response: {}", e)))?;

        if !status.is_success() {
            return Err(ClimateError::Status {
                status: status.as_u16(),
                body: body.trim().to_string(),
            });
        }

        parse_power_response(&body, &request.variables, &dates)
    }
}

#[async_trait]
impl WeatherDataGateway for PowerGateway {
    async fn fetch(&self, request: &FetchRequest) -> SeriesMap {
        match self.try_fetch(request).await {
            Ok(series) => series,
            Err(e) => {
                warn!("POWER fetch failed, returning no data: {}", e);
                SeriesMap::new()
            }
        }
    }

    fn name(&self) -> &'static str {
        "nasa-power"
    }
}

/// Distinct POWER parameter codes for `variables`, in request order.
pub fn parameter_list(variables: &[VariableKind]) -> Vec<&'static str> {
    let mut seen = HashSet::new();
    variables
        .iter()
        .flat_map(|v| v.power_parameters().iter().copied())
        .filter(|code| seen.insert(*code))
        .collect()
}

/// Turn a POWER JSON body into series aligned with `dates`.
///
/// Fill values and null entries become `None`, as do date keys that are not
/// real calendar days. For variables with several candidate codes the first
/// code present in the body is used.
///
/// # Errors
/// `ClimateError::Decode` with the JSON path of the offending field.
pub fn parse_power_response(
    body: &str,
    variables: &[VariableKind],
    dates: &[DateKey],
) -> ClimateResult<SeriesMap> {
    let de = &mut serde_json::Deserializer::from_str(body);
    let response: PowerResponse = serde_path_to_error::deserialize(de).map_err(|e| {
        ClimateError::Decode(format!(
            "Invalid POWER response at '{}': {}",
            e.path(),
            e.inner()
        ))
    })?;
    let parameters = response.properties.parameter;

    let mut result = SeriesMap::new();
    for variable in variables {
        let candidates = variable.power_parameters();
        let chosen = candidates
            .iter()
            .find(|code| parameters.contains_key(**code))
            .or_else(|| candidates.first());

        let by_date = chosen.and_then(|code| parameters.get(*code));
        if by_date.is_none() {
            debug!("POWER response has no data for {}", variable);
        }

        let series = VariableSeries::from_lookup(*variable, dates, |key| {
            if !key.is_valid_date() {
                return None;
            }
            by_date
                .and_then(|values| values.get(&key.to_string()).copied().flatten())
                .filter(|v| !is_fill_value(*v))
        });
        result.insert(*variable, series);
    }

    Ok(result)
}

/// Latest real day at or before `key` within its month.
fn calendar_day(key: DateKey) -> DateKey {
    (1..=key.day())
        .rev()
        .map(|day| DateKey::new(key.year(), key.month(), day))
        .find(DateKey::is_valid_date)
        .unwrap_or(key)
}

fn is_fill_value(value: f64) -> bool {
    value.is_nan() || (value - FILL_VALUE).abs() < 1e-6
}
