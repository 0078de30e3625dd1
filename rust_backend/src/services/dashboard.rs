//! Dashboard query orchestration.
//!
//! A query runs in four steps: validate the request, generate the historical
//! dates, await the gateway, then analyse every selected variable. Only the
//! gateway call is asynchronous; the analysis is pure.

use chrono::NaiveDate;
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use super::activities::{suggest_activities, ActivitySuggestions};
use crate::algorithms::{analyze_series, VariableReport};
use crate::config::{AnalysisSettings, MAX_YEARS_BACK};
use crate::error::{ClimateError, ClimateResult};
use crate::gateway::{FetchRequest, WeatherDataGateway};
use crate::models::{DateKey, Location, Threshold, Unit, VariableKind, VariableSeries};

pub const DEFAULT_YEARS_BACK: u32 = 20;
pub const DEFAULT_HISTOGRAM_BUCKETS: usize = 10;

/// Everything the user selected on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardRequest {
    pub location: Location,
    pub date: NaiveDate,
    pub variables: Vec<VariableKind>,
    /// Per-variable thresholds; missing entries use [`Threshold::default_for`].
    #[serde(default)]
    pub thresholds: HashMap<VariableKind, Threshold>,
    /// Per-variable display units; missing or unsupported entries use the
    /// variable's default display unit.
    #[serde(default)]
    pub display_units: HashMap<VariableKind, Unit>,
    #[serde(default = "default_years_back")]
    pub years_back: u32,
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,
}

fn default_years_back() -> u32 {
    DEFAULT_YEARS_BACK
}

fn default_histogram_buckets() -> usize {
    DEFAULT_HISTOGRAM_BUCKETS
}

impl DashboardRequest {
    pub fn new(location: Location, date: NaiveDate, variables: Vec<VariableKind>) -> Self {
        Self {
            location,
            date,
            variables,
            thresholds: HashMap::new(),
            display_units: HashMap::new(),
            years_back: DEFAULT_YEARS_BACK,
            histogram_buckets: DEFAULT_HISTOGRAM_BUCKETS,
        }
    }

    pub fn with_threshold(mut self, variable: VariableKind, threshold: Threshold) -> Self {
        self.thresholds.insert(variable, threshold);
        self
    }

    pub fn with_display_unit(mut self, variable: VariableKind, unit: Unit) -> Self {
        self.display_units.insert(variable, unit);
        self
    }

    pub fn with_years_back(mut self, years_back: u32) -> Self {
        self.years_back = years_back;
        self
    }

    /// Take year span and bucket count from the configuration.
    pub fn with_analysis(mut self, settings: &AnalysisSettings) -> Self {
        self.years_back = settings.years_back;
        self.histogram_buckets = settings.histogram_buckets;
        self
    }

    pub fn threshold_for(&self, variable: VariableKind) -> Threshold {
        self.thresholds
            .get(&variable)
            .copied()
            .unwrap_or_else(|| Threshold::default_for(variable))
    }

    pub fn display_unit_for(&self, variable: VariableKind) -> Unit {
        match self.display_units.get(&variable) {
            Some(unit) if variable.supports(*unit) => *unit,
            _ => variable.default_display_unit(),
        }
    }

    /// Selected variables without duplicates, in selection order.
    pub fn selected_variables(&self) -> Vec<VariableKind> {
        let mut selected = Vec::with_capacity(self.variables.len());
        for variable in &self.variables {
            if !selected.contains(variable) {
                selected.push(*variable);
            }
        }
        selected
    }

    pub fn validate(&self) -> ClimateResult<()> {
        if self.variables.is_empty() {
            return Err(ClimateError::Validation(
                "Select at least one variable".to_string(),
            ));
        }
        if self.years_back == 0 {
            return Err(ClimateError::Validation(
                "years_back must be at least 1".to_string(),
            ));
        }
        if self.years_back > MAX_YEARS_BACK {
            return Err(ClimateError::Validation(format!(
                "years_back must be at most {}",
                MAX_YEARS_BACK
            )));
        }
        if !self.location.is_valid() {
            return Err(ClimateError::Validation(format!(
                "Invalid coordinates: ({}, {})",
                self.location.latitude, self.location.longitude
            )));
        }
        Ok(())
    }

    fn fetch_request(&self) -> FetchRequest {
        FetchRequest::new(
            self.location.latitude,
            self.location.longitude,
            self.date,
            self.selected_variables(),
            self.years_back,
        )
    }
}

/// Result of a dashboard query.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardReport {
    pub location: Location,
    pub date: NaiveDate,
    pub date_keys: Vec<DateKey>,
    pub variables: Vec<VariableReport>,
    pub summary: String,
    pub activities: ActivitySuggestions,
    /// Gateway that served the data.
    pub source: String,
}

impl DashboardReport {
    pub fn report_for(&self, variable: VariableKind) -> Option<&VariableReport> {
        self.variables.iter().find(|r| r.result.variable == variable)
    }

    /// Base-unit averages of the variables that had data.
    pub fn most_likely(&self) -> HashMap<VariableKind, f64> {
        most_likely(&self.variables)
    }

    /// Whether any variable had at least one usable sample.
    pub fn has_data(&self) -> bool {
        self.variables.iter().any(|r| r.has_data())
    }
}

fn most_likely(reports: &[VariableReport]) -> HashMap<VariableKind, f64> {
    reports
        .iter()
        .filter_map(|r| r.result.average.map(|avg| (r.result.variable, avg)))
        .collect()
}

/// One sentence per variable, e.g.
/// `Chance of temperature above 30°C: 40.0%`, joined with `". "`.
pub fn build_summary(reports: &[VariableReport]) -> String {
    reports
        .iter()
        .map(|r| {
            format!(
                "Chance of {} above {}: {:.1}%",
                r.result.variable.display_name().to_lowercase(),
                r.threshold.describe(),
                r.result.probability
            )
        })
        .collect::<Vec<_>>()
        .join(". ")
}

/// Run a full dashboard query against `gateway`.
///
/// # Errors
/// `ClimateError::Validation` for an invalid request. Gateway problems are not
/// errors: affected variables are analysed as having no data.
pub async fn run_dashboard_query(
    gateway: &dyn WeatherDataGateway,
    request: &DashboardRequest,
) -> ClimateResult<DashboardReport> {
    request.validate()?;

    let fetch_request = request.fetch_request();
    let date_keys = fetch_request.date_keys();
    info!(
        "Dashboard query for {} on {}: {} variable(s), {} years via {}",
        request.location.label(),
        request.date,
        fetch_request.variables.len(),
        date_keys.len(),
        gateway.name()
    );

    let mut series_map = gateway.fetch(&fetch_request).await;
    if series_map.is_empty() {
        warn!("Gateway {} returned no series", gateway.name());
    }

    let mut reports = Vec::with_capacity(fetch_request.variables.len());
    for variable in &fetch_request.variables {
        let series = match series_map.remove(variable) {
            Some(series) if series.len() == date_keys.len() => series,
            Some(series) => {
                warn!(
                    "{} series has {} values for {} dates, ignoring it",
                    variable,
                    series.len(),
                    date_keys.len()
                );
                VariableSeries::missing(*variable, date_keys.len())
            }
            None => {
                debug!("No series for {}, analysing as empty", variable);
                VariableSeries::missing(*variable, date_keys.len())
            }
        };

        let report = analyze_series(
            &series,
            &request.threshold_for(*variable),
            request.display_unit_for(*variable),
            request.histogram_buckets,
        );
        debug!(
            "{}: {} samples, probability {:.1}%",
            variable,
            report.result.count,
            report.result.probability
        );
        reports.push(report);
    }

    let summary = build_summary(&reports);
    let activities = suggest_activities(&most_likely(&reports));

    Ok(DashboardReport {
        location: request.location.clone(),
        date: request.date,
        date_keys,
        variables: reports,
        summary,
        activities,
        source: gateway.name().to_string(),
    })
}
