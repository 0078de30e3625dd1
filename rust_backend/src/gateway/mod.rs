//! Data sources for historical weather and aerosol observations.
//!
//! The [`WeatherDataGateway`] trait is the only place the dashboard touches
//! the network. Implementations never fail into the caller: when the remote
//! service cannot be reached the returned map is simply empty.
//!
//! - [`power`]: NASA POWER daily point API (feature `power-api`)
//! - [`giovanni`]: NASA Giovanni aerosol optical depth (feature `power-api`)
//! - [`local`]: in-memory gateway for tests and offline use (feature `local-gateway`)

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::ClimateResult;
use crate::models::{DateKey, VariableKind, VariableSeries};
use crate::time::generate_historical_dates;

#[cfg(feature = "power-api")]
pub mod giovanni;
#[cfg(feature = "local-gateway")]
pub mod local;
#[cfg(feature = "power-api")]
pub mod power;

#[cfg(feature = "power-api")]
pub use giovanni::GiovanniGateway;
#[cfg(feature = "local-gateway")]
pub use local::LocalGateway;
#[cfg(feature = "power-api")]
pub use power::PowerGateway;

/// Series keyed by variable. Every series is aligned with the request's
/// historical dates.
pub type SeriesMap = HashMap<VariableKind, VariableSeries>;

/// What to fetch: one location, one calendar day over `years_back` years.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FetchRequest {
    pub latitude: f64,
    pub longitude: f64,
    pub selected_date: NaiveDate,
    pub variables: Vec<VariableKind>,
    pub years_back: u32,
}

impl FetchRequest {
    pub fn new(
        latitude: f64,
        longitude: f64,
        selected_date: NaiveDate,
        variables: Vec<VariableKind>,
        years_back: u32,
    ) -> Self {
        Self {
            latitude,
            longitude,
            selected_date,
            variables,
            years_back,
        }
    }

    /// Historical date keys the returned series are aligned with.
    pub fn date_keys(&self) -> Vec<DateKey> {
        generate_historical_dates(self.selected_date, self.years_back)
    }
}

/// Source of historical daily weather series.
#[async_trait]
pub trait WeatherDataGateway: Send + Sync {
    /// Fetch one series per requested variable.
    ///
    /// A variable the source has no data for may be missing from the map.
    /// Transport failures yield an empty map.
    async fn fetch(&self, request: &FetchRequest) -> SeriesMap;

    /// Short name used in log messages.
    fn name(&self) -> &'static str;
}

/// Source of the most recent aerosol optical depth near a point.
#[async_trait]
pub trait AodSource: Send + Sync {
    /// Latest AOD reading around (`latitude`, `longitude`) in the week
    /// before `today`.
    async fn fetch_latest_aod(
        &self,
        latitude: f64,
        longitude: f64,
        today: NaiveDate,
    ) -> ClimateResult<f64>;
}
