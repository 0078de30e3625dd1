//! In-memory gateway.
//!
//! Stores per-variable values keyed by date, so tests and offline tools can
//! run the full dashboard flow without the network. An availability switch
//! simulates the remote service being down.

use async_trait::async_trait;
use log::warn;
use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use super::{FetchRequest, SeriesMap, WeatherDataGateway};
use crate::models::{DateKey, VariableKind, VariableSeries};

/// In-memory weather gateway.
///
/// Cloning is cheap and clones share the same store.
///
/// # Example
/// ```
/// use climatescope::gateway::{FetchRequest, LocalGateway, WeatherDataGateway};
/// use climatescope::models::{DateKey, VariableKind};
/// use chrono::NaiveDate;
///
/// let gateway = LocalGateway::new();
/// gateway.insert(VariableKind::Temperature, DateKey::new(2023, 7, 1), 24.0);
///
/// let date = NaiveDate::from_ymd_opt(2024, 7, 1).unwrap();
/// let request = FetchRequest::new(0.0, 0.0, date, vec![VariableKind::Temperature], 1);
///
/// let runtime = tokio::runtime::Runtime::new().unwrap();
/// let series = runtime.block_on(gateway.fetch(&request));
/// assert_eq!(series[&VariableKind::Temperature].values, vec![Some(24.0)]);
/// ```
#[derive(Clone, Default)]
pub struct LocalGateway {
    data: Arc<RwLock<LocalData>>,
}

struct LocalData {
    values: HashMap<VariableKind, HashMap<DateKey, f64>>,
    available: bool,
    fetch_count: usize,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            values: HashMap::new(),
            available: true,
            fetch_count: 0,
        }
    }
}

impl LocalGateway {
    pub fn new() -> Self {
        Self::default()
    }

    fn read(&self) -> RwLockReadGuard<'_, LocalData> {
        self.data.read().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, LocalData> {
        self.data.write().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Store one value in the variable's base unit.
    pub fn insert(&self, variable: VariableKind, date: DateKey, value: f64) {
        self.write()
            .values
            .entry(variable)
            .or_default()
            .insert(date, value);
    }

    /// Store several values at once.
    pub fn insert_many<I>(&self, variable: VariableKind, values: I)
    where
        I: IntoIterator<Item = (DateKey, f64)>,
    {
        let mut data = self.write();
        let store = data.values.entry(variable).or_default();
        store.extend(values);
    }

    /// Mark the variable as known to the source without storing any value.
    pub fn register(&self, variable: VariableKind) {
        self.write().values.entry(variable).or_default();
    }

    /// Simulate the remote service going down (`false`) or coming back.
    pub fn set_available(&self, available: bool) {
        self.write().available = available;
    }

    pub fn is_available(&self) -> bool {
        self.read().available
    }

    /// Number of `fetch` calls served so far.
    pub fn fetch_count(&self) -> usize {
        self.read().fetch_count
    }

    /// Number of stored values for `variable`.
    pub fn value_count(&self, variable: VariableKind) -> usize {
        self.read().values.get(&variable).map_or(0, |v| v.len())
    }

    /// Remove all stored values. Availability is kept.
    pub fn clear(&self) {
        let mut data = self.write();
        data.values.clear();
        data.fetch_count = 0;
    }
}

#[async_trait]
impl WeatherDataGateway for LocalGateway {
    async fn fetch(&self, request: &FetchRequest) -> SeriesMap {
        let mut data = self.write();
        data.fetch_count += 1;

        if !data.available {
            warn!("Local gateway unavailable, returning no data");
            return SeriesMap::new();
        }

        let dates = request.date_keys();
        request
            .variables
            .iter()
            .filter_map(|variable| {
                let store = data.values.get(variable)?;
                let series = VariableSeries::from_lookup(*variable, &dates, |key| {
                    if key.is_valid_date() {
                        store.get(key).copied()
                    } else {
                        None
                    }
                });
                Some((*variable, series))
            })
            .collect()
    }

    fn name(&self) -> &'static str {
        "local"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn request(variables: Vec<VariableKind>) -> FetchRequest {
        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        FetchRequest::new(10.0, 20.0, date, variables, 4)
    }

    #[tokio::test]
    async fn test_fetch_aligns_with_dates() {
        let gateway = LocalGateway::new();
        gateway.insert_many(
            VariableKind::Rainfall,
            vec![
                (DateKey::new(2020, 2, 29), 3.0),
                (DateKey::new(2023, 2, 29), 9.0),
            ],
        );

        let map = gateway.fetch(&request(vec![VariableKind::Rainfall])).await;
        let series = &map[&VariableKind::Rainfall];
        // 2020 is a leap year; the 2023 key is not a real date
        assert_eq!(series.values, vec![Some(3.0), None, None, None]);
        assert_eq!(gateway.fetch_count(), 1);
    }

    #[tokio::test]
    async fn test_unknown_variable_absent() {
        let gateway = LocalGateway::new();
        gateway.register(VariableKind::Humidity);

        let map = gateway
            .fetch(&request(vec![VariableKind::Humidity, VariableKind::WindSpeed]))
            .await;
        assert_eq!(map.len(), 1);
        assert_eq!(map[&VariableKind::Humidity].values, vec![None; 4]);
    }

    #[tokio::test]
    async fn test_unavailable_returns_empty() {
        let gateway = LocalGateway::new();
        gateway.insert(VariableKind::Temperature, DateKey::new(2021, 2, 28), 1.0);
        gateway.set_available(false);

        assert!(gateway.fetch(&request(vec![VariableKind::Temperature])).await.is_empty());
        assert!(!gateway.is_available());

        gateway.set_available(true);
        assert_eq!(gateway.fetch(&request(vec![VariableKind::Temperature])).await.len(), 1);
        assert_eq!(gateway.fetch_count(), 2);
    }

    #[test]
    fn test_clones_share_store() {
        let gateway = LocalGateway::new();
        let clone = gateway.clone();
        clone.insert(VariableKind::Snowfall, DateKey::new(2010, 1, 1), 4.0);
        assert_eq!(gateway.value_count(VariableKind::Snowfall), 1);

        gateway.clear();
        assert_eq!(clone.value_count(VariableKind::Snowfall), 0);
    }
}
