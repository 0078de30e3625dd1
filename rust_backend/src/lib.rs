//! ClimateScope backend.
//!
//! Historical climate odds for a place and a calendar day: the crate fetches
//! the same day over the previous years from NASA POWER, then computes how
//! often each weather variable exceeded a user threshold, the most likely
//! value, and a histogram of what happened.
//!
//! # Layout
//!
//! - [`models`]: value types (variables, units, thresholds, series, results)
//! - [`time`]: historical date generation
//! - [`units`]: base ↔ display unit conversion
//! - [`algorithms`]: probability engine, histograms, per-variable analysis
//! - [`gateway`]: data sources (NASA POWER, Giovanni, in-memory)
//! - [`services`]: dashboard orchestration, activities, air quality
//! - [`config`]: `climatescope.toml` loading
//! - [`error`]: crate error type
//!
//! # Example
//!
//! ```
//! # #[cfg(feature = "local-gateway")]
//! # fn main() {
//! use chrono::NaiveDate;
//! use climatescope::gateway::LocalGateway;
//! use climatescope::models::{DateKey, Location, VariableKind};
//! use climatescope::services::{run_dashboard_query, DashboardRequest};
//!
//! let gateway = LocalGateway::new();
//! for (year, value) in [(2021, 28.0), (2022, 32.0), (2023, 35.0)] {
//!     gateway.insert(VariableKind::Temperature, DateKey::new(year, 7, 15), value);
//! }
//!
//! let date = NaiveDate::from_ymd_opt(2024, 7, 15).unwrap();
//! let request = DashboardRequest::new(Location::new(-1.29, 36.82), date, vec![VariableKind::Temperature])
//!     .with_years_back(3);
//!
//! let runtime = tokio::runtime::Runtime::new().unwrap();
//! let report = runtime.block_on(run_dashboard_query(&gateway, &request)).unwrap();
//! assert!(report.summary.starts_with("Chance of temperature above 30°C"));
//! # }
//! # #[cfg(not(feature = "local-gateway"))]
//! # fn main() {}
//! ```

pub mod algorithms;
pub mod config;
pub mod error;
pub mod gateway;
pub mod models;
pub mod services;
pub mod time;
pub mod units;

pub use config::ClimateConfig;
pub use error::{ClimateError, ClimateResult};
