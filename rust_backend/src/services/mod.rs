//! Service layer: dashboard orchestration, activity suggestions and air
//! quality estimation.
//!
//! Services sit between the gateways and the pure computation core. They
//! validate requests, await the data sources, and assemble the reports the
//! dashboard renders.

pub mod activities;
pub mod air_quality;
pub mod dashboard;

pub use activities::{suggest_activities, ActivitySuggestions};
pub use air_quality::{
    aod_to_pm10, aod_to_pm25, calculate_aqi, estimate_ozone, fetch_air_quality, AirQualityReport,
    AqiCategory,
};
pub use dashboard::{build_summary, run_dashboard_query, DashboardReport, DashboardRequest};
