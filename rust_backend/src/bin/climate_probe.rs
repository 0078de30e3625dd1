//! Command line probe for the dashboard pipeline.
//!
//! ```text
//! climate-probe <lat> <lon> <YYYY-MM-DD> [variable ...]
//! climate-probe air-quality <lat> <lon>
//! ```
//!
//! Prints the report as pretty JSON. `CLIMATESCOPE_CONFIG` may point to a
//! configuration file; otherwise `climatescope.toml` is searched for in the
//! usual places.

use anyhow::{bail, Context, Result};
use chrono::{NaiveDate, Utc};
use log::info;

use climatescope::gateway::{GiovanniGateway, PowerGateway};
use climatescope::models::{Location, VariableKind};
use climatescope::services::{fetch_air_quality, run_dashboard_query, DashboardRequest};
use climatescope::ClimateConfig;

const USAGE: &str = "usage: climate-probe <lat> <lon> <YYYY-MM-DD> [variable ...]\n       climate-probe air-quality <lat> <lon>";

fn load_config() -> Result<ClimateConfig> {
    match std::env::var("CLIMATESCOPE_CONFIG") {
        Ok(path) => ClimateConfig::from_file(&path)
            .with_context(|| format!("Failed to load configuration from {}", path)),
        Err(_) => ClimateConfig::load_or_default().context("Failed to load configuration"),
    }
}

fn parse_coordinate(raw: Option<&String>, name: &str) -> Result<f64> {
    let raw = raw.with_context(|| format!("missing {}\n{}", name, USAGE))?;
    raw.parse::<f64>()
        .with_context(|| format!("Invalid {}: {}", name, raw))
}

async fn run_dashboard(config: &ClimateConfig, args: &[String]) -> Result<()> {
    let latitude = parse_coordinate(args.first(), "latitude")?;
    let longitude = parse_coordinate(args.get(1), "longitude")?;
    let raw_date = args
        .get(2)
        .with_context(|| format!("missing date\n{}", USAGE))?;
    let date = NaiveDate::parse_from_str(raw_date, "%Y-%m-%d")
        .with_context(|| format!("Invalid date: {}", raw_date))?;

    let variables = if args.len() > 3 {
        args[3..]
            .iter()
            .map(|v| v.parse::<VariableKind>().map_err(anyhow::Error::msg))
            .collect::<Result<Vec<_>>>()?
    } else {
        VariableKind::ALL.to_vec()
    };

    let gateway = PowerGateway::from_config(config)?;
    let request = DashboardRequest::new(Location::new(latitude, longitude), date, variables)
        .with_analysis(&config.analysis);

    let report = run_dashboard_query(&gateway, &request).await?;
    if !report.has_data() {
        info!("No data returned for any variable");
    }
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

async fn run_air_quality(config: &ClimateConfig, args: &[String]) -> Result<()> {
    let latitude = parse_coordinate(args.first(), "latitude")?;
    let longitude = parse_coordinate(args.get(1), "longitude")?;

    let gateway = GiovanniGateway::from_config(config)?;
    let now = Utc::now();
    let report = fetch_air_quality(
        &gateway,
        Location::new(latitude, longitude),
        now.date_naive(),
        now,
    )
    .await?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() || args[0] == "-h" || args[0] == "--help" {
        bail!(USAGE);
    }

    let config = load_config()?;

    if args[0] == "air-quality" {
        run_air_quality(&config, &args[1..]).await
    } else {
        run_dashboard(&config, &args).await
    }
}
