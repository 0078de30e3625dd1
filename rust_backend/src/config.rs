//! Configuration file support.
//!
//! Settings are read from a `climatescope.toml` file. Every section and field
//! is optional and falls back to the public NASA endpoints.

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::error::{ClimateError, ClimateResult};

/// File name searched by [`ClimateConfig::from_default_location`].
pub const CONFIG_FILE_NAME: &str = "climatescope.toml";

/// Upper bound on how many past years a query may span.
pub const MAX_YEARS_BACK: u32 = 200;

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClimateConfig {
    #[serde(default)]
    pub power: PowerSettings,
    #[serde(default)]
    pub giovanni: GiovanniSettings,
    #[serde(default)]
    pub analysis: AnalysisSettings,
}

/// NASA POWER daily point API settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerSettings {
    #[serde(default = "default_power_url")]
    pub base_url: String,
    #[serde(default = "default_community")]
    pub community: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

/// NASA Giovanni aerosol service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GiovanniSettings {
    #[serde(default = "default_giovanni_url")]
    pub base_url: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
    /// Half width of the bounding box around the point, in degrees.
    #[serde(default = "default_bbox_half_width")]
    pub bbox_half_width_deg: f64,
}

/// Defaults for dashboard queries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisSettings {
    #[serde(default = "default_years_back")]
    pub years_back: u32,
    #[serde(default = "default_histogram_buckets")]
    pub histogram_buckets: usize,
}

fn default_power_url() -> String {
    "https://power.larc.nasa.gov/api/temporal/daily/point".to_string()
}

fn default_giovanni_url() -> String {
    "https://giovanni.gsfc.nasa.gov/giovanni/daac-bin/service_manager/data".to_string()
}

fn default_community() -> String {
    "AG".to_string()
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_user_agent() -> String {
    "ClimateScope/1.0".to_string()
}

fn default_bbox_half_width() -> f64 {
    0.1
}

fn default_years_back() -> u32 {
    20
}

fn default_histogram_buckets() -> usize {
    10
}

impl Default for PowerSettings {
    fn default() -> Self {
        Self {
            base_url: default_power_url(),
            community: default_community(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl Default for GiovanniSettings {
    fn default() -> Self {
        Self {
            base_url: default_giovanni_url(),
            timeout_secs: default_timeout_secs(),
            bbox_half_width_deg: default_bbox_half_width(),
        }
    }
}

impl Default for AnalysisSettings {
    fn default() -> Self {
        Self {
            years_back: default_years_back(),
            histogram_buckets: default_histogram_buckets(),
        }
    }
}

impl FromStr for ClimateConfig {
    type Err = ClimateError;

    fn from_str(content: &str) -> Result<Self, Self::Err> {
        let config: ClimateConfig = toml::from_str(content).map_err(|e| {
            ClimateError::Configuration(format!("Failed to parse config file: {}", e))
        })?;
        config.validate()?;
        Ok(config)
    }
}

impl ClimateConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(ClimateConfig)` if the file was read, parsed and validated
    /// * `Err(ClimateError::Configuration)` otherwise
    pub fn from_file<P: AsRef<Path>>(path: P) -> ClimateResult<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            ClimateError::Configuration(format!(
                "Failed to read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        debug!("Loaded configuration from {}", path.display());
        content.parse()
    }

    /// Locate the first `climatescope.toml` in:
    /// 1. Current directory
    /// 2. `rust_backend/` directory
    /// 3. Parent directory
    pub fn find_default_file() -> Option<PathBuf> {
        let search_paths = [
            PathBuf::from(CONFIG_FILE_NAME),
            PathBuf::from("rust_backend").join(CONFIG_FILE_NAME),
            PathBuf::from("..").join(CONFIG_FILE_NAME),
        ];
        search_paths.into_iter().find(|path| path.exists())
    }

    /// Load configuration from the file found by
    /// [`ClimateConfig::find_default_file`].
    pub fn from_default_location() -> ClimateResult<Self> {
        match Self::find_default_file() {
            Some(path) => {
                info!("Using configuration file {}", path.display());
                Self::from_file(&path)
            }
            None => Err(ClimateError::Configuration(format!(
                "No {} found in standard locations",
                CONFIG_FILE_NAME
            ))),
        }
    }

    /// Like [`ClimateConfig::from_default_location`], but falls back to the
    /// defaults when no file exists. A file that exists but is invalid is
    /// still an error.
    pub fn load_or_default() -> ClimateResult<Self> {
        if Self::find_default_file().is_none() {
            debug!("No {} found, using defaults", CONFIG_FILE_NAME);
            return Ok(Self::default());
        }
        Self::from_default_location()
    }

    /// Check that the settings are usable.
    pub fn validate(&self) -> ClimateResult<()> {
        if self.power.base_url.trim().is_empty() {
            return Err(ClimateError::Configuration(
                "'power.base_url' must not be empty".to_string(),
            ));
        }
        if self.giovanni.base_url.trim().is_empty() {
            return Err(ClimateError::Configuration(
                "'giovanni.base_url' must not be empty".to_string(),
            ));
        }
        if self.power.timeout_secs == 0 || self.giovanni.timeout_secs == 0 {
            return Err(ClimateError::Configuration(
                "timeout_secs must be at least 1".to_string(),
            ));
        }
        let half_width = self.giovanni.bbox_half_width_deg;
        if !(half_width.is_finite() && half_width > 0.0) {
            return Err(ClimateError::Configuration(
                "'giovanni.bbox_half_width_deg' must be a positive number".to_string(),
            ));
        }
        if self.analysis.years_back == 0 {
            return Err(ClimateError::Configuration(
                "'analysis.years_back' must be at least 1".to_string(),
            ));
        }
        if self.analysis.years_back > MAX_YEARS_BACK {
            return Err(ClimateError::Configuration(format!(
                "'analysis.years_back' must be at most {}",
                MAX_YEARS_BACK
            )));
        }
        if self.analysis.histogram_buckets == 0 {
            return Err(ClimateError::Configuration(
                "'analysis.histogram_buckets' must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = ClimateConfig::default();
        assert_eq!(config.power.community, "AG");
        assert_eq!(config.analysis.years_back, 20);
        assert_eq!(config.analysis.histogram_buckets, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_file_uses_defaults() {
        let config: ClimateConfig = "".parse().unwrap();
        assert_eq!(config, ClimateConfig::default());
    }

    #[test]
    fn test_partial_sections() {
        let toml_str = r#"
            [power]
            timeout_secs = 5

            [analysis]
            years_back = 10
        "#;

        let config: ClimateConfig = toml_str.parse().unwrap();
        assert_eq!(config.power.timeout_secs, 5);
        assert_eq!(config.power.base_url, default_power_url());
        assert_eq!(config.analysis.years_back, 10);
        assert_eq!(config.analysis.histogram_buckets, 10);
        assert_eq!(config.giovanni.bbox_half_width_deg, 0.1);
    }

    #[test]
    fn test_validation_errors() {
        let err = "[analysis]\nyears_back = 0".parse::<ClimateConfig>().unwrap_err();
        assert!(matches!(err, ClimateError::Configuration(ref m) if m.contains("years_back")));

        let err = "[analysis]\nyears_back = 3000000000".parse::<ClimateConfig>().unwrap_err();
        assert!(matches!(err, ClimateError::Configuration(ref m) if m.contains("at most 200")));

        let err = "[power]\nbase_url = \"  \"".parse::<ClimateConfig>().unwrap_err();
        assert!(matches!(err, ClimateError::Configuration(_)));

        let err = "[giovanni]\ntimeout_secs = 0".parse::<ClimateConfig>().unwrap_err();
        assert!(matches!(err, ClimateError::Configuration(_)));
    }

    #[test]
    fn test_parse_error() {
        let err = "[power\nbase_url = 1".parse::<ClimateConfig>().unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[analysis]\nhistogram_buckets = 12").unwrap();

        let config = ClimateConfig::from_file(file.path()).unwrap();
        assert_eq!(config.analysis.histogram_buckets, 12);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = ClimateConfig::from_file(dir.path().join("absent.toml")).unwrap_err();
        assert!(matches!(err, ClimateError::Configuration(_)));
    }
}
