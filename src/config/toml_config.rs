use crate::config::{DEFAULT_GEOCODER_ENDPOINT, DEFAULT_OUTPUT_DIR, DEFAULT_PRICE_ENDPOINT};
use crate::core::map::MapSettings;
use crate::domain::ports::ServiceConfig;
use crate::utils::error::{ReportError, Result};
use crate::utils::validation::Validate;
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

/// File-based configuration. Every section and every field is optional;
/// omitted values fall back to the public GSI/MLIT endpoints and the
/// standard map layout.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub services: ServicesConfig,
    pub map: MapSettings,
    pub output: OutputConfig,
    pub monitoring: Option<MonitoringConfig>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    pub geocoder_endpoint: String,
    pub price_endpoint: String,
    pub timeout_seconds: u64,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            geocoder_endpoint: DEFAULT_GEOCODER_ENDPOINT.to_string(),
            price_endpoint: DEFAULT_PRICE_ENDPOINT.to_string(),
            timeout_seconds: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub dir: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            dir: DEFAULT_OUTPUT_DIR.to_string(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitoringConfig {
    pub enabled: bool,
    pub system_stats: Option<bool>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(ReportError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ReportError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the environment value; unknown variables
    /// are left as-is so validation can point at them.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        crate::utils::validation::validate_url(
            "services.geocoder_endpoint",
            &self.services.geocoder_endpoint,
        )?;
        crate::utils::validation::validate_url(
            "services.price_endpoint",
            &self.services.price_endpoint,
        )?;
        crate::utils::validation::validate_range(
            "services.timeout_seconds",
            self.services.timeout_seconds,
            1,
            300,
        )?;

        crate::utils::validation::validate_path("output.dir", &self.output.dir)?;

        crate::utils::validation::validate_non_empty_string(
            "map.element_id",
            &self.map.element_id,
        )?;
        crate::utils::validation::validate_url("map.base_tiles", &self.map.base_tiles)?;
        crate::utils::validation::validate_url("map.hazard_tiles", &self.map.hazard_tiles)?;
        crate::utils::validation::validate_range("map.zoom", self.map.zoom, 1, 19)?;
        crate::utils::validation::validate_range(
            "map.hazard_opacity",
            self.map.hazard_opacity,
            0.0,
            1.0,
        )?;
        crate::utils::validation::validate_positive_number(
            "map.width_px",
            self.map.width_px as usize,
            1,
        )?;
        crate::utils::validation::validate_positive_number(
            "map.height_px",
            self.map.height_px as usize,
            1,
        )?;

        Ok(())
    }

    pub fn output_dir(&self) -> &str {
        &self.output.dir
    }

    pub fn monitoring_enabled(&self) -> bool {
        self.monitoring.as_ref().map(|m| m.enabled).unwrap_or(false)
    }
}

impl ServiceConfig for TomlConfig {
    fn geocoder_endpoint(&self) -> &str {
        &self.services.geocoder_endpoint
    }

    fn price_endpoint(&self) -> &str {
        &self.services.price_endpoint
    }

    fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.services.timeout_seconds)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
