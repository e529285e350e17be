use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use url::Url;

/// Public 4-day outlook published by data.gov.sg.
pub const DEFAULT_FORECAST_ENDPOINT: &str =
    "https://api.data.gov.sg/v1/environment/4-day-weather-forecast";

/// Key the roster and events blob is stored under.
pub const DEFAULT_STATE_KEY: &str = "beachCleanupState";

/// Configuration validation errors
#[derive(Debug, Clone)]
pub struct ConfigValidationError {
    pub field: String,
    pub message: String,
}

impl std::fmt::Display for ConfigValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Result of config validation
#[derive(Debug, Clone, Default)]
pub struct ValidationResult {
    pub errors: Vec<ConfigValidationError>,
    pub warnings: Vec<ConfigValidationError>,
}

impl ValidationResult {
    /// Returns true if there are no errors (warnings are OK)
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Application configuration directory
    pub config_dir: PathBuf,

    /// Local state storage
    #[serde(default)]
    pub storage: StorageConfig,

    /// Forecast fetch settings
    #[serde(default)]
    pub forecast: ForecastConfig,

    /// Rendered page output
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// SQLite file (relative to `config_dir`) backing the key-value store
    #[serde(default = "default_database_file")]
    pub database_file: String,

    /// Key holding the serialized crew/events blob
    #[serde(default = "default_state_key")]
    pub state_key: String,

    /// Optional size cap on a single stored value, in bytes.
    /// Writes above it are rejected the way a browser rejects a write over quota.
    #[serde(default)]
    pub quota_bytes: Option<usize>,
}

fn default_database_file() -> String {
    "shoreline.db".to_string()
}

fn default_state_key() -> String {
    DEFAULT_STATE_KEY.to_string()
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            database_file: default_database_file(),
            state_key: default_state_key(),
            quota_bytes: None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ForecastConfig {
    /// Fetch the forecast at startup
    #[serde(default = "default_forecast_enabled")]
    pub enabled: bool,

    /// Forecast endpoint (GET, JSON)
    #[serde(default = "default_forecast_endpoint")]
    pub endpoint: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_forecast_enabled() -> bool {
    true
}

fn default_forecast_endpoint() -> String {
    DEFAULT_FORECAST_ENDPOINT.to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl Default for ForecastConfig {
    fn default() -> Self {
        Self {
            enabled: default_forecast_enabled(),
            endpoint: default_forecast_endpoint(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// HTML file (relative to `config_dir`) the rendered page is written to
    #[serde(default = "default_output_file")]
    pub output_file: String,
}

fn default_output_file() -> String {
    "index.html".to_string()
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            output_file: default_output_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        let config_dir = dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("shoreline");

        Self {
            config_dir,
            storage: StorageConfig::default(),
            forecast: ForecastConfig::default(),
            ui: UiConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from the default location, creating it if it doesn't exist
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing the defaults there if it is missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path).context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns an error if validation fails with critical errors; warnings are logged.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        for warning in &validation.warnings {
            tracing::warn!("Config warning: {}", warning);
        }

        Ok((config, validation))
    }

    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        self.validate_url(&self.forecast.endpoint, "forecast.endpoint", &mut result);

        if self.forecast.timeout_secs == 0 {
            result.add_error("forecast.timeout_secs", "Timeout must be greater than 0");
        } else if self.forecast.timeout_secs > 120 {
            result.add_warning(
                "forecast.timeout_secs",
                "Forecast timeout is unusually long (>120s)",
            );
        }

        if !self.forecast.enabled {
            result.add_warning("forecast.enabled", "Forecast fetch disabled");
        }

        if self.storage.state_key.trim().is_empty() {
            result.add_error("storage.state_key", "State key cannot be empty");
        }

        if self.storage.database_file.trim().is_empty() {
            result.add_error("storage.database_file", "Database file cannot be empty");
        }

        if self.storage.quota_bytes == Some(0) {
            result.add_error("storage.quota_bytes", "Quota of 0 bytes rejects every write");
        }

        if self.ui.output_file.trim().is_empty() {
            result.add_error("ui.output_file", "Output file cannot be empty");
        }

        result
    }

    fn validate_url(&self, url_str: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(url_str) {
            Ok(url) => {
                if url.scheme() != "http" && url.scheme() != "https" {
                    result.add_error(
                        field_name,
                        format!("URL must use http or https scheme, got: {}", url.scheme()),
                    );
                }

                if url.host().is_none() {
                    result.add_error(field_name, "URL must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid URL: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self).context("Failed to serialize config")?;

        std::fs::write(path, contents).context("Failed to write config file")?;

        Ok(())
    }

    /// Full path of the SQLite state database
    pub fn database_path(&self) -> PathBuf {
        self.config_dir.join(&self.storage.database_file)
    }

    /// Full path of the rendered page
    pub fn output_path(&self) -> PathBuf {
        self.config_dir.join(&self.ui.output_file)
    }

    fn config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("shoreline");

        Ok(config_dir.join("config.toml"))
    }
}
