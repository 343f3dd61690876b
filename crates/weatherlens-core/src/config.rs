use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

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

    /// Add an error
    pub fn add_error(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add a warning
    pub fn add_warning(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.warnings.push(ConfigValidationError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Get a user-friendly message summarizing all errors
    pub fn error_summary(&self) -> String {
        if self.errors.is_empty() {
            return String::new();
        }
        self.errors
            .iter()
            .map(|e| e.to_string())
            .collect::<Vec<_>>()
            .join("; ")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Config {
    /// Collection schedule
    #[serde(default)]
    pub collector: CollectorConfig,

    /// Observation point sent to the weather APIs
    #[serde(default)]
    pub location: LocationConfig,

    /// MongoDB connection and collection layout
    #[serde(default)]
    pub store: StoreConfig,

    /// Dashboard HTTP server
    #[serde(default)]
    pub dashboard: DashboardConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectorConfig {
    /// Minutes between collection cycles
    #[serde(default = "default_interval_minutes")]
    pub interval_minutes: u64,
}

fn default_interval_minutes() -> u64 {
    60
}

impl Default for CollectorConfig {
    fn default() -> Self {
        Self {
            interval_minutes: default_interval_minutes(),
        }
    }
}

impl CollectorConfig {
    /// Collection cycle period as a duration
    ///
    /// Saturates rather than overflowing when the configured interval is
    /// absurdly large.
    pub fn period(&self) -> Duration {
        Duration::from_secs(self.interval_minutes.saturating_mul(60))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationConfig {
    /// Latitude of the observation point, sent to Yandex Weather
    #[serde(default = "default_latitude")]
    pub latitude: f64,

    /// Longitude of the observation point, sent to Yandex Weather
    #[serde(default = "default_longitude")]
    pub longitude: f64,

    /// City query sent to OpenWeather, e.g. "Sochi,ru"
    #[serde(default = "default_city")]
    pub city: String,

    /// Unit system for OpenWeather: "standard", "metric" or "imperial"
    #[serde(default = "default_units")]
    pub units: String,

    /// Response language for OpenWeather condition descriptions
    #[serde(default = "default_lang")]
    pub lang: String,
}

fn default_latitude() -> f64 {
    43.6028
}

fn default_longitude() -> f64 {
    39.7342
}

fn default_city() -> String {
    "Sochi,ru".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "ru".to_string()
}

impl Default for LocationConfig {
    fn default() -> Self {
        Self {
            latitude: default_latitude(),
            longitude: default_longitude(),
            city: default_city(),
            units: default_units(),
            lang: default_lang(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// MongoDB connection string (overridable via WEATHERLENS_MONGO_URI)
    #[serde(default = "default_mongo_uri")]
    pub uri: String,

    /// Database holding the weather collections
    #[serde(default = "default_database")]
    pub database: String,

    /// MongoDB username; an empty string disables authentication
    #[serde(default = "default_username")]
    pub username: String,

    /// MongoDB password
    #[serde(default = "default_password")]
    pub password: String,

    /// Collection receiving Yandex readings
    #[serde(default = "default_yandex_collection")]
    pub yandex_collection: String,

    /// Collection receiving OpenWeather readings
    #[serde(default = "default_openweather_collection")]
    pub openweather_collection: String,
}

fn default_mongo_uri() -> String {
    "mongodb://localhost:27017".to_string()
}

fn default_database() -> String {
    "weather_data".to_string()
}

fn default_username() -> String {
    "admin".to_string()
}

fn default_password() -> String {
    "password".to_string()
}

fn default_yandex_collection() -> String {
    "yandex_weather".to_string()
}

fn default_openweather_collection() -> String {
    "openweather_weather".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            uri: default_mongo_uri(),
            database: default_database(),
            username: default_username(),
            password: default_password(),
            yandex_collection: default_yandex_collection(),
            openweather_collection: default_openweather_collection(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardConfig {
    /// Socket address (IP:port) the dashboard listens on
    #[serde(default = "default_bind")]
    pub bind: String,
}

fn default_bind() -> String {
    "0.0.0.0:8000".to_string()
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            bind: default_bind(),
        }
    }
}

impl Config {
    /// Load configuration from file, creating default if it doesn't exist
    ///
    /// The file path comes from WEATHERLENS_CONFIG when set, otherwise the
    /// platform config directory. WEATHERLENS_MONGO_URI overrides the stored
    /// connection string after loading.
    pub fn load() -> Result<Self> {
        let config_path = Self::config_path()?;
        let mut config = Self::load_from(&config_path)?;
        config.apply_env_overrides();
        Ok(config)
    }

    /// Load configuration from an explicit path, creating default if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            let config = Self::default();
            config.save_to(path)?;
            return Ok(config);
        }

        let contents = std::fs::read_to_string(path)
            .context("Failed to read config file")?;

        let config: Config = toml::from_str(&contents)
            .context("Failed to parse config file")?;

        Ok(config)
    }

    /// Load configuration and validate it
    ///
    /// Returns the config along with any validation warnings.
    /// Returns an error if validation fails with critical errors.
    pub fn load_validated() -> Result<(Self, ValidationResult)> {
        let config = Self::load()?;
        let validation = config.validate();

        if !validation.is_valid() {
            anyhow::bail!(
                "Configuration validation failed: {}",
                validation.error_summary()
            );
        }

        if !validation.warnings.is_empty() {
            for warning in &validation.warnings {
                tracing::warn!("Config warning: {}", warning);
            }
        }

        Ok((config, validation))
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(uri) = std::env::var("WEATHERLENS_MONGO_URI") {
            self.store.uri = uri;
        }
    }

    /// Validate the configuration
    ///
    /// Returns a ValidationResult containing any errors or warnings.
    pub fn validate(&self) -> ValidationResult {
        let mut result = ValidationResult::default();

        // Validate MongoDB connection string
        self.validate_mongo_uri(&self.store.uri, "store.uri", &mut result);

        if self.store.database.is_empty() {
            result.add_error("store.database", "Database name cannot be empty");
        }
        if self.store.yandex_collection.is_empty() {
            result.add_error("store.yandex_collection", "Collection name cannot be empty");
        }
        if self.store.openweather_collection.is_empty() {
            result.add_error(
                "store.openweather_collection",
                "Collection name cannot be empty",
            );
        }
        if !self.store.yandex_collection.is_empty()
            && self.store.yandex_collection == self.store.openweather_collection
        {
            result.add_error(
                "store.yandex_collection",
                "Yandex and OpenWeather collections must differ",
            );
        }

        // Validate collection interval
        if self.collector.interval_minutes == 0 {
            result.add_error(
                "collector.interval_minutes",
                "Collection interval must be greater than 0",
            );
        } else if self.collector.interval_minutes > 1440 {
            result.add_warning(
                "collector.interval_minutes",
                "Collection interval is more than 24 hours",
            );
        }

        // Validate observation point
        if !(-90.0..=90.0).contains(&self.location.latitude) {
            result.add_error("location.latitude", "Latitude must be between -90 and 90");
        }
        if !(-180.0..=180.0).contains(&self.location.longitude) {
            result.add_error(
                "location.longitude",
                "Longitude must be between -180 and 180",
            );
        }
        if self.location.city.is_empty() {
            result.add_error("location.city", "City query cannot be empty");
        }
        if !matches!(
            self.location.units.as_str(),
            "standard" | "metric" | "imperial"
        ) {
            result.add_warning(
                "location.units",
                format!("Unrecognized unit system: {}", self.location.units),
            );
        }

        // Validate dashboard bind address
        if self.dashboard.bind.parse::<SocketAddr>().is_err() {
            result.add_error(
                "dashboard.bind",
                format!("Invalid socket address: {}", self.dashboard.bind),
            );
        }

        result
    }

    /// Validate a MongoDB connection string field
    fn validate_mongo_uri(&self, uri: &str, field_name: &str, result: &mut ValidationResult) {
        match Url::parse(uri) {
            Ok(url) => {
                // Check scheme
                if url.scheme() != "mongodb" && url.scheme() != "mongodb+srv" {
                    result.add_error(
                        field_name,
                        format!(
                            "URI must use mongodb or mongodb+srv scheme, got: {}",
                            url.scheme()
                        ),
                    );
                }

                // Check host
                if url.host().is_none() {
                    result.add_error(field_name, "URI must have a host");
                }
            }
            Err(e) => {
                result.add_error(field_name, format!("Invalid MongoDB URI: {}", e));
            }
        }
    }

    /// Save configuration to the default location
    pub fn save(&self) -> Result<()> {
        let config_path = Self::config_path()?;
        self.save_to(&config_path)
    }

    /// Save configuration to an explicit path
    pub fn save_to(&self, path: &Path) -> Result<()> {
        // Ensure config directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .context("Failed to create config directory")?;
        }

        let contents = toml::to_string_pretty(self)
            .context("Failed to serialize config")?;

        std::fs::write(path, contents)
            .context("Failed to write config file")?;

        Ok(())
    }

    /// Get the path to the configuration file
    fn config_path() -> Result<PathBuf> {
        if let Ok(path) = std::env::var("WEATHERLENS_CONFIG") {
            return Ok(PathBuf::from(path));
        }

        let config_dir = dirs::config_dir()
            .context("Failed to get config directory")?
            .join("weatherlens");

        Ok(config_dir.join("config.toml"))
    }
}
