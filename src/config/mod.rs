use aws_config::BehaviorVersion;
use aws_sdk_dynamodb::Client as DynamoDbClient;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, info};

/// Prefix shared by every environment variable the service reads
pub const ENV_PREFIX: &str = "LASERSTUDIO";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading error: {message}")]
    LoadError { message: String },

    #[error("Validation error: {message}")]
    ValidationError { message: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server: ServerConfig,
    pub database: DatabaseConfig,
    pub observability: ObservabilityConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_timeout")]
    pub request_timeout_seconds: u64,
    #[serde(default = "default_max_request_size")]
    pub max_request_size: u64,
}

/// Document store selection
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    DynamoDb,
    Memory,
}

impl fmt::Display for StorageBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageBackend::DynamoDb => write!(f, "dynamodb"),
            StorageBackend::Memory => write!(f, "memory"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseConfig {
    #[serde(default)]
    pub storage: StorageBackend,
    #[serde(default = "default_table_prefix")]
    pub table_prefix: String,
    #[serde(default = "default_region")]
    pub region: String,
    /// Overrides the DynamoDB endpoint, e.g. DynamoDB Local
    #[serde(default)]
    pub endpoint_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObservabilityConfig {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_service_version")]
    pub service_version: String,
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    #[serde(default)]
    pub enable_json_logging: bool,
}

impl Config {
    pub fn from_environment() -> Result<Self, ConfigError> {
        let settings = environment_settings(None)?;

        let config = Config {
            server: ServerConfig::from_settings(settings.clone())?,
            database: DatabaseConfig::from_env()?,
            observability: ObservabilityConfig::from_settings(settings)?,
        };

        config.validate()?;

        info!("Configuration loaded successfully");
        debug!("Configuration: {:?}", config);

        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.port == 0 {
            return Err(ConfigError::ValidationError {
                message: "Server port cannot be 0".to_string(),
            });
        }

        if self.server.request_timeout_seconds == 0 {
            return Err(ConfigError::ValidationError {
                message: "Request timeout cannot be 0".to_string(),
            });
        }

        if self.server.max_request_size == 0 {
            return Err(ConfigError::ValidationError {
                message: "Maximum request size cannot be 0".to_string(),
            });
        }

        if self.database.table_prefix.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Table prefix cannot be empty".to_string(),
            });
        }

        if self.database.region.trim().is_empty() {
            return Err(ConfigError::ValidationError {
                message: "Region cannot be empty".to_string(),
            });
        }

        Ok(())
    }
}

/// `LASERSTUDIO_*` variables, read from the process environment or from `vars` when given
pub(crate) fn environment_settings(
    vars: Option<config::Map<String, String>>,
) -> Result<config::Config, ConfigError> {
    config::Config::builder()
        .add_source(config::Environment::with_prefix(ENV_PREFIX).source(vars))
        .build()
        .map_err(|e| ConfigError::LoadError {
            message: format!("Failed to load configuration: {}", e),
        })
}

impl ServerConfig {
    pub(crate) fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize server config: {}", e),
            })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_seconds)
    }
}

impl DatabaseConfig {
    fn from_env() -> Result<Self, ConfigError> {
        envy::prefixed(format!("{}_", ENV_PREFIX))
            .from_env()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to load database config: {}", e),
            })
    }

    pub(crate) fn from_vars<I>(vars: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::prefixed(format!("{}_", ENV_PREFIX))
            .from_iter(vars)
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to load database config: {}", e),
            })
    }

    /// DynamoDB client for the configured region, honouring an endpoint override
    pub async fn dynamodb_client(&self) -> DynamoDbClient {
        let mut loader = aws_config::defaults(BehaviorVersion::latest())
            .region(aws_config::Region::new(self.region.clone()));

        if let Some(endpoint_url) = self.endpoint_url.as_deref().filter(|url| !url.is_empty()) {
            info!(endpoint_url = %endpoint_url, "Using DynamoDB endpoint override");
            loader = loader.endpoint_url(endpoint_url);
        }

        DynamoDbClient::new(&loader.load().await)
    }
}

impl ObservabilityConfig {
    pub(crate) fn from_settings(settings: config::Config) -> Result<Self, ConfigError> {
        settings
            .try_deserialize()
            .map_err(|e| ConfigError::LoadError {
                message: format!("Failed to deserialize observability config: {}", e),
            })
    }
}

// Default value functions
pub(crate) fn default_host() -> String {
    "0.0.0.0".to_string()
}

pub(crate) fn default_port() -> u16 {
    8000
}

pub(crate) fn default_timeout() -> u64 {
    30
}

pub(crate) fn default_max_request_size() -> u64 {
    1024 * 1024 // 1MB
}

pub(crate) fn default_table_prefix() -> String {
    "laserstudio-".to_string()
}

pub(crate) fn default_region() -> String {
    "eu-west-1".to_string()
}

pub(crate) fn default_service_name() -> String {
    env!("CARGO_PKG_NAME").to_string()
}

pub(crate) fn default_service_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

pub(crate) fn default_log_level() -> String {
    "info".to_string()
}

#[cfg(test)]
mod tests;
