//! Configuration loading and constants.
//!
//! Loads application configuration from a TOML file and defines the service
//! identity, Cache-Control values, secret defaults, and logging defaults.
//! `AppConfig` is the root configuration struct containing all settings.

use const_format::formatcp;
use serde::Deserialize;
use std::path::Path;

// =============================================================================
// Service Identity
// =============================================================================

/// Service name reported by the root endpoint
pub const SERVICE_NAME: &str = "Secure CI Demo";

/// API version reported by the root and config endpoints
pub const SERVICE_VERSION: &str = "1.0";

// =============================================================================
// HTTP Response Cache Control
// =============================================================================
// Values are in seconds. The root payload is constant for the lifetime of the
// process, so upstream caches may hold it briefly. Health and config responses
// must always reflect the live process and the current secret file.

/// Root identity payload - constant per process
pub const HTTP_CACHE_ROOT_MAX_AGE: u32 = 60;

pub const CACHE_CONTROL_ROOT: &str = formatcp!("public, max-age={}", HTTP_CACHE_ROOT_MAX_AGE);

/// Liveness and config status - never cached
pub const CACHE_CONTROL_NO_STORE: &str = "no-store";

// =============================================================================
// Secret Defaults
// =============================================================================

/// Default location of the pre-provisioned secret file
pub const DEFAULT_SECRET_PATH: &str = "/var/secrets/api_key";

/// Most leading secret characters any preview may show
pub const MAX_PREVIEW_CHARS: usize = 4;

/// Default number of leading secret characters shown in the preview
pub const DEFAULT_PREVIEW_CHARS: usize = MAX_PREVIEW_CHARS;

/// Preview shown when no secret is configured
pub const PREVIEW_NOT_SET: &str = "NOT_SET";

/// Marker appended after the visible prefix of a secret
pub const PREVIEW_TRUNCATION_MARKER: &str = "...";

// =============================================================================
// Default Paths and Strings
// =============================================================================

/// Default configuration file path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";

/// Default log filter when RUST_LOG is not set
pub const DEFAULT_LOG_FILTER: &str = "secure_ci_demo=debug,info";

/// Default log format (text or json)
pub const DEFAULT_LOG_FORMAT: &str = "text";

#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// HTTP server configuration
    pub http: HttpServerConfig,
    /// Secret file settings
    #[serde(default)]
    pub secret: SecretConfig,
    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// HTTP server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct HttpServerConfig {
    pub host: String,
    pub port: u16,
}

/// Where the secret lives and how much of it the preview may show
#[derive(Debug, Clone, Deserialize)]
pub struct SecretConfig {
    #[serde(default = "SecretConfig::default_path")]
    pub path: String,
    #[serde(default = "SecretConfig::default_preview_chars")]
    pub preview_chars: usize,
}

impl Default for SecretConfig {
    fn default() -> Self {
        Self {
            path: Self::default_path(),
            preview_chars: Self::default_preview_chars(),
        }
    }
}

impl SecretConfig {
    fn default_path() -> String {
        DEFAULT_SECRET_PATH.to_string()
    }

    fn default_preview_chars() -> usize {
        DEFAULT_PREVIEW_CHARS
    }
}

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Text,
    Json,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log format: "text" (human-readable, default) or "json" (structured)
    #[serde(default = "LoggingConfig::default_format")]
    pub format: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: DEFAULT_LOG_FORMAT.to_string(),
        }
    }
}

impl LoggingConfig {
    fn default_format() -> String {
        DEFAULT_LOG_FORMAT.to_string()
    }

    /// Parsed log format. Only valid after `AppConfig` validation.
    pub fn log_format(&self) -> Option<LogFormat> {
        match self.format.as_str() {
            "text" => Some(LogFormat::Text),
            "json" => Some(LogFormat::Json),
            _ => None,
        }
    }
}

impl AppConfig {
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        Self::parse(&contents)
    }

    /// Parse and validate configuration from TOML text.
    pub fn parse(contents: &str) -> Result<Self, ConfigError> {
        let config: AppConfig = toml::from_str(contents)?;

        if !(1..=MAX_PREVIEW_CHARS).contains(&config.secret.preview_chars) {
            return Err(ConfigError::Validation(format!(
                "secret.preview_chars must be between 1 and {}, got {}",
                MAX_PREVIEW_CHARS, config.secret.preview_chars
            )));
        }

        if config.logging.log_format().is_none() {
            return Err(ConfigError::Validation(format!(
                "logging.format must be \"text\" or \"json\", got {:?}",
                config.logging.format
            )));
        }

        Ok(config)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Configuration error: {0}")]
    Validation(String),
}
