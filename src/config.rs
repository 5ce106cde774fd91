//! Configuration management for airdash.
//!
//! This module handles the layered configuration system with the following precedence:
//! 1. Command-line arguments (highest priority)
//! 2. Environment variables
//! 3. JSON config file
//! 4. Default values (lowest priority)

use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

use crate::error::{AirdashError, Result};
use crate::grades::GradeTables;

/// Command-line arguments for airdash
#[derive(Parser, Debug)]
#[command(name = "airdash")]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Host address to bind to
    #[arg(short = 'H', long, env = "AIRDASH_HOST")]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long, env = "AIRDASH_PORT")]
    pub port: Option<u16>,

    /// Path to JSON configuration file
    #[arg(short, long, env = "AIRDASH_CONFIG")]
    pub config: Option<PathBuf>,

    /// Decoded data.go.kr service key for the AirKorea API
    #[arg(short = 'k', long, env = "AIRDASH_SERVICE_KEY", hide_env_values = true)]
    pub service_key: Option<String>,

    /// Base URL of the AirKorea API
    #[arg(long, env = "AIRDASH_API_BASE_URL")]
    pub api_base_url: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, env = "AIRDASH_LOG_LEVEL")]
    pub log_level: Option<String>,
}

/// Server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Host address to bind to
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to listen on
    #[serde(default = "default_port")]
    pub port: u16,
}

/// Upstream API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct ApiConfig {
    /// Base URL shared by all AirKorea operations
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Decoded service key; usually supplied through the environment
    #[serde(default, skip_serializing)]
    pub service_key: Option<String>,

    /// Per-request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Rows requested from the station list
    #[serde(default = "default_station_rows")]
    pub station_rows: u32,

    /// Hourly rows requested per station
    #[serde(default = "default_reading_rows")]
    pub reading_rows: u32,

    /// Forecast rows requested
    #[serde(default = "default_forecast_rows")]
    pub forecast_rows: u32,

    /// Reading window (DAILY, MONTH, 3MONTH)
    #[serde(default = "default_data_term")]
    pub data_term: String,

    /// Offset of the provider's local time from UTC, used for "today"
    #[serde(default = "default_utc_offset_hours")]
    pub utc_offset_hours: i32,
}

impl fmt::Debug for ApiConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiConfig")
            .field("base_url", &self.base_url)
            .field("service_key", &self.service_key.as_ref().map(|_| "<redacted>"))
            .field("timeout_secs", &self.timeout_secs)
            .field("station_rows", &self.station_rows)
            .field("reading_rows", &self.reading_rows)
            .field("forecast_rows", &self.forecast_rows)
            .field("data_term", &self.data_term)
            .field("utc_offset_hours", &self.utc_offset_hours)
            .finish()
    }
}

/// Complete configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server configuration
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream API configuration
    #[serde(default)]
    pub api: ApiConfig,

    /// Grade tables used for the dashboard cards
    #[serde(default)]
    pub grades: GradeTables,

    /// Cities offered in the selector
    #[serde(default = "default_cities")]
    pub cities: Vec<String>,

    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Config {
    /// Load configuration from all sources with proper precedence
    pub fn load() -> Result<Self> {
        Self::from_args(Args::parse())
    }

    /// Build configuration from already-parsed arguments
    pub fn from_args(args: Args) -> Result<Self> {
        // Start with defaults, replaced wholesale by the JSON file if provided
        let mut config = match &args.config {
            Some(config_path) => Self::load_from_file(config_path)?,
            None => Config::default(),
        };

        // Override with command-line arguments and environment
        if let Some(host) = args.host {
            config.server.host = host;
        }
        if let Some(port) = args.port {
            config.server.port = port;
        }
        if args.service_key.is_some() {
            config.api.service_key = args.service_key;
        }
        if let Some(base_url) = args.api_base_url {
            config.api.base_url = base_url;
        }
        if let Some(log_level) = args.log_level {
            config.log_level = log_level;
        }

        Ok(config)
    }

    /// Load configuration from a JSON file
    fn load_from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.server.host.is_empty() {
            return Err(AirdashError::Config {
                message: "Server host cannot be empty".to_string(),
            });
        }

        // 0 is not a valid port for users
        if self.server.port == 0 {
            return Err(AirdashError::Config {
                message: "Server port cannot be 0".to_string(),
            });
        }

        match self.log_level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => {
                return Err(AirdashError::Config {
                    message: format!(
                        "Invalid log level: {}. Must be one of: trace, debug, info, warn, error",
                        self.log_level
                    ),
                });
            }
        }

        self.api.validate()?;

        if self.cities.is_empty() || self.cities.iter().any(|c| c.trim().is_empty()) {
            return Err(AirdashError::Config {
                message: "City list must be non-empty and contain no blank names".to_string(),
            });
        }

        self.grades.validate()
    }

    /// Whether `city` is one of the configured cities
    pub fn has_city(&self, city: &str) -> bool {
        self.cities.iter().any(|c| c == city)
    }
}

impl ApiConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.trim().is_empty() {
            return Err(AirdashError::Config {
                message: "API base URL cannot be empty".to_string(),
            });
        }

        if self.timeout_secs == 0 {
            return Err(AirdashError::Config {
                message: "API timeout must be at least one second".to_string(),
            });
        }

        if self.station_rows == 0 || self.reading_rows == 0 || self.forecast_rows == 0 {
            return Err(AirdashError::Config {
                message: "API row counts must be positive".to_string(),
            });
        }

        match self.data_term.as_str() {
            "DAILY" | "MONTH" | "3MONTH" => {}
            _ => {
                return Err(AirdashError::Config {
                    message: format!(
                        "Invalid data term: {}. Must be one of: DAILY, MONTH, 3MONTH",
                        self.data_term
                    ),
                });
            }
        }

        if !(-12..=14).contains(&self.utc_offset_hours) {
            return Err(AirdashError::Config {
                message: format!("Invalid UTC offset: {} hours", self.utc_offset_hours),
            });
        }

        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            api: ApiConfig::default(),
            grades: GradeTables::default(),
            cities: default_cities(),
            log_level: default_log_level(),
        }
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            service_key: None,
            timeout_secs: default_timeout_secs(),
            station_rows: default_station_rows(),
            reading_rows: default_reading_rows(),
            forecast_rows: default_forecast_rows(),
            data_term: default_data_term(),
            utc_offset_hours: default_utc_offset_hours(),
        }
    }
}

// Default value functions for serde
fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_base_url() -> String {
    "http://apis.data.go.kr/B552584".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_station_rows() -> u32 {
    700
}

fn default_reading_rows() -> u32 {
    24
}

fn default_forecast_rows() -> u32 {
    100
}

fn default_data_term() -> String {
    "DAILY".to_string()
}

fn default_utc_offset_hours() -> i32 {
    9
}

fn default_cities() -> Vec<String> {
    [
        "서울", "부산", "대구", "인천", "광주", "울산", "대전", "세종", "경기", "강원", "충북",
        "충남", "전북", "전남", "경북", "경남", "제주",
    ]
    .iter()
    .map(|c| c.to_string())
    .collect()
}

fn default_log_level() -> String {
    "info".to_string()
}
