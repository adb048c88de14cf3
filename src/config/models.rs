//! Configuration models
//!
//! Serde models for the gateway YAML configuration, with defaults matching
//! a local development setup and env-var overrides for deployment.

use crate::utils::error::{RatesError, Result};
use serde::{Deserialize, Serialize};
use std::env;

/// Top-level gateway configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatewayConfig {
    /// HTTP server configuration
    #[serde(default)]
    pub server: ServerConfig,
    /// Rate-sheet store configuration
    #[serde(default)]
    pub sheets: SheetStoreConfig,
}

impl GatewayConfig {
    /// Apply environment-variable overrides on top of defaults
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();

        if let Ok(host) = env::var("RATES_HOST") {
            config.server.host = host;
        }
        if let Ok(port) = env::var("RATES_PORT") {
            config.server.port = port
                .parse()
                .map_err(|e| RatesError::Config(format!("Invalid port: {}", e)))?;
        }
        if let Ok(workers) = env::var("RATES_WORKERS") {
            config.server.workers = Some(
                workers
                    .parse()
                    .map_err(|e| RatesError::Config(format!("Invalid workers count: {}", e)))?,
            );
        }
        if let Ok(timeout) = env::var("RATES_TIMEOUT") {
            config.server.timeout = timeout
                .parse()
                .map_err(|e| RatesError::Config(format!("Invalid timeout: {}", e)))?;
        }

        if let Ok(source) = env::var("RATES_SHEET_SOURCE") {
            config.sheets.source = Some(source);
        }
        if let Ok(ttl) = env::var("RATES_SHEET_TTL") {
            config.sheets.cache_ttl = ttl
                .parse()
                .map_err(|e| RatesError::Config(format!("Invalid sheet TTL: {}", e)))?;
        }
        if let Ok(auto) = env::var("RATES_AUTO_REFRESH") {
            config.sheets.auto_refresh = auto
                .parse()
                .map_err(|e| RatesError::Config(format!("Invalid auto refresh flag: {}", e)))?;
        }

        Ok(config)
    }
}

/// HTTP server configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Bind host
    #[serde(default = "default_host")]
    pub host: String,
    /// Bind port
    #[serde(default = "default_port")]
    pub port: u16,
    /// Worker thread count; actix default when unset
    #[serde(default)]
    pub workers: Option<usize>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
    /// CORS settings
    #[serde(default)]
    pub cors: CorsConfig,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
            timeout: default_timeout(),
            cors: CorsConfig::default(),
        }
    }
}

impl ServerConfig {
    pub fn validate(&self) -> Result<()> {
        if self.host.is_empty() {
            return Err(RatesError::Config("host must not be empty".to_string()));
        }
        if self.port == 0 {
            return Err(RatesError::Config("port must not be 0".to_string()));
        }
        if self.timeout == 0 {
            return Err(RatesError::Config("timeout must be positive".to_string()));
        }
        Ok(())
    }
}

/// CORS configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CorsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Allowed origins; empty means any origin
    #[serde(default)]
    pub allowed_origins: Vec<String>,
    #[serde(default = "default_cors_methods")]
    pub allowed_methods: Vec<String>,
    #[serde(default = "default_cors_max_age")]
    pub max_age: u64,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            allowed_origins: Vec::new(),
            allowed_methods: default_cors_methods(),
            max_age: default_cors_max_age(),
        }
    }
}

impl CorsConfig {
    /// Whether any origin is accepted
    pub fn allows_all_origins(&self) -> bool {
        self.allowed_origins.is_empty()
    }
}

/// Rate-sheet store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SheetStoreConfig {
    /// JSON file path or HTTP(S) URL holding the rate-sheet documents
    #[serde(default = "default_sheet_source")]
    pub source: Option<String>,
    /// Staleness threshold in seconds
    #[serde(default = "default_sheet_ttl")]
    pub cache_ttl: u64,
    /// Reload the source every `cache_ttl` seconds
    #[serde(default)]
    pub auto_refresh: bool,
}

impl Default for SheetStoreConfig {
    fn default() -> Self {
        Self {
            source: default_sheet_source(),
            cache_ttl: default_sheet_ttl(),
            auto_refresh: false,
        }
    }
}

impl SheetStoreConfig {
    pub fn validate(&self) -> Result<()> {
        if self.cache_ttl == 0 {
            return Err(RatesError::Config(
                "sheet cache_ttl must be positive".to_string(),
            ));
        }
        if self.auto_refresh && self.source.is_none() {
            return Err(RatesError::Config(
                "auto_refresh requires a sheet source".to_string(),
            ));
        }
        Ok(())
    }
}

// Default value functions
fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_timeout() -> u64 {
    30
}

fn default_true() -> bool {
    true
}

fn default_cors_methods() -> Vec<String> {
    vec!["GET".to_string(), "POST".to_string(), "OPTIONS".to_string()]
}

fn default_cors_max_age() -> u64 {
    3600
}

fn default_sheet_source() -> Option<String> {
    Some("config/rate_sheets.json".to_string())
}

fn default_sheet_ttl() -> u64 {
    3600
}
