//! Configuration management for the rate gateway
//!
//! Handles loading, validation, and access for all gateway configuration.

pub mod models;

pub use models::*;

use crate::utils::error::{RatesError, Result};
use std::path::Path;
use tracing::{debug, info};

/// Main configuration struct for the rate gateway
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// Gateway configuration
    pub gateway: GatewayConfig,
}

impl Config {
    /// Load configuration from a YAML file
    pub async fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        info!("Loading configuration from: {:?}", path);

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| RatesError::Config(format!("Failed to read config file: {}", e)))?;

        let gateway: GatewayConfig = serde_yaml::from_str(&content)
            .map_err(|e| RatesError::Config(format!("Failed to parse config: {}", e)))?;

        let config = Self { gateway };
        config.validate()?;

        debug!("Configuration loaded successfully");
        Ok(config)
    }

    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        info!("Loading configuration from environment variables");

        let gateway = GatewayConfig::from_env()?;
        let config = Self { gateway };

        config.validate()?;
        Ok(config)
    }

    /// Get server configuration
    pub fn server(&self) -> &ServerConfig {
        &self.gateway.server
    }

    /// Get sheet store configuration
    pub fn sheets(&self) -> &SheetStoreConfig {
        &self.gateway.sheets
    }

    /// Validate the entire configuration
    pub fn validate(&self) -> Result<()> {
        debug!("Validating configuration");

        self.gateway
            .server
            .validate()
            .map_err(|e| RatesError::Config(format!("Server config error: {}", e)))?;

        self.gateway
            .sheets
            .validate()
            .map_err(|e| RatesError::Config(format!("Sheet store config error: {}", e)))?;

        Ok(())
    }
}
