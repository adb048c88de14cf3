//! Server builder and run_server function

use crate::config::Config;
use crate::server::server::HttpServer;
use crate::utils::error::{RatesError, Result};
use tracing::{info, warn};

/// Default configuration file path, overridable via `RATES_CONFIG`
const DEFAULT_CONFIG_PATH: &str = "config/gateway.yaml";

/// Server builder for easier configuration
pub struct ServerBuilder {
    config: Option<Config>,
}

impl ServerBuilder {
    /// Create a new server builder
    pub fn new() -> Self {
        Self { config: None }
    }

    /// Set configuration
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the HTTP server
    pub async fn build(self) -> Result<HttpServer> {
        let config = self
            .config
            .ok_or_else(|| RatesError::Config("Configuration is required".to_string()))?;

        HttpServer::new(&config).await
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// Run the server with automatic configuration loading
///
/// Loads the YAML config file when present, otherwise falls back to
/// environment variables over built-in defaults.
pub async fn run_server() -> Result<()> {
    info!("Starting shipping-rate gateway");

    let config_path =
        std::env::var("RATES_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());

    let config = match Config::from_file(&config_path).await {
        Ok(config) => {
            info!("Configuration file loaded: {}", config_path);
            config
        }
        Err(e) => {
            warn!(
                "Configuration file {} not usable ({}), using environment/defaults",
                config_path, e
            );
            Config::from_env()?
        }
    };

    let server = HttpServer::new(&config).await?;
    server.start().await
}
