//! # shiprates-rs
//!
//! Courier shipping-rate gateway. Serves zone-based rate-sheet pricing
//! behind a JSON API: weight-range grids, all-countries grids, and
//! single-shipment quotes with a full cost breakdown.
//!
//! ## Pricing model
//!
//! Each carrier service has a rate sheet: weight slabs holding one price
//! per zone, zones mapping destination countries to a price column, and
//! named surcharges (percentage, per-kg, or one-time) at sheet and zone
//! level. A query resolves the destination zone and weight slab, derives a
//! per-kg base rate, applies profit markup and surcharges, optionally adds
//! GST, and reports the final per-kg price.
//!
//! ## Library usage
//!
//! ```rust
//! use shiprates_rs::core::{RateSheet, compute_rate};
//!
//! let sheet: RateSheet = serde_json::from_str(
//!     r#"{
//!         "originalName": "dhl-express",
//!         "status": "live",
//!         "rates": [{"kg": 1, "1": 100}],
//!         "zones": [{"zone": "1", "countries": ["India"]}]
//!     }"#,
//! ).unwrap();
//!
//! let rate = compute_rate(&sheet, "India", 1.0, 10.0, false);
//! assert_eq!(rate, Some(110.0));
//! ```
//!
//! ## Gateway mode
//!
//! ```rust,no_run
//! use shiprates_rs::{Config, Gateway};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::from_file("config/gateway.yaml").await?;
//!     let gateway = Gateway::new(config).await?;
//!     gateway.run().await?;
//!     Ok(())
//! }
//! ```

#![warn(clippy::all)]
#![allow(clippy::module_inception)]

pub mod config;
pub mod core;
pub mod server;
pub mod services;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{RateQuote, RateSheet, compute_quote, compute_rate};
pub use services::RateSheetService;
pub use utils::error::{RatesError, Result};

use tracing::info;

/// The rate gateway: configuration plus a ready-to-run HTTP server
pub struct Gateway {
    config: Config,
    server: server::HttpServer,
}

impl Gateway {
    /// Create a new gateway instance
    pub async fn new(config: Config) -> Result<Self> {
        info!("Creating new gateway instance");

        let server = server::HttpServer::new(&config).await?;

        Ok(Self { config, server })
    }

    /// Run the gateway server
    pub async fn run(self) -> Result<()> {
        info!("Starting shipping-rate gateway");
        info!("Configuration: {:#?}", self.config);

        self.server.start().await?;

        Ok(())
    }
}

/// Current version of the crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
/// Name of the crate
pub const NAME: &str = env!("CARGO_PKG_NAME");

/// Gateway build information
#[derive(Debug, Clone)]
pub struct BuildInfo {
    /// Version number
    pub version: &'static str,
    /// Build timestamp
    pub build_time: &'static str,
    /// Git commit hash
    pub git_hash: &'static str,
    /// Rust version
    pub rust_version: &'static str,
}

/// Build information captured by the build script
pub fn build_info() -> BuildInfo {
    BuildInfo {
        version: VERSION,
        build_time: env!("BUILD_TIME"),
        git_hash: env!("GIT_HASH"),
        rust_version: env!("RUST_VERSION"),
    }
}
