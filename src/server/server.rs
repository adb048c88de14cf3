//! HTTP server core implementation

use crate::config::{Config, ServerConfig};
use crate::server::middleware::RequestIdMiddleware;
use crate::server::routes;
use crate::server::state::AppState;
use crate::services::sheets::RateSheetService;
use crate::utils::error::{RatesError, Result};
use actix_cors::Cors;
use actix_web::{
    App, HttpServer as ActixHttpServer,
    middleware::{DefaultHeaders, Logger},
    web,
};
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// HTTP server
pub struct HttpServer {
    /// Server configuration
    config: ServerConfig,
    /// Application state
    state: AppState,
}

impl HttpServer {
    /// Create a new HTTP server
    ///
    /// Loads the rate-sheet store up front; a failing source logs a warning
    /// and leaves the store empty rather than refusing to start, so the
    /// management refresh endpoint can recover later.
    pub async fn new(config: &Config) -> Result<Self> {
        info!("Creating HTTP server");

        let sheet_config = config.sheets();
        let sheets = Arc::new(RateSheetService::new(
            sheet_config.source.clone(),
            Duration::from_secs(sheet_config.cache_ttl),
        ));

        if let Err(e) = sheets.initialize().await {
            warn!("Initial rate sheet load failed: {}", e);
        }

        if sheet_config.auto_refresh {
            let _refresh_task = Arc::clone(&sheets).start_auto_refresh_task();
        }

        let state = AppState::new(config.clone(), sheets);

        Ok(Self {
            config: config.server().clone(),
            state,
        })
    }

    /// Create the Actix-web application
    fn create_app(
        state: web::Data<AppState>,
    ) -> App<
        impl actix_web::dev::ServiceFactory<
            actix_web::dev::ServiceRequest,
            Config = (),
            Response = actix_web::dev::ServiceResponse<impl actix_web::body::MessageBody>,
            Error = actix_web::Error,
            InitError = (),
        >,
    > {
        let cors_config = &state.config.server().cors;
        let mut cors = Cors::default();

        if cors_config.enabled {
            if cors_config.allows_all_origins() {
                cors = cors.allow_any_origin();
            } else {
                for origin in &cors_config.allowed_origins {
                    cors = cors.allowed_origin(origin);
                }
            }

            let methods: Vec<actix_web::http::Method> = cors_config
                .allowed_methods
                .iter()
                .filter_map(|m| m.parse().ok())
                .collect();
            if !methods.is_empty() {
                cors = cors.allowed_methods(methods);
            }

            cors = cors.allow_any_header().max_age(cors_config.max_age as usize);
        }

        App::new()
            .app_data(state)
            .wrap(cors)
            .wrap(Logger::default())
            .wrap(RequestIdMiddleware)
            .wrap(DefaultHeaders::new().add(("Server", "shiprates-rs")))
            .configure(routes::health::configure_routes)
            .configure(routes::rates::configure_routes)
    }

    /// Start the HTTP server
    pub async fn start(self) -> Result<()> {
        let bind_addr = format!("{}:{}", self.config.host, self.config.port);

        info!("Starting HTTP server on {}", bind_addr);

        let workers = self.config.workers;
        let state = web::Data::new(self.state);

        let mut server = ActixHttpServer::new(move || Self::create_app(state.clone()))
            .bind(&bind_addr)
            .map_err(|e| {
                RatesError::server(format!("Failed to bind to {}: {}", bind_addr, e))
            })?;

        if let Some(workers) = workers {
            server = server.workers(workers);
        }

        info!("HTTP server listening on {}", bind_addr);

        server
            .run()
            .await
            .map_err(|e| RatesError::server(format!("Server error: {}", e)))?;

        info!("HTTP server stopped");
        Ok(())
    }

    /// Get server configuration
    pub fn config(&self) -> &ServerConfig {
        &self.config
    }

    /// Get application state
    pub fn state(&self) -> &AppState {
        &self.state
    }
}
