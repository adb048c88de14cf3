//! Health check and status endpoints

use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use actix_web::{HttpResponse, Result as ActixResult, web};
use std::borrow::Cow;
use tracing::debug;

/// Configure health check routes
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/health")
            .route("", web::get().to(health_check))
            .route("/detailed", web::get().to(detailed_health_check)),
    )
    .route("/version", web::get().to(version_info));
}

/// Basic health check endpoint
///
/// Used by load balancers; always reports healthy while the process is up.
pub async fn health_check(_state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Health check requested");

    let health_status = HealthStatus {
        status: Cow::Borrowed("healthy"),
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(health_status)))
}

/// Detailed health check endpoint
///
/// Adds rate-sheet store diagnostics: whether any sheets are loaded and
/// whether the data is stale relative to the configured TTL.
async fn detailed_health_check(state: web::Data<AppState>) -> ActixResult<HttpResponse> {
    debug!("Detailed health check requested");

    let stats = state.sheets.statistics();
    let store = SheetStoreHealth {
        source_configured: state.config.sheets().source.is_some(),
        sheets_loaded: stats.total_sheets,
        stale: state.sheets.needs_refresh(),
    };

    let status = if store.sheets_loaded > 0 && !store.stale {
        Cow::Borrowed("healthy")
    } else {
        Cow::Borrowed("degraded")
    };

    let detailed_status = DetailedHealthStatus {
        status,
        timestamp: chrono::Utc::now(),
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        uptime_seconds: get_uptime_seconds(),
        sheet_store: store,
    };

    Ok(HttpResponse::Ok().json(ApiResponse::success(detailed_status)))
}

/// Version information endpoint
async fn version_info() -> HttpResponse {
    debug!("Version info requested");

    let version_info = VersionInfo {
        version: Cow::Borrowed(env!("CARGO_PKG_VERSION")),
        build_time: Cow::Borrowed(env!("BUILD_TIME")),
        git_hash: Cow::Borrowed(env!("GIT_HASH")),
        rust_version: Cow::Borrowed(env!("RUST_VERSION")),
    };

    HttpResponse::Ok().json(ApiResponse::success(version_info))
}

/// Basic health status
#[derive(Debug, Clone, serde::Serialize)]
struct HealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
}

/// Detailed health status
#[derive(Debug, Clone, serde::Serialize)]
struct DetailedHealthStatus {
    status: Cow<'static, str>,
    timestamp: chrono::DateTime<chrono::Utc>,
    version: Cow<'static, str>,
    uptime_seconds: u64,
    sheet_store: SheetStoreHealth,
}

/// Rate-sheet store health
#[derive(Debug, Clone, serde::Serialize)]
struct SheetStoreHealth {
    source_configured: bool,
    sheets_loaded: usize,
    stale: bool,
}

/// Version information
#[derive(Debug, Clone, serde::Serialize)]
struct VersionInfo {
    version: Cow<'static, str>,
    build_time: Cow<'static, str>,
    git_hash: Cow<'static, str>,
    rust_version: Cow<'static, str>,
}

/// Get process uptime in seconds
fn get_uptime_seconds() -> u64 {
    static START_TIME: std::sync::OnceLock<std::time::Instant> = std::sync::OnceLock::new();
    let start = START_TIME.get_or_init(std::time::Instant::now);
    start.elapsed().as_secs()
}
