//! Rate calculation API endpoints
//!
//! The JSON surface of the rate calculator: weight-range grids for one
//! country, all-countries grids for one service, single-cell quotes with a
//! full cost breakdown, and the sheet store management endpoints.
//!
//! Wire field names are camelCase for compatibility with the existing
//! back-office clients; the `userId`/`userType` headers drive sheet
//! visibility.

use crate::core::calculator::{compute_quote, compute_rate, weight_steps};
use crate::core::visibility::Requester;
use crate::server::routes::ApiResponse;
use crate::server::state::AppState;
use crate::utils::error::{RatesError, Result};
use actix_web::{HttpRequest, HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

/// Weight-range rate request for a single destination country
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRangeRequest {
    pub start_weight: f64,
    pub end_weight: f64,
    pub country: Option<String>,
    #[serde(default)]
    pub selected_services: Vec<String>,
    #[serde(default)]
    pub profit_percent: f64,
    #[serde(default, rename = "includeGST")]
    pub include_gst: bool,
}

/// One grid row: a weight and one rate per requested column
#[derive(Debug, Clone, Serialize)]
pub struct WeightRow {
    pub weight: f64,
    /// `null` marks a cell the sheet cannot price
    pub rates: Vec<Option<f64>>,
}

/// Weight-range rate response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateRangeResponse {
    pub country_name: String,
    /// Column headers, one per requested service
    pub headers: Vec<String>,
    pub rows: Vec<WeightRow>,
}

/// All-countries rate response for a single service
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateAllCountriesResponse {
    pub countries: Vec<String>,
    pub service: String,
    pub weight_ranges: Vec<WeightRow>,
}

/// Single-cell quote request
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteRequest {
    pub service: String,
    pub country: String,
    pub weight: f64,
    #[serde(default)]
    pub profit_percent: f64,
    #[serde(default, rename = "includeGST")]
    pub include_gst: bool,
}

/// Sheet store refresh request
#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    /// Refresh even if the cached data is still fresh
    pub force: Option<bool>,
}

/// Sheet store refresh response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshResponse {
    pub success: bool,
    pub message: String,
    pub sheets_loaded: usize,
    pub timestamp: String,
}

/// Sheet store statistics response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SheetStatsResponse {
    pub total_sheets: usize,
    pub live_sheets: usize,
    pub unlisted_sheets: usize,
    pub total_zones: usize,
    pub total_countries: usize,
    pub last_updated: String,
    pub cache_status: String,
}

/// Build the requester identity from the `userId`/`userType` headers
fn requester_from(req: &HttpRequest) -> Requester {
    let header = |name: &str| {
        req.headers()
            .get(name)
            .and_then(|value| value.to_str().ok())
    };
    Requester::from_parts(header("usertype"), header("userid"))
}

/// Shared validation for batch requests
fn validate_range(start_weight: f64, end_weight: f64, profit_percent: f64) -> Result<()> {
    if !start_weight.is_finite() || start_weight <= 0.0 {
        return Err(RatesError::validation("startWeight must be positive"));
    }
    if !end_weight.is_finite() || end_weight < start_weight {
        return Err(RatesError::validation(
            "endWeight must be at least startWeight",
        ));
    }
    if !(0.0..=100.0).contains(&profit_percent) {
        return Err(RatesError::validation(
            "profitPercent must be between 0 and 100",
        ));
    }
    Ok(())
}

/// Weight-range grid for one country across the selected services
/// POST /api/v1/rates/range
pub async fn rate_range(
    data: web::Data<AppState>,
    payload: web::Json<RateRangeRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let requester = requester_from(&req);

    let country = payload
        .country
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .ok_or_else(|| RatesError::validation("country is required"))?
        .to_string();
    if payload.selected_services.is_empty() {
        return Err(RatesError::validation(
            "selectedServices must name at least one service",
        ));
    }
    validate_range(
        payload.start_weight,
        payload.end_weight,
        payload.profit_percent,
    )?;

    debug!(
        "Rate range request: {} services, country {}",
        payload.selected_services.len(),
        country
    );

    // Missing or invisible services keep their column as null cells.
    let sheets = data.sheets.get_many(&payload.selected_services, &requester);
    if sheets.iter().all(Option::is_none) {
        warn!("Rate range request matched no visible service");
    }

    let rows = weight_steps(payload.start_weight, payload.end_weight)
        .into_iter()
        .map(|weight| WeightRow {
            weight,
            rates: sheets
                .iter()
                .map(|sheet| {
                    sheet.as_ref().and_then(|sheet| {
                        compute_rate(
                            sheet,
                            &country,
                            weight,
                            payload.profit_percent,
                            payload.include_gst,
                        )
                    })
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(RateRangeResponse {
        country_name: country,
        headers: payload.selected_services.clone(),
        rows,
    }))
}

/// Weight-range grid for one service across every country it serves
/// POST /api/v1/rates/all-countries
pub async fn rate_all_countries(
    data: web::Data<AppState>,
    payload: web::Json<RateRangeRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let requester = requester_from(&req);

    if payload.selected_services.len() != 1 {
        return Err(RatesError::validation(
            "exactly one service must be selected",
        ));
    }
    validate_range(
        payload.start_weight,
        payload.end_weight,
        payload.profit_percent,
    )?;

    let service_name = &payload.selected_services[0];
    let sheet = data
        .sheets
        .get_visible(service_name, &requester)
        .ok_or_else(|| RatesError::not_found(format!("Service not found: {}", service_name)))?;

    let countries = sheet.serviced_countries();
    debug!(
        "All-countries request: service {}, {} countries",
        service_name,
        countries.len()
    );

    let weight_ranges = weight_steps(payload.start_weight, payload.end_weight)
        .into_iter()
        .map(|weight| WeightRow {
            weight,
            rates: countries
                .iter()
                .map(|country| {
                    compute_rate(
                        &sheet,
                        country,
                        weight,
                        payload.profit_percent,
                        payload.include_gst,
                    )
                })
                .collect(),
        })
        .collect();

    Ok(HttpResponse::Ok().json(RateAllCountriesResponse {
        countries,
        service: service_name.clone(),
        weight_ranges,
    }))
}

/// Full cost breakdown for one (service, country, weight) cell
/// POST /api/v1/rates/quote
pub async fn rate_quote(
    data: web::Data<AppState>,
    payload: web::Json<QuoteRequest>,
    req: HttpRequest,
) -> Result<HttpResponse> {
    let requester = requester_from(&req);

    if !payload.weight.is_finite() || payload.weight <= 0.0 {
        return Err(RatesError::validation("weight must be positive"));
    }
    if !(0.0..=100.0).contains(&payload.profit_percent) {
        return Err(RatesError::validation(
            "profitPercent must be between 0 and 100",
        ));
    }

    let sheet = data
        .sheets
        .get_visible(&payload.service, &requester)
        .ok_or_else(|| RatesError::not_found(format!("Service not found: {}", payload.service)))?;

    match compute_quote(
        &sheet,
        &payload.country,
        payload.weight,
        payload.profit_percent,
        payload.include_gst,
    ) {
        Some(quote) => Ok(HttpResponse::Ok().json(quote)),
        None => Err(RatesError::not_found(format!(
            "No rate available for {} at {} kg via {}",
            payload.country, payload.weight, payload.service
        ))),
    }
}

/// Service names visible to the requester
/// GET /api/v1/rates/services
pub async fn list_services(data: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse> {
    let requester = requester_from(&req);
    let names = data.sheets.service_names(&requester);
    Ok(HttpResponse::Ok().json(ApiResponse::success(names)))
}

/// Sheet store statistics
/// GET /api/v1/rates/stats
pub async fn sheet_stats(data: web::Data<AppState>) -> Result<HttpResponse> {
    let stats = data.sheets.statistics();
    let last_updated = chrono::DateTime::<chrono::Utc>::from(stats.last_updated);

    let cache_status = if data.sheets.needs_refresh() {
        "stale".to_string()
    } else {
        "fresh".to_string()
    };

    Ok(HttpResponse::Ok().json(SheetStatsResponse {
        total_sheets: stats.total_sheets,
        live_sheets: stats.live_sheets,
        unlisted_sheets: stats.unlisted_sheets,
        total_zones: stats.total_zones,
        total_countries: stats.total_countries,
        last_updated: last_updated.to_rfc3339(),
        cache_status,
    }))
}

/// Reload the sheet store from its configured source
/// POST /api/v1/rates/refresh
pub async fn refresh_sheets(
    data: web::Data<AppState>,
    payload: web::Json<RefreshRequest>,
) -> Result<HttpResponse> {
    info!("Sheet refresh requested: {:?}", payload);

    let needs_refresh = payload.force.unwrap_or(false) || data.sheets.needs_refresh();
    if !needs_refresh {
        return Ok(HttpResponse::Ok().json(RefreshResponse {
            success: true,
            message: "Rate sheet data is already up to date".to_string(),
            sheets_loaded: data.sheets.statistics().total_sheets,
            timestamp: chrono::Utc::now().to_rfc3339(),
        }));
    }

    match data.sheets.force_refresh().await {
        Ok(()) => {
            let stats = data.sheets.statistics();
            info!("Rate sheets refreshed, {} loaded", stats.total_sheets);

            Ok(HttpResponse::Ok().json(RefreshResponse {
                success: true,
                message: "Rate sheet data refreshed successfully".to_string(),
                sheets_loaded: stats.total_sheets,
                timestamp: chrono::Utc::now().to_rfc3339(),
            }))
        }
        Err(e) => {
            warn!("Failed to refresh rate sheets: {}", e);

            Ok(HttpResponse::InternalServerError().json(RefreshResponse {
                success: false,
                message: format!("Failed to refresh rate sheets: {}", e),
                sheets_loaded: 0,
                timestamp: chrono::Utc::now().to_rfc3339(),
            }))
        }
    }
}

/// Configure rate endpoints
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/rates")
            .route("/range", web::post().to(rate_range))
            .route("/all-countries", web::post().to(rate_all_countries))
            .route("/quote", web::post().to(rate_quote))
            .route("/services", web::get().to(list_services))
            .route("/stats", web::get().to(sheet_stats))
            .route("/refresh", web::post().to(refresh_sheets)),
    )
    // Paths served by the previous back office; kept for its clients.
    .route("/rate-range", web::post().to(rate_range))
    .route("/rate-all-countries", web::post().to(rate_all_countries));
}
