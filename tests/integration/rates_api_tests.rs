//! Rate endpoint integration tests
//!
//! Drives the actix-web surface in-process: request validation, grid
//! shapes, null cells, and agreement between the batch endpoints and the
//! single-quote endpoint.

use crate::common::{express_sheet, state_with_sheets, surcharged_sheet};
use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use shiprates_rs::server::routes;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .configure(routes::rates::configure_routes)
                .configure(routes::health::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn rate_range_returns_grid_with_null_gaps() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(json!({
            "startWeight": 0.5,
            "endWeight": 2.0,
            "country": "India",
            "selectedServices": ["orbit-express", "unknown-service"],
            "profitPercent": 10,
            "includeGST": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["countryName"], "India");
    assert_eq!(
        body["headers"],
        json!(["orbit-express", "unknown-service"])
    );

    let rows = body["rows"].as_array().unwrap();
    assert_eq!(rows.len(), 4); // 0.5, 1.0, 1.5, 2.0

    // 0.5 kg slab exists: 60 * 1.1 / 0.5 = 132
    assert_eq!(rows[0]["weight"], json!(0.5));
    assert_eq!(rows[0]["rates"][0], json!(132.0));
    // 1.5 kg has no slab; the 1 kg slab extrapolates to the same per-kg
    assert_eq!(rows[2]["rates"][0], json!(110.0));
    // Unknown service column stays null for every row
    for row in rows {
        assert_eq!(row["rates"][1], Value::Null);
    }
}

#[actix_web::test]
async fn rate_range_requires_country_and_services() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(json!({
            "startWeight": 0.5,
            "endWeight": 2.0,
            "selectedServices": ["orbit-express"]
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(json!({
            "startWeight": 0.5,
            "endWeight": 2.0,
            "country": "India"
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[actix_web::test]
async fn rate_range_rejects_bad_weights_and_profit() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    for payload in [
        json!({"startWeight": 0, "endWeight": 2, "country": "India", "selectedServices": ["orbit-express"]}),
        json!({"startWeight": 3, "endWeight": 2, "country": "India", "selectedServices": ["orbit-express"]}),
        json!({"startWeight": 1, "endWeight": 2, "country": "India", "selectedServices": ["orbit-express"], "profitPercent": 150}),
    ] {
        let req = test::TestRequest::post()
            .uri("/api/v1/rates/range")
            .set_json(payload)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn all_countries_requires_exactly_one_service() {
    let app = init_app!(state_with_sheets(vec![express_sheet(), surcharged_sheet()]));

    for services in [json!([]), json!(["orbit-express", "orbit-plus"])] {
        let req = test::TestRequest::post()
            .uri("/api/v1/rates/all-countries")
            .set_json(json!({
                "startWeight": 1.0,
                "endWeight": 2.0,
                "selectedServices": services
            }))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}

#[actix_web::test]
async fn all_countries_unknown_service_is_not_found() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .set_json(json!({
            "startWeight": 1.0,
            "endWeight": 2.0,
            "selectedServices": ["unknown-service"]
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["error"]["code"], "NOT_FOUND");
}

#[actix_web::test]
async fn all_countries_grid_covers_every_zone_country() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .set_json(json!({
            "startWeight": 1.0,
            "endWeight": 2.0,
            "selectedServices": ["orbit-express"],
            "profitPercent": 10
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["service"], "orbit-express");
    assert_eq!(body["countries"], json!(["India", "Nepal", "France"]));

    let rows = body["weightRanges"].as_array().unwrap();
    assert_eq!(rows.len(), 3); // 1.0, 1.5, 2.0

    // Zone 1 (India, Nepal) shares one price column
    assert_eq!(rows[0]["rates"][0], rows[0]["rates"][1]);
    assert_eq!(rows[0]["rates"][0], json!(110.0));
    // Zone 2 (France): 150 * 1.1 = 165 per kg
    assert_eq!(rows[0]["rates"][2], json!(165.0));
}

#[actix_web::test]
async fn batch_endpoints_and_quote_agree_on_overlapping_cell() {
    let state = state_with_sheets(vec![surcharged_sheet()]);
    let app = init_app!(state.clone());

    let range_req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(json!({
            "startWeight": 1.5,
            "endWeight": 1.5,
            "country": "Nepal",
            "selectedServices": ["orbit-plus"],
            "profitPercent": 12.5,
            "includeGST": true
        }))
        .to_request();
    let range_body: Value = test::call_and_read_body_json(&app, range_req).await;
    let range_cell = range_body["rows"][0]["rates"][0].as_f64().unwrap();

    let all_req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .set_json(json!({
            "startWeight": 1.5,
            "endWeight": 1.5,
            "selectedServices": ["orbit-plus"],
            "profitPercent": 12.5,
            "includeGST": true
        }))
        .to_request();
    let all_body: Value = test::call_and_read_body_json(&app, all_req).await;
    let countries = all_body["countries"].as_array().unwrap();
    let nepal_index = countries
        .iter()
        .position(|c| c == "Nepal")
        .unwrap();
    let all_cell = all_body["weightRanges"][0]["rates"][nepal_index]
        .as_f64()
        .unwrap();

    let quote_req = test::TestRequest::post()
        .uri("/api/v1/rates/quote")
        .set_json(json!({
            "service": "orbit-plus",
            "country": "Nepal",
            "weight": 1.5,
            "profitPercent": 12.5,
            "includeGST": true
        }))
        .to_request();
    let quote_body: Value = test::call_and_read_body_json(&app, quote_req).await;
    let quote_cell = quote_body["pricePerKg"].as_f64().unwrap();

    assert_eq!(range_cell, all_cell);
    assert_eq!(range_cell, quote_cell);
}

#[actix_web::test]
async fn quote_returns_full_breakdown() {
    let app = init_app!(state_with_sheets(vec![surcharged_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/quote")
        .set_json(json!({
            "service": "orbit-plus",
            "country": "India",
            "weight": 1.0,
            "profitPercent": 0,
            "includeGST": false
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(body["zone"], "1");
    assert_eq!(body["baseRate"], json!(100.0));
    assert_eq!(body["profitAmount"], json!(0.0));
    // handling: 10/kg on ceil(1.0); fuel: 10% of (100 + 10)
    assert_eq!(body["chargeAmounts"]["handling"], json!(10.0));
    assert_eq!(body["chargeAmounts"]["fuel"], json!(11.0));
    assert_eq!(body["gstAmount"], json!(0.0));
    assert_eq!(body["total"], json!(121.0));
    assert_eq!(body["pricePerKg"], json!(121.0));
}

#[actix_web::test]
async fn quote_for_unserviced_country_is_not_found() {
    let app = init_app!(state_with_sheets(vec![express_sheet()]));

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/quote")
        .set_json(json!({
            "service": "orbit-express",
            "country": "Brazil",
            "weight": 1.0
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
}

#[actix_web::test]
async fn legacy_paths_match_scoped_routes() {
    let state = state_with_sheets(vec![express_sheet()]);
    let app = init_app!(state.clone());

    let payload = json!({
        "startWeight": 1.0,
        "endWeight": 2.0,
        "country": "India",
        "selectedServices": ["orbit-express"],
        "profitPercent": 10
    });

    let scoped_req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(payload.clone())
        .to_request();
    let scoped: Value = test::call_and_read_body_json(&app, scoped_req).await;

    let legacy_req = test::TestRequest::post()
        .uri("/rate-range")
        .set_json(payload)
        .to_request();
    let legacy: Value = test::call_and_read_body_json(&app, legacy_req).await;

    assert_eq!(scoped, legacy);
}

#[actix_web::test]
async fn stats_and_health_report_store_contents() {
    let app = init_app!(state_with_sheets(vec![express_sheet(), surcharged_sheet()]));

    let req = test::TestRequest::get()
        .uri("/api/v1/rates/stats")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["totalSheets"], json!(2));
    assert_eq!(body["liveSheets"], json!(2));
    assert_eq!(body["totalCountries"], json!(3));

    let req = test::TestRequest::get().uri("/health").to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["status"], "healthy");
}
