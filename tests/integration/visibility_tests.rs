//! Header-driven visibility tests
//!
//! The `userId`/`userType` headers decide which sheets each request can
//! price against: staff see everything, owners see their contracted
//! sheets, everyone else sees live sheets only.

use crate::common::{contract_sheet, express_sheet, state_with_sheets};
use actix_web::{App, http::StatusCode, test};
use serde_json::{Value, json};
use shiprates_rs::server::routes;

macro_rules! init_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .configure(routes::rates::configure_routes),
        )
        .await
    };
}

#[actix_web::test]
async fn service_listing_respects_visibility() {
    let state = state_with_sheets(vec![express_sheet(), contract_sheet()]);
    let app = init_app!(state.clone());

    let req = test::TestRequest::get()
        .uri("/api/v1/rates/services")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!(["orbit-express"]));

    let req = test::TestRequest::get()
        .uri("/api/v1/rates/services")
        .insert_header(("userType", "client"))
        .insert_header(("userId", "u1"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!(["orbit-contract", "orbit-express"]));

    let req = test::TestRequest::get()
        .uri("/api/v1/rates/services")
        .insert_header(("userType", "admin"))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(body["data"], json!(["orbit-contract", "orbit-express"]));
}

#[actix_web::test]
async fn unlisted_sheet_hidden_from_other_users() {
    let state = state_with_sheets(vec![contract_sheet()]);
    let app = init_app!(state.clone());

    let payload = json!({
        "startWeight": 1.0,
        "endWeight": 1.0,
        "selectedServices": ["orbit-contract"]
    });

    // Anonymous caller: the sheet does not exist as far as they can tell
    let req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .set_json(payload.clone())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // A different user is rejected the same way
    let req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .insert_header(("userType", "client"))
        .insert_header(("userId", "u2"))
        .set_json(payload.clone())
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    // The assigned owner gets rates
    let req = test::TestRequest::post()
        .uri("/api/v1/rates/all-countries")
        .insert_header(("userType", "client"))
        .insert_header(("userId", "u1"))
        .set_json(payload)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);
}

#[actix_web::test]
async fn invisible_sheet_becomes_null_column_in_range() {
    let state = state_with_sheets(vec![express_sheet(), contract_sheet()]);
    let app = init_app!(state.clone());

    let req = test::TestRequest::post()
        .uri("/api/v1/rates/range")
        .set_json(json!({
            "startWeight": 1.0,
            "endWeight": 1.0,
            "country": "India",
            "selectedServices": ["orbit-express", "orbit-contract"]
        }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;

    // Live sheet priced, contracted sheet nulled for the anonymous caller
    assert_eq!(body["rows"][0]["rates"][0], json!(100.0));
    assert_eq!(body["rows"][0]["rates"][1], Value::Null);
}

#[actix_web::test]
async fn unlisted_rates_ignore_profit_markup() {
    let state = state_with_sheets(vec![contract_sheet()]);
    let app = init_app!(state.clone());

    let mut results = Vec::new();
    for profit in [0.0, 50.0] {
        let req = test::TestRequest::post()
            .uri("/api/v1/rates/quote")
            .insert_header(("userType", "client"))
            .insert_header(("userId", "u1"))
            .set_json(json!({
                "service": "orbit-contract",
                "country": "India",
                "weight": 1.0,
                "profitPercent": profit
            }))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        results.push(body["pricePerKg"].as_f64().unwrap());
    }

    assert_eq!(results[0], 80.0);
    assert_eq!(results[0], results[1]);
}
