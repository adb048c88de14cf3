//! Rate-sheet fixtures and app-state factory

use actix_web::web;
use shiprates_rs::config::Config;
use shiprates_rs::core::{
    ChargeType, RateSheet, SheetStatus, Surcharge, WeightSlab, Zone, ZoneCharges,
};
use shiprates_rs::server::AppState;
use shiprates_rs::services::RateSheetService;
use std::sync::Arc;
use std::time::Duration;

/// Live sheet: zone 1 (India, Nepal), zone 2 (France); slabs at 0.5/1/5 kg
pub fn express_sheet() -> RateSheet {
    RateSheet {
        original_name: "orbit-express".to_string(),
        service: "Orbit Express".to_string(),
        kind: "parcel".to_string(),
        status: SheetStatus::Live,
        assigned_to: None,
        rates: vec![
            WeightSlab::new(0.5, &[("1", 60.0), ("2", 90.0)]),
            WeightSlab::new(1.0, &[("1", 100.0), ("2", 150.0)]),
            WeightSlab::new(5.0, &[("1", 400.0), ("2", 600.0)]),
        ],
        zones: vec![
            Zone {
                zone: "1".to_string(),
                countries: vec!["India".to_string(), "Nepal".to_string()],
                extra_charges: ZoneCharges::default(),
            },
            Zone {
                zone: "2".to_string(),
                countries: vec!["France".to_string()],
                extra_charges: ZoneCharges::default(),
            },
        ],
        charges: Vec::new(),
    }
}

/// Unlisted sheet assigned to user `u1`; single zone, single slab
pub fn contract_sheet() -> RateSheet {
    RateSheet {
        original_name: "orbit-contract".to_string(),
        service: "Orbit Contract".to_string(),
        kind: "parcel".to_string(),
        status: SheetStatus::Unlisted,
        assigned_to: Some("u1".to_string()),
        rates: vec![WeightSlab::new(1.0, &[("1", 80.0)])],
        zones: vec![Zone {
            zone: "1".to_string(),
            countries: vec!["India".to_string()],
            extra_charges: ZoneCharges::default(),
        }],
        charges: Vec::new(),
    }
}

/// Live sheet with a per-kg and a percentage surcharge
pub fn surcharged_sheet() -> RateSheet {
    let mut sheet = express_sheet();
    sheet.original_name = "orbit-plus".to_string();
    sheet.service = "Orbit Plus".to_string();
    sheet.charges = vec![
        Surcharge::new("handling", ChargeType::PerKg, 10.0),
        Surcharge::new("fuel", ChargeType::Percentage, 10.0),
    ];
    sheet
}

/// App state backed by an in-memory store seeded with the given sheets
pub fn state_with_sheets(sheets: Vec<RateSheet>) -> web::Data<AppState> {
    let service = RateSheetService::new(None, Duration::from_secs(3600));
    for sheet in sheets {
        service.upsert_sheet(sheet);
    }
    web::Data::new(AppState::new(Config::default(), Arc::new(service)))
}
