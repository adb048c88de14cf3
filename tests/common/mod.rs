//! Common test utilities for shiprates-rs

pub mod fixtures;

pub use fixtures::{contract_sheet, express_sheet, state_with_sheets, surcharged_sheet};
