//! Service layer

pub mod sheets;

pub use sheets::{RateSheetService, SheetStatistics};
