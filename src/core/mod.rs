//! Core domain logic for the rate gateway
//!
//! Holds the rate-sheet data model, the pure rate calculator, and the
//! sheet visibility policy. Nothing in this module performs I/O.

pub mod calculator;
pub mod model;
pub mod visibility;

pub use calculator::{RateQuote, compute_quote, compute_rate, weight_steps};
pub use model::{ChargeType, RateSheet, SheetStatus, Surcharge, WeightSlab, Zone, ZoneCharges};
pub use visibility::{Requester, RequesterRole, can_view};
