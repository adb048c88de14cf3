//! Shipping-rate calculation
//!
//! Pure functions deriving a final per-kg price from a rate sheet and a
//! (country, weight, profit, GST) query. Every failure mode resolves to
//! `None` so batch callers can record a missing cell and keep going.
//!
//! Pipeline per query:
//! 1. resolve the destination zone (first zone listing the country),
//! 2. resolve the weight slab (0.5 kg rounding, fallback to the next-lower
//!    slab, never the next-higher),
//! 3. extrapolate the slab's per-kg price to the rounded weight,
//! 4. add profit markup unless the sheet is unlisted,
//! 5. apply fixed surcharges, then percentage surcharges on the subtotal
//!    that already includes the fixed ones,
//! 6. optionally add GST, and normalize back to per-kg of the raw weight.

use crate::core::model::{ChargeType, RateSheet, SheetStatus, WeightSlab};
use std::collections::BTreeMap;

/// GST applied when the caller requests tax-inclusive pricing
pub const GST_PERCENT: f64 = 18.0;

/// Weight below which batch grids step by half kilograms
const FINE_STEP_LIMIT_KG: f64 = 20.0;

const KG_EPSILON: f64 = 1e-9;

/// Full cost breakdown for a single (service, country, weight) cell
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RateQuote {
    pub service: String,
    pub country: String,
    pub zone: String,
    /// Weight as requested by the caller
    pub requested_weight: f64,
    /// Requested weight rounded to the nearest 0.5 kg
    pub chargeable_weight: f64,
    /// Weight of the slab the base rate came from
    pub slab_kg: f64,
    /// Slab per-kg price extrapolated to the chargeable weight
    pub base_rate: f64,
    /// Profit markup amount; zero for unlisted sheets
    pub profit_amount: f64,
    /// Per-charge-name amounts, fixed and percentage combined
    pub charge_amounts: BTreeMap<String, f64>,
    pub gst_amount: f64,
    /// Final amount for the whole shipment
    pub total: f64,
    /// `total / requested_weight`, rounded to 2 decimals
    pub price_per_kg: f64,
}

/// Compute the final per-kg price for one cell
///
/// Returns `None` when the sheet does not serve the country, no slab covers
/// the weight, or the matched slab has no price for the resolved zone.
pub fn compute_rate(
    sheet: &RateSheet,
    country: &str,
    weight: f64,
    profit_percent: f64,
    include_gst: bool,
) -> Option<f64> {
    compute_quote(sheet, country, weight, profit_percent, include_gst)
        .map(|quote| quote.price_per_kg)
}

/// Compute the full cost breakdown for one cell
pub fn compute_quote(
    sheet: &RateSheet,
    country: &str,
    weight: f64,
    profit_percent: f64,
    include_gst: bool,
) -> Option<RateQuote> {
    if !weight.is_finite() || weight <= 0.0 {
        return None;
    }

    let zone = sheet.zone_for_country(country)?;
    let zone_charges = zone.surcharges();

    let chargeable_weight = round_to_half_kg(weight);
    let slab = resolve_slab(&sheet.rates, chargeable_weight)?;
    if slab.kg <= 0.0 {
        return None;
    }

    let slab_price = slab.price_for_zone(&zone.zone)?;
    let per_kg_rate = slab_price / slab.kg;
    let base_rate = per_kg_rate * chargeable_weight;

    // Unlisted sheets carry negotiated rates; the stored price is final.
    let profit_amount = if sheet.status == SheetStatus::Unlisted {
        0.0
    } else {
        base_rate * profit_percent / 100.0
    };
    let subtotal_after_profit = base_rate + profit_amount;

    let mut charge_amounts: BTreeMap<String, f64> = BTreeMap::new();
    let mut fixed_total = 0.0;

    // Pass 1: fixed charges. Per-kg amounts bill the ceiling of the raw
    // requested weight, not the 0.5-rounded chargeable weight (observed
    // production behavior, kept as-is).
    for charge in sheet.charges.iter().chain(zone_charges.iter()) {
        let amount = match charge.charge_type {
            ChargeType::PerKg => charge.charge_value * weight.ceil(),
            ChargeType::OneTime => charge.charge_value,
            ChargeType::Percentage => continue,
        };
        *charge_amounts.entry(charge.charge_name.clone()).or_insert(0.0) += amount;
        fixed_total += amount;
    }

    let subtotal_after_fixed = subtotal_after_profit + fixed_total;

    // Pass 2: percentage charges compound on top of the fixed surcharges.
    let mut percentage_total = 0.0;
    for charge in sheet.charges.iter().chain(zone_charges.iter()) {
        if charge.charge_type != ChargeType::Percentage {
            continue;
        }
        let amount = subtotal_after_fixed * charge.charge_value / 100.0;
        *charge_amounts.entry(charge.charge_name.clone()).or_insert(0.0) += amount;
        percentage_total += amount;
    }

    let total_charges = fixed_total + percentage_total;
    let total_before_gst = subtotal_after_profit + total_charges;
    let gst_amount = if include_gst {
        total_before_gst * GST_PERCENT / 100.0
    } else {
        0.0
    };
    let total = total_before_gst + gst_amount;

    Some(RateQuote {
        service: sheet.original_name.clone(),
        country: country.trim().to_string(),
        zone: zone.zone.clone(),
        requested_weight: weight,
        chargeable_weight,
        slab_kg: slab.kg,
        base_rate,
        profit_amount,
        charge_amounts,
        gst_amount,
        total,
        price_per_kg: round2(total / weight),
    })
}

/// Round a weight to the nearest 0.5 kg increment
pub fn round_to_half_kg(weight: f64) -> f64 {
    (weight * 2.0).round() / 2.0
}

/// Weights covered by a batch grid: 0.5 kg steps below 20 kg, 1 kg at and
/// above, both bounds inclusive
pub fn weight_steps(start: f64, end: f64) -> Vec<f64> {
    let mut steps = Vec::new();
    let mut weight = start;
    while weight <= end + KG_EPSILON {
        steps.push(weight);
        weight += if weight < FINE_STEP_LIMIT_KG { 0.5 } else { 1.0 };
    }
    steps
}

/// Slab matching: exact match on the rounded weight, otherwise the largest
/// slab at or below it. A weight below the smallest slab has no match.
fn resolve_slab(rates: &[WeightSlab], rounded_weight: f64) -> Option<&WeightSlab> {
    if let Some(exact) = rates
        .iter()
        .find(|slab| (slab.kg - rounded_weight).abs() < KG_EPSILON)
    {
        return Some(exact);
    }

    rates
        .iter()
        .filter(|slab| slab.kg <= rounded_weight + KG_EPSILON)
        .max_by(|a, b| a.kg.total_cmp(&b.kg))
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
