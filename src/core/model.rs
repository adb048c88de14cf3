//! Rate-sheet data model
//!
//! Mirrors the document shape the back office stores per carrier service:
//! weight slabs with one price per zone, zone-to-country mappings, and named
//! surcharges at both sheet and zone level. Field names stay camelCase on
//! the wire for compatibility with the existing document database.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Visibility status of a rate sheet
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SheetStatus {
    /// Publicly listed sheet, subject to profit markup
    Live,
    /// Contracted sheet visible only to its assigned owner; the stored
    /// rates are final and never marked up
    Unlisted,
}

/// How a surcharge amount is derived
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ChargeType {
    /// Percentage of the running subtotal
    Percentage,
    /// Flat amount per kg of the requested weight (ceiling applied)
    PerKg,
    /// Flat amount per shipment
    OneTime,
}

/// A named surcharge rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Surcharge {
    pub charge_name: String,
    pub charge_type: ChargeType,
    pub charge_value: f64,
}

impl Surcharge {
    pub fn new(name: &str, charge_type: ChargeType, value: f64) -> Self {
        Self {
            charge_name: name.to_string(),
            charge_type,
            charge_value: value,
        }
    }
}

/// Zone surcharges as stored in documents
///
/// Older sheets persisted zone surcharges as a flat `{name: value}` map of
/// per-kg amounts; newer ones use the same object list as sheet charges.
/// Both shapes deserialize here and normalize via [`Zone::surcharges`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ZoneCharges {
    List(Vec<Surcharge>),
    PerKgMap(HashMap<String, f64>),
}

impl Default for ZoneCharges {
    fn default() -> Self {
        ZoneCharges::List(Vec::new())
    }
}

/// A zone: a named grouping of destination countries sharing one price
/// column in the sheet's slab table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Zone {
    /// Zone identifier; matches a price key in each weight slab
    pub zone: String,
    /// Destination countries served by this zone
    #[serde(default)]
    pub countries: Vec<String>,
    /// Zone-specific surcharges (legacy map or canonical list)
    #[serde(default)]
    pub extra_charges: ZoneCharges,
}

impl Zone {
    /// Zone surcharges in canonical list form
    ///
    /// Legacy map entries are per-kg amounts by definition.
    pub fn surcharges(&self) -> Vec<Surcharge> {
        match &self.extra_charges {
            ZoneCharges::List(list) => list.clone(),
            ZoneCharges::PerKgMap(map) => {
                let mut charges: Vec<Surcharge> = map
                    .iter()
                    .map(|(name, value)| Surcharge::new(name, ChargeType::PerKg, *value))
                    .collect();
                // Map iteration order is unspecified; keep output stable.
                charges.sort_by(|a, b| a.charge_name.cmp(&b.charge_name));
                charges
            }
        }
    }

    /// Whether this zone serves the given country (case-insensitive)
    pub fn serves(&self, country: &str) -> bool {
        let wanted = country.trim();
        self.countries
            .iter()
            .any(|c| c.trim().eq_ignore_ascii_case(wanted))
    }
}

/// A weight breakpoint row holding one price per zone
///
/// Documents store slab prices as sibling keys of `kg`
/// (`{"kg": 1.5, "1": 120, "2": 150}`), so deserialization collects every
/// numeric non-`kg` key into the price map and ignores the rest (`_id` and
/// similar bookkeeping fields).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeightSlab {
    pub kg: f64,
    #[serde(flatten)]
    pub prices: HashMap<String, f64>,
}

impl WeightSlab {
    pub fn new(kg: f64, prices: &[(&str, f64)]) -> Self {
        Self {
            kg,
            prices: prices
                .iter()
                .map(|(zone, price)| (zone.to_string(), *price))
                .collect(),
        }
    }

    /// Price stored for the given zone in this slab
    pub fn price_for_zone(&self, zone: &str) -> Option<f64> {
        self.prices.get(zone).copied()
    }
}

impl<'de> Deserialize<'de> for WeightSlab {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = HashMap::<String, serde_json::Value>::deserialize(deserializer)?;
        let kg = raw
            .get("kg")
            .and_then(serde_json::Value::as_f64)
            .ok_or_else(|| de::Error::missing_field("kg"))?;
        let prices = raw
            .iter()
            .filter(|(key, _)| key.as_str() != "kg")
            .filter_map(|(key, value)| value.as_f64().map(|price| (key.clone(), price)))
            .collect();
        Ok(Self { kg, prices })
    }
}

/// A complete rate sheet for one carrier service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RateSheet {
    /// Unique sheet identifier used for lookups
    pub original_name: String,
    /// Carrier service label shown to users
    #[serde(default)]
    pub service: String,
    /// Service type (document, parcel, ...)
    #[serde(default, rename = "type")]
    pub kind: String,
    pub status: SheetStatus,
    /// Owner of an unlisted sheet; ignored for live sheets
    #[serde(default)]
    pub assigned_to: Option<String>,
    /// Weight slabs ordered by the back office; lookup does not assume order
    #[serde(default)]
    pub rates: Vec<WeightSlab>,
    #[serde(default)]
    pub zones: Vec<Zone>,
    /// Sheet-wide surcharges applied to every zone
    #[serde(default)]
    pub charges: Vec<Surcharge>,
}

impl RateSheet {
    /// First zone serving the given country, in document order
    ///
    /// A country present in two zones resolves to the first match.
    pub fn zone_for_country(&self, country: &str) -> Option<&Zone> {
        self.zones.iter().find(|zone| zone.serves(country))
    }

    /// All countries this sheet serves, in zone order, first occurrence wins
    pub fn serviced_countries(&self) -> Vec<String> {
        let mut seen = std::collections::HashSet::new();
        let mut countries = Vec::new();
        for zone in &self.zones {
            for country in &zone.countries {
                if seen.insert(country.trim().to_ascii_lowercase()) {
                    countries.push(country.clone());
                }
            }
        }
        countries
    }
}
