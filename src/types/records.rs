//! Typed views of the JSON documents returned by the Elexon endpoints.
//!
//! Only the fields this crate consumes are declared; anything else in the
//! payload is ignored. Timestamps are kept as raw strings here and parsed by
//! the normalization strategies so that a bad value can be reported with its
//! position and field name.

use serde::Deserialize;

/// The `{ "data": [...] }` envelope every consumed endpoint uses.
#[derive(Debug, Deserialize, Clone)]
pub struct Envelope<T> {
    pub data: Vec<T>,
}

/// One day of temperature data.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct TemperatureRecord {
    /// Date-only string, e.g. `2023-01-01`.
    pub measurement_date: String,
    #[serde(deserialize_with = "Option::deserialize")]
    pub temperature: Option<f64>,
    #[serde(deserialize_with = "Option::deserialize")]
    pub temperature_reference_average: Option<f64>,
}

/// One settlement period of generation, with its per-type breakdown.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationRecord {
    pub start_time: String,
    pub data: Vec<GenerationByType>,
}

/// Output of a single PSR type within a [`GenerationRecord`].
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct GenerationByType {
    pub psr_type: String,
    // Required key, but `null` is kept as a missing value.
    #[serde(deserialize_with = "Option::deserialize")]
    pub quantity: Option<f64>,
}

/// One settlement period of demand outturn.
#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DemandRecord {
    pub start_time: String,
    // Absent or null values pass through as missing.
    #[serde(default)]
    pub initial_demand_outturn: Option<f64>,
}
