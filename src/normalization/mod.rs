//! Strategies turning one raw endpoint payload into a uniform, `timestamp`
//! keyed Polars `DataFrame`.

pub mod demand;
pub mod error;
pub mod generation;
pub mod temperature;
mod timestamp;

use crate::normalization::error::NormalizationError;
use crate::source::http_data_source::RawPayload;
use crate::types::records::Envelope;
use chrono::NaiveDateTime;
use polars::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Maps a raw JSON payload of one endpoint into a normalized frame.
///
/// Implementations are pure: the same payload always yields the same frame,
/// and nothing outside the returned frame is touched. A payload that does not
/// match the expected structure is an error, never a partially filled frame.
pub trait NormalizationStrategy {
    /// Converts `payload` into a frame with a `timestamp` column and the
    /// strategy-specific value columns.
    fn process(&self, payload: &RawPayload) -> Result<DataFrame, NormalizationError>;

    /// A short, human readable label used in logs and error messages.
    fn get_strategy_info(&self) -> &'static str;
}

/// Deserializes the `data` list of an `{ "data": [...] }` payload.
pub(crate) fn read_envelope<T: DeserializeOwned>(
    payload: &RawPayload,
    strategy: &'static str,
) -> Result<Vec<T>, NormalizationError> {
    Envelope::<T>::deserialize(payload)
        .map(|envelope| envelope.data)
        .map_err(|source| NormalizationError::Structure { strategy, source })
}

/// Builds a `Datetime(ms)` column, the timestamp type shared by all
/// date-time keyed frames.
pub(crate) fn datetime_column(name: &str, values: Vec<NaiveDateTime>) -> PolarsResult<Column> {
    let series = Series::new(name.into(), values)
        .cast(&DataType::Datetime(TimeUnit::Milliseconds, None))?;
    Ok(Column::from(series))
}
